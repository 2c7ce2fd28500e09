use crate::{
    context::Context,
    stage::Stage,
    unicode::uncurl_quote_char,
};
use std::borrow::Cow;

/// Replace curly and prime quotation marks with ASCII ones.
///
/// | Unicode | ASCII |
/// |---------|-------|
/// | `‘`, `’`, `′` | `'` |
/// | `“`, `”`, `″` | `"` |
///
/// Frequency tables store apostrophes in their ASCII form, so lookup keys
/// must match. All other characters are left unchanged.
pub struct UncurlQuotes;

impl Stage for UncurlQuotes {
    fn name(&self) -> &'static str {
        "uncurl_quotes"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        text.chars().any(|c| uncurl_quote_char(c) != c)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        Cow::Owned(text.chars().map(uncurl_quote_char).collect())
    }
}
