use crate::{
    context::Context,
    stage::{NFC, Stage},
};
use std::borrow::Cow;

/// Locale-sensitive lowercasing for lookup keys.
///
/// For languages flagged with `dotless_i` (Turkish, Azerbaijani, Kazakh) the
/// text is first composed with NFC so `I` + combining dot becomes `İ`, then
/// `İ` → `i` and `I` → `ı` before the ordinary Unicode lowercase mapping.
/// Everything else gets plain Unicode lowercasing, including the
/// word-final sigma rule.
pub struct CaseFold;

#[inline(always)]
fn dotted_i_fold(c: char) -> Option<char> {
    match c {
        'İ' => Some('i'),
        'I' => Some('ı'),
        _ => None,
    }
}

impl Stage for CaseFold {
    fn name(&self) -> &'static str {
        "case_fold"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if ctx.profile.dotless_i && NFC.needs_apply(text, ctx) {
            return true;
        }
        text.chars().any(|c| c.to_lowercase().next() != Some(c))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text; // ← ZERO-COPY
        }

        if !ctx.profile.dotless_i {
            return Cow::Owned(text.to_lowercase());
        }

        let composed = NFC.apply(text, ctx);
        let mut out = String::with_capacity(composed.len());
        for c in composed.chars() {
            out.push(dotted_i_fold(c).unwrap_or(c));
        }
        Cow::Owned(out.to_lowercase())
    }
}
