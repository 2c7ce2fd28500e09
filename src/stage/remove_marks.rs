//! src/stage/remove_marks.rs
//!
//! Strips nonspacing combining marks (`Mn`) and the Arabic tatweel for
//! scripts whose vowel pointing is optional: Arabic and Hebrew.

use crate::{
    context::Context,
    stage::Stage,
    unicode::is_removable_mark,
};
use std::borrow::Cow;

pub struct RemoveMarks;

impl Stage for RemoveMarks {
    fn name(&self) -> &'static str {
        "remove_marks"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if !ctx.profile.remove_marks || text.is_ascii() {
            return false;
        }
        text.chars().any(is_removable_mark)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        Cow::Owned(
            text.chars().filter(|&c| !is_removable_mark(c)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::LanguageProfile;

    #[test]
    fn strips_arabic_harakat_and_tatweel() {
        let ctx = Context::new(LanguageProfile::resolve("ar"));
        let out = RemoveMarks
            .apply(Cow::Borrowed("مَرْحَبًا كـــتاب"), &ctx);
        assert_eq!(out, "مرحبا كتاب");
    }

    #[test]
    fn strips_hebrew_niqqud() {
        let ctx = Context::new(LanguageProfile::resolve("he"));
        let out = RemoveMarks.apply(Cow::Borrowed("שָׁלוֹם"), &ctx);
        assert_eq!(out, "שלום");
    }

    #[test]
    fn leaves_other_languages_alone() {
        let ctx = Context::new(LanguageProfile::resolve("fr"));
        let input = "cafe\u{0301}";
        assert!(!RemoveMarks.needs_apply(input, &ctx));
        let out = RemoveMarks.apply(Cow::Borrowed(input), &ctx);
        assert!(matches!(out, Cow::Borrowed(_)));
    }
}
