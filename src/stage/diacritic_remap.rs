//! Unifies the two spellings of s/t with a hook below.
//!
//! Romanian officially uses comma-below (`ș ț`); Turkish, Azerbaijani and
//! Kazakh use cedillas (`ş ţ`). Text in the wild mixes both, so lookup keys
//! are pushed to whichever form the language's tables were built with.
//! Runs after case folding, so only lowercase letters are mapped.

use crate::{
    context::Context,
    lang::DiacriticRemap,
    stage::Stage,
};
use std::borrow::Cow;

impl DiacriticRemap {
    #[inline(always)]
    pub const fn map_char(self, c: char) -> char {
        match (self, c) {
            (DiacriticRemap::Cedillas, '\u{0219}') => '\u{015F}', // ș → ş
            (DiacriticRemap::Cedillas, '\u{021B}') => '\u{0163}', // ț → ţ
            (DiacriticRemap::Commas, '\u{015F}') => '\u{0219}',   // ş → ș
            (DiacriticRemap::Commas, '\u{0163}') => '\u{021B}',   // ţ → ț
            _ => c,
        }
    }
}

pub struct DiacriticRemapStage;

impl Stage for DiacriticRemapStage {
    fn name(&self) -> &'static str {
        "diacritic_remap"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        let Some(remap) = ctx.profile.diacritic_remap else {
            return false;
        };
        text.chars().any(|c| remap.map_char(c) != c)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let Some(remap) = ctx.profile.diacritic_remap else {
            return text;
        };
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        Cow::Owned(text.chars().map(|c| remap.map_char(c)).collect())
    }
}
