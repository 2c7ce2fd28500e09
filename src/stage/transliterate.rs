//! stage/transliterate.rs – Cyrillic → Latin for languages that write in both
//! * Serbian and Azerbaijani tables, keyed by the lowercase Cyrillic letter
//! * Preserves case: an uppercase letter yields an all-uppercase target
//!   (`Љ` → `LJ`), so the later case fold sees the same thing either way
//! * Zero-copy when the profile has no scheme or the text has nothing to map
use crate::{
    context::Context,
    lang::Transliteration,
    stage::Stage,
};
use phf::{Map, phf_map};
use std::borrow::Cow;

static SERBIAN_LATIN: Map<char, &'static str> = phf_map! {
    'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d", 'ђ' => "đ",
    'е' => "e", 'ж' => "ž", 'з' => "z", 'и' => "i", 'ј' => "j", 'к' => "k",
    'л' => "l", 'љ' => "lj", 'м' => "m", 'н' => "n", 'њ' => "nj", 'о' => "o",
    'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t", 'ћ' => "ć", 'у' => "u",
    'ф' => "f", 'х' => "h", 'ц' => "c", 'ч' => "č", 'џ' => "dž", 'ш' => "š",
};

static AZERBAIJANI_LATIN: Map<char, &'static str> = phf_map! {
    'а' => "a", 'б' => "b", 'в' => "v", 'г' => "q", 'ғ' => "ğ", 'д' => "d",
    'е' => "e", 'ә' => "ə", 'ж' => "j", 'з' => "z", 'и' => "i", 'ы' => "ı",
    'ј' => "y", 'к' => "k", 'ҝ' => "g", 'л' => "l", 'м' => "m", 'н' => "n",
    'о' => "o", 'ө' => "ö", 'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t",
    'у' => "u", 'ү' => "ü", 'ф' => "f", 'х' => "x", 'һ' => "h", 'ч' => "ç",
    'ҹ' => "c", 'ш' => "ş",
};

impl Transliteration {
    #[inline]
    fn table(self) -> &'static Map<char, &'static str> {
        match self {
            Transliteration::SerbianLatin => &SERBIAN_LATIN,
            Transliteration::AzerbaijaniLatin => &AZERBAIJANI_LATIN,
        }
    }

    /// Latin replacement for one Cyrillic letter, or `None` to keep it.
    pub fn map_char(self, c: char) -> Option<Cow<'static, str>> {
        let lower = c.to_lowercase().next().unwrap_or(c);
        let target = *self.table().get(&lower)?;
        if lower == c {
            return Some(Cow::Borrowed(target));
        }
        Some(Cow::Owned(self.uppercase(target)))
    }

    fn uppercase(self, target: &str) -> String {
        match self {
            // Azerbaijani Latin keeps the dot: и → i, И → İ
            Transliteration::AzerbaijaniLatin => target
                .chars()
                .flat_map(|c| match c {
                    'i' => vec!['İ'],
                    other => other.to_uppercase().collect(),
                })
                .collect(),
            Transliteration::SerbianLatin => target.to_uppercase(),
        }
    }
}

/// Public stage – zero-sized, stateless.
pub struct Transliterate;

impl Stage for Transliterate {
    fn name(&self) -> &'static str {
        "transliterate"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        let Some(scheme) = ctx.profile.transliteration else {
            return false;
        };
        text.chars().any(|c| scheme.map_char(c).is_some())
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let Some(scheme) = ctx.profile.transliteration else {
            return text; // Zero-cost fast path
        };

        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut changed = false;
        for c in text.chars() {
            match scheme.map_char(c) {
                Some(latin) => {
                    out.push_str(&latin);
                    changed = true;
                }
                None => out.push(c),
            }
        }

        if changed {
            Cow::Owned(out)
        } else {
            text
        }
    }
}
