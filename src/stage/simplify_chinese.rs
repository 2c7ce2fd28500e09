use crate::{
    context::Context,
    lang::LookupTransliteration,
    stage::{CaseFold, Stage},
};
use std::{borrow::Cow, collections::HashMap};

/// Character-by-character Traditional → Simplified mapping.
///
/// A source character may map to a multi-character target. An empty map is
/// the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplificationMap {
    map: HashMap<char, String>,
}

impl SimplificationMap {
    pub fn new(map: HashMap<char, String>) -> Self {
        Self { map }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn get(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    #[inline]
    fn maps_any(&self, text: &str) -> bool {
        !self.map.is_empty() && text.chars().any(|c| self.map.contains_key(&c))
    }
}

impl FromIterator<(char, String)> for SimplificationMap {
    fn from_iter<I: IntoIterator<Item = (char, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Map a token to Simplified Chinese, then case fold.
///
/// Only runs for profiles whose lookup transliteration asks for it.
pub struct SimplifyChinese<'m> {
    map: &'m SimplificationMap,
}

impl<'m> SimplifyChinese<'m> {
    pub fn new(map: &'m SimplificationMap) -> Self {
        Self { map }
    }
}

#[inline(always)]
fn wants_simplified(ctx: &Context) -> bool {
    ctx.profile.lookup_transliteration == Some(LookupTransliteration::SimplifiedChinese)
}

impl Stage for SimplifyChinese<'_> {
    fn name(&self) -> &'static str {
        "simplify_chinese"
    }

    #[inline]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        if !wants_simplified(ctx) {
            return false;
        }
        self.map.maps_any(text) || CaseFold.needs_apply(text, ctx)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }

        let mapped = if self.map.maps_any(&text) {
            let mut out = String::with_capacity(text.len());
            for c in text.chars() {
                match self.map.get(c) {
                    Some(target) => out.push_str(target),
                    None => out.push(c),
                }
            }
            Cow::Owned(out)
        } else {
            text
        };
        CaseFold.apply(mapped, ctx)
    }
}
