// src/context.rs
// Language configuration handed to every normalization stage. Small, Copy,
// and fully resolved before any text is touched.

use crate::lang::{LanguageProfile, ProfileCache};

/// Runtime context passed to every normalization stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub profile: LanguageProfile,
}

impl Context {
    #[inline(always)]
    pub fn new(profile: LanguageProfile) -> Self {
        Self { profile }
    }

    #[inline]
    pub fn cached(tag: &str, cache: &ProfileCache) -> Self {
        Self::new(cache.get(tag))
    }
}
