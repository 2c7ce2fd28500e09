//! Frequency tables and where they come from.
//!
//! A table is an array of buckets. Every word in bucket `i` has frequency
//! `10^(-i/100)`, so bucket 0 holds the most common words. A
//! [`TableSource`] lists which languages a wordlist covers and loads the
//! bucket array for one of them.

pub mod disk;
pub mod memory;

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    error::{Result, WordFreqError},
    lang::LanguageTag,
    stage::SimplificationMap,
};

pub use disk::DiskSource;
pub use memory::MemorySource;

/// Buckets of words, most frequent first.
pub type Buckets = Vec<Vec<String>>;

/// Language tag → table locator for one wordlist.
pub type Availability = BTreeMap<String, String>;

/// Wordlist used when the caller does not name one.
pub const DEFAULT_WORDLIST: &str = "best";

/// Wordlists that exist as concrete tables.
pub const SMALL: &str = "small";
pub const LARGE: &str = "large";

pub trait TableSource: Send + Sync {
    /// Tables stored under exactly this wordlist name. Composite names are
    /// handled by [`available_languages`].
    fn list(&self, wordlist: &str) -> Result<Availability>;

    /// Decode the bucket array behind a locator returned by [`list`](Self::list).
    fn load(&self, locator: &str) -> Result<Buckets>;

    /// Traditional → Simplified Chinese character map. Sources without
    /// one return an empty map.
    fn simplification_map(&self) -> Result<SimplificationMap>;
}

impl<T: TableSource + ?Sized> TableSource for Arc<T> {
    fn list(&self, wordlist: &str) -> Result<Availability> {
        (**self).list(wordlist)
    }

    fn load(&self, locator: &str) -> Result<Buckets> {
        (**self).load(locator)
    }

    fn simplification_map(&self) -> Result<SimplificationMap> {
        (**self).simplification_map()
    }
}

/// Resolve the deprecated `combined` name to `small`.
#[inline]
pub fn normalize_wordlist(wordlist: &str) -> &str {
    match wordlist {
        "combined" => SMALL,
        other => other,
    }
}

/// Languages available for a wordlist. `best` is `small` with `large`
/// laid over it, so a language present in both resolves to `large`.
pub fn available_languages(source: &dyn TableSource, wordlist: &str) -> Result<Availability> {
    match normalize_wordlist(wordlist) {
        "best" => {
            let mut merged = source.list(SMALL)?;
            merged.extend(source.list(LARGE)?);
            Ok(merged)
        }
        name => source.list(name),
    }
}

/// Pick the available tag that best serves `requested`: the exact
/// normalized tag, then the bare language subtag, then the first tag that
/// starts with that subtag.
pub fn closest_language<'a, I>(requested: &str, available: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let normalized = LanguageTag::normalize(requested);
    let available = available.into_iter();
    let matches = |tag: &&str, wanted: &str| tag.eq_ignore_ascii_case(wanted);

    if let Some(tag) = available.clone().find(|t| matches(t, normalized.as_str())) {
        return Some(tag);
    }

    let base = normalized
        .split(['-', '_'])
        .next()
        .unwrap_or(normalized.as_str());
    if let Some(tag) = available.clone().find(|t| matches(t, base)) {
        return Some(tag);
    }

    available.into_iter().find(|t| {
        t.get(..base.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(base))
    })
}

/// Resolve `lang` against a wordlist, returning the chosen tag and its
/// locator.
pub fn resolve_table(
    source: &dyn TableSource,
    lang: &str,
    wordlist: &str,
) -> Result<(String, String)> {
    let wordlist = normalize_wordlist(wordlist);
    let available = available_languages(source, wordlist)?;
    let best = closest_language(lang, available.keys().map(String::as_str)).ok_or_else(|| {
        WordFreqError::UnsupportedLanguage {
            lang: lang.to_string(),
            wordlist: wordlist.to_string(),
        }
    })?;
    let locator = available[best].clone();
    Ok((best.to_string(), locator))
}
