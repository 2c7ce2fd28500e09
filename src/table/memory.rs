use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use super::{Availability, Buckets, TableSource};
use crate::{
    error::{Result, WordFreqError},
    stage::SimplificationMap,
};

/// Tables held in memory. Locators are `<wordlist>/<lang>`.
///
/// Useful for embedding small custom tables and for tests; it also counts
/// loads so cache behaviour can be observed.
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: BTreeMap<String, BTreeMap<String, Buckets>>,
    simplification: SimplificationMap,
    loads: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, wordlist: &str, lang: &str, buckets: Buckets) -> Self {
        self.tables
            .entry(wordlist.to_string())
            .or_default()
            .insert(lang.to_string(), buckets);
        self
    }

    pub fn with_simplification(mut self, map: SimplificationMap) -> Self {
        self.simplification = map;
        self
    }

    /// How many times [`TableSource::load`] has been called.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl TableSource for MemorySource {
    fn list(&self, wordlist: &str) -> Result<Availability> {
        Ok(self
            .tables
            .get(wordlist)
            .map(|langs| {
                langs
                    .keys()
                    .map(|lang| (lang.clone(), format!("{wordlist}/{lang}")))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn load(&self, locator: &str) -> Result<Buckets> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        locator
            .split_once('/')
            .and_then(|(wordlist, lang)| self.tables.get(wordlist)?.get(lang))
            .cloned()
            .ok_or_else(|| WordFreqError::InvalidTable {
                path: locator.into(),
                reason: "no such in-memory table".to_string(),
            })
    }

    fn simplification_map(&self) -> Result<SimplificationMap> {
        Ok(self.simplification.clone())
    }
}
