//! Caches owned by a [`WordFreq`](crate::WordFreq) instance.
//!
//! * bucket arrays, keyed by resolved language and wordlist
//! * derived word → frequency dictionaries, keyed by normalized requested
//!   language and wordlist
//! * finished lookups, in a bounded LRU
//!
//! Every cached value is a pure function of its key and the static tables,
//! so two threads racing on a miss just compute the same value twice.

use std::{
    collections::HashMap,
    hash::Hash,
    num::NonZeroUsize,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use lru::LruCache;

use crate::{error::Result, table::Buckets};

/// Capacity of the lookup-result cache.
pub const CACHE_SIZE: usize = 100_000;

/// Word → frequency for one table.
pub type FrequencyDict = HashMap<String, f64>;

/// `(language, wordlist)`
pub type TableKey = (String, String);

/// Everything a finished lookup depends on. The floor is stored by bit
/// pattern so the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    word: String,
    lang: String,
    wordlist: String,
    minimum: u64,
}

impl ResultKey {
    pub fn new(word: &str, lang: &str, wordlist: &str, minimum: f64) -> Self {
        Self {
            word: word.to_string(),
            lang: lang.to_string(),
            wordlist: wordlist.to_string(),
            minimum: minimum.to_bits(),
        }
    }
}

/// Map that is filled once per key and never invalidated.
#[derive(Debug)]
struct OnceMap<K, V> {
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> Default for OnceMap<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V> OnceMap<K, V> {
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn get_or_try_insert(&self, key: K, build: impl FnOnce() -> Result<V>) -> Result<Arc<V>> {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        // Built outside the lock; a concurrent builder may win, which is fine.
        let value = Arc::new(build()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.entry(key).or_insert(value).clone())
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[derive(Debug)]
pub struct FrequencyCache {
    buckets: OnceMap<TableKey, Buckets>,
    dicts: OnceMap<TableKey, FrequencyDict>,
    results: Mutex<LruCache<ResultKey, f64>>,
}

impl Default for FrequencyCache {
    fn default() -> Self {
        Self::with_capacity(CACHE_SIZE)
    }
}

impl FrequencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache with a custom result capacity. Zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            buckets: OnceMap::default(),
            dicts: OnceMap::default(),
            results: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn buckets(
        &self,
        key: TableKey,
        load: impl FnOnce() -> Result<Buckets>,
    ) -> Result<Arc<Buckets>> {
        self.buckets.get_or_try_insert(key, load)
    }

    pub fn dict(
        &self,
        key: TableKey,
        derive: impl FnOnce() -> Result<FrequencyDict>,
    ) -> Result<Arc<FrequencyDict>> {
        self.dicts.get_or_try_insert(key, derive)
    }

    pub fn result(&self, key: &ResultKey) -> Option<f64> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    pub fn store_result(&self, key: ResultKey, value: f64) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, value);
    }

    pub fn table_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn dict_count(&self) -> usize {
        self.dicts.len()
    }

    pub fn result_count(&self) -> usize {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
