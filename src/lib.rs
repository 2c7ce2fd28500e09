//! Word frequencies in many languages, from static centibel-bucketed
//! tables.
//!
//! The free functions below use a process-wide [`WordFreq`] built on first
//! use from [`DataConfig::from_env`]. Build your own instance with
//! [`WordFreq::new`] to use other tables or isolated caches.

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod frequency;
pub mod lang;
pub mod numbers;
pub mod pipeline;
pub mod segment;
pub mod stage;
pub mod table;
pub mod tokenize;
pub mod unicode;
pub mod wordfreq;

use std::sync::{Arc, LazyLock};

pub use cache::{CACHE_SIZE, FrequencyCache, FrequencyDict};
pub use config::{DATA_ENV_KEY, DataConfig};
pub use error::{Result, WordFreqError};
pub use frequency::{cb_to_freq, cb_to_zipf, freq_to_zipf, zipf_to_freq};
pub use lang::{LanguageProfile, LanguageTag, TokenizerKind};
pub use numbers::{benford_freq, digit_freq, has_digit_sequence, smash_numbers, year_freq};
pub use segment::{DictionarySegmenter, Segmenters, Vocabulary};
pub use table::{Availability, Buckets, DEFAULT_WORDLIST, DiskSource, MemorySource, TableSource};
pub use tokenize::{TokenizeOptions, simple_tokenize};
pub use wordfreq::{
    CHAR_COMBINATION_PENALTY, INFERRED_SPACE_FACTOR, RandomWords, WordFreq, Wordlist,
};

static DEFAULT: LazyLock<std::result::Result<WordFreq, Arc<WordFreqError>>> =
    LazyLock::new(|| WordFreq::from_env().map_err(Arc::new));

/// The process-wide instance, or the error that kept it from being built.
pub fn default_instance() -> Result<&'static WordFreq> {
    DEFAULT
        .as_ref()
        .map_err(|err| WordFreqError::DefaultInstance(Arc::clone(err)))
}

pub fn word_frequency(word: &str, lang: &str, wordlist: &str, minimum: f64) -> Result<f64> {
    default_instance()?.word_frequency(word, lang, wordlist, minimum)
}

pub fn zipf_frequency(word: &str, lang: &str, wordlist: &str, minimum: f64) -> Result<f64> {
    default_instance()?.zipf_frequency(word, lang, wordlist, minimum)
}

pub fn top_n_list(lang: &str, n: usize, wordlist: &str, ascii_only: bool) -> Result<Vec<String>> {
    default_instance()?.top_n_list(lang, n, wordlist, ascii_only)
}

pub fn random_words(options: &RandomWords) -> Result<String> {
    default_instance()?.random_words(options)
}

pub fn random_ascii_words(options: &RandomWords) -> Result<String> {
    default_instance()?.random_ascii_words(options)
}

pub fn available_languages(wordlist: &str) -> Result<Availability> {
    default_instance()?.available_languages(wordlist)
}

pub fn iter_wordlist(lang: &str, wordlist: &str) -> Result<Wordlist> {
    default_instance()?.iter_wordlist(lang, wordlist)
}

pub fn frequency_list(lang: &str, wordlist: &str) -> Result<Arc<Buckets>> {
    default_instance()?.frequency_list(lang, wordlist)
}

pub fn frequency_dict(lang: &str, wordlist: &str) -> Result<Arc<FrequencyDict>> {
    default_instance()?.frequency_dict(lang, wordlist)
}

pub fn tokenize(text: &str, lang: &str, options: TokenizeOptions) -> Result<Vec<String>> {
    Ok(default_instance()?.tokenize(text, lang, options))
}

pub fn lossy_tokenize(text: &str, lang: &str, options: TokenizeOptions) -> Result<Vec<String>> {
    default_instance()?.lossy_tokenize(text, lang, options)
}
