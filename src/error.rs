use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

/// Every failure the crate can report.
///
/// Unknown words are not errors: lookups that find nothing return the
/// caller's floor value instead.
#[derive(Debug, Error)]
pub enum WordFreqError {
    #[error("no wordlist `{wordlist}` is available for language `{lang}`")]
    UnsupportedLanguage { lang: String, wordlist: String },

    #[error("invalid cBpack table at {}: {reason}", path.display())]
    InvalidTable { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode msgpack in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rmpv::decode::Error,
    },

    #[error("there aren't enough words in the wordlist to provide {bits} bits of entropy per word (only {available} eligible)")]
    InsufficientVocabulary { bits: u32, available: usize },

    #[error("a frequency cannot be a positive number of centibels, got {0}")]
    PositiveCentibel(f64),

    #[error("no word-frequency data directory found; set WORDFREQ_DATA (tried {candidates:?})")]
    DataDirNotFound { candidates: Vec<PathBuf> },

    #[error("the default word-frequency instance could not be built: {0}")]
    DefaultInstance(#[source] Arc<WordFreqError>),
}

pub type Result<T> = std::result::Result<T, WordFreqError>;
