//! Where the frequency tables live on disk.
//!
//! `WORDFREQ_DATA` wins when it is set to a non-blank value. Otherwise the
//! bundled `data/` directory next to the crate manifest is used, then a
//! `data/` directory under the current working directory.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::{Result, WordFreqError};

/// Environment variable overriding the data directory.
pub const DATA_ENV_KEY: &str = "WORDFREQ_DATA";

/// Bundled location, resolved at compile time.
const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub data_dir: PathBuf,
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from the environment and the default
    /// locations. The first candidate that exists wins.
    pub fn from_env() -> Result<Self> {
        let override_dir = env::var(DATA_ENV_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self::resolve(override_dir)
    }

    fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);
        candidates.extend(override_dir);
        candidates.push(PathBuf::from(BUNDLED_DATA_DIR));
        if let Ok(cwd) = env::current_dir() {
            candidates.push(cwd.join("data"));
        }

        match candidates.iter().find(|dir| dir.is_dir()) {
            Some(dir) => {
                tracing::debug!(data_dir = %dir.display(), "resolved word-frequency data directory");
                Ok(Self::new(dir.clone()))
            }
            None => Err(WordFreqError::DataDirNotFound { candidates }),
        }
    }

    /// Absolute location of a file inside the data directory.
    #[inline]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn override_directory_wins_when_it_exists() -> TestResult {
        let dir = tempfile::tempdir()?;
        let config = DataConfig::resolve(Some(dir.path().to_path_buf()))?;
        assert_eq!(config.dir(), dir.path());
        assert_eq!(config.path("small_en.msgpack.gz"), dir.path().join("small_en.msgpack.gz"));
        Ok(())
    }

    #[test]
    fn missing_override_falls_through_to_defaults() {
        let bogus = PathBuf::from("/definitely/not/a/real/wordfreq/dir");
        match DataConfig::resolve(Some(bogus.clone())) {
            Ok(config) => assert_ne!(config.data_dir, bogus),
            Err(WordFreqError::DataDirNotFound { candidates }) => {
                assert_eq!(candidates.first(), Some(&bogus));
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
