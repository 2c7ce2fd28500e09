//! Dictionary-based word segmentation for Chinese-family languages.
//!
//! The segmenter is an optional capability. It is resolved at most once per
//! vocabulary and the outcome is remembered, so a missing dictionary costs
//! one warning, not one check per call. Callers that find it unavailable
//! fall back to Unicode word boundaries.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

#[cfg(feature = "jieba")]
use crate::config::DataConfig;

/// Which dictionary the segmenter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// Built from the same corpus as the frequency tables.
    Curated,
    /// The segmenter's stock general-purpose dictionary.
    External,
}

impl Vocabulary {
    #[inline]
    pub const fn from_external_flag(external_wordlist: bool) -> Self {
        if external_wordlist {
            Vocabulary::External
        } else {
            Vocabulary::Curated
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Vocabulary::Curated => 0,
            Vocabulary::External => 1,
        }
    }
}

pub trait DictionarySegmenter: Send + Sync {
    /// Split text into words. Punctuation and whitespace come back as
    /// their own tokens.
    fn cut(&self, text: &str) -> Vec<String>;
}

/// Outcome of trying to load a segmenter.
#[derive(Clone)]
pub enum SegmenterCapability {
    Available(Arc<dyn DictionarySegmenter>),
    Unavailable,
}

impl fmt::Debug for SegmenterCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmenterCapability::Available(_) => f.write_str("Available"),
            SegmenterCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}

type Loader = dyn Fn(Vocabulary) -> Option<Arc<dyn DictionarySegmenter>> + Send + Sync;

/// Lazily resolved segmenters, one slot per vocabulary.
pub struct Segmenters {
    loader: Box<Loader>,
    slots: [OnceLock<SegmenterCapability>; 2],
}

impl fmt::Debug for Segmenters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segmenters")
            .field("curated", &self.slots[0].get())
            .field("external", &self.slots[1].get())
            .finish()
    }
}

impl Segmenters {
    pub fn with_loader(
        loader: impl Fn(Vocabulary) -> Option<Arc<dyn DictionarySegmenter>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            loader: Box::new(loader),
            slots: [OnceLock::new(), OnceLock::new()],
        }
    }

    /// Never has a segmenter: Chinese always uses word boundaries.
    pub fn unavailable() -> Self {
        Self::with_loader(|_| None)
    }

    /// jieba dictionaries read from the data directory.
    #[cfg(feature = "jieba")]
    pub fn jieba(config: DataConfig) -> Self {
        Self::with_loader(move |vocabulary| {
            jieba::JiebaSegmenter::load(&config, vocabulary)
                .map(|s| Arc::new(s) as Arc<dyn DictionarySegmenter>)
        })
    }

    pub fn get(&self, vocabulary: Vocabulary) -> &SegmenterCapability {
        self.slots[vocabulary.index()].get_or_init(|| match (self.loader)(vocabulary) {
            Some(segmenter) => SegmenterCapability::Available(segmenter),
            None => {
                tracing::warn!(
                    ?vocabulary,
                    "dictionary segmenter unavailable, falling back to word boundaries"
                );
                SegmenterCapability::Unavailable
            }
        })
    }
}

#[cfg(feature = "jieba")]
pub mod jieba {
    use std::{fs::File, io::BufReader};

    use jieba_rs::Jieba;

    use super::{DictionarySegmenter, Vocabulary};
    use crate::config::DataConfig;

    pub const CURATED_DICT: &str = "jieba_zh.txt";
    pub const EXTERNAL_DICT: &str = "jieba_zh_orig.txt";

    pub struct JiebaSegmenter {
        jieba: Jieba,
    }

    impl JiebaSegmenter {
        pub fn load(config: &DataConfig, vocabulary: Vocabulary) -> Option<Self> {
            let file_name = match vocabulary {
                Vocabulary::Curated => CURATED_DICT,
                Vocabulary::External => EXTERNAL_DICT,
            };
            let path = config.path(file_name);
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "jieba dictionary not found");
                    return None;
                }
            };
            match Jieba::with_dict(&mut BufReader::new(file)) {
                Ok(jieba) => {
                    tracing::debug!(path = %path.display(), "loaded jieba dictionary");
                    Some(Self { jieba })
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "jieba dictionary is malformed");
                    None
                }
            }
        }
    }

    impl DictionarySegmenter for JiebaSegmenter {
        fn cut(&self, text: &str) -> Vec<String> {
            // HMM off: only words from the dictionary, like the frequency tables.
            self.jieba
                .cut(text, false)
                .into_iter()
                .map(str::to_string)
                .collect()
        }
    }
}
