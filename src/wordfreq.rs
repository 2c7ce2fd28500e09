//! The lookup engine.
//!
//! A [`WordFreq`] owns its table source, its segmenters and its caches, so
//! independent instances never share state. The crate-level free functions
//! use one lazily built default instance.

use std::{
    fmt,
    iter::FusedIterator,
    slice,
    sync::{Arc, OnceLock},
};

use rand::Rng;

use crate::{
    cache::{FrequencyCache, FrequencyDict, ResultKey},
    config::DataConfig,
    context::Context,
    error::{Result, WordFreqError},
    frequency::{cb_to_freq, freq_to_zipf, round_to_significant_digits, round_zipf, zipf_to_freq},
    lang::{LanguageTag, ProfileCache, TokenizerKind},
    numbers::{digit_freq, has_digit_sequence, smash_numbers},
    segment::Segmenters,
    stage::SimplificationMap,
    table::{
        Availability, Buckets, DEFAULT_WORDLIST, DiskSource, TableSource, available_languages,
        normalize_wordlist, resolve_table,
    },
    tokenize::{self, TokenizeOptions},
    unicode::is_printable_ascii,
};

/// Divisor applied once per boundary the dictionary segmenter inferred.
pub const INFERRED_SPACE_FACTOR: f64 = 10.0;

/// Divisor applied per extra character when a word is estimated from its
/// characters.
pub const CHAR_COMBINATION_PENALTY: f64 = 3.0;

/// Parameters for [`WordFreq::random_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWords {
    pub lang: String,
    pub wordlist: String,
    pub nwords: usize,
    pub bits_per_word: u32,
    pub ascii_only: bool,
}

impl Default for RandomWords {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            wordlist: DEFAULT_WORDLIST.to_string(),
            nwords: 5,
            bits_per_word: 12,
            ascii_only: false,
        }
    }
}

impl RandomWords {
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn wordlist(mut self, wordlist: impl Into<String>) -> Self {
        self.wordlist = wordlist.into();
        self
    }

    pub fn nwords(mut self, nwords: usize) -> Self {
        self.nwords = nwords;
        self
    }

    pub fn bits_per_word(mut self, bits: u32) -> Self {
        self.bits_per_word = bits;
        self
    }

    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }
}

/// Every word of one table in bucket order. Iterate it as often as you
/// like; each pass starts from the first bucket.
#[derive(Debug, Clone)]
pub struct Wordlist {
    buckets: Arc<Buckets>,
}

impl Wordlist {
    pub fn iter(&self) -> Words<'_> {
        Words {
            buckets: self.buckets.iter(),
            current: [].iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Wordlist {
    type Item = &'a str;
    type IntoIter = Words<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Words<'a> {
    buckets: slice::Iter<'a, Vec<String>>,
    current: slice::Iter<'a, String>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.current.next() {
                return Some(word.as_str());
            }
            self.current = self.buckets.next()?.iter();
        }
    }
}

impl FusedIterator for Words<'_> {}

pub struct WordFreq {
    source: Box<dyn TableSource>,
    segmenters: Segmenters,
    profiles: ProfileCache,
    cache: FrequencyCache,
    simplification: OnceLock<SimplificationMap>,
}

impl fmt::Debug for WordFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordFreq")
            .field("segmenters", &self.segmenters)
            .field("profiles", &self.profiles.len())
            .field("tables", &self.cache.table_count())
            .field("results", &self.cache.result_count())
            .finish_non_exhaustive()
    }
}

impl WordFreq {
    pub fn new(source: impl TableSource + 'static, segmenters: Segmenters) -> Self {
        Self::with_cache(source, segmenters, FrequencyCache::new())
    }

    pub fn with_cache(
        source: impl TableSource + 'static,
        segmenters: Segmenters,
        cache: FrequencyCache,
    ) -> Self {
        Self {
            source: Box::new(source),
            segmenters,
            profiles: ProfileCache::new(),
            cache,
            simplification: OnceLock::new(),
        }
    }

    /// Tables and segmenter dictionaries from a data directory.
    pub fn open(config: DataConfig) -> Result<Self> {
        let source = DiskSource::open(config.clone())?;
        #[cfg(feature = "jieba")]
        let segmenters = Segmenters::jieba(config);
        #[cfg(not(feature = "jieba"))]
        let segmenters = {
            let _ = config;
            Segmenters::unavailable()
        };
        Ok(Self::new(source, segmenters))
    }

    /// [`WordFreq::open`] on the directory named by the environment.
    pub fn from_env() -> Result<Self> {
        Self::open(DataConfig::from_env()?)
    }

    pub fn cache(&self) -> &FrequencyCache {
        &self.cache
    }

    fn context(&self, lang: &str) -> Context {
        Context::cached(lang, &self.profiles)
    }

    fn simplification_map(&self) -> Result<&SimplificationMap> {
        if let Some(map) = self.simplification.get() {
            return Ok(map);
        }
        let map = self.source.simplification_map()?;
        Ok(self.simplification.get_or_init(|| map))
    }

    pub fn available_languages(&self, wordlist: &str) -> Result<Availability> {
        available_languages(self.source.as_ref(), wordlist)
    }

    /// Bucket array for the available language closest to `lang`.
    pub fn frequency_list(&self, lang: &str, wordlist: &str) -> Result<Arc<Buckets>> {
        let wordlist = normalize_wordlist(wordlist);
        let (best, locator) = resolve_table(self.source.as_ref(), lang, wordlist)?;
        self.cache.buckets((best.clone(), wordlist.to_string()), || {
            let buckets = self.source.load(&locator)?;
            tracing::debug!(lang = %best, wordlist, buckets = buckets.len(), "loaded frequency table");
            Ok(buckets)
        })
    }

    /// Word → frequency for `lang`, derived from its bucket array.
    pub fn frequency_dict(&self, lang: &str, wordlist: &str) -> Result<Arc<FrequencyDict>> {
        let wordlist = normalize_wordlist(wordlist);
        self.cache.dict((LanguageTag::normalize(lang), wordlist.to_string()), || {
            let buckets = self.frequency_list(lang, wordlist)?;
            let mut freqs = FrequencyDict::with_capacity(buckets.iter().map(Vec::len).sum());
            for (index, bucket) in buckets.iter().enumerate() {
                let freq = cb_to_freq(-(index as f64))?;
                for word in bucket {
                    freqs.insert(word.clone(), freq);
                }
            }
            tracing::debug!(lang, wordlist, words = freqs.len(), "derived frequency dictionary");
            Ok(freqs)
        })
    }

    /// Every word of a table, most frequent first.
    pub fn iter_wordlist(&self, lang: &str, wordlist: &str) -> Result<Wordlist> {
        Ok(Wordlist {
            buckets: self.frequency_list(lang, wordlist)?,
        })
    }

    /// Preprocess and split `text` the way `lang` is split.
    pub fn tokenize(
        &self,
        text: &str,
        lang: &str,
        options: TokenizeOptions,
    ) -> Vec<String> {
        let ctx = self.context(lang);
        tokenize::tokenize(text, &ctx, &self.segmenters, options)
    }

    /// [`WordFreq::tokenize`] plus the lookup-only normalization.
    pub fn lossy_tokenize(
        &self,
        text: &str,
        lang: &str,
        options: TokenizeOptions,
    ) -> Result<Vec<String>> {
        let ctx = self.context(lang);
        let identity;
        let map = if ctx.profile.lookup_transliteration.is_some() {
            self.simplification_map()?
        } else {
            identity = SimplificationMap::default();
            &identity
        };
        Ok(tokenize::lossy_tokenize(
            text,
            &ctx,
            &self.segmenters,
            map,
            options,
        ))
    }

    /// Frequency of `word` as a proportion of all tokens, or `minimum`
    /// when it is unknown. Results keep three significant digits and are
    /// never below `minimum`.
    pub fn word_frequency(
        &self,
        word: &str,
        lang: &str,
        wordlist: &str,
        minimum: f64,
    ) -> Result<f64> {
        let key = ResultKey::new(word, lang, wordlist, minimum);
        if let Some(hit) = self.cache.result(&key) {
            tracing::trace!(word, lang, wordlist, "word frequency cache hit");
            return Ok(hit);
        }

        let value = self.compute_word_frequency(word, lang, wordlist, minimum)?;
        self.cache.store_result(key, value);
        Ok(value)
    }

    fn compute_word_frequency(
        &self,
        word: &str,
        lang: &str,
        wordlist: &str,
        minimum: f64,
    ) -> Result<f64> {
        let tokens = self.lossy_tokenize(word, lang, TokenizeOptions::default())?;
        if tokens.is_empty() {
            return Ok(minimum);
        }

        let freqs = self.frequency_dict(lang, wordlist)?;
        let segmented = self.context(lang).profile.tokenizer == TokenizerKind::Dictionary;

        let mut one_over_result = 0.0;
        for token in &tokens {
            let smashed = smash_numbers(token);
            let found = freqs
                .get(&smashed)
                .copied()
                .or_else(|| {
                    if segmented {
                        estimate_from_characters(&smashed, &freqs)
                    } else {
                        None
                    }
                });
            let Some(freq) = found else {
                return Ok(minimum);
            };
            let adjusted = if smashed == *token {
                freq
            } else {
                freq * digit_freq(token)
            };
            one_over_result += 1.0 / adjusted;
        }

        let mut freq = 1.0 / one_over_result;
        if segmented && tokens.len() > 1 {
            freq /= INFERRED_SPACE_FACTOR.powi(tokens.len() as i32 - 1);
        }
        Ok(round_to_significant_digits(freq, minimum))
    }

    /// [`WordFreq::word_frequency`] on the Zipf scale, rounded to two
    /// decimals. `minimum` is a Zipf value too.
    pub fn zipf_frequency(
        &self,
        word: &str,
        lang: &str,
        wordlist: &str,
        minimum: f64,
    ) -> Result<f64> {
        let freq = self.word_frequency(word, lang, wordlist, zipf_to_freq(minimum))?;
        Ok(round_zipf(freq_to_zipf(freq)))
    }

    /// The `n` most frequent real words. Digit placeholders are skipped,
    /// and with `ascii_only` so is anything beyond `~`.
    pub fn top_n_list(
        &self,
        lang: &str,
        n: usize,
        wordlist: &str,
        ascii_only: bool,
    ) -> Result<Vec<String>> {
        let wordlist = self.iter_wordlist(lang, wordlist)?;
        Ok(wordlist
            .iter()
            .filter(|word| !ascii_only || word.chars().all(is_printable_ascii))
            .filter(|word| !has_digit_sequence(word))
            .take(n)
            .map(str::to_string)
            .collect())
    }

    /// Space-separated words drawn uniformly from the top
    /// `2^bits_per_word`.
    pub fn random_words(&self, options: &RandomWords) -> Result<String> {
        self.random_words_with(options, &mut rand::rng())
    }

    /// [`WordFreq::random_words`] restricted to ASCII words.
    pub fn random_ascii_words(&self, options: &RandomWords) -> Result<String> {
        self.random_words(&options.clone().ascii_only(true))
    }

    pub fn random_words_with<R: Rng>(
        &self,
        options: &RandomWords,
        rng: &mut R,
    ) -> Result<String> {
        let bits = options.bits_per_word;
        let choices_wanted = 1usize.checked_shl(bits).unwrap_or(usize::MAX);
        let choices = self.top_n_list(
            &options.lang,
            choices_wanted,
            &options.wordlist,
            options.ascii_only,
        )?;
        if bits >= usize::BITS || choices.len() < choices_wanted {
            return Err(WordFreqError::InsufficientVocabulary {
                bits,
                available: choices.len(),
            });
        }

        let words: Vec<&str> = (0..options.nwords)
            .map(|_| choices[rng.random_range(0..choices_wanted)].as_str())
            .collect();
        Ok(words.join(" "))
    }
}

/// Estimate an unknown multi-character word from its characters: harmonic
/// mean of their frequencies, divided by the penalty once per extra
/// character. Any unknown character means no estimate.
fn estimate_from_characters(word: &str, freqs: &FrequencyDict) -> Option<f64> {
    let count = word.chars().count();
    if count <= 1 {
        return None;
    }

    let mut buf = [0u8; 4];
    let mut one_over_result = 0.0;
    for c in word.chars() {
        let freq = freqs.get(&*c.encode_utf8(&mut buf))?;
        one_over_result += 1.0 / freq;
    }
    Some(1.0 / one_over_result / CHAR_COMBINATION_PENALTY.powi(count as i32 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: &[(&str, f64)]) -> FrequencyDict {
        entries.iter().map(|(w, f)| (w.to_string(), *f)).collect()
    }

    #[test]
    fn character_estimate_is_penalized_harmonic_mean() {
        let freqs = dict(&[("中", 0.01), ("文", 0.02)]);
        let hm = 1.0 / (1.0 / 0.01 + 1.0 / 0.02);
        let est = estimate_from_characters("中文", &freqs).unwrap();
        assert!((est - hm / 3.0).abs() < 1e-15);
    }

    #[test]
    fn character_estimate_needs_every_character() {
        let freqs = dict(&[("中", 0.01)]);
        assert_eq!(estimate_from_characters("中文", &freqs), None);
        assert_eq!(estimate_from_characters("中", &freqs), None);
    }

    #[test]
    fn wordlist_iteration_restarts() {
        let list = Wordlist {
            buckets: Arc::new(vec![
                vec!["a".into(), "b".into()],
                vec![],
                vec!["c".into()],
            ]),
        };
        let first: Vec<_> = list.iter().collect();
        let second: Vec<_> = (&list).into_iter().collect();
        assert_eq!(first, ["a", "b", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn random_words_defaults() {
        let options = RandomWords::default();
        assert_eq!(options.lang, "en");
        assert_eq!(options.wordlist, "best");
        assert_eq!(options.nwords, 5);
        assert_eq!(options.bits_per_word, 12);
        assert!(!options.ascii_only);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WordFreq>();
    }
}
