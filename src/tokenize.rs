//! Tokenizer dispatch.
//!
//! Text is preprocessed for its language, then split by the profile's
//! tokenizer kind. Everything except the dictionary kind uses Unicode word
//! boundaries (UAX #29). The dictionary kind falls back to the same when no
//! segmenter could be loaded.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    context::Context,
    lang::TokenizerKind,
    pipeline::{Pipeline, preprocess_text},
    segment::{SegmenterCapability, Segmenters, Vocabulary},
    stage::{SimplificationMap, SimplifyChinese, Stage, normalization::nfc},
    unicode::{is_punctuation_only, is_word_like},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Keep punctuation and symbol segments.
    pub include_punctuation: bool,
    /// Segment Chinese with the segmenter's stock dictionary instead of the
    /// curated one.
    pub external_wordlist: bool,
}

impl TokenizeOptions {
    pub const fn with_punctuation(mut self, include_punctuation: bool) -> Self {
        self.include_punctuation = include_punctuation;
        self
    }

    pub const fn with_external_wordlist(mut self, external_wordlist: bool) -> Self {
        self.external_wordlist = external_wordlist;
        self
    }
}

/// Split on Unicode word boundaries, trim, drop blanks, lowercase.
/// Segments without a letter or digit are dropped unless
/// `include_punctuation` is set.
pub fn segment_words(text: &str, include_punctuation: bool) -> Vec<String> {
    text.split_word_bounds()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter(|segment| include_punctuation || is_word_like(segment))
        .map(str::to_lowercase)
        .collect()
}

/// Tokenize with no language rules: NFC, then word boundaries.
pub fn simple_tokenize(text: &str, include_punctuation: bool) -> Vec<String> {
    segment_words(&nfc(text), include_punctuation)
}

fn segment_dictionary(
    text: &str,
    segmenters: &Segmenters,
    options: TokenizeOptions,
) -> Vec<String> {
    let vocabulary = Vocabulary::from_external_flag(options.external_wordlist);
    let SegmenterCapability::Available(segmenter) = segmenters.get(vocabulary) else {
        return segment_words(text, options.include_punctuation);
    };

    segmenter
        .cut(text)
        .into_iter()
        // whitespace never reaches the tables, even with punctuation kept
        .filter(|token| !token.trim().is_empty())
        .filter(|token| options.include_punctuation || !is_punctuation_only(token))
        .map(|token| token.to_lowercase())
        .collect()
}

/// Preprocess `text` for the context's language and split it into tokens.
pub fn tokenize(
    text: &str,
    ctx: &Context,
    segmenters: &Segmenters,
    options: TokenizeOptions,
) -> Vec<String> {
    let normalized = preprocess_text(text, ctx);
    match ctx.profile.tokenizer {
        TokenizerKind::Dictionary => segment_dictionary(&normalized, segmenters, options),
        TokenizerKind::Generic | TokenizerKind::Morphological | TokenizerKind::Unsegmented => {
            segment_words(&normalized, options.include_punctuation)
        }
    }
}

/// [`tokenize`], then normalize each token into its table-lookup form:
/// Simplified Chinese where the profile asks for it, then ASCII quotes.
pub fn lossy_tokenize(
    text: &str,
    ctx: &Context,
    segmenters: &Segmenters,
    simplification: &SimplificationMap,
    options: TokenizeOptions,
) -> Vec<String> {
    let simplify = SimplifyChinese::new(simplification);
    let uncurl = Pipeline::lossy_token();

    tokenize(text, ctx, segmenters, options)
        .into_iter()
        .map(|token| {
            let token = simplify.apply(Cow::Owned(token), ctx);
            uncurl.process(token, ctx).into_owned()
        })
        .collect()
}
