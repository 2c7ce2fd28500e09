//! Text normalization stages.
//!
//! Each stage is one step of the fixed preprocessing order. A stage gets a
//! cheap `needs_apply` pre-check so untouched text is passed through as the
//! same `Cow` without allocating.

pub mod case_fold;
pub mod diacritic_remap;
pub mod normalization;
pub mod remove_marks;
pub mod simplify_chinese;
pub mod transliterate;
pub mod uncurl_quotes;

use crate::context::Context;
use std::borrow::Cow;

pub use case_fold::CaseFold;
pub use diacritic_remap::DiacriticRemapStage;
pub use normalization::{NFC, NFKC, NormalFormStage};
pub use remove_marks::RemoveMarks;
pub use simplify_chinese::{SimplificationMap, SimplifyChinese};
pub use transliterate::Transliterate;
pub use uncurl_quotes::UncurlQuotes;

/// One step of lookup-key normalization.
pub trait Stage: Send + Sync {
    /// Stable identifier, used in pipeline listings.
    fn name(&self) -> &'static str;

    /// `false` means `apply` would return the text unchanged.
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool;

    /// Transform the text, handing back the same `Cow` when nothing changes.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str>;
}
