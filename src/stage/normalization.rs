use crate::{
    context::Context,
    lang::NormalForm,
    stage::Stage,
};
use std::{borrow::Cow, sync::LazyLock};

use icu_normalizer::ComposingNormalizerBorrowed;

// ── ICU4X ──
static ICU4X_NFC: LazyLock<ComposingNormalizerBorrowed<'static>> =
    LazyLock::new(ComposingNormalizerBorrowed::new_nfc);
static ICU4X_NFKC: LazyLock<ComposingNormalizerBorrowed<'static>> =
    LazyLock::new(ComposingNormalizerBorrowed::new_nfkc);

/// Unicode Normalization Form C (Canonical Composition)
#[derive(Default, Clone, Copy)]
pub struct NfcStage;

/// Unicode Normalization Form KC (Compatibility Composition)
#[derive(Default, Clone, Copy)]
pub struct NfkcStage;

/// Picks NFC or NFKC from the language profile.
#[derive(Default, Clone, Copy)]
pub struct NormalFormStage;

pub const NFC: NfcStage = NfcStage;
pub const NFKC: NfkcStage = NfkcStage;

macro_rules! impl_normalization_stage {
    ($stage:ty, $name:literal, $norm:ident) => {
        impl Stage for $stage {
            fn name(&self) -> &'static str {
                $name
            }

            #[inline(always)]
            fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
                !$norm.is_normalized(text)
            }

            #[inline(always)]
            fn apply<'a>(
                &self,
                text: Cow<'a, str>,
                _ctx: &Context,
            ) -> Cow<'a, str> {
                normalize_with(&$norm, text)
            }
        }
    };
}

impl_normalization_stage!(NfcStage, "nfc", ICU4X_NFC);
impl_normalization_stage!(NfkcStage, "nfkc", ICU4X_NFKC);

impl Stage for NormalFormStage {
    fn name(&self) -> &'static str {
        "normal_form"
    }

    #[inline]
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        match ctx.profile.normal_form {
            NormalForm::Nfc => NFC.needs_apply(text, ctx),
            NormalForm::Nfkc => NFKC.needs_apply(text, ctx),
        }
    }

    #[inline]
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        match ctx.profile.normal_form {
            NormalForm::Nfc => NFC.apply(text, ctx),
            NormalForm::Nfkc => NFKC.apply(text, ctx),
        }
    }
}

#[inline]
fn normalize_with<'a>(norm: &ComposingNormalizerBorrowed, text: Cow<'a, str>) -> Cow<'a, str> {
    if norm.is_normalized(&text) {
        return text;
    }
    Cow::Owned(norm.normalize(&text).into_owned())
}

/// NFC without a language context.
#[inline]
pub fn nfc(text: &str) -> Cow<'_, str> {
    ICU4X_NFC.normalize(text)
}
