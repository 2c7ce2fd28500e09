// src/pipeline.rs
use crate::{
    context::Context,
    stage::{
        CaseFold, DiacriticRemapStage, NormalFormStage, RemoveMarks, Stage,
        Transliterate, UncurlQuotes,
    },
};
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

/// Runs stages in order, skipping any whose pre-check says there is nothing
/// to do.
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

/// The preprocessing order is load-bearing: transliteration must see the
/// original case, and marks must be gone before the diacritic remap.
static PREPROCESS: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(vec![
        Arc::new(NormalFormStage),
        Arc::new(Transliterate),
        Arc::new(RemoveMarks),
        Arc::new(CaseFold),
        Arc::new(DiacriticRemapStage),
    ])
});

static LOSSY_TOKEN: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::new(vec![Arc::new(UncurlQuotes)]));

impl Pipeline {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Normalization applied to query text before tokenizing.
    pub fn preprocess() -> &'static Pipeline {
        &PREPROCESS
    }

    /// Extra per-token normalization for table lookups.
    pub fn lossy_token() -> &'static Pipeline {
        &LOSSY_TOKEN
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    pub fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current, ctx) {
                continue;
            }

            // Mutation required
            current = stage.apply(current, ctx);
        }

        current
    }
}

/// Normalize text for a language: Unicode form, transliteration, mark
/// removal, case folding, then diacritic unification.
pub fn preprocess_text<'a>(text: &'a str, ctx: &Context) -> Cow<'a, str> {
    Pipeline::preprocess().process(Cow::Borrowed(text), ctx)
}
