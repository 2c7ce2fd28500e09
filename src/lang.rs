pub mod data;

use std::{
    collections::HashMap,
    fmt,
    sync::{PoisonError, RwLock},
};

use data::{
    LANGUAGE_ALIASES, LANGUAGE_RULES, LIKELY_SCRIPTS, MARK_STRIPPING_SCRIPTS, NFC_SCRIPTS,
    SPACELESS_SCRIPTS,
};

/// How text in a language is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerKind {
    /// Unicode word boundaries.
    Generic,
    /// Dictionary-driven segmentation (Chinese, Cantonese).
    Dictionary,
    /// Languages that want a morphological analyzer (Japanese, Korean).
    /// None is bundled, so these use word boundaries.
    Morphological,
    /// Space-free scripts with no dedicated segmenter.
    Unsegmented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalForm {
    Nfc,
    Nfkc,
}

/// Which way the cedilla / comma-below letters are unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiacriticRemap {
    /// `ș ț` → `ş ţ` (Turkish, Azerbaijani, Kazakh)
    Cedillas,
    /// `ş ţ` → `ș ț` (Romanian)
    Commas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transliteration {
    SerbianLatin,
    AzerbaijaniLatin,
}

/// Script conversion applied only to lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTransliteration {
    SimplifiedChinese,
}

/// Four-letter ISO 15924 script code, stored title-cased.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Script([u8; 4]);

impl Script {
    pub fn parse(code: &str) -> Option<Self> {
        let bytes: [u8; 4] = code.as_bytes().try_into().ok()?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        let mut out = bytes.map(|b| b.to_ascii_lowercase());
        out[0] = out[0].to_ascii_uppercase();
        Some(Self(out))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters ever get stored.
        std::str::from_utf8(&self.0).unwrap_or("Zzzz")
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.as_str())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed BCP 47 language tag.
///
/// Only the pieces the frequency pipeline cares about are kept apart:
/// language, script and region. Anything after those is carried along in
/// the normalized string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    language: String,
    script: Option<Script>,
    region: Option<String>,
    normalized: String,
}

impl LanguageTag {
    /// Parse a tag, accepting `_` as a separator. Returns `None` when the
    /// primary language subtag is not well formed.
    pub fn parse(tag: &str) -> Option<Self> {
        let mut subtags = tag.trim().split(['-', '_']);
        let first = subtags.next()?.to_ascii_lowercase();
        let well_formed = matches!(first.len(), 2..=3 | 5..=8)
            && first.bytes().all(|b| b.is_ascii_alphabetic());
        if !well_formed {
            return None;
        }
        let language = LANGUAGE_ALIASES
            .get(first.as_str())
            .map_or(first, |alias| (*alias).to_string());

        let rest: Vec<&str> = subtags.collect();
        if rest.iter().any(|s| s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric())) {
            return None;
        }

        let mut idx = 0;
        let script = rest.first().and_then(|s| Script::parse(s));
        if script.is_some() {
            idx += 1;
        }
        let region = rest.get(idx).and_then(|s| {
            let is_region = (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
                || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()));
            is_region.then(|| s.to_ascii_lowercase())
        });
        if region.is_some() {
            idx += 1;
        }

        let mut normalized = language.clone();
        for part in script
            .iter()
            .map(|s| s.as_str().to_string())
            .chain(region.clone())
            .chain(rest[idx..].iter().map(|s| s.to_string()))
        {
            normalized.push('-');
            normalized.push_str(&part);
        }
        normalized.make_ascii_lowercase();

        Some(Self {
            language,
            script,
            region,
            normalized,
        })
    }

    /// Lowercase canonical form used for cache keys and file matching.
    /// Malformed tags are simply lowercased.
    pub fn normalize(tag: &str) -> String {
        Self::parse(tag).map_or_else(|| tag.to_lowercase(), |t| t.normalized)
    }

    #[inline]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The explicit script, or the most likely one for the language and
    /// region.
    pub fn maximized_script(&self) -> Option<Script> {
        if self.script.is_some() {
            return self.script;
        }
        let by_region = self.region.as_ref().and_then(|region| {
            LIKELY_SCRIPTS.get(format!("{}-{}", self.language, region).as_str())
        });
        by_region
            .or_else(|| LIKELY_SCRIPTS.get(self.language.as_str()))
            .and_then(|s| Script::parse(s))
    }
}

/// Everything the normalizer and tokenizer need to know about a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub script: Option<Script>,
    pub tokenizer: TokenizerKind,
    pub normal_form: NormalForm,
    pub remove_marks: bool,
    pub dotless_i: bool,
    pub diacritic_remap: Option<DiacriticRemap>,
    pub transliteration: Option<Transliteration>,
    pub lookup_transliteration: Option<LookupTransliteration>,
}

impl Default for LanguageProfile {
    #[inline]
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl LanguageProfile {
    /// Profile for tags that cannot be resolved: no special handling.
    pub const NEUTRAL: Self = Self {
        script: None,
        tokenizer: TokenizerKind::Generic,
        normal_form: NormalForm::Nfkc,
        remove_marks: false,
        dotless_i: false,
        diacritic_remap: None,
        transliteration: None,
        lookup_transliteration: None,
    };

    /// Build the profile for a language tag from the rule tables.
    /// Malformed tags get [`LanguageProfile::NEUTRAL`].
    pub fn resolve(tag: &str) -> Self {
        let Some(tag) = LanguageTag::parse(tag) else {
            return Self::NEUTRAL;
        };
        let script = tag.maximized_script();
        let script_code = script.as_ref().map(Script::as_str);
        let in_set = |set: &phf::Set<&'static str>| script_code.is_some_and(|s| set.contains(s));
        let rule = LANGUAGE_RULES.get(tag.language());

        let tokenizer = match rule.and_then(|r| r.tokenizer) {
            Some(kind) => kind,
            None if in_set(&SPACELESS_SCRIPTS) => TokenizerKind::Unsegmented,
            None => TokenizerKind::Generic,
        };
        let normal_form = if in_set(&NFC_SCRIPTS) {
            NormalForm::Nfc
        } else {
            NormalForm::Nfkc
        };
        let lookup_transliteration = (tag.language() == "zh" && script_code != Some("Hant"))
            .then_some(LookupTransliteration::SimplifiedChinese);

        Self {
            script,
            tokenizer,
            normal_form,
            remove_marks: in_set(&MARK_STRIPPING_SCRIPTS),
            dotless_i: rule.is_some_and(|r| r.dotless_i),
            diacritic_remap: rule.and_then(|r| r.diacritics),
            transliteration: rule.and_then(|r| r.transliteration),
            lookup_transliteration,
        }
    }
}

/// Resolved profiles keyed by normalized tag. Profiles never change once
/// built, so a racing duplicate insert is harmless.
#[derive(Debug, Default)]
pub struct ProfileCache {
    profiles: RwLock<HashMap<String, LanguageProfile>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> LanguageProfile {
        let key = LanguageTag::normalize(tag);
        if let Some(profile) = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return *profile;
        }

        let profile = LanguageProfile::resolve(tag);
        tracing::debug!(tag = %key, ?profile, "resolved language profile");
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, profile);
        profile
    }

    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
