use crate::lang::{DiacriticRemap, TokenizerKind, Transliteration};

use phf::{Map, Set, phf_map, phf_set};

/// Per-language overrides applied on top of the script-derived defaults.
#[derive(Clone, Copy, Debug)]
pub struct LanguageRule {
    pub tokenizer: Option<TokenizerKind>,
    pub dotless_i: bool,
    pub diacritics: Option<DiacriticRemap>,
    pub transliteration: Option<Transliteration>,
}

/// ---------------------------------------------------------------------------
///    Macro – builds the rule table from one declarative list
/// ---------------------------------------------------------------------------
macro_rules! define_language_rules {
    ($(
        $code:literal,
        tokenizer: $tok:expr,
        dotless_i: $dot:expr,
        diacritics: $diac:expr,
        transliteration: $tr:expr
    );* $(;)?) => {
        pub static LANGUAGE_RULES: Map<&'static str, LanguageRule> = phf_map! {
            $(
                $code => LanguageRule {
                    tokenizer: $tok,
                    dotless_i: $dot,
                    diacritics: $diac,
                    transliteration: $tr,
                }
            ),*
        };
    };
}

// Keys are bare primary-language subtags.
define_language_rules! {
    "zh",  tokenizer: Some(TokenizerKind::Dictionary),    dotless_i: false, diacritics: None,                           transliteration: None;
    "yue", tokenizer: Some(TokenizerKind::Dictionary),    dotless_i: false, diacritics: None,                           transliteration: None;
    "ja",  tokenizer: Some(TokenizerKind::Morphological), dotless_i: false, diacritics: None,                           transliteration: None;
    "ko",  tokenizer: Some(TokenizerKind::Morphological), dotless_i: false, diacritics: None,                           transliteration: None;
    "tr",  tokenizer: None, dotless_i: true,  diacritics: Some(DiacriticRemap::Cedillas), transliteration: None;
    "kk",  tokenizer: None, dotless_i: true,  diacritics: Some(DiacriticRemap::Cedillas), transliteration: None;
    "az",  tokenizer: None, dotless_i: true,  diacritics: Some(DiacriticRemap::Cedillas), transliteration: Some(Transliteration::AzerbaijaniLatin);
    "ro",  tokenizer: None, dotless_i: false, diacritics: Some(DiacriticRemap::Commas),   transliteration: None;
    "sr",  tokenizer: None, dotless_i: false, diacritics: None,                           transliteration: Some(Transliteration::SerbianLatin);
}

/// Scripts written without spaces between words.
pub static SPACELESS_SCRIPTS: Set<&'static str> = phf_set! {
    "Hira", "Kana", "Thai", "Khmr", "Laoo", "Mymr", "Tale", "Talu", "Lana",
};

/// Scripts normalized with NFC; everything else gets NFKC.
pub static NFC_SCRIPTS: Set<&'static str> = phf_set! { "Latn", "Grek", "Cyrl" };

/// Scripts whose combining marks are stripped before lookup.
pub static MARK_STRIPPING_SCRIPTS: Set<&'static str> = phf_set! { "Arab", "Hebr" };

/// Deprecated language subtags and their replacements.
pub static LANGUAGE_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "iw" => "he",
    "in" => "id",
    "ji" => "yi",
    "jw" => "jv",
    "mo" => "ro",
};

/// Likely script per language, or per `language-region` where the region
/// changes the answer. Keys are lowercase.
pub static LIKELY_SCRIPTS: Map<&'static str, &'static str> = phf_map! {
    "af" => "Latn", "am" => "Ethi", "ar" => "Arab", "az" => "Latn", "be" => "Cyrl",
    "bg" => "Cyrl", "bn" => "Beng", "bo" => "Tibt", "bs" => "Latn", "ca" => "Latn",
    "cs" => "Latn", "cy" => "Latn", "da" => "Latn", "de" => "Latn", "el" => "Grek",
    "en" => "Latn", "eo" => "Latn", "es" => "Latn", "et" => "Latn", "eu" => "Latn",
    "fa" => "Arab", "fi" => "Latn", "fil" => "Latn", "fr" => "Latn", "ga" => "Latn",
    "gl" => "Latn", "gu" => "Gujr", "he" => "Hebr", "hi" => "Deva", "hr" => "Latn",
    "hu" => "Latn", "hy" => "Armn", "id" => "Latn", "is" => "Latn", "it" => "Latn",
    "ja" => "Jpan", "jv" => "Latn", "ka" => "Geor", "kk" => "Cyrl", "km" => "Khmr",
    "kn" => "Knda", "ko" => "Kore", "ky" => "Cyrl", "la" => "Latn", "lb" => "Latn",
    "lo" => "Laoo", "lt" => "Latn", "lv" => "Latn", "mk" => "Cyrl", "ml" => "Mlym",
    "mn" => "Cyrl", "mr" => "Deva", "ms" => "Latn", "mt" => "Latn", "my" => "Mymr",
    "nb" => "Latn", "ne" => "Deva", "nl" => "Latn", "nn" => "Latn", "no" => "Latn",
    "pa" => "Guru", "pl" => "Latn", "ps" => "Arab", "pt" => "Latn", "ro" => "Latn",
    "ru" => "Cyrl", "si" => "Sinh", "sk" => "Latn", "sl" => "Latn", "sq" => "Latn",
    "sr" => "Cyrl", "sv" => "Latn", "sw" => "Latn", "ta" => "Taml", "te" => "Telu",
    "tg" => "Cyrl", "th" => "Thai", "tl" => "Latn", "tr" => "Latn", "tt" => "Cyrl",
    "ug" => "Arab", "uk" => "Cyrl", "ur" => "Arab", "uz" => "Latn", "vi" => "Latn",
    "yi" => "Hebr", "zu" => "Latn",
    // Tai Le, Tai Lue, Tai Tham
    "tdd" => "Tale", "khb" => "Talu", "nod" => "Lana",
    // Chinese
    "zh" => "Hans", "zh-tw" => "Hant", "zh-hk" => "Hant", "zh-mo" => "Hant",
    "yue" => "Hant", "yue-cn" => "Hans",
    // Serbian in Montenegro defaults to Latin
    "sr-me" => "Latn",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table_covers_turkic_languages() {
        for code in ["tr", "az", "kk"] {
            let rule = LANGUAGE_RULES.get(code).unwrap();
            assert!(rule.dotless_i, "{code} should use dotless i");
            assert_eq!(rule.diacritics, Some(DiacriticRemap::Cedillas));
        }
        assert_eq!(
            LANGUAGE_RULES.get("ro").unwrap().diacritics,
            Some(DiacriticRemap::Commas)
        );
    }

    #[test]
    fn every_rule_language_has_a_likely_script() {
        for code in LANGUAGE_RULES.keys() {
            assert!(LIKELY_SCRIPTS.contains_key(*code), "missing script for {code}");
        }
    }

    #[test]
    fn spaceless_scripts_are_reachable_from_some_language() {
        for script in SPACELESS_SCRIPTS.iter().filter(|s| !matches!(**s, "Hira" | "Kana")) {
            assert!(
                LIKELY_SCRIPTS.values().any(|v| v == script),
                "no language maps to {script}"
            );
        }
    }

    #[test]
    fn likely_script_keys_are_lowercase() {
        for key in LIKELY_SCRIPTS.keys() {
            assert_eq!(*key, key.to_lowercase());
        }
    }
}
