use std::sync::LazyLock;

use icu_properties::{
    CodePointMapData, CodePointMapDataBorrowed,
    props::{GeneralCategory, GeneralCategoryGroup},
};

static GENERAL_CATEGORY: LazyLock<CodePointMapDataBorrowed<'static, GeneralCategory>> =
    LazyLock::new(CodePointMapData::<GeneralCategory>::new);

/// Arabic tatweel (kashida), a stretching character with no lexical value.
pub const TATWEEL: char = '\u{0640}';

/// General category `Mn`.
#[inline]
pub fn is_nonspacing_mark(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    GENERAL_CATEGORY.get(c) == GeneralCategory::NonspacingMark
}

/// Characters removed for mark-stripping scripts: `Mn` plus the tatweel.
#[inline]
pub fn is_removable_mark(c: char) -> bool {
    c == TATWEEL || is_nonspacing_mark(c)
}

/// General categories `P*` and `S*`.
#[inline]
pub fn is_punctuation_or_symbol(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    let gc = GENERAL_CATEGORY.get(c);
    GeneralCategoryGroup::Punctuation.contains(gc) || GeneralCategoryGroup::Symbol.contains(gc)
}

// Unicode whitespace outside what `char::is_whitespace` already reports.
#[inline(always)]
pub fn is_unicode_whitespace(c: char) -> bool {
    matches!(
        c as u32,
        0x0085 | // NEXT LINE (NEL)
        0x00A0 | // NO-BREAK SPACE
        0x1680 | // OGHAM SPACE MARK
        0x2000
            ..=0x200A | // EN QUAD through HAIR SPACE
        0x2028 | // LINE SEPARATOR
        0x2029 | // PARAGRAPH SEPARATOR
        0x202F | // NARROW NO-BREAK SPACE
        0x205F | // MEDIUM MATHEMATICAL SPACE
        0x3000 // IDEOGRAPHIC SPACE
    )
}

#[inline(always)]
pub fn is_any_whitespace(c: char) -> bool {
    c.is_whitespace() || is_unicode_whitespace(c)
}

/// A segment counts as a word when it holds at least one letter or number.
#[inline]
pub fn is_word_like(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Nothing but punctuation, symbols and whitespace.
#[inline]
pub fn is_punctuation_only(token: &str) -> bool {
    token
        .chars()
        .all(|c| is_punctuation_or_symbol(c) || is_any_whitespace(c))
}

/// Curly and prime quotation marks mapped to their ASCII forms.
#[inline(always)]
pub const fn uncurl_quote_char(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{2033}' => '"',
        _ => c,
    }
}

#[inline]
pub fn is_printable_ascii(c: char) -> bool {
    c <= '~'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_and_tatweel() {
        assert!(is_nonspacing_mark('\u{064E}')); // arabic fatha
        assert!(is_nonspacing_mark('\u{05B8}')); // hebrew qamats
        assert!(is_nonspacing_mark('\u{0301}'));
        assert!(!is_nonspacing_mark('a'));
        assert!(!is_nonspacing_mark('ا'));
        assert!(is_removable_mark(TATWEEL));
        assert!(!is_nonspacing_mark(TATWEEL));
    }

    #[test]
    fn punctuation_and_symbols() {
        for c in [',', '!', '$', '。', '，', '「', '€', '★'] {
            assert!(is_punctuation_or_symbol(c), "{c:?}");
        }
        for c in ['a', '1', '中', ' '] {
            assert!(!is_punctuation_or_symbol(c), "{c:?}");
        }
        assert!(is_punctuation_only("。 ，"));
        assert!(!is_punctuation_only("中。"));
    }

    #[test]
    fn word_like_segments() {
        assert!(is_word_like("hello"));
        assert!(is_word_like("42"));
        assert!(is_word_like("汉字"));
        assert!(!is_word_like(", "));
        assert!(!is_word_like(""));
    }

    #[test]
    fn quotes_are_uncurled() {
        let s: String = "\u{2018}it\u{2019}s\u{201D}".chars().map(uncurl_quote_char).collect();
        assert_eq!(s, "'it's\"");
    }
}
