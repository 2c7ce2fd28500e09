//! Probability estimates for multi-digit numbers.
//!
//! Tables store numbers by shape only: every digit of a multi-digit run is
//! replaced by `0`, so `1984` is looked up as `0000`. The concrete value is
//! then weighted back in with a Benford distribution over the leading digit,
//! plus a curve that favours four-digit runs near the present as years.
//!
//! Only ASCII digits count. A run is a digit followed by one or more digits,
//! periods, or commas, matched greedily.

use std::ops::Range;

use smallvec::SmallVec;

/// Leading-digit distribution, indexed by the digit. Index 0 covers runs
/// with a leading zero.
pub const DIGIT_FREQS: [f64; 10] = [
    0.009, 0.3, 0.175, 0.124, 0.096, 0.078, 0.066, 0.057, 0.05, 0.045,
];

const YEAR_LOG_PEAK: f64 = -1.9185;
const NOT_YEAR_PROB: f64 = 0.1;
const REFERENCE_YEAR: i32 = 2019;
const PLATEAU_WIDTH: i32 = 20;

type Runs = SmallVec<[Range<usize>; 4]>;

#[inline(always)]
fn is_run_continuation(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b','
}

/// Byte ranges of every multi-digit run, left to right, non-overlapping.
fn multi_digit_runs(text: &str) -> Runs {
    let bytes = text.as_bytes();
    let mut runs = Runs::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let mut end = i + 1;
        while end < bytes.len() && is_run_continuation(bytes[end]) {
            end += 1;
        }
        if end - i >= 2 {
            runs.push(i..end);
        }
        i = end;
    }
    runs
}

/// Relative frequency of a digit string from its length and first digit.
pub fn benford_freq(digits: &str) -> f64 {
    let first = digits
        .bytes()
        .next()
        .filter(u8::is_ascii_digit)
        .map_or(0, |b| usize::from(b - b'0'));
    let len = digits.len().max(1);
    DIGIT_FREQS[first] / 10f64.powi((len - 1) as i32)
}

/// Relative frequency of a four-digit string, treating it as a likely year.
///
/// Flat for the twenty years after 2019, decaying slowly into the past and
/// quickly into the future. A small Benford share covers non-year uses.
pub fn year_freq(digits: &str) -> f64 {
    let year: i32 = digits.parse().unwrap_or(0);

    let year_log_freq = if year <= REFERENCE_YEAR {
        YEAR_LOG_PEAK - 0.0083 * f64::from(REFERENCE_YEAR - year)
    } else if year <= REFERENCE_YEAR + PLATEAU_WIDTH {
        YEAR_LOG_PEAK
    } else {
        YEAR_LOG_PEAK - 0.2 * f64::from(year - (REFERENCE_YEAR + PLATEAU_WIDTH))
    };

    10f64.powf(year_log_freq) + NOT_YEAR_PROB * benford_freq(digits)
}

/// Combined weight of the concrete digits in `text`.
///
/// Each run is split on its separators and every pure-digit piece
/// contributes a factor: [`year_freq`] for four digits, [`benford_freq`]
/// otherwise. Text without runs has weight 1.
pub fn digit_freq(text: &str) -> f64 {
    let mut freq = 1.0;
    for run in multi_digit_runs(text) {
        for digits in text[run].split(['.', ',']).filter(|s| !s.is_empty()) {
            freq *= if digits.len() == 4 {
                year_freq(digits)
            } else {
                benford_freq(digits)
            };
        }
    }
    freq
}

/// True when `text` contains at least one multi-digit run.
#[inline]
pub fn has_digit_sequence(text: &str) -> bool {
    !multi_digit_runs(text).is_empty()
}

/// Replace every digit inside a multi-digit run with `0`.
///
/// Lone digits are kept, so `"a1b"` is unchanged while `"1,234"` becomes
/// `"0,000"`.
pub fn smash_numbers(text: &str) -> String {
    let runs = multi_digit_runs(text);
    if runs.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for run in runs {
        out.push_str(&text[last..run.start]);
        out.extend(text[run.clone()].chars().map(|c| if c.is_ascii_digit() { '0' } else { c }));
        last = run.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1e-300)
    }

    #[test]
    fn smashing_keeps_shape() {
        assert_eq!(smash_numbers("abc1234def"), "abc0000def");
        assert_eq!(smash_numbers("1,234.56"), "0,000.00");
        assert_eq!(smash_numbers("a1b"), "a1b");
        assert_eq!(smash_numbers("7 and 42"), "7 and 00");
        assert_eq!(smash_numbers("no digits"), "no digits");
    }

    #[test]
    fn non_ascii_digits_are_not_runs() {
        assert!(!has_digit_sequence("١٢٣"));
        assert_eq!(smash_numbers("१२३"), "१२३");
    }

    #[test]
    fn digit_sequences() {
        assert!(has_digit_sequence("route 66"));
        assert!(has_digit_sequence("3.14"));
        assert!(!has_digit_sequence("a1b2c3"));
        // a trailing separator still extends the run
        assert!(has_digit_sequence("1."));
        assert_eq!(smash_numbers("1."), "0.");
        assert!(has_digit_sequence("1.,"));
    }

    #[test]
    fn benford_divides_by_length() {
        assert!(close(benford_freq("1"), 0.3));
        assert!(close(benford_freq("12"), 0.03));
        assert!(close(benford_freq("900"), 0.00045));
        assert!(close(benford_freq("0123"), 0.000009));
    }

    #[test]
    fn year_curve_shape() {
        let peak = year_freq("2019");
        assert!(close(peak, year_freq("2030") - 0.1 * benford_freq("2030") + 0.1 * benford_freq("2019")));
        assert!(year_freq("1950") < peak);
        assert!(year_freq("2050") < year_freq("2039"));
        // the future falls off faster than the past
        assert!(year_freq("2049") < year_freq("1989"));
    }

    #[test]
    fn digit_freq_multiplies_each_piece() {
        assert!(close(digit_freq("plain"), 1.0));
        assert!(close(digit_freq("42"), benford_freq("42")));
        assert!(close(digit_freq("1984"), year_freq("1984")));
        assert!(close(
            digit_freq("12,345.6"),
            benford_freq("12") * benford_freq("345") * benford_freq("6")
        ));
        assert!(close(
            digit_freq("from 1999 to 12"),
            year_freq("1999") * benford_freq("12")
        ));
    }
}
