//! Conversions between the three frequency scales.
//!
//! * frequency: a proportion of tokens, in `[0, 1]`
//! * centibels: `100 * log10(frequency)`, so never positive
//! * Zipf: `log10(frequency per billion words)`, roughly 0 to 8

use crate::error::{Result, WordFreqError};

/// Significant digits kept by [`round_to_significant_digits`].
pub const SIGNIFICANT_DIGITS: i32 = 3;

/// `10^(cb / 100)`. Positive centibels would mean a frequency above 1.
pub fn cb_to_freq(cb: f64) -> Result<f64> {
    if cb > 0.0 {
        return Err(WordFreqError::PositiveCentibel(cb));
    }
    Ok(10f64.powf(cb / 100.0))
}

#[inline]
pub fn cb_to_zipf(cb: f64) -> f64 {
    (cb + 900.0) / 100.0
}

#[inline]
pub fn zipf_to_freq(zipf: f64) -> f64 {
    10f64.powf(zipf) / 1e9
}

/// `log10(freq) + 9`. Zero maps to negative infinity.
#[inline]
pub fn freq_to_zipf(freq: f64) -> f64 {
    freq.log10() + 9.0
}

/// Clamp `value` up to `minimum`, then round to three significant digits.
///
/// Frequencies are only meaningful to about 1%, so the extra digits are
/// noise. Zero stays zero, and rounding never takes the result below
/// `minimum`.
pub fn round_to_significant_digits(value: f64, minimum: f64) -> f64 {
    let unrounded = value.max(minimum);
    if unrounded == 0.0 {
        return 0.0;
    }
    let leading_zeroes = (-unrounded.log10()).floor() as i32;
    let places = (leading_zeroes + SIGNIFICANT_DIGITS).max(0);
    let factor = 10f64.powi(places);
    ((unrounded * factor).round() / factor).max(minimum)
}

/// Round to two decimal places, the precision Zipf values are reported at.
#[inline]
pub fn round_zipf(zipf: f64) -> f64 {
    if !zipf.is_finite() {
        return zipf;
    }
    (zipf * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centibel_conversions() {
        assert_eq!(cb_to_freq(0.0).unwrap(), 1.0);
        assert!((cb_to_freq(-100.0).unwrap() - 0.1).abs() < 1e-15);
        assert!((cb_to_freq(-300.0).unwrap() - 0.001).abs() < 1e-15);
        assert_eq!(cb_to_zipf(-300.0), 6.0);
        assert_eq!(cb_to_zipf(-900.0), 0.0);
    }

    #[test]
    fn positive_centibels_are_rejected() {
        assert!(matches!(
            cb_to_freq(1.0),
            Err(WordFreqError::PositiveCentibel(v)) if v == 1.0
        ));
    }

    #[test]
    fn zipf_round_trip_points() {
        assert!((zipf_to_freq(6.0) - 1e-3).abs() < 1e-15);
        assert!((freq_to_zipf(1e-3) - 6.0).abs() < 1e-12);
        assert_eq!(freq_to_zipf(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn rounding_keeps_three_significant_digits() {
        assert_eq!(round_to_significant_digits(0.012345, 0.0), 0.0123);
        assert_eq!(round_to_significant_digits(0.5556, 0.0), 0.556);
        assert_eq!(round_to_significant_digits(1.0, 0.0), 1.0);
        assert_eq!(round_to_significant_digits(0.0, 0.0), 0.0);
        assert_eq!(round_to_significant_digits(1e-9, 1e-6), 1e-6);
        // a floor with more digits than are kept is still honoured
        assert_eq!(round_to_significant_digits(0.0, 0.123456), 0.123456);
    }

    #[test]
    fn zipf_rounding() {
        assert_eq!(round_zipf(5.678), 5.68);
        assert_eq!(round_zipf(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }
}
