//! Numeric helpers centralizing probability clamps and safe numeric casts.

use num_traits::cast::cast;

/// Clamp a probability into `[min, max]`, mapping non-finite values to `min`.
#[must_use]
pub fn clamp_probability(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    value.clamp(min, max)
}

/// Clamp a probability into the unit interval.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    clamp_probability(value, 0.0, 1.0)
}

/// Share of `part` within `part + other`, falling back to `fallback` when the
/// denominator is not positive.
#[must_use]
pub fn share(part: f64, other: f64, fallback: f64) -> f64 {
    let total = part + other;
    if total > 0.0 && total.is_finite() {
        part / total
    } else {
        fallback
    }
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Ratio of two counts, returning 0.0 for an empty denominator.
#[must_use]
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    usize_to_f64(numerator) / usize_to_f64(denominator)
}

/// Signed difference between two unsigned values.
#[must_use]
pub fn signed_diff(lhs: u32, rhs: u32) -> f64 {
    f64::from(lhs) - f64::from(rhs)
}
