//! Percentile helpers for already-sorted slices.
//!
//! - Empty input => `None` (or `0.0` for the convenience wrapper).
//! - `percentile <= 0` => first element.
//! - `percentile >= 100` => last element.
//! - Otherwise the rank `p * (len - 1)` is interpolated linearly between the two
//!   nearest values.

/// Returns the interpolated percentile from a slice sorted in ascending order.
pub fn value_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let first = *sorted_values.first()?;
    let last = *sorted_values.last()?;

    if percentile <= 0.0 {
        return Some(first);
    }
    if percentile >= 100.0 {
        return Some(last);
    }

    let rank = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let lower_value = sorted_values[lower];
    let upper_value = sorted_values[upper.min(sorted_values.len() - 1)];
    let fraction = rank - lower as f64;

    Some(lower_value + (upper_value - lower_value) * fraction)
}

/// Convenience wrapper returning `0.0` for empty input.
pub fn value_or_zero(sorted_values: &[f64], percentile: f64) -> f64 {
    value_sorted(sorted_values, percentile).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_close;

    #[test]
    fn value_sorted_returns_none_for_empty_input() {
        let values: [f64; 0] = [];
        assert_eq!(value_sorted(&values, 50.0), None);
    }

    #[test]
    fn value_sorted_clamps_to_first_and_last() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(value_sorted(&values, -1.0), Some(10.0));
        assert_eq!(value_sorted(&values, 0.0), Some(10.0));
        assert_eq!(value_sorted(&values, 100.0), Some(30.0));
        assert_eq!(value_sorted(&values, 1000.0), Some(30.0));
    }

    #[test]
    fn value_sorted_interpolates_between_ranks() {
        // len=10 => p85 rank=7.65 between 8 and 9, p95 rank=8.55 between 9 and 10
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_close(value_or_zero(&values, 50.0), 5.5);
        assert_close(value_or_zero(&values, 85.0), 8.65);
        assert_close(value_or_zero(&values, 95.0), 9.55);
    }

    #[test]
    fn single_value_is_every_percentile() {
        let values = [4.25];
        assert_eq!(value_sorted(&values, 50.0), Some(4.25));
        assert_eq!(value_sorted(&values, 95.0), Some(4.25));
    }

    #[test]
    fn value_or_zero_returns_zero_for_empty_input() {
        let values: [f64; 0] = [];
        assert_eq!(value_or_zero(&values, 50.0), 0.0);
    }
}
