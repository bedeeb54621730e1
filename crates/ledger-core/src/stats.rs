//! Simple descriptive statistics over spending amounts.
//!
//! Every helper returns `None` for an empty input instead of a NaN so the
//! caller has to decide how to surface the missing value.

// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between closest ranks.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> Option<f64> {
    let len = sorted_data.len();
    if len == 0 {
        return None;
    }
    if len == 1 {
        return Some(sorted_data[0]);
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted_data[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo]))
}

/// Median of `values` (average of the two middle values for even lengths).
///
/// # Examples
///
/// ```
/// use ledger_core::stats::median;
///
/// assert_eq!(median(&[1000.0, 1500.0, 1200.0]), Some(1200.0));
/// assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile(&sorted, 50.0)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Largest value.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Percent change from `previous` to `current`.
///
/// `None` when `previous` is zero, where the change is undefined.
///
/// # Examples
///
/// ```
/// use ledger_core::stats::percent_change;
///
/// assert_eq!(percent_change(1000.0, 1500.0), Some(50.0));
/// assert_eq!(percent_change(1500.0, 1200.0), Some(-20.0));
/// assert_eq!(percent_change(0.0, 10.0), None);
/// ```
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── percentile ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_percentile_single() {
        assert_eq!(percentile(&[42.0], 90.0), Some(42.0));
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        let p90 = percentile(&data, 90.0).unwrap();
        assert!((p90 - 46.0).abs() < 1e-9);
        assert_eq!(percentile(&data, 0.0), Some(10.0));
        assert_eq!(percentile(&data, 100.0), Some(50.0));
    }

    // ── median ───────────────────────────────────────────────────────────────

    #[test]
    fn test_median_unsorted_odd() {
        assert_eq!(median(&[1200.0, 1000.0, 1500.0]), Some(1200.0));
    }

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[400.0, 100.0, 300.0, 200.0]), Some(250.0));
    }

    #[test]
    fn test_median_with_negatives() {
        assert_eq!(median(&[-5.0, 5.0, 0.0]), Some(0.0));
    }

    // ── mean / max ───────────────────────────────────────────────────────────

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1000.0, 1500.0, 1200.0]), Some(1233.3333333333333));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_max() {
        assert_eq!(max(&[3.0, 9.5, -1.0]), Some(9.5));
        assert_eq!(max(&[]), None);
    }

    // ── percent_change ───────────────────────────────────────────────────────

    #[test]
    fn test_percent_change_increase_and_decrease() {
        assert_eq!(percent_change(200.0, 300.0), Some(50.0));
        assert_eq!(percent_change(300.0, 150.0), Some(-50.0));
    }

    #[test]
    fn test_percent_change_from_zero_is_undefined() {
        assert_eq!(percent_change(0.0, 0.0), None);
        assert_eq!(percent_change(0.0, 125.0), None);
    }

    #[test]
    fn test_percent_change_negative_base() {
        // A month of net refunds still yields a finite change.
        assert_eq!(percent_change(-100.0, -50.0), Some(-50.0));
    }
}
