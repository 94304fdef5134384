//! Pivot-based support and resistance level detection

/// Find significant support/resistance levels from local price extrema.
///
/// An index `i` with at least `period` bars on both sides is a pivot high
/// when `highs[i]` equals the maximum of the closed window
/// `[i - period, i + period]`, and a pivot low symmetrically over the lows.
/// Qualifying highs and lows are merged into one ascending, deduplicated
/// set; direction relative to the current price is recovered by the caller.
///
/// Returns an empty set when the series has no index with a full window on
/// both sides (`len <= 2 * period`).
pub fn pivot_levels(highs: &[f64], lows: &[f64], period: usize) -> Vec<f64> {
    let len = highs.len().min(lows.len());
    if period == 0 || len <= 2 * period {
        return Vec::new();
    }

    let mut levels = Vec::new();
    for i in period..len - period {
        let window = (i - period)..=(i + period);
        if highs[window.clone()].iter().all(|&h| h <= highs[i]) {
            levels.push(highs[i]);
        }
        if lows[window].iter().all(|&l| l >= lows[i]) {
            levels.push(lows[i]);
        }
    }

    levels.sort_by(f64::total_cmp);
    levels.dedup();
    levels
}
