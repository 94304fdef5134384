//! Breakout detection against pivot levels, with retest and strength
//! confirmation.

use crate::indicators::trend::sma;
use crate::models::candle::volumes;
use crate::models::{BreakoutDirection, Candle};

/// Closes inspected for a retest of the broken level.
pub const RETEST_LOOKBACK: usize = 5;
/// Half-width of the retest band around the broken level.
pub const RETEST_TOLERANCE: f64 = 0.005;
/// Multiple of the average range/volume a bar must exceed to count as strong.
pub const STRENGTH_FACTOR: f64 = 1.5;
/// SMA period for the average bar range and average volume.
pub const STRENGTH_PERIOD: usize = 10;
/// Synthetic resistance when no level sits above the close.
pub const RESISTANCE_FALLBACK: f64 = 1.02;
/// Synthetic support when no level sits below the close.
pub const SUPPORT_FALLBACK: f64 = 0.98;

/// Nearest support and resistance around the current close.
///
/// Resistance is the minimum level strictly above the close, support the
/// maximum level strictly below it. An empty side falls back to a synthetic
/// level 2% away from the close.
pub fn nearest_levels(levels: &[f64], current_close: f64) -> (f64, f64) {
    let support = levels
        .iter()
        .copied()
        .filter(|&l| l < current_close)
        .fold(f64::NEG_INFINITY, f64::max);
    let resistance = levels
        .iter()
        .copied()
        .filter(|&l| l > current_close)
        .fold(f64::INFINITY, f64::min);

    let support = if support.is_finite() {
        support
    } else {
        current_close * SUPPORT_FALLBACK
    };
    let resistance = if resistance.is_finite() {
        resistance
    } else {
        current_close * RESISTANCE_FALLBACK
    };

    (support, resistance)
}

/// Detect a level-envelope exit.
///
/// `levels` must be ascending (as produced by `pivot_levels`). `Up` fires
/// when the close sits strictly above the highest level — that level is the
/// broken resistance — and `Down` mirrors below the lowest. A close inside
/// the envelope, or exactly on an edge, asserts no breakout, and an empty
/// level set can never break out.
pub fn detect(levels: &[f64], current_close: f64) -> Option<(f64, BreakoutDirection)> {
    let lowest = *levels.first()?;
    let highest = *levels.last()?;

    if current_close > highest {
        Some((highest, BreakoutDirection::Up))
    } else if current_close < lowest {
        Some((lowest, BreakoutDirection::Down))
    } else {
        None
    }
}

/// Confirm a breakout: a retest of the broken level among the recent closes
/// plus either an oversized bar or oversized volume on the latest bar.
pub fn confirm(candles: &[Candle], closes: &[f64], level: f64) -> bool {
    has_retest(closes, level) && (range_strength(candles) || volume_strength(candles))
}

/// At least one of the last `RETEST_LOOKBACK` closes lies inside the
/// `level * (1 ± RETEST_TOLERANCE)` band.
fn has_retest(closes: &[f64], level: f64) -> bool {
    let lower = level * (1.0 - RETEST_TOLERANCE);
    let upper = level * (1.0 + RETEST_TOLERANCE);
    let start = closes.len().saturating_sub(RETEST_LOOKBACK);
    closes[start..].iter().any(|&p| p >= lower && p <= upper)
}

/// Latest bar's range exceeds `STRENGTH_FACTOR` times the average range.
/// An unavailable average counts as zero, so any positive range passes.
fn range_strength(candles: &[Candle]) -> bool {
    let last = match candles.last() {
        Some(c) => c,
        None => return false,
    };
    let ranges: Vec<f64> = candles.iter().map(|c| c.high - c.low).collect();
    let avg_range = sma(&ranges, STRENGTH_PERIOD).last().copied().unwrap_or(0.0);
    (last.high - last.low) > avg_range * STRENGTH_FACTOR
}

/// Latest bar's volume exceeds `STRENGTH_FACTOR` times the average volume.
/// Contributes `false` when fewer than `STRENGTH_PERIOD` samples exist;
/// absent volume data is all zeros and can never exceed its own average.
fn volume_strength(candles: &[Candle]) -> bool {
    let last = match candles.last() {
        Some(c) => c,
        None => return false,
    };
    match sma(&volumes(candles), STRENGTH_PERIOD).last() {
        Some(&avg) => last.volume > avg * STRENGTH_FACTOR,
        None => false,
    }
}
