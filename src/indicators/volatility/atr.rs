//! ATR (Average True Range) indicator

/// True range of a bar relative to the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Calculate the ATR sequence over true ranges with Wilder smoothing.
///
/// The first value is the simple average of the first `period` true ranges;
/// subsequent values smooth recursively with
/// `atr = (atr * (period - 1) + tr) / period`. Output is aligned to the tail
/// of the input and `period` elements shorter than it (one element is lost
/// to the previous-close lookback).
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let len = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || len <= period {
        return Vec::new();
    }

    let p = period as f64;
    let seed: f64 = (1..=period)
        .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
        .sum::<f64>()
        / p;

    let mut out = Vec::with_capacity(len - period);
    out.push(seed);

    let mut current = seed;
    for i in (period + 1)..len {
        let tr = true_range(highs[i], lows[i], closes[i - 1]);
        current = (current * (p - 1.0) + tr) / p;
        out.push(current);
    }

    out
}
