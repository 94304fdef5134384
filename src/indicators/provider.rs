//! Capability seam over the indicator routines.
//!
//! The engine consumes indicators through this trait so the numerics can be
//! swapped (or stubbed in tests) without touching the analysis logic. Every
//! method returns a sequence aligned to the tail of its input, shorter by
//! the indicator's warm-up; an input too short for the period yields an
//! empty sequence, never an error.

use crate::indicators::{momentum, trend, volatility};

pub trait IndicatorProvider: Send + Sync {
    fn rsi(&self, values: &[f64], period: usize) -> Vec<f64>;
    fn atr(&self, highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64>;
    fn sma(&self, values: &[f64], period: usize) -> Vec<f64>;
    fn ema(&self, values: &[f64], period: usize) -> Vec<f64>;
}

/// Default provider with Wilder-smoothing RSI/ATR and standard SMA/EMA.
#[derive(Debug, Default, Clone, Copy)]
pub struct WilderIndicators;

impl IndicatorProvider for WilderIndicators {
    fn rsi(&self, values: &[f64], period: usize) -> Vec<f64> {
        momentum::rsi(values, period)
    }

    fn atr(&self, highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
        volatility::atr(highs, lows, closes, period)
    }

    fn sma(&self, values: &[f64], period: usize) -> Vec<f64> {
        trend::sma(values, period)
    }

    fn ema(&self, values: &[f64], period: usize) -> Vec<f64> {
        trend::ema(values, period)
    }
}
