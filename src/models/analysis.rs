//! Strategy analysis output record and its building blocks.

use serde::{Deserialize, Serialize};

/// Trend classification derived from moving-average relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
    Unknown,
}

/// Final trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "No Signal")]
    NoSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakoutDirection {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

/// A level crossing detected against the nearest support/resistance.
/// Exists only when the current close is strictly beyond that level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakoutEvent {
    pub level: f64,
    pub direction: BreakoutDirection,
    pub confirmed: bool,
}

/// Last value of each trailing indicator, aligned to the most recent bar.
/// Missing indicator output is substituted with a neutral default at
/// construction time, never surfaced as an absence here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub atr: f64,
    pub short_ma: f64,
    pub long_ma: f64,
}

/// The complete per-series analysis record returned by the engine.
///
/// Field names follow the upstream JSON contract (`sl`, `tp`, ...). Priced
/// fields are `None` on HOLD and on both sentinel shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub trend: Trend,
    pub signal: Signal,
    pub entry: Option<f64>,
    #[serde(rename = "sl")]
    pub stop_loss: Option<f64>,
    #[serde(rename = "tp")]
    pub take_profit: Option<f64>,
    pub rsi: Option<f64>,
    pub atr: Option<f64>,
    pub breakout_level: Option<f64>,
    pub breakout_direction: Option<BreakoutDirection>,
    pub breakout_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StrategyAnalysis {
    /// Sentinel for a series shorter than the configured minimum.
    pub fn insufficient_data(observed: usize, required: usize) -> Self {
        Self {
            trend: Trend::InsufficientData,
            signal: Signal::NoSignal,
            entry: None,
            stop_loss: None,
            take_profit: None,
            rsi: None,
            atr: None,
            breakout_level: None,
            breakout_direction: None,
            breakout_confirmed: false,
            error: Some(format!(
                "insufficient data: {} candles, {} required",
                observed, required
            )),
        }
    }

    /// Sentinel for an unexpected numeric fault during computation.
    pub fn computation_error(message: impl Into<String>) -> Self {
        Self {
            trend: Trend::Unknown,
            signal: Signal::NoSignal,
            entry: None,
            stop_loss: None,
            take_profit: None,
            rsi: None,
            atr: None,
            breakout_level: None,
            breakout_direction: None,
            breakout_confirmed: false,
            error: Some(message.into()),
        }
    }
}
