//! Strategy analysis engine.
//!
//! One synchronous pass over a candle series: indicator snapshot, trend
//! classification, pivot levels, breakout detection/confirmation, signal
//! decision, rounding. Stateless between calls; every invocation returns a
//! record, never panics.

use thiserror::Error;
use tracing::warn;

use crate::config::{EngineConfig, TrendRule};
use crate::indicators::{pivot_levels, IndicatorProvider, WilderIndicators};
use crate::models::candle::{closes, highs, lows};
use crate::models::{
    BreakoutDirection, BreakoutEvent, Candle, IndicatorSnapshot, Signal, StrategyAnalysis, Trend,
};
use crate::signals::{breakout, trend};

/// RSI substituted when the series is too short for the RSI period.
pub const NEUTRAL_RSI: f64 = 50.0;
/// ATR multiple for the breakout-path stop.
pub const BREAKOUT_STOP_ATR: f64 = 1.5;
/// Risk:reward multiple projected off the breakout stop distance.
pub const BREAKOUT_RISK_REWARD: f64 = 2.0;
/// ATR multiple for the fallback-path stop.
pub const FALLBACK_STOP_ATR: f64 = 2.0;
/// ATR multiple for the fallback-path target (fixed, not RR-derived).
pub const FALLBACK_TARGET_ATR: f64 = 3.0;
/// RSI below which an uptrend pullback is bought.
pub const RSI_PULLBACK_BUY: f64 = 40.0;
/// RSI above which a downtrend pullback is sold.
pub const RSI_PULLBACK_SELL: f64 = 60.0;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("empty candle series")]
    EmptySeries,
    #[error("non-finite value in input series at index {0}")]
    NonFiniteInput(usize),
    #[error("indicator {0} produced a non-finite value")]
    NonFiniteIndicator(&'static str),
}

pub struct StrategyEngine {
    config: EngineConfig,
    indicators: Box<dyn IndicatorProvider>,
}

impl Default for StrategyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StrategyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            indicators: Box::new(WilderIndicators),
        }
    }

    /// Swap in a different indicator implementation.
    pub fn with_provider(config: EngineConfig, indicators: Box<dyn IndicatorProvider>) -> Self {
        Self { config, indicators }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one candle series.
    ///
    /// Total over its input domain: a short series yields the
    /// insufficient-data sentinel and any numeric fault yields the error
    /// sentinel, so callers never see a panic.
    pub fn analyze(&self, candles: &[Candle]) -> StrategyAnalysis {
        if candles.len() < self.config.min_candles {
            return StrategyAnalysis::insufficient_data(candles.len(), self.config.min_candles);
        }

        match self.compute(candles) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, candles = candles.len(), "strategy computation failed");
                StrategyAnalysis::computation_error(e.to_string())
            }
        }
    }

    fn compute(&self, candles: &[Candle]) -> Result<StrategyAnalysis, EngineError> {
        if let Some(i) = candles.iter().position(|c| !c.is_finite()) {
            return Err(EngineError::NonFiniteInput(i));
        }

        let close_seq = closes(candles);
        let high_seq = highs(candles);
        let low_seq = lows(candles);
        let current_close = *close_seq.last().ok_or(EngineError::EmptySeries)?;

        let snapshot = self.snapshot(&close_seq, &high_seq, &low_seq, current_close)?;
        let trend = trend::classify(
            self.config.trend_rule,
            current_close,
            snapshot.short_ma,
            snapshot.long_ma,
        );

        let levels = pivot_levels(&high_seq, &low_seq, self.config.pivot_period);
        let event = breakout::detect(&levels, current_close).map(|(level, direction)| {
            BreakoutEvent {
                level,
                direction,
                confirmed: breakout::confirm(candles, &close_seq, level),
            }
        });

        let (signal, entry, stop_loss, take_profit) =
            decide(trend, event, current_close, &snapshot);

        Ok(StrategyAnalysis {
            trend,
            signal,
            entry: entry.map(|v| round_to(v, 5)),
            stop_loss: stop_loss.map(|v| round_to(v, 5)),
            take_profit: take_profit.map(|v| round_to(v, 5)),
            rsi: Some(round_to(snapshot.rsi, 2)),
            atr: Some(round_to(snapshot.atr, 5)),
            breakout_level: event.map(|e| round_to(e.level, 5)),
            breakout_direction: event.map(|e| e.direction),
            breakout_confirmed: event.is_some_and(|e| e.confirmed),
            error: None,
        })
    }

    /// Last value of each trailing indicator, with neutral defaults where a
    /// sequence came back empty (series shorter than that indicator's
    /// period despite passing the overall length gate).
    fn snapshot(
        &self,
        closes: &[f64],
        highs: &[f64],
        lows: &[f64],
        current_close: f64,
    ) -> Result<IndicatorSnapshot, EngineError> {
        let rsi = self
            .indicators
            .rsi(closes, self.config.rsi_period)
            .last()
            .copied()
            .unwrap_or(NEUTRAL_RSI);
        let atr = self
            .indicators
            .atr(highs, lows, closes, self.config.atr_period)
            .last()
            .copied()
            .unwrap_or(0.0);

        let (short_period, long_period) = self.config.trend_rule.periods();
        let (short_ma, long_ma) = match self.config.trend_rule {
            TrendRule::SmaWithClose => (
                self.last_or(self.indicators.sma(closes, short_period), current_close),
                self.last_or(self.indicators.sma(closes, long_period), current_close),
            ),
            TrendRule::EmaCross => (
                self.last_or(self.indicators.ema(closes, short_period), current_close),
                self.last_or(self.indicators.ema(closes, long_period), current_close),
            ),
        };

        for (name, value) in [
            ("rsi", rsi),
            ("atr", atr),
            ("short_ma", short_ma),
            ("long_ma", long_ma),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteIndicator(name));
            }
        }

        Ok(IndicatorSnapshot {
            rsi,
            atr,
            short_ma,
            long_ma,
        })
    }

    fn last_or(&self, sequence: Vec<f64>, fallback: f64) -> f64 {
        sequence.last().copied().unwrap_or(fallback)
    }
}

/// Decision order: confirmed breakout agreeing with the trend, else RSI
/// pullback into the trend, else HOLD.
fn decide(
    trend: Trend,
    event: Option<BreakoutEvent>,
    current_close: f64,
    snapshot: &IndicatorSnapshot,
) -> (Signal, Option<f64>, Option<f64>, Option<f64>) {
    match event {
        Some(BreakoutEvent {
            direction: BreakoutDirection::Up,
            confirmed: true,
            ..
        }) if trend == Trend::Uptrend => {
            let entry = current_close;
            let stop = entry - snapshot.atr * BREAKOUT_STOP_ATR;
            let target = entry + (entry - stop) * BREAKOUT_RISK_REWARD;
            (Signal::Buy, Some(entry), Some(stop), Some(target))
        }
        Some(BreakoutEvent {
            direction: BreakoutDirection::Down,
            confirmed: true,
            ..
        }) if trend == Trend::Downtrend => {
            let entry = current_close;
            let stop = entry + snapshot.atr * BREAKOUT_STOP_ATR;
            let target = entry - (stop - entry) * BREAKOUT_RISK_REWARD;
            (Signal::Sell, Some(entry), Some(stop), Some(target))
        }
        _ => decide_fallback(trend, current_close, snapshot),
    }
}

fn decide_fallback(
    trend: Trend,
    current_close: f64,
    snapshot: &IndicatorSnapshot,
) -> (Signal, Option<f64>, Option<f64>, Option<f64>) {
    if trend == Trend::Uptrend && snapshot.rsi < RSI_PULLBACK_BUY {
        let entry = current_close;
        (
            Signal::Buy,
            Some(entry),
            Some(entry - snapshot.atr * FALLBACK_STOP_ATR),
            Some(entry + snapshot.atr * FALLBACK_TARGET_ATR),
        )
    } else if trend == Trend::Downtrend && snapshot.rsi > RSI_PULLBACK_SELL {
        let entry = current_close;
        (
            Signal::Sell,
            Some(entry),
            Some(entry + snapshot.atr * FALLBACK_STOP_ATR),
            Some(entry - snapshot.atr * FALLBACK_TARGET_ATR),
        )
    } else {
        (Signal::Hold, None, None, None)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
