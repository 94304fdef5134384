//! Environment lookup and engine tunables.

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment, used to pick the log formatter.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Base URL of the upstream candle feed.
pub fn feed_base_url() -> String {
    env::var("DUKASCOPY_FEED_URL")
        .unwrap_or_else(|_| "https://datafeed.dukascopy.com".to_string())
}

/// Which moving-average pair drives trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendRule {
    /// SMA-20 vs SMA-50, with the close required on the short MA's side.
    SmaWithClose,
    /// EMA-50 vs EMA-200; the cross alone decides.
    EmaCross,
}

impl TrendRule {
    /// (short, long) moving-average periods for this rule.
    pub fn periods(self) -> (usize, usize) {
        match self {
            TrendRule::SmaWithClose => (20, 50),
            TrendRule::EmaCross => (50, 200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum series length; shorter input short-circuits to a sentinel.
    pub min_candles: usize,
    /// Window radius for pivot high/low detection.
    pub pivot_period: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub trend_rule: TrendRule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_candles: 50,
            pivot_period: 20,
            rsi_period: 14,
            atr_period: 14,
            trend_rule: TrendRule::SmaWithClose,
        }
    }
}
