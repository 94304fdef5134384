//! Trend classification from moving-average relationships.

use crate::config::TrendRule;
use crate::models::Trend;

/// Classify the trend from the current close and the short/long moving
/// averages. Exact equality on any comparison asserts no trend and falls to
/// `Sideways`.
pub fn classify(rule: TrendRule, current_close: f64, short_ma: f64, long_ma: f64) -> Trend {
    match rule {
        TrendRule::SmaWithClose => {
            if current_close > short_ma && short_ma > long_ma {
                Trend::Uptrend
            } else if current_close < short_ma && short_ma < long_ma {
                Trend::Downtrend
            } else {
                Trend::Sideways
            }
        }
        TrendRule::EmaCross => {
            if short_ma > long_ma {
                Trend::Uptrend
            } else if short_ma < long_ma {
                Trend::Downtrend
            } else {
                Trend::Sideways
            }
        }
    }
}
