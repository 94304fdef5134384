//! Unit tests for trend classification

use dukatrix::config::TrendRule;
use dukatrix::models::Trend;
use dukatrix::signals::trend::classify;

#[test]
fn sma_variant_requires_close_above_the_short_ma() {
    assert_eq!(
        classify(TrendRule::SmaWithClose, 105.0, 103.0, 100.0),
        Trend::Uptrend
    );
    // MAs ordered upward but the close sits below the short MA
    assert_eq!(
        classify(TrendRule::SmaWithClose, 102.0, 103.0, 100.0),
        Trend::Sideways
    );
}

#[test]
fn sma_variant_mirrors_for_downtrend() {
    assert_eq!(
        classify(TrendRule::SmaWithClose, 95.0, 97.0, 100.0),
        Trend::Downtrend
    );
    assert_eq!(
        classify(TrendRule::SmaWithClose, 98.0, 97.0, 100.0),
        Trend::Sideways
    );
}

#[test]
fn ema_variant_ignores_the_close() {
    assert_eq!(
        classify(TrendRule::EmaCross, 50.0, 103.0, 100.0),
        Trend::Uptrend
    );
    assert_eq!(
        classify(TrendRule::EmaCross, 500.0, 97.0, 100.0),
        Trend::Downtrend
    );
}

#[test]
fn exact_equality_asserts_no_trend() {
    assert_eq!(
        classify(TrendRule::SmaWithClose, 105.0, 100.0, 100.0),
        Trend::Sideways
    );
    assert_eq!(
        classify(TrendRule::SmaWithClose, 100.0, 100.0, 99.0),
        Trend::Sideways
    );
    assert_eq!(
        classify(TrendRule::EmaCross, 105.0, 100.0, 100.0),
        Trend::Sideways
    );
}
