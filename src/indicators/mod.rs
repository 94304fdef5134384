//! Indicator library: tail-aligned numeric sequences over price series.

pub mod provider;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use provider::{IndicatorProvider, WilderIndicators};
pub use structure::pivot_levels;
