//! External collaborators: market data sources.

pub mod dukascopy;
pub mod market_data;

pub use dukascopy::DukascopyClient;
pub use market_data::{MarketDataError, MarketDataProvider, Timeframe};
