//! Market data provider interface.
//!
//! The engine never talks to a data source; everything upstream of an
//! ordered candle series lives behind this seam.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Candle;

/// Bar interval supported by the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M15 => "M15",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
        }
    }

    /// Interval code understood by the Dukascopy feed.
    pub fn feed_code(self) -> &'static str {
        match self {
            Timeframe::M1 => "m1",
            Timeframe::M15 => "m15",
            Timeframe::H1 => "h1",
            Timeframe::H4 => "h4",
            Timeframe::D1 => "d1",
        }
    }

    /// Parse a case-insensitive timeframe name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "M1" => Some(Timeframe::M1),
            "M15" => Some(Timeframe::M15),
            "H1" => Some(Timeframe::H1),
            "H4" => Some(Timeframe::H4),
            "D1" => Some(Timeframe::D1),
            _ => None,
        }
    }

    pub fn bars_per_day(self) -> usize {
        match self {
            Timeframe::M1 => 1440,
            Timeframe::M15 => 96,
            Timeframe::H1 => 24,
            Timeframe::H4 => 6,
            Timeframe::D1 => 1,
        }
    }

    /// Hard cap on candles fetched per request for this interval.
    pub fn max_candles(self) -> usize {
        match self {
            Timeframe::M1 => 1440,
            Timeframe::M15 => 672,
            Timeframe::H1 => 720,
            Timeframe::H4 => 540,
            Timeframe::D1 => 365,
        }
    }
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("candle feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("candle feed returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

impl MarketDataError {
    /// Transient faults worth retrying: transport errors and upstream 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Transport(_) => true,
            MarketDataError::UpstreamStatus(status) => status.is_server_error(),
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get historical candles for a symbol, ascending by timestamp.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Latest price for a symbol: the close of the most recent M1 candle
    /// within the trailing five minutes, if any.
    async fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError> {
        let to = Utc::now();
        let from = to - Duration::minutes(5);
        let candles = self.get_candles(symbol, Timeframe::M1, from, to).await?;
        Ok(candles.last().map(|c| c.close))
    }
}
