//! Dukascopy candle feed client.
//!
//! Thin JSON client over the configured feed base URL. Requests are clamped
//! so no call ever spans more candles than the timeframe's cap, responses
//! are truncated to the trailing cap, and transient upstream faults are
//! retried with exponential backoff. Retries live here and only here; the
//! engine itself never retries.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config;
use crate::models::Candle;
use crate::services::market_data::{MarketDataError, MarketDataProvider, Timeframe};

const MAX_RETRIES: usize = 3;

pub struct DukascopyClient {
    base_url: String,
    client: reqwest::Client,
}

impl DukascopyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client pointed at `DUKASCOPY_FEED_URL` (or the default feed).
    pub fn from_env() -> Self {
        Self::new(config::feed_base_url())
    }

    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = format!("{}/candles", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("instrument", symbol.to_lowercase()),
                ("timeframe", timeframe.feed_code().to_string()),
                ("from", from.to_rfc3339()),
                ("to", to.to_rfc3339()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketDataError::UpstreamStatus(response.status()));
        }

        let candles: Vec<Candle> = response.json().await?;
        Ok(candles)
    }
}

#[async_trait]
impl MarketDataProvider for DukascopyClient {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketDataError> {
        // Clamp the window so the request can never ask for more than the
        // timeframe's candle cap.
        let days_back = (timeframe.max_candles() / timeframe.bars_per_day()).max(1) as i64;
        let earliest = to - Duration::days(days_back);
        let from = if from < earliest { earliest } else { from };

        debug!(
            symbol,
            timeframe = timeframe.as_str(),
            %from,
            %to,
            "fetching candles"
        );

        let candles = (|| self.fetch(symbol, timeframe, from, to))
            .retry(ExponentialBuilder::default().with_max_times(MAX_RETRIES))
            .when(MarketDataError::is_retryable)
            .notify(|err: &MarketDataError, delay: std::time::Duration| {
                warn!(error = %err, delay_ms = delay.as_millis(), "candle feed retry");
            })
            .await?;

        // Keep only the trailing cap, as the feed may return more.
        let cap = timeframe.max_candles();
        let start = candles.len().saturating_sub(cap);
        Ok(candles[start..].to_vec())
    }
}
