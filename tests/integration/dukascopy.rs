//! Integration tests for the Dukascopy feed client

use chrono::{Duration, TimeZone, Utc};
use dukatrix::services::{DukascopyClient, MarketDataError, MarketDataProvider, Timeframe};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_candles(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.1;
            let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64);
            json!({
                "timestamp": ts.to_rfc3339(),
                "open": base,
                "high": base + 0.5,
                "low": base - 0.5,
                "close": base + 0.1,
                "volume": 1000.0 + i as f64
            })
        })
        .collect()
}

#[tokio::test]
async fn fetches_and_parses_candles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candles"))
        .and(query_param("instrument", "xauusd"))
        .and(query_param("timeframe", "h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_candles(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = DukascopyClient::new(server.uri());
    let to = Utc::now();
    let from = to - Duration::days(1);
    let candles = client
        .get_candles("XAUUSD", Timeframe::H1, from, to)
        .await
        .unwrap();

    assert_eq!(candles.len(), 3);
    assert_eq!(candles[0].open, 100.0);
    assert_eq!(candles[2].close, 100.3);
    assert_eq!(candles[2].volume, 1002.0);
}

#[tokio::test]
async fn missing_volume_defaults_to_zero() {
    let server = MockServer::start().await;
    let body = json!([{
        "timestamp": "2024-01-01T00:00:00Z",
        "open": 1.1, "high": 1.2, "low": 1.0, "close": 1.15
    }]);
    Mock::given(method("GET"))
        .and(path("/candles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = DukascopyClient::new(server.uri());
    let to = Utc::now();
    let candles = client
        .get_candles("eurusd", Timeframe::M15, to - Duration::days(1), to)
        .await
        .unwrap();

    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].volume, 0.0);
}

#[tokio::test]
async fn truncates_to_the_trailing_timeframe_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_candles(400)))
        .mount(&server)
        .await;

    let client = DukascopyClient::new(server.uri());
    let to = Utc::now();
    let candles = client
        .get_candles("eurusd", Timeframe::D1, to - Duration::days(400), to)
        .await
        .unwrap();

    // D1 caps at 365, keeping the most recent candles
    assert_eq!(candles.len(), 365);
    assert!((candles[0].open - 103.5).abs() < 1e-9);
}

#[tokio::test]
async fn retries_a_transient_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candles"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/candles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_candles(2)))
        .mount(&server)
        .await;

    let client = DukascopyClient::new(server.uri());
    let to = Utc::now();
    let candles = client
        .get_candles("eurusd", Timeframe::H1, to - Duration::days(1), to)
        .await
        .unwrap();

    assert_eq!(candles.len(), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candles"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = DukascopyClient::new(server.uri());
    let to = Utc::now();
    let result = client
        .get_candles("eurusd", Timeframe::H1, to - Duration::days(1), to)
        .await;

    match result {
        Err(MarketDataError::UpstreamStatus(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected upstream status error, got {:?}", other.map(|c| c.len())),
    }
}
