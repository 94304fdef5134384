//! HTTP endpoint server using Axum
//!
//! Thin plumbing over the strategy engine: request validation, timeframe
//! fan-out, CORS, CSV formatting. All algorithmic content lives in
//! `signals::engine`.

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::metrics::Metrics;
use crate::models::StrategyAnalysis;
use crate::services::{DukascopyClient, MarketDataProvider, Timeframe};
use crate::signals::StrategyEngine;

const DEFAULT_SYMBOL: &str = "XAUUSD";
const DEFAULT_INSTRUMENT: &str = "eurusd";

/// Timeframes analyzed per request, with the trailing window in days.
const ANALYSIS_TIMEFRAMES: [(Timeframe, i64); 4] = [
    (Timeframe::M15, 7),
    (Timeframe::H1, 30),
    (Timeframe::H4, 90),
    (Timeframe::D1, 365),
];

/// Pause between timeframe fetches to bound upstream request rate.
const TIMEFRAME_STAGGER: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub engine: Arc<StrategyEngine>,
}

impl AppState {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        engine: Arc<StrategyEngine>,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            market_data,
            engine,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Dukascopy Trading API is running!",
        "endpoints": [
            "POST /analysis - Analyze market with body: { symbol: \"XAUUSD\" }",
            "GET /price/{symbol} - Get current price (e.g., /price/XAUUSD)",
            "GET /historical - Get latest tick data"
        ]
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "dukatrix-analysis-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisRequest {
    symbol: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    symbol: String,
    analysis: BTreeMap<String, StrategyAnalysis>,
}

/// Analyze a symbol across all configured timeframes.
///
/// A fetch failure on one timeframe yields an error record under that key;
/// the response itself always succeeds.
async fn analyze_market(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Json<AnalysisResponse> {
    let symbol = request
        .symbol
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string());

    info!(
        symbol = %symbol,
        timeframes = ANALYSIS_TIMEFRAMES.len(),
        "starting analysis"
    );

    let mut analysis = BTreeMap::new();
    for (i, (timeframe, days)) in ANALYSIS_TIMEFRAMES.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(TIMEFRAME_STAGGER).await;
        }

        let to = Utc::now();
        let from = to - chrono::Duration::days(*days);

        let record = match state
            .market_data
            .get_candles(&symbol, *timeframe, from, to)
            .await
        {
            Ok(candles) => {
                let record = state.engine.analyze(&candles);
                state.metrics.analyses_total.inc();
                info!(
                    timeframe = timeframe.as_str(),
                    candles = candles.len(),
                    trend = ?record.trend,
                    signal = ?record.signal,
                    "timeframe analysis completed"
                );
                record
            }
            Err(e) => {
                error!(
                    error = %e,
                    timeframe = timeframe.as_str(),
                    "candle fetch failed"
                );
                StrategyAnalysis::computation_error(format!(
                    "failed to process {}: {}",
                    timeframe.as_str(),
                    e
                ))
            }
        };

        analysis.insert(timeframe.as_str().to_string(), record);
    }

    Json(AnalysisResponse { symbol, analysis })
}

/// Current price: close of the most recent M1 candle.
async fn price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    match state.market_data.get_latest_price(&symbol).await {
        Ok(price) => Json(json!({ "symbol": symbol, "price": price })).into_response(),
        Err(e) => {
            error!(error = %e, symbol = %symbol, "price lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoricalQuery {
    instrument: Option<String>,
    timeframe: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Serialize)]
struct TickResponse {
    timestamp: DateTime<Utc>,
    ask: f64,
    bid: f64,
    close: f64,
    open: f64,
    high: f64,
    low: f64,
    volume: f64,
    requested_timeframe: String,
    instrument: String,
}

fn tick_csv(tick: &TickResponse) -> String {
    let header =
        "timestamp,ask,bid,close,open,high,low,volume,requested_timeframe,instrument\n";
    format!(
        "{}{},{},{},{},{},{},{},{},{},{}\n",
        header,
        tick.timestamp.to_rfc3339(),
        tick.ask,
        tick.bid,
        tick.close,
        tick.open,
        tick.high,
        tick.low,
        tick.volume,
        tick.requested_timeframe,
        tick.instrument
    )
}

/// Latest tick data, reshaped from the most recent hourly candle. Hourly
/// bars keep the request small regardless of the requested timeframe,
/// which is echoed back untouched.
async fn historical(
    State(state): State<AppState>,
    Query(params): Query<HistoricalQuery>,
) -> Response {
    let instrument = params
        .instrument
        .unwrap_or_else(|| DEFAULT_INSTRUMENT.to_string())
        .to_lowercase();
    let requested_timeframe = params.timeframe.unwrap_or_else(|| "h1".to_string());

    let to = Utc::now();
    let from = to - chrono::Duration::hours(6);

    let candles = match state
        .market_data
        .get_candles(&instrument, Timeframe::H1, from, to)
        .await
    {
        Ok(candles) => candles,
        Err(e) => {
            error!(error = %e, instrument = %instrument, "latest tick fetch failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "failed to fetch latest tick data",
                    "details": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let Some(latest) = candles.last() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no recent data available for this instrument" })),
        )
            .into_response();
    };

    let tick = TickResponse {
        timestamp: Utc::now(),
        ask: latest.high,
        bid: latest.low,
        close: latest.close,
        open: latest.open,
        high: latest.high,
        low: latest.low,
        volume: latest.volume,
        requested_timeframe,
        instrument: instrument.clone(),
    };

    if params.format.as_deref() == Some("csv") {
        let disposition = format!("attachment; filename=\"{}_latest_tick.csv\"", instrument);
        (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            tick_csv(&tick),
        )
            .into_response()
    } else {
        Json(tick).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/analysis", post(analyze_market))
        .route("/price/{symbol}", get(price))
        .route("/historical", get(historical))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let market_data = Arc::new(DukascopyClient::from_env());
    let engine = Arc::new(StrategyEngine::default());
    let state = AppState::new(market_data, engine)?;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
