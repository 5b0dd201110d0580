use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use common::{SignalResult, Timeframe};

use crate::{ApiError, AppState};

const DEFAULT_SYMBOL: &str = "EURUSD";
const DEFAULT_TIMEFRAME: &str = "M15";
const DEFAULT_BARS: usize = 100;
const MIN_BARS: usize = 20;
const MAX_BARS: usize = 1000;

pub fn signals_router() -> Router<AppState> {
    Router::new().route("/get_signals", get(get_signals))
}

#[derive(Deserialize)]
struct SignalQuery {
    symbol: Option<String>,
    tf: Option<String>,
    bars: Option<String>,
}

/// Core result plus request metadata.
#[derive(Serialize)]
struct SignalResponse {
    status: &'static str,
    #[serde(flatten)]
    result: SignalResult,
    symbol: String,
    timeframe: Timeframe,
    bars_requested: usize,
    bars_received: usize,
    timestamp: String,
}

async fn get_signals(
    State(state): State<AppState>,
    Query(q): Query<SignalQuery>,
) -> Result<Json<SignalResponse>, ApiError> {
    let symbol = q
        .symbol
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let timeframe: Timeframe = q.tf.as_deref().unwrap_or(DEFAULT_TIMEFRAME).parse()?;
    let bars_requested = match q.bars.as_deref() {
        None => DEFAULT_BARS,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ApiError::bad_request(format!("Invalid bars value: {raw}")))?,
    };
    if !(MIN_BARS..=MAX_BARS).contains(&bars_requested) {
        return Err(ApiError::bad_request(format!(
            "Bars must be between {MIN_BARS} and {MAX_BARS}"
        )));
    }

    info!(%symbol, %timeframe, bars = bars_requested, "Signal request");

    let bars = state
        .source
        .fetch_bars(&symbol, timeframe, bars_requested)
        .await?;

    let reliable = state.engine.params().reliable_trend_bars;
    if bars_requested < reliable {
        warn!(
            bars = bars_requested,
            reliable,
            "Fewer bars requested than the trend window needs; trend will be unknown"
        );
    }

    let result = state.engine.evaluate(&bars, &symbol);
    info!(%symbol, signal = %result.signal, trend = %result.trend, "Signal generated");

    Ok(Json(SignalResponse {
        status: if result.is_analyzed() { "success" } else { "error" },
        result,
        symbol,
        timeframe,
        bars_requested,
        bars_received: bars.len(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
