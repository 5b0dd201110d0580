use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use common::{Bar, Error, MarketDataSource, Result, Timeframe};

/// The provider refuses to analyse anything shorter than this.
pub const MIN_CANDLES: usize = 20;

const PROBE_SYMBOL: &str = "EURUSD";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the Twelve Data time series API.
pub struct TwelveDataClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl TwelveDataClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get(&self, path: &str, params: &[(&str, &str)], timeout: Option<Duration>) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())]);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request.send().await.map_err(|e| Error::Http(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for TwelveDataClient {
    async fn fetch_bars(&self, symbol: &str, timeframe: Timeframe, count: usize) -> Result<Vec<Bar>> {
        let pair = format_symbol(symbol);
        let outputsize = count.to_string();
        debug!(pair = %pair, interval = timeframe.interval(), count, "Fetching time series");

        let resp = self
            .get(
                "/time_series",
                &[
                    ("symbol", pair.as_str()),
                    ("interval", timeframe.interval()),
                    ("outputsize", outputsize.as_str()),
                ],
                None,
            )
            .await?;
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        parse_time_series(&body)
    }

    async fn probe(&self) -> Result<bool> {
        let resp = self
            .get("/quote", &[("symbol", PROBE_SYMBOL)], Some(PROBE_TIMEOUT))
            .await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "Twelve Data quote probe failed");
            return Ok(false);
        }
        let body: Value = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;
        Ok(quote_is_valid(&body))
    }
}

/// `EURUSD` → `EUR/USD`; symbols that already carry a slash pass through.
pub fn format_symbol(symbol: &str) -> String {
    if symbol.contains('/') {
        return symbol.to_string();
    }
    match symbol.char_indices().nth(3) {
        Some((split, _)) => format!("{}/{}", &symbol[..split], &symbol[split..]),
        None => format!("{symbol}/"),
    }
}

/// A quote response is usable when it names a symbol and is not an error.
pub fn quote_is_valid(body: &Value) -> bool {
    body.get("symbol").is_some() && body.get("status").and_then(Value::as_str) != Some("error")
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    status: Option<String>,
    message: Option<String>,
    values: Option<Vec<Value>>,
}

/// Decode a time series body into bars, oldest first.
///
/// The provider lists candles newest first and encodes prices as strings.
/// Candles with an unreadable price are skipped.
pub fn parse_time_series(body: &str) -> Result<Vec<Bar>> {
    let resp: TimeSeriesResponse = serde_json::from_str(body)?;

    if resp.status.as_deref() == Some("error") {
        let message = resp
            .message
            .unwrap_or_else(|| "Unknown error from Twelve Data".to_string());
        warn!(%message, "Twelve Data returned error");
        return Err(Error::Provider(message));
    }

    let values = resp.values.ok_or(Error::MissingValues)?;
    if values.is_empty() {
        return Err(Error::NoCandles);
    }
    if values.len() < MIN_CANDLES {
        return Err(Error::TooFewCandles(values.len()));
    }

    let bars: Vec<Bar> = values
        .iter()
        .rev()
        .filter_map(|candle| {
            let bar = parse_candle(candle);
            if bar.is_none() {
                warn!(candle = %candle, "Skipping unparseable candle");
            }
            bar
        })
        .collect();

    if bars.is_empty() {
        return Err(Error::NoValidCandles);
    }
    Ok(bars)
}

fn parse_candle(candle: &Value) -> Option<Bar> {
    Some(Bar {
        open: number(candle, "open")?,
        high: number(candle, "high")?,
        low: number(candle, "low")?,
        close: number(candle, "close")?,
        volume: number(candle, "volume").unwrap_or(0.0),
    })
}

fn number(candle: &Value, key: &str) -> Option<f64> {
    match candle.get(key)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(close: f64) -> Value {
        serde_json::json!({
            "datetime": "2024-01-01 00:00:00",
            "open": format!("{close}"),
            "high": format!("{}", close + 0.001),
            "low": format!("{}", close - 0.001),
            "close": format!("{close}"),
        })
    }

    fn series(closes_newest_first: &[f64]) -> String {
        let values: Vec<Value> = closes_newest_first.iter().map(|&c| candle(c)).collect();
        serde_json::json!({ "status": "ok", "values": values }).to_string()
    }

    #[test]
    fn symbol_is_split_after_base_currency() {
        assert_eq!(format_symbol("EURUSD"), "EUR/USD");
        assert_eq!(format_symbol("USD/JPY"), "USD/JPY");
        assert_eq!(format_symbol("XAUUSD"), "XAU/USD");
    }

    #[test]
    fn candles_are_reversed_to_oldest_first() {
        let closes: Vec<f64> = (0..25).map(|i| 1.2 - i as f64 * 0.001).collect();
        let bars = parse_time_series(&series(&closes)).unwrap();
        assert_eq!(bars.len(), 25);
        assert_eq!(bars.first().unwrap().close, closes[24]);
        assert_eq!(bars.last().unwrap().close, 1.2);
        assert_eq!(bars[0].volume, 0.0);
    }

    #[test]
    fn provider_error_is_surfaced() {
        let err = parse_time_series(r#"{"status":"error","code":401,"message":"bad key"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Provider(ref m) if m == "bad key"));
    }

    #[test]
    fn missing_values_key() {
        let err = parse_time_series(r#"{"status":"ok","meta":{}}"#).unwrap_err();
        assert!(matches!(err, Error::MissingValues));
    }

    #[test]
    fn empty_and_short_series_are_rejected() {
        assert!(matches!(parse_time_series(&series(&[])), Err(Error::NoCandles)));
        assert!(matches!(
            parse_time_series(&series(&[1.1; 19])),
            Err(Error::TooFewCandles(19))
        ));
    }

    #[test]
    fn unparseable_candles_are_skipped() {
        let mut values: Vec<Value> = (0..20).map(|_| candle(1.1)).collect();
        values[3]["close"] = Value::String("n/a".into());
        values[4]["volume"] = Value::String("1500".into());
        let body = serde_json::json!({ "values": values }).to_string();

        let bars = parse_time_series(&body).unwrap();
        assert_eq!(bars.len(), 19);
        assert!(bars.iter().any(|b| b.volume == 1500.0));
    }

    #[test]
    fn all_candles_unparseable() {
        let values: Vec<Value> = (0..20).map(|_| serde_json::json!({ "open": "x" })).collect();
        let body = serde_json::json!({ "values": values }).to_string();
        assert!(matches!(parse_time_series(&body), Err(Error::NoValidCandles)));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        assert!(matches!(parse_time_series("<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn quote_validity() {
        assert!(quote_is_valid(&serde_json::json!({ "symbol": "EUR/USD", "close": "1.1" })));
        assert!(!quote_is_valid(&serde_json::json!({ "status": "error", "symbol": "EUR/USD" })));
        assert!(!quote_is_valid(&serde_json::json!({ "code": 429 })));
    }
}
