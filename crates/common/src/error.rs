use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with `status: "error"`; carries its message.
    #[error("Twelve Data API error: {0}")]
    Provider(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Twelve Data response missing 'values' key")]
    MissingValues,

    #[error("No candle data returned by Twelve Data")]
    NoCandles,

    #[error("Insufficient candle data received: {0} bars")]
    TooFewCandles(usize),

    #[error("No valid candle data after parsing")]
    NoValidCandles,

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
