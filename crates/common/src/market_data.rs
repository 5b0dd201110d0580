use async_trait::async_trait;

use crate::{Bar, Result, Timeframe};

/// Abstraction over the upstream OHLCV provider.
///
/// `TwelveDataClient` implements this for the live service. Tests substitute
/// an in-memory source so the signal pipeline never touches the network.
///
/// Implementations must hand back a complete bar table, oldest first. The
/// pipeline's RSI smoothing depends on the full history, so a partial or
/// re-windowed fetch is not acceptable.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `count` bars for `symbol` at `timeframe`, oldest first.
    async fn fetch_bars(&self, symbol: &str, timeframe: Timeframe, count: usize) -> Result<Vec<Bar>>;

    /// Check provider connectivity. `Ok(false)` means the provider answered
    /// but reported itself unusable; `Err` means the probe itself failed.
    async fn probe(&self) -> Result<bool>;
}
