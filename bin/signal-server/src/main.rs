use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use common::Config;
use feed::TwelveDataClient;
use strategy::{SignalEngine, SignalParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(port = cfg.port, provider = %cfg.twelvedata_base_url, "Signal server starting");

    let params = match cfg.signal_config_path.as_deref() {
        Some(path) => {
            let params = SignalParams::load(path)?;
            info!(path, "Loaded signal parameters");
            params
        }
        None => SignalParams::default(),
    };
    info!(
        rsi_period = params.rsi_period,
        smoothing = ?params.rsi_smoothing,
        min_bars = params.min_bars,
        "Signal engine configured"
    );

    // ── Market data ───────────────────────────────────────────────────────────
    let source = TwelveDataClient::new(
        cfg.twelvedata_api_key.clone(),
        cfg.twelvedata_base_url.clone(),
        Duration::from_secs(cfg.http_timeout_secs),
    )?;

    // ── API ───────────────────────────────────────────────────────────────────
    let state = AppState {
        source: Arc::new(source),
        engine: Arc::new(SignalEngine::new(params)),
        port: cfg.port,
    };
    api::serve(state, cfg.port).await?;

    info!("Signal server stopped");
    Ok(())
}
