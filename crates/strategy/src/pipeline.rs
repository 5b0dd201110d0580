use tracing::debug;

use common::{Bar, Confidence, SignalResult};

use crate::config::SignalParams;
use crate::decider::{self, NO_SIGNAL_REASON};
use crate::fvg;
use crate::indicators::IndicatorSet;
use crate::round::round_to;
use crate::trade_plan;
use crate::trend;
use crate::validator;

/// Turns a bar table into a trading recommendation.
///
/// Holds only parameters; each call is independent, so one engine can be
/// shared across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    params: SignalParams,
}

impl SignalEngine {
    pub fn new(params: SignalParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SignalParams {
        &self.params
    }

    /// Run the full pipeline on `bars` (oldest first). Never fails: bad
    /// input produces a NEUTRAL result that says why.
    pub fn evaluate(&self, bars: &[Bar], symbol: &str) -> SignalResult {
        generate_signal(bars, symbol, &self.params)
    }
}

/// Validate, compute indicators, classify the trend, decide, and attach the
/// trade plan and gap count.
pub fn generate_signal(bars: &[Bar], symbol: &str, params: &SignalParams) -> SignalResult {
    let last = match validator::check(bars, params) {
        Ok(last) => last,
        Err(rejection) => {
            debug!(bars = bars.len(), ?rejection, "Bar table rejected");
            return SignalResult::rejected(rejection.to_string());
        }
    };

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let snapshot = IndicatorSet::compute(&closes, params).latest();

    let reading = trend::classify(&snapshot, bars.len(), params);
    let decision = decider::decide(&snapshot, reading.trend, params);

    let mut reasons: Vec<String> = reading.reason.into_iter().chain(decision.reason).collect();
    if reasons.is_empty() {
        reasons.push(NO_SIGNAL_REASON.to_string());
    }

    let entry = last.close;
    let plan = trade_plan::build(decision.signal, entry, symbol, params);
    let price = |v: f64| round_to(v, params.price_decimals);

    debug!(
        symbol,
        signal = %decision.signal,
        trend = %reading.trend,
        rsi = ?snapshot.rsi,
        "Signal evaluated"
    );

    SignalResult {
        signal: decision.signal,
        reasons,
        entry: Some(price(entry)),
        take_profits: plan.map(|p| p.take_profits.to_vec()).unwrap_or_default(),
        stop_loss: plan.map(|p| p.stop_loss),
        rsi: snapshot.rsi.map(|v| round_to(v, params.rsi_decimals)),
        sma_fast: snapshot.sma_fast.map(price),
        sma_slow: snapshot.sma_slow.map(price),
        trend: reading.trend,
        fvg_count: fvg::count(bars),
        confidence: Confidence::from(decision.signal),
    }
}
