use common::SignalKind;

use crate::config::SignalParams;
use crate::round::round_to;

const JPY_PIP: f64 = 0.01;
const DEFAULT_PIP: f64 = 0.0001;

/// Take-profit ladder and stop-loss for a directional signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradePlan {
    pub take_profits: [f64; 3],
    pub stop_loss: f64,
}

/// Pip size for a symbol. JPY-quoted pairs move in hundredths.
pub fn pip_size(symbol: &str) -> f64 {
    if symbol.contains("JPY") {
        JPY_PIP
    } else {
        DEFAULT_PIP
    }
}

/// Build the plan for `signal` entered at `entry`. `None` for NEUTRAL.
///
/// Targets sit 1, 2 and 3 steps from entry in the signal's direction; the
/// stop sits `stop_loss_multiplier` steps the other way.
pub fn build(signal: SignalKind, entry: f64, symbol: &str, params: &SignalParams) -> Option<TradePlan> {
    let direction = match signal {
        SignalKind::Buy => 1.0,
        SignalKind::Sell => -1.0,
        SignalKind::Neutral => return None,
    };
    let step = pip_size(symbol) * params.pip_step_multiplier * direction;
    let round = |v: f64| round_to(v, params.price_decimals);

    Some(TradePlan {
        take_profits: [1.0, 2.0, 3.0].map(|i| round(entry + step * i)),
        stop_loss: round(entry - step * params.stop_loss_multiplier),
    })
}
