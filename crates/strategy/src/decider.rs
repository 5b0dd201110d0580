use common::{SignalKind, Trend};

use crate::config::SignalParams;
use crate::indicators::Snapshot;

pub const NO_SIGNAL_REASON: &str = "No strong signal detected";
pub const RSI_UNAVAILABLE_REASON: &str = "RSI unavailable: not enough price history";

/// Outcome of the rule set. `reason` is `None` only when nothing fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub signal: SignalKind,
    pub reason: Option<String>,
}

impl Decision {
    fn neutral() -> Self {
        Self { signal: SignalKind::Neutral, reason: None }
    }
}

/// Inputs every rule sees. RSI is known to be defined at this point.
struct Inputs {
    rsi: f64,
    sma_fast: Option<f64>,
    sma_slow: Option<f64>,
    trend: Trend,
}

/// A guarded rule. The first rule whose guard passes decides the signal.
struct Rule {
    signal: SignalKind,
    fires: fn(&Inputs, &SignalParams) -> bool,
    reason: fn(&Inputs, &SignalParams) -> String,
}

/// Evaluation order matters: the RSI-extreme rules dominate the
/// moving-average crossover fallback.
const RULES: &[Rule] = &[
    Rule {
        signal: SignalKind::Buy,
        fires: |i, p| i.rsi < p.rsi_oversold && i.trend == Trend::Up,
        reason: |i, _| format!("RSI oversold ({:.1}) + Uptrend", i.rsi),
    },
    Rule {
        signal: SignalKind::Sell,
        fires: |i, p| i.rsi > p.rsi_overbought && i.trend == Trend::Down,
        reason: |i, _| format!("RSI overbought ({:.1}) + Downtrend", i.rsi),
    },
    Rule {
        signal: SignalKind::Buy,
        fires: |i, p| {
            matches!((i.sma_fast, i.sma_slow), (Some(f), Some(s)) if f > s) && i.rsi < p.rsi_midline
        },
        reason: |_, p| format!("SMA{} > SMA{} + RSI < {}", p.sma_fast, p.sma_slow, p.rsi_midline),
    },
    Rule {
        signal: SignalKind::Sell,
        fires: |i, p| {
            matches!((i.sma_fast, i.sma_slow), (Some(f), Some(s)) if f < s) && i.rsi > p.rsi_midline
        },
        reason: |_, p| format!("SMA{} < SMA{} + RSI > {}", p.sma_fast, p.sma_slow, p.rsi_midline),
    },
];

pub fn decide(snapshot: &Snapshot, trend: Trend, params: &SignalParams) -> Decision {
    let Some(rsi) = snapshot.rsi else {
        return Decision {
            signal: SignalKind::Neutral,
            reason: Some(RSI_UNAVAILABLE_REASON.to_string()),
        };
    };

    let inputs = Inputs {
        rsi,
        sma_fast: snapshot.sma_fast,
        sma_slow: snapshot.sma_slow,
        trend,
    };

    RULES
        .iter()
        .find(|rule| (rule.fires)(&inputs, params))
        .map(|rule| Decision {
            signal: rule.signal,
            reason: Some((rule.reason)(&inputs, params)),
        })
        .unwrap_or_else(Decision::neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(rsi: Option<f64>, fast: Option<f64>, slow: Option<f64>) -> Snapshot {
        Snapshot { rsi, sma_fast: fast, sma_slow: slow, ..Default::default() }
    }

    #[test]
    fn oversold_in_uptrend_buys() {
        let d = decide(&snap(Some(24.31), None, None), Trend::Up, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Buy);
        assert_eq!(d.reason.as_deref(), Some("RSI oversold (24.3) + Uptrend"));
    }

    #[test]
    fn overbought_in_downtrend_sells() {
        let d = decide(&snap(Some(81.0), None, None), Trend::Down, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Sell);
        assert_eq!(d.reason.as_deref(), Some("RSI overbought (81.0) + Downtrend"));
    }

    #[test]
    fn extreme_rule_wins_over_crossover() {
        // Both the oversold rule and the crossover rule would fire here.
        let d = decide(&snap(Some(20.0), Some(1.2), Some(1.1)), Trend::Up, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Buy);
        assert!(d.reason.unwrap().starts_with("RSI oversold"));
    }

    #[test]
    fn crossover_buy_below_midline() {
        let d = decide(&snap(Some(45.0), Some(1.2), Some(1.1)), Trend::Unknown, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Buy);
        assert_eq!(d.reason.as_deref(), Some("SMA10 > SMA20 + RSI < 50"));
    }

    #[test]
    fn crossover_sell_above_midline() {
        let d = decide(&snap(Some(55.0), Some(1.0), Some(1.1)), Trend::Up, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Sell);
        assert_eq!(d.reason.as_deref(), Some("SMA10 < SMA20 + RSI > 50"));
    }

    #[test]
    fn oversold_without_uptrend_falls_through_to_crossover() {
        let d = decide(&snap(Some(25.0), Some(1.0), Some(1.1)), Trend::Down, &SignalParams::default());
        assert_eq!(d, Decision::neutral());
    }

    #[test]
    fn undefined_averages_are_neutral() {
        let d = decide(&snap(Some(45.0), Some(1.2), None), Trend::Unknown, &SignalParams::default());
        assert_eq!(d, Decision::neutral());
    }

    #[test]
    fn undefined_rsi_short_circuits() {
        let d = decide(&snap(None, Some(1.2), Some(1.1)), Trend::Up, &SignalParams::default());
        assert_eq!(d.signal, SignalKind::Neutral);
        assert_eq!(d.reason.as_deref(), Some(RSI_UNAVAILABLE_REASON));
    }
}
