use serde::{Deserialize, Serialize};

use crate::Error;

/// One OHLCV observation. A bar table is a `&[Bar]` ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Forex pairs often carry no volume; absent means 0.
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close, volume: 0.0 }
    }

    /// A bar whose four prices all equal `close`.
    pub fn flat(close: f64) -> Self {
        Self::new(close, close, close, close)
    }

    /// True when every price field is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Direction of the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Neutral,
}

impl SignalKind {
    pub fn is_directional(self) -> bool {
        self != SignalKind::Neutral
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Long-window regime label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Trend {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "UP"),
            Trend::Down => write!(f, "DOWN"),
            Trend::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
}

impl From<SignalKind> for Confidence {
    fn from(signal: SignalKind) -> Self {
        if signal.is_directional() {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// The full recommendation produced by one pipeline run.
///
/// Field coupling holds for every value the pipeline builds:
/// `take_profits.len() == 3`, `stop_loss.is_some()` and
/// `confidence == Medium` all hold exactly when `signal != Neutral`.
///
/// Serialized names follow the public wire format consumed by the terminal
/// clients (`reason`, `tp_levels`, `sl`, `sma10`, `sma20`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: SignalKind,
    #[serde(rename = "reason")]
    pub reasons: Vec<String>,
    pub entry: Option<f64>,
    #[serde(rename = "tp_levels")]
    pub take_profits: Vec<f64>,
    #[serde(rename = "sl")]
    pub stop_loss: Option<f64>,
    pub rsi: Option<f64>,
    #[serde(rename = "sma10")]
    pub sma_fast: Option<f64>,
    #[serde(rename = "sma20")]
    pub sma_slow: Option<f64>,
    pub trend: Trend,
    pub fvg_count: usize,
    pub confidence: Confidence,
}

impl SignalResult {
    /// Terminal NEUTRAL result for a table the pipeline refused to analyse.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            signal: SignalKind::Neutral,
            reasons: vec![reason.into()],
            entry: None,
            take_profits: Vec::new(),
            stop_loss: None,
            rsi: None,
            sma_fast: None,
            sma_slow: None,
            trend: Trend::Unknown,
            fvg_count: 0,
            confidence: Confidence::Low,
        }
    }

    /// False for results built by [`SignalResult::rejected`].
    pub fn is_analyzed(&self) -> bool {
        self.entry.is_some()
    }
}

/// Chart timeframe accepted by the signal endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Interval string understood by the Twelve Data time series endpoint.
    pub fn interval(self) -> &'static str {
        match self {
            Timeframe::M1 => "1min",
            Timeframe::M5 => "5min",
            Timeframe::M15 => "15min",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1day",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M1" => Ok(Timeframe::M1),
            "M5" => Ok(Timeframe::M5),
            "M15" => Ok(Timeframe::M15),
            "H1" => Ok(Timeframe::H1),
            "H4" => Ok(Timeframe::H4),
            "D1" => Ok(Timeframe::D1),
            _ => Err(Error::InvalidTimeframe(s.trim().to_uppercase())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_parses_case_insensitively() {
        assert_eq!("m15".parse::<Timeframe>().unwrap(), Timeframe::M15);
        assert_eq!("D1".parse::<Timeframe>().unwrap().interval(), "1day");
    }

    #[test]
    fn unknown_timeframe_is_rejected() {
        let err = "W1".parse::<Timeframe>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid timeframe: W1");
    }

    #[test]
    fn bar_volume_defaults_to_zero() {
        let bar: Bar =
            serde_json::from_str(r#"{"open":1.0,"high":2.0,"low":0.5,"close":1.5}"#).unwrap();
        assert_eq!(bar.volume, 0.0);
    }

    #[test]
    fn rejected_result_uses_wire_names() {
        let json = serde_json::to_value(SignalResult::rejected("Not enough data for analysis"))
            .unwrap();
        assert_eq!(json["signal"], "NEUTRAL");
        assert_eq!(json["trend"], "unknown");
        assert_eq!(json["confidence"], "low");
        assert_eq!(json["reason"][0], "Not enough data for analysis");
        assert!(json["sl"].is_null());
        assert_eq!(json["tp_levels"].as_array().unwrap().len(), 0);
        assert_eq!(json["fvg_count"], 0);
    }
}
