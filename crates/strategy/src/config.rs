use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// How the RSI averages gains and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RsiSmoothing {
    /// Bias-adjusted exponential mean with `alpha = 2 / (period + 1)`.
    #[default]
    Exponential,
    /// Plain rolling mean over the last `period` deltas.
    Simple,
}

/// Every tunable constant of the signal pipeline.
///
/// Missing keys in a config file fall back to the defaults below.
///
/// Example `config/signals.toml`:
/// ```toml
/// rsi_period = 14
/// rsi_smoothing = "exponential"
/// sma_fast = 10
/// sma_slow = 20
/// trend_fast = 50
/// trend_slow = 200
/// min_bars = 50
/// reliable_trend_bars = 200
/// pip_step_multiplier = 20.0
/// stop_loss_multiplier = 1.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Midline used by the moving-average crossover rules.
    pub rsi_midline: f64,

    pub sma_fast: usize,
    pub sma_slow: usize,
    pub trend_fast: usize,
    pub trend_slow: usize,

    /// Tables shorter than this are rejected outright.
    pub min_bars: usize,
    /// Below this many bars the trend label is always `unknown`.
    pub reliable_trend_bars: usize,

    /// Pips per take-profit step.
    pub pip_step_multiplier: f64,
    /// Stop-loss distance in steps.
    pub stop_loss_multiplier: f64,

    pub price_decimals: u32,
    pub rsi_decimals: u32,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Exponential,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_midline: 50.0,
            sma_fast: 10,
            sma_slow: 20,
            trend_fast: 50,
            trend_slow: 200,
            min_bars: 50,
            reliable_trend_bars: 200,
            pip_step_multiplier: 20.0,
            stop_loss_multiplier: 1.5,
            price_decimals: 5,
            rsi_decimals: 2,
        }
    }
}

impl SignalParams {
    /// Load from a TOML file and validate.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let params: SignalParams = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse '{path}': {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter sets the pipeline cannot evaluate meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.rsi_period == 0 {
            return Err(Error::Config("rsi_period must be >= 1".into()));
        }
        if self.sma_fast == 0 || self.sma_fast >= self.sma_slow {
            return Err(Error::Config(format!(
                "sma_fast ({}) must be >= 1 and below sma_slow ({})",
                self.sma_fast, self.sma_slow
            )));
        }
        if self.trend_fast == 0 || self.trend_fast >= self.trend_slow {
            return Err(Error::Config(format!(
                "trend_fast ({}) must be >= 1 and below trend_slow ({})",
                self.trend_fast, self.trend_slow
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(Error::Config(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        for (name, value) in [
            ("pip_step_multiplier", self.pip_step_multiplier),
            ("stop_loss_multiplier", self.stop_loss_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("{name} must be a positive number, got {value}")));
            }
        }
        if self.price_decimals > 10 || self.rsi_decimals > 10 {
            return Err(Error::Config("rounding precision must be at most 10 decimals".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SignalParams::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let params: SignalParams =
            toml::from_str("rsi_smoothing = \"simple\"\nmin_bars = 200\n").unwrap();
        assert_eq!(params.rsi_smoothing, RsiSmoothing::Simple);
        assert_eq!(params.min_bars, 200);
        assert_eq!(params.sma_fast, 10);
        assert_eq!(params.pip_step_multiplier, 20.0);
    }

    #[test]
    fn inverted_windows_are_rejected() {
        let params = SignalParams { sma_fast: 20, sma_slow: 10, ..Default::default() };
        assert!(params.validate().is_err());

        let params = SignalParams { trend_fast: 200, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let params = SignalParams { stop_loss_multiplier: 0.0, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("stop_loss_multiplier"));
    }
}
