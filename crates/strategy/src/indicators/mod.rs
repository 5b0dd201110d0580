pub mod rsi;
pub mod sma;

pub use rsi::RsiIndicator;
pub use sma::sma;

use crate::config::SignalParams;

/// Every indicator series the pipeline derives from the close prices,
/// index-aligned with the bar table.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub sma_fast: Vec<Option<f64>>,
    pub sma_slow: Vec<Option<f64>>,
    pub trend_fast: Vec<Option<f64>>,
    pub trend_slow: Vec<Option<f64>>,
}

/// Indicator values at the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub rsi: Option<f64>,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub trend_fast: Option<f64>,
    pub trend_slow: Option<f64>,
}

impl IndicatorSet {
    pub fn compute(closes: &[f64], params: &SignalParams) -> Self {
        let rsi = RsiIndicator::new(params.rsi_period, params.rsi_smoothing);
        Self {
            rsi: rsi.series(closes),
            sma_fast: sma(closes, params.sma_fast),
            sma_slow: sma(closes, params.sma_slow),
            trend_fast: sma(closes, params.trend_fast),
            trend_slow: sma(closes, params.trend_slow),
        }
    }

    pub fn latest(&self) -> Snapshot {
        fn last(series: &[Option<f64>]) -> Option<f64> {
            series.last().copied().flatten()
        }
        Snapshot {
            rsi: last(&self.rsi),
            sma_fast: last(&self.sma_fast),
            sma_slow: last(&self.sma_slow),
            trend_fast: last(&self.trend_fast),
            trend_slow: last(&self.trend_slow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_index_aligned() {
        let closes: Vec<f64> = (0..60).map(|i| 1.0 + i as f64 * 0.001).collect();
        let set = IndicatorSet::compute(&closes, &SignalParams::default());
        for series in [&set.rsi, &set.sma_fast, &set.sma_slow, &set.trend_fast, &set.trend_slow] {
            assert_eq!(series.len(), closes.len());
        }
    }

    #[test]
    fn latest_leaves_unfilled_windows_undefined() {
        let closes: Vec<f64> = (0..60).map(|i| 1.0 + i as f64 * 0.001).collect();
        let snap = IndicatorSet::compute(&closes, &SignalParams::default()).latest();
        assert!(snap.rsi.is_some());
        assert!(snap.sma_fast.is_some());
        assert!(snap.trend_fast.is_some());
        assert!(snap.trend_slow.is_none());
    }
}
