use crate::config::RsiSmoothing;

use super::sma::sma;

/// Guards the gain/loss ratio when the average loss is zero. A flat series
/// therefore reads 0, not 50 or 100.
const EPSILON: f64 = 1e-10;

/// RSI (Relative Strength Index) indicator.
///
/// With exponential smoothing the value depends on every delta since the
/// first bar, so callers must pass the whole available history. Re-running on
/// a trimmed window produces different numbers.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
    pub smoothing: RsiSmoothing,
}

impl RsiIndicator {
    pub fn new(period: usize, smoothing: RsiSmoothing) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period, smoothing }
    }

    /// Full RSI series, index-aligned with `closes` (oldest first).
    /// Index 0 is always `None` because it has no delta.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        match self.smoothing {
            RsiSmoothing::Exponential => self.exponential(closes),
            RsiSmoothing::Simple => self.simple(closes),
        }
    }

    /// RSI at the most recent bar.
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        self.series(closes).last().copied().flatten()
    }

    fn exponential(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let alpha = 2.0 / (self.period as f64 + 1.0);
        let mut gains = Ewm::new(alpha);
        let mut losses = Ewm::new(alpha);

        let mut out = Vec::with_capacity(closes.len());
        if closes.is_empty() {
            return out;
        }
        out.push(None);

        for w in closes.windows(2) {
            let delta = w[1] - w[0];
            let avg_gain = gains.update(delta.max(0.0));
            let avg_loss = losses.update((-delta).max(0.0));
            out.push(Some(rsi_from(avg_gain, avg_loss)));
        }
        out
    }

    fn simple(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
        let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

        let avg_gain = sma(&gains, self.period);
        let avg_loss = sma(&losses, self.period);

        let mut out = Vec::with_capacity(closes.len());
        if closes.is_empty() {
            return out;
        }
        out.push(None);
        out.extend(
            avg_gain
                .into_iter()
                .zip(avg_loss)
                .map(|(g, l)| Some(rsi_from(g?, l?))),
        );
        out
    }
}

fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
    // Running sums can land a hair below zero.
    let rs = avg_gain.max(0.0) / (avg_loss.max(0.0) + EPSILON);
    100.0 - 100.0 / (1.0 + rs)
}

/// Bias-adjusted exponentially weighted mean, updated one observation at a
/// time. Each step decays the accumulated weight by `1 - alpha` and adds a
/// unit weight for the new value.
#[derive(Debug, Clone)]
struct Ewm {
    decay: f64,
    mean: Option<f64>,
    weight: f64,
}

impl Ewm {
    fn new(alpha: f64) -> Self {
        Self { decay: 1.0 - alpha, mean: None, weight: 1.0 }
    }

    fn update(&mut self, value: f64) -> f64 {
        let mean = match self.mean {
            None => value,
            Some(prev) => {
                self.weight *= self.decay;
                let next = if prev == value {
                    prev
                } else {
                    (self.weight * prev + value) / (self.weight + 1.0)
                };
                self.weight += 1.0;
                next
            }
        };
        self.mean = Some(mean);
        mean
    }
}
