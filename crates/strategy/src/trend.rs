use common::Trend;

use crate::config::SignalParams;
use crate::indicators::Snapshot;

/// Trend label plus the reason recorded when it is directional.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReading {
    pub trend: Trend,
    pub reason: Option<String>,
}

/// Compare the long-window averages at the last bar.
///
/// Below `reliable_trend_bars` the label stays `unknown` even if both
/// averages happen to be defined.
pub fn classify(snapshot: &Snapshot, bar_count: usize, params: &SignalParams) -> TrendReading {
    let (fast, slow) = match (snapshot.trend_fast, snapshot.trend_slow) {
        (Some(fast), Some(slow)) if bar_count >= params.reliable_trend_bars => (fast, slow),
        _ => return TrendReading { trend: Trend::Unknown, reason: None },
    };

    let (f, s) = (params.trend_fast, params.trend_slow);
    if fast > slow {
        TrendReading { trend: Trend::Up, reason: Some(format!("MA{f} > MA{s} (Uptrend)")) }
    } else if fast < slow {
        TrendReading { trend: Trend::Down, reason: Some(format!("MA{f} < MA{s} (Downtrend)")) }
    } else {
        TrendReading { trend: Trend::Unknown, reason: None }
    }
}
