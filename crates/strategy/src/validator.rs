use thiserror::Error;

use common::Bar;

use crate::config::SignalParams;

/// Why a bar table was refused before any indicator ran.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("Not enough data for analysis")]
    InsufficientData { bars: usize, required: usize },

    #[error("Malformed bar data at index {index}")]
    Malformed { index: usize },
}

/// Check that the table is long enough and every price is finite.
/// Returns the most recent bar on success.
pub fn check<'a>(bars: &'a [Bar], params: &SignalParams) -> Result<&'a Bar, Rejection> {
    let required = params.min_bars.max(1);
    let insufficient = Rejection::InsufficientData { bars: bars.len(), required };
    if bars.len() < required {
        return Err(insufficient);
    }
    if let Some(index) = bars.iter().position(|b| !b.is_finite()) {
        return Err(Rejection::Malformed { index });
    }
    bars.last().ok_or(insufficient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_is_insufficient() {
        let bars = vec![Bar::flat(1.1); 49];
        assert_eq!(
            check(&bars, &SignalParams::default()),
            Err(Rejection::InsufficientData { bars: 49, required: 50 })
        );
    }

    #[test]
    fn at_floor_passes() {
        let mut bars = vec![Bar::flat(1.1); 50];
        bars[49].close = 1.2;
        assert_eq!(check(&bars, &SignalParams::default()).map(|b| b.close), Ok(1.2));
    }

    #[test]
    fn empty_table_is_rejected_even_with_zero_floor() {
        let params = SignalParams { min_bars: 0, ..Default::default() };
        assert!(check(&[], &params).is_err());
    }

    #[test]
    fn non_finite_price_is_malformed() {
        let mut bars = vec![Bar::flat(1.1); 60];
        bars[17].low = f64::NAN;
        assert_eq!(
            check(&bars, &SignalParams::default()),
            Err(Rejection::Malformed { index: 17 })
        );
    }
}
