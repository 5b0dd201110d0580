/// Simple moving average of `values` over a trailing `window`.
///
/// The output is index-aligned with the input; the first `window - 1` slots
/// are `None`. Uses a running sum, except that a window made entirely of one
/// repeated value yields that value exactly, so flat stretches compare equal
/// across different window lengths.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut same_run = 0usize;

    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        same_run = if i > 0 && values[i - 1] == value { same_run + 1 } else { 1 };

        if i + 1 < window {
            out.push(None);
        } else if same_run >= window {
            out.push(Some(value));
        } else {
            out.push(Some(sum / window as f64));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_until_window_fills() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
    }

    #[test]
    fn shorter_than_window_is_all_none() {
        assert!(sma(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }

    #[test]
    fn flat_series_is_exact_for_any_window() {
        let values = vec![1.1; 250];
        let fast = sma(&values, 50).last().copied().flatten();
        let slow = sma(&values, 200).last().copied().flatten();
        assert_eq!(fast, Some(1.1));
        assert_eq!(fast, slow);
    }

    #[test]
    fn window_slides_off_old_values() {
        let out = sma(&[10.0, 0.0, 0.0, 0.0], 2);
        assert_eq!(out[1], Some(5.0));
        assert_eq!(out[3], Some(0.0));
    }
}
