use common::Bar;

/// Count 3-bar bullish gaps: bars where the low clears the high of the bar
/// two positions back. Diagnostic only.
pub fn count(bars: &[Bar]) -> usize {
    bars.windows(3).filter(|w| w[2].low > w[0].high).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(low: f64, high: f64) -> Bar {
        Bar::new(low, high, low, high)
    }

    #[test]
    fn short_tables_have_no_gaps() {
        assert_eq!(count(&[]), 0);
        assert_eq!(count(&[bar(1.0, 2.0), bar(3.0, 4.0)]), 0);
    }

    #[test]
    fn counts_each_gap() {
        let bars = [
            bar(1.0, 1.1),
            bar(1.05, 1.2),
            bar(1.15, 1.3), // low 1.15 > high 1.1
            bar(1.1, 1.25), // low 1.1 < high 1.2
            bar(1.31, 1.4), // low 1.31 > high 1.3
        ];
        assert_eq!(count(&bars), 2);
    }

    #[test]
    fn touching_is_not_a_gap() {
        let bars = [bar(1.0, 1.1), bar(1.0, 1.1), bar(1.1, 1.2)];
        assert_eq!(count(&bars), 0);
    }
}
