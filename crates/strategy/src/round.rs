/// Round `value` to `decimals` places.
///
/// Goes through decimal formatting, which rounds the exact binary value, so
/// `round_to(1.000015, 5)` does not pick up the error that
/// `(v * 1e5).round() / 1e5` introduces.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{value:.prec$}", prec = decimals as usize)
        .parse()
        .unwrap_or(value)
}
