/// Rounds `x` to `digits` decimal places (half away from zero)
pub fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10_f64.powi(digits);
    (x * scale).round() / scale
}
