/// Shared helpers for signal checks.
use std::f64::consts::PI;

#[allow(unused)]
/// Samples whose output saw the whole kernel (no zero padding).
pub fn interior(y: &[f64], n_taps: usize) -> &[f64] {
    let c = (n_taps - 1) / 2;
    &y[c..y.len() - c]
}

#[allow(unused)]
/// `sin(2π · freq · i)` offset to start at sample `start`.
pub fn sine_from(start: usize, n: usize, freq: f64, amplitude: f64) -> Vec<f64> {
    (start..start + n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64).sin())
        .collect()
}

#[allow(unused)]
/// Largest absolute value.
pub fn peak_abs(x: &[f64]) -> f64 {
    x.iter().map(|v| v.abs()).fold(0.0_f64, f64::max)
}

#[allow(unused)]
/// Maximum absolute difference between two slices.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0_f64, f64::max)
}

#[allow(unused)]
/// Root mean square.
pub fn rms(x: &[f64]) -> f64 {
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}
