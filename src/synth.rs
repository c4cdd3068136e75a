//! Synthetic test signals: sums of sinusoids plus Gaussian noise.
//!
//! Frequencies are normalised (cycles per sample). Noise is drawn from a
//! caller-supplied RNG so runs can be made reproducible with a seeded
//! [`rand::rngs::StdRng`].
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::error::{invalid, Result};

/// `amplitude · sin(2π · freq · i)` for `i` in `0..n`.
pub fn tone(n: usize, freq: f64, amplitude: f64) -> Vec<f64> {
    (0..n).map(|i| amplitude * (2.0 * PI * freq * i as f64).sin()).collect()
}

/// Sum of unit-amplitude tones at `freqs`.
pub fn multi_tone(n: usize, freqs: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; n];
    for &f in freqs {
        for (o, v) in out.iter_mut().zip(tone(n, f, 1.0)) {
            *o += v;
        }
    }
    out
}

/// Add zero-mean Gaussian noise with standard deviation `sigma` in place.
///
/// # Errors
///
/// `InvalidParameter` when `sigma` is negative or not finite.
///
/// # Examples
///
/// ```
/// use hoep::synth::{add_gaussian_noise, tone};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let mut x = tone(256, 0.05, 1.0);
/// add_gaussian_noise(&mut x, 0.1, &mut rng).unwrap();
/// ```
pub fn add_gaussian_noise<R: Rng + ?Sized>(signal: &mut [f64], sigma: f64, rng: &mut R) -> Result<()> {
    if !(sigma >= 0.0) || !sigma.is_finite() {
        invalid!("noise sigma must be a finite value >= 0, got {sigma}");
    }
    if sigma == 0.0 {
        return Ok(());
    }
    let normal = Normal::new(0.0, sigma)
        .map_err(|e| crate::Error::InvalidParameter(format!("noise sigma {sigma}: {e}")))?;
    for v in signal.iter_mut() {
        *v += normal.sample(rng);
    }
    Ok(())
}
