//! Windowed-sinc band-pass FIR design.
//!
//! For cutoffs `f_low < f_high` (cycles/sample) and transition bandwidth `b`:
//!   • filter length N      = ceil(K / b), rounded up to odd
//!   • low-pass at f        = sinc(2·f·(i − c)) · blackman(N), normalised to sum 1
//!   • band-stop            = lowpass(f_low) + invert(lowpass(f_high))
//!   • band-pass            = invert(band-stop) = lowpass(f_high) − lowpass(f_low)
//!
//! where `c = (N − 1) / 2` is the centre tap and `invert` is spectral inversion
//! (negate, then add 1 at `c`).
use std::f64::consts::PI;

use crate::error::{invalid, Result};
use crate::filter::apply::convolve_same;

/// Default `K` in `N = ceil(K / transition_bw)`.
pub const DEFAULT_LENGTH_FACTOR: f64 = 4.0;

/// Largest kernel accepted by [`BandpassSpec::validate`].
///
/// The FFT path holds a block of up to `4·N` complex samples (16 bytes each),
/// which must stay within `isize::MAX` bytes.
pub const MAX_TAPS: usize = isize::MAX as usize / 64;

/// Parameters of a band-pass FIR design, all frequencies normalised to the
/// sample rate (Nyquist = 0.5).
///
/// ```
/// use hoep::BandpassSpec;
///
/// let spec = BandpassSpec::new(5.0 / 1024.0, 25.0 / 1024.0, 5.0 / 1024.0).unwrap();
/// assert_eq!(spec.kernel_len(), 821);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassSpec {
    /// Lower edge of the pass band.
    pub low_cutoff: f64,
    /// Upper edge of the pass band.
    pub high_cutoff: f64,
    /// Width of the transition bands. Smaller values give longer, sharper kernels.
    pub transition_bw: f64,
    /// `K` in `N = ceil(K / transition_bw)`.
    pub length_factor: f64,
}

impl BandpassSpec {
    /// Validated spec with [`DEFAULT_LENGTH_FACTOR`].
    pub fn new(low_cutoff: f64, high_cutoff: f64, transition_bw: f64) -> Result<Self> {
        Self::with_length_factor(low_cutoff, high_cutoff, transition_bw, DEFAULT_LENGTH_FACTOR)
    }

    /// Validated spec with an explicit length factor.
    pub fn with_length_factor(
        low_cutoff: f64,
        high_cutoff: f64,
        transition_bw: f64,
        length_factor: f64,
    ) -> Result<Self> {
        let spec = Self { low_cutoff, high_cutoff, transition_bw, length_factor };
        spec.validate()?;
        Ok(spec)
    }

    /// Check `0 < low < high < 0.5`, `transition_bw > 0` and `length_factor > 0`.
    ///
    /// Written as negated comparisons so NaN is rejected too.
    pub fn validate(&self) -> Result<()> {
        if !(self.low_cutoff > 0.0) {
            invalid!("low_cutoff must be > 0, got {}", self.low_cutoff);
        }
        if !(self.high_cutoff < 0.5) {
            invalid!("high_cutoff must be < 0.5 (Nyquist), got {}", self.high_cutoff);
        }
        if !(self.low_cutoff < self.high_cutoff) {
            invalid!(
                "low_cutoff ({}) must be below high_cutoff ({})",
                self.low_cutoff,
                self.high_cutoff
            );
        }
        if !(self.transition_bw > 0.0) {
            invalid!("transition_bw must be > 0, got {}", self.transition_bw);
        }
        if !(self.length_factor > 0.0) || !self.length_factor.is_finite() {
            invalid!("length_factor must be a positive finite number, got {}", self.length_factor);
        }
        let n_raw = self.length_factor / self.transition_bw;
        // Compared before rounding to odd, so leave room for the extra tap.
        if !n_raw.is_finite() || n_raw >= (MAX_TAPS - 1) as f64 {
            invalid!(
                "transition_bw {} is too small for length_factor {}: more than {MAX_TAPS} taps",
                self.transition_bw,
                self.length_factor
            );
        }
        Ok(())
    }

    /// Number of taps the band-pass kernel will have.
    pub fn kernel_len(&self) -> usize {
        kernel_length(self.length_factor, self.transition_bw)
    }

    /// Build the band-pass kernel for this spec.
    pub fn kernel(&self) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(bandpass_kernel(self))
    }

    /// Band-pass `signal`, returning a new sequence of the same length.
    ///
    /// The kernel is rebuilt on every call.
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.is_empty() {
            invalid!("signal must not be empty");
        }
        let h = self.kernel()?;
        Ok(convolve_same(signal, &h))
    }
}

/// Number of FIR taps for a given length factor and transition bandwidth.
/// Returns an odd integer so the kernel has a well-defined centre tap.
///
/// Formula: `ceil(length_factor / transition_bw)` rounded up to odd.
pub fn kernel_length(length_factor: f64, transition_bw: f64) -> usize {
    let n_raw = (length_factor / transition_bw).ceil().max(1.0) as usize;
    if n_raw % 2 == 0 { n_raw + 1 } else { n_raw }
}

/// Normalised sinc: `sin(πx) / (πx)` with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Blackman window of length `n` (`0.42 − 0.5·cos + 0.08·cos`).
///
/// Only the first half is evaluated; the second half is mirrored so that
/// `w[i] == w[n - 1 - i]` holds exactly.
pub fn blackman(n: usize) -> Vec<f64> {
    match n {
        0 => return vec![],
        1 => return vec![1.0],
        _ => {}
    }
    let m = (n - 1) as f64;
    let mut w = vec![0.0; n];
    for i in 0..n.div_ceil(2) {
        let x = i as f64 / m;
        let v = 0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos();
        w[i] = v;
        w[n - 1 - i] = v;
    }
    w
}

/// Blackman-windowed sinc low-pass of odd length `n` at `cutoff`
/// (cycles/sample), normalised to unit DC gain.
pub fn lowpass_kernel(n: usize, cutoff: f64) -> Vec<f64> {
    debug_assert!(n % 2 == 1, "lowpass_kernel requires odd n");
    let center = (n - 1) / 2;
    let win = blackman(n);

    let mut h: Vec<f64> = win
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            // sinc is even; evaluating on |t| keeps mirrored taps bit-identical.
            let t = i.abs_diff(center) as f64;
            sinc(2.0 * cutoff * t) * w
        })
        .collect();

    let s: f64 = h.iter().sum();
    h.iter_mut().for_each(|v| *v /= s);
    h
}

/// Spectral inversion in place: negate every tap and add 1 at the centre.
pub fn spectral_invert(h: &mut [f64]) {
    debug_assert!(h.len() % 2 == 1, "spectral inversion requires odd length");
    let center = (h.len() - 1) / 2;
    h.iter_mut().for_each(|v| *v = -*v);
    h[center] += 1.0;
}

/// Low-pass at `low_cutoff` plus high-pass at `high_cutoff`.
///
/// Passes content below `low_cutoff` and above `high_cutoff`; unit DC gain.
pub fn design_bandstop(spec: &BandpassSpec) -> Result<Vec<f64>> {
    spec.validate()?;
    Ok(bandstop_kernel(spec))
}

/// Band-pass kernel: unity gain inside `(low_cutoff, high_cutoff)`, zero DC gain.
pub fn design_bandpass(spec: &BandpassSpec) -> Result<Vec<f64>> {
    spec.kernel()
}

fn bandstop_kernel(spec: &BandpassSpec) -> Vec<f64> {
    let n = spec.kernel_len();
    log::debug!(
        "designing {n}-tap kernel: low={} high={} bw={} K={}",
        spec.low_cutoff,
        spec.high_cutoff,
        spec.transition_bw,
        spec.length_factor
    );

    let h_low = lowpass_kernel(n, spec.low_cutoff);
    let mut h_high = lowpass_kernel(n, spec.high_cutoff);
    spectral_invert(&mut h_high);

    h_low.iter().zip(&h_high).map(|(a, b)| a + b).collect()
}

fn bandpass_kernel(spec: &BandpassSpec) -> Vec<f64> {
    let mut h = bandstop_kernel(spec);
    spectral_invert(&mut h);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_spec() -> BandpassSpec {
        BandpassSpec::new(5.0 / 1024.0, 25.0 / 1024.0, 5.0 / 1024.0).unwrap()
    }

    #[test]
    fn kernel_length_is_odd() {
        for bw in [0.001_f64, 0.003, 0.01, 0.02, 0.05, 0.25] {
            for k in [1.0, 4.0, 12.0] {
                let n = kernel_length(k, bw);
                assert!(n % 2 == 1, "N={n} is even for K={k} bw={bw}");
            }
        }
    }

    #[test]
    fn kernel_length_known_values() {
        // ceil(4 * 1024 / 5) = 820 -> 821
        assert_eq!(kernel_length(4.0, 5.0 / 1024.0), 821);
        // ceil(12 / (1 / 312)) = 3744 -> 3745
        assert_eq!(kernel_length(12.0, 1.0 / 312.0), 3745);
        // Already odd stays put.
        assert_eq!(kernel_length(5.0, 1.0), 5);
        // Never zero taps.
        assert_eq!(kernel_length(1.0, 10.0), 1);
    }

    #[test]
    fn sinc_center_is_one() {
        assert_eq!(sinc(0.0), 1.0);
        approx::assert_abs_diff_eq!(sinc(1.0), 0.0, epsilon = 1e-15);
        approx::assert_abs_diff_eq!(sinc(0.5), 2.0 / PI, epsilon = 1e-15);
    }

    #[test]
    fn blackman_matches_reference() {
        // numpy.blackman(5)
        let w = blackman(5);
        let expected = [-1.38777878e-17, 0.34, 1.0, 0.34, -1.38777878e-17];
        for (a, b) in w.iter().zip(expected.iter()) {
            approx::assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
        assert_eq!(blackman(1), vec![1.0]);
        assert!(blackman(0).is_empty());
    }

    #[test]
    fn lowpass_dc_gain_unity() {
        let h = lowpass_kernel(101, 0.1);
        let dc: f64 = h.iter().sum();
        approx::assert_abs_diff_eq!(dc, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bandstop_passes_dc() {
        let h = design_bandstop(&demo_spec()).unwrap();
        let dc: f64 = h.iter().sum();
        approx::assert_abs_diff_eq!(dc, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn bandpass_sum_near_zero() {
        let h = design_bandpass(&demo_spec()).unwrap();
        let s: f64 = h.iter().sum();
        assert!(s.abs() < 1e-9, "bandpass sum = {s}");
    }

    #[test]
    fn bandpass_is_symmetric() {
        let h = design_bandpass(&demo_spec()).unwrap();
        let n = h.len();
        for i in 0..n / 2 {
            assert_eq!(h[i], h[n - 1 - i], "h[{i}] != h[{}]", n - 1 - i);
        }
    }

    #[test]
    fn spectral_invert_touches_center_once() {
        let mut h = vec![0.25, 0.5, 0.25];
        spectral_invert(&mut h);
        assert_eq!(h, vec![-0.25, 0.5, -0.25]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(BandpassSpec::new(0.0, 0.2, 0.01).is_err());
        assert!(BandpassSpec::new(0.1, 0.5, 0.01).is_err());
        assert!(BandpassSpec::new(0.2, 0.1, 0.01).is_err());
        assert!(BandpassSpec::new(0.1, 0.1, 0.01).is_err());
        assert!(BandpassSpec::new(0.1, 0.2, 0.0).is_err());
        assert!(BandpassSpec::new(0.1, 0.2, -0.01).is_err());
        assert!(BandpassSpec::new(f64::NAN, 0.2, 0.01).is_err());
        assert!(BandpassSpec::with_length_factor(0.1, 0.2, 0.01, 0.0).is_err());
        assert!(BandpassSpec::with_length_factor(0.1, 0.2, 1e-300, 4.0).is_err());
    }

    #[test]
    fn rejects_kernels_too_long_to_allocate() {
        // Finite tap count, but beyond what a Vec<f64> can hold.
        assert!(matches!(
            BandpassSpec::new(0.1, 0.2, 2e-18),
            Err(crate::Error::InvalidParameter(_))
        ));
        let too_long = 4.0 / (MAX_TAPS as f64);
        assert!(BandpassSpec::new(0.1, 0.2, too_long).is_err());
        // Just inside the cap still validates.
        let fits = 4.0 / ((MAX_TAPS / 2) as f64);
        assert!(BandpassSpec::new(0.1, 0.2, fits).is_ok());
    }
}
