//! Centered, same-length FIR convolution.
//!
//! `y[k] = Σ_j h[j] · x[k + c − j]` with `c = (N − 1) / 2` and samples outside
//! the input read as zero, i.e. `numpy.convolve(x, h, mode="same")` for
//! `len(x) >= len(h)`, and still `len(x)` outputs when the kernel is longer.
//! The first and last ~N/2 outputs see the zero padding; that edge transient
//! is left in place.
use ndarray::{Array2, ArrayView1};
use rustfft::{num_complex::Complex, FftPlanner};

/// Below this many taps (or samples) the direct sum beats the FFT path.
const DIRECT_MAX_LEN: usize = 64;

/// Convolve `x` with `h`, returning `x.len()` samples.
///
/// Picks the direct sum for short inputs and FFT overlap-add otherwise; both
/// paths produce the same values up to rounding.
pub fn convolve_same(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.len().min(h.len()) <= DIRECT_MAX_LEN {
        log::debug!("direct convolution: {} samples x {} taps", x.len(), h.len());
        convolve_same_direct(x, h)
    } else {
        log::debug!("FFT convolution: {} samples x {} taps", x.len(), h.len());
        convolve_same_fft(x, h)
    }
}

/// Direct O(N·M) evaluation of [`convolve_same`].
pub fn convolve_same_direct(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n_x = x.len();
    let n_h = h.len();
    if n_h == 0 {
        return vec![0.0; n_x];
    }
    let center = (n_h - 1) / 2;

    (0..n_x)
        .map(|k| {
            // Keep k + center - j inside [0, n_x).
            let j_lo = (k + center + 1).saturating_sub(n_x);
            let j_hi = (k + center).min(n_h - 1);
            (j_lo..=j_hi).map(|j| h[j] * x[k + center - j]).sum()
        })
        .collect()
}

/// Overlap-add FFT evaluation of [`convolve_same`].
pub fn convolve_same_fft(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n_x = x.len();
    let n_h = h.len();
    if n_x == 0 {
        return vec![];
    }
    if n_h == 0 {
        return vec![0.0; n_x];
    }

    let center = (n_h - 1) / 2;
    let n_full = n_x + n_h - 1;

    let n_fft = choose_fft_len(n_h, n_x);
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft_fwd = planner.plan_fft_forward(n_fft);
    let fft_inv = planner.plan_fft_inverse(n_fft);
    let inv_scale = 1.0 / n_fft as f64;

    // Precompute FFT of h (zero-padded to n_fft).
    let mut h_fft = zero_padded(h, n_fft);
    fft_fwd.process(&mut h_fft);

    let n_seg = n_fft - n_h + 1;
    let mut y_full = vec![0.0_f64; n_full];

    for start in (0..n_x).step_by(n_seg) {
        let stop = (start + n_seg).min(n_x);

        let mut buf = zero_padded(&x[start..stop], n_fft);
        fft_fwd.process(&mut buf);
        for (b, &hf) in buf.iter_mut().zip(h_fft.iter()) {
            *b *= hf;
        }
        fft_inv.process(&mut buf);

        // Full linear convolution of this block has stop - start + n_h - 1 samples.
        let seg_len = stop - start + n_h - 1;
        for (o, b) in y_full[start..start + seg_len].iter_mut().zip(buf.iter()) {
            *o += b.re * inv_scale;
        }
    }

    y_full[center..center + n_x].to_vec()
}

/// Filter every row of `data` (`[channels, samples]`) in place with kernel `h`.
pub fn apply_kernel_rows(data: &mut Array2<f64>, h: &[f64]) {
    for mut row in data.rows_mut() {
        let filtered = convolve_same(&row.to_vec(), h);
        row.assign(&ArrayView1::from(&filtered));
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Choose the FFT block size (power of 2 minimising operation count).
///
/// Cost model:
///   `cost = ceil(n_x / (N - n_h + 1)) * N * (log2(N) + 1) + 4e-5 * N * n_x`
fn choose_fft_len(n_h: usize, n_x: usize) -> usize {
    let min_n = (2 * n_h - 1).next_power_of_two();
    // One block covering the whole input is the upper bound.
    let max_n = (n_x + n_h - 1).next_power_of_two().max(min_n);

    let mut best_n = max_n;
    let mut best_cost = f64::INFINITY;

    let mut n = min_n;
    while n <= max_n {
        let n_seg = (n - n_h + 1) as f64;
        let log2 = n.trailing_zeros() as f64;
        let cost = (n_x as f64 / n_seg).ceil() * n as f64 * (log2 + 1.0)
            + 4e-5 * n as f64 * n_x as f64;
        if cost < best_cost {
            best_cost = cost;
            best_n = n;
        }
        n <<= 1;
    }
    best_n
}

fn zero_padded(v: &[f64], n_fft: usize) -> Vec<Complex<f64>> {
    v.iter()
        .map(|&re| Complex { re, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n_fft)
        .collect()
}
