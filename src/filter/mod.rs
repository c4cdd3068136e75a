//! Band-pass FIR filter design and application.
//!
//! - [`design`]: Blackman-windowed sinc kernels, spectral inversion,
//!   band-stop and band-pass construction.
//! - [`apply`]: centered same-length convolution (direct or FFT overlap-add).

pub mod apply;
pub mod design;

pub use apply::{apply_kernel_rows, convolve_same, convolve_same_direct, convolve_same_fft};
pub use design::{
    blackman, design_bandpass, design_bandstop, kernel_length, lowpass_kernel, sinc,
    spectral_invert, BandpassSpec, DEFAULT_LENGTH_FACTOR,
    MAX_TAPS,
};
