//! # hoep — band-pass FIR filtering for hourly price series
//!
//! `hoep` removes long-term trend and short-term noise from uniformly sampled
//! series (originally the Hourly Ontario Energy Price) with a linear-phase,
//! Blackman-windowed sinc band-pass filter, then summarises the result as
//! daily price profiles.
//!
//! ## Pipeline overview
//!
//! ```text
//! hourly series  (caller-supplied, 1 sample / hour)
//!   │
//!   ├─ PriceFilterConfig::spec()   periods in days → normalised cutoffs
//!   ├─ design_bandpass()           N = ceil(K / b) odd taps, lowpass(f_H) − lowpass(f_L)
//!   ├─ convolve_same()             centered, zero-padded, same length
//!   ├─ daily_matrix()              [days, 24]
//!   ├─ day_profile()               mean per hour of day
//!   └─ typical_day_mask()          drop days outside the (1 %, 99 %) quantiles
//!        │
//!        └─→ PriceReport
//! ```
//!
//! ## Quick start
//!
//! ```
//! use hoep::design_and_apply;
//! use hoep::synth::tone;
//!
//! // A tone at 15/1024 cycles/sample sits inside the (5/1024, 25/1024) band.
//! let x = tone(1024, 15.0 / 1024.0, 1.0);
//! let y = design_and_apply(&x, 5.0 / 1024.0, 25.0 / 1024.0, 5.0 / 1024.0).unwrap();
//! assert_eq!(y.len(), x.len());
//! ```
//!
//! ## Running individual steps
//!
//! ```
//! use hoep::{BandpassSpec, convolve_same};
//!
//! let spec = BandpassSpec::with_length_factor(0.01, 0.1, 0.02, 12.0).unwrap();
//! let h = spec.kernel().unwrap();          // 601 taps
//! let x = vec![1.0; 2000];
//! let y = convolve_same(&x, &h);           // DC removed away from the edges
//! assert!(y[1000].abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod profile;
pub mod synth;

use ndarray::{Array1, Array2};
use rand::SeedableRng;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{PriceFilterConfig, ProfileConfig, SynthConfig};

// error
pub use error::{Error, Result};

// filter — design helpers + convolution
pub use filter::{
    apply_kernel_rows, blackman, convolve_same, design_bandpass, design_bandstop,
    kernel_length, lowpass_kernel, sinc, spectral_invert, BandpassSpec, DEFAULT_LENGTH_FACTOR,
    MAX_TAPS,
};

// profile
pub use profile::{daily_matrix, day_profile, kept_fraction, masked_profile, quantile, typical_day_mask};

/// Band-pass `signal` between `low_cutoff` and `high_cutoff` (cycles/sample).
///
/// Uses [`DEFAULT_LENGTH_FACTOR`] for the kernel length
/// `N = ceil(K / transition_bw)`, rounded up to odd. See
/// [`design_and_apply_with`] to choose `K`.
///
/// The output has the same length as `signal`; roughly `N / 2` samples at
/// each end are biased by the zero padding.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `low_cutoff <= 0`, `high_cutoff >= 0.5`,
/// `low_cutoff >= high_cutoff`, `transition_bw <= 0`, or `signal` is empty.
///
/// # Examples
///
/// ```
/// let err = hoep::design_and_apply(&[1.0, 2.0, 3.0], 0.1, 0.05, 0.01);
/// assert!(matches!(err, Err(hoep::Error::InvalidParameter(_))));
/// ```
pub fn design_and_apply(
    signal: &[f64],
    low_cutoff: f64,
    high_cutoff: f64,
    transition_bw: f64,
) -> Result<Vec<f64>> {
    let spec = BandpassSpec::new(low_cutoff, high_cutoff, transition_bw)?;
    design_and_apply_with(signal, &spec)
}

/// [`design_and_apply`] with a fully specified [`BandpassSpec`].
pub fn design_and_apply_with(signal: &[f64], spec: &BandpassSpec) -> Result<Vec<f64>> {
    spec.apply(signal)
}

/// Band-pass every row of `data` (`[channels, samples]`) with one kernel.
///
/// Returns a new array; `data` is left untouched.
pub fn filter_channels(data: &Array2<f64>, spec: &BandpassSpec) -> Result<Array2<f64>> {
    if data.ncols() == 0 {
        error::invalid!("channels must hold at least one sample");
    }
    let h = spec.kernel()?;
    let mut out = data.clone();
    apply_kernel_rows(&mut out, &h);
    Ok(out)
}

/// Output of [`run_synthetic_demo`].
#[derive(Debug, Clone)]
pub struct SynthRun {
    /// Filter used for both signals.
    pub spec: BandpassSpec,
    /// Sum of the configured tones.
    pub clean: Vec<f64>,
    /// `clean` plus Gaussian noise.
    pub noisy: Vec<f64>,
    /// `clean` after band-pass filtering.
    pub clean_filtered: Vec<f64>,
    /// `noisy` after band-pass filtering.
    pub noisy_filtered: Vec<f64>,
}

/// Build the multi-tone demonstration signal, add seeded noise and filter it.
///
/// Deterministic for a given [`SynthConfig::seed`].
pub fn run_synthetic_demo(cfg: &SynthConfig) -> Result<SynthRun> {
    let spec = cfg.spec()?;
    log::info!(
        "synthetic demo: {} samples, tones {:?}, band ({}, {}) bins, {} taps",
        cfg.n_samples,
        cfg.tone_bins,
        cfg.low_bin,
        cfg.high_bin,
        spec.kernel_len()
    );

    let clean = synth::multi_tone(cfg.n_samples, &cfg.tone_freqs());
    let mut noisy = clean.clone();
    let mut rng = rand::rngs::StdRng::seed_from_u64(cfg.seed);
    synth::add_gaussian_noise(&mut noisy, cfg.noise_sigma, &mut rng)?;

    let h = spec.kernel()?;
    let clean_filtered = convolve_same(&clean, &h);
    let noisy_filtered = convolve_same(&noisy, &h);

    Ok(SynthRun { spec, clean, noisy, clean_filtered, noisy_filtered })
}

/// Output of [`analyze_prices`].
#[derive(Debug, Clone)]
pub struct PriceReport {
    /// Filter applied to the series.
    pub spec: BandpassSpec,
    /// Band-passed series, same length as the input.
    pub filtered: Vec<f64>,
    /// Per-hour mean of the raw series.
    pub raw_profile: Array1<f64>,
    /// Per-hour mean of the filtered series.
    pub filtered_profile: Array1<f64>,
    /// Typical-day flag for each complete day of the raw series.
    pub typical_days: Vec<bool>,
    /// Share of typical days.
    pub kept_fraction: f64,
    /// Per-hour mean over typical days only; `None` when no day qualifies.
    pub typical_profile: Option<Array1<f64>>,
}

/// Filter an hourly price series and summarise it as daily profiles.
///
/// # Errors
///
/// Fails if the filter or profile configuration is invalid, or if the series
/// does not hold at least one complete day.
pub fn analyze_prices(
    series: &[f64],
    filter_cfg: &PriceFilterConfig,
    profile_cfg: &ProfileConfig,
) -> Result<PriceReport> {
    let spec = filter_cfg.spec()?;
    let raw_daily = daily_matrix(series, profile_cfg.hours_per_day)?;
    let typical_days = typical_day_mask(
        &raw_daily,
        profile_cfg.lower_quantile,
        profile_cfg.upper_quantile,
    )?;

    log::info!(
        "price series: {} samples, {} days, {} taps",
        series.len(),
        raw_daily.nrows(),
        spec.kernel_len()
    );

    let filtered = spec.apply(series)?;
    let filtered_daily = daily_matrix(&filtered, profile_cfg.hours_per_day)?;

    let kept = kept_fraction(&typical_days);
    let typical_profile = masked_profile(&raw_daily, &typical_days)?;
    log::info!("typical days: {:.2}%", kept * 100.0);

    Ok(PriceReport {
        spec,
        filtered,
        raw_profile: day_profile(&raw_daily),
        filtered_profile: day_profile(&filtered_daily),
        typical_days,
        kept_fraction: kept,
        typical_profile,
    })
}
