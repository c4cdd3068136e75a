//! Run configuration.
//!
//! Each struct holds every tunable of one entry point. Defaults reproduce the
//! settings of the original exploratory runs; override fields with
//! struct-update syntax:
//!
//! ```
//! use hoep::PriceFilterConfig;
//!
//! let cfg = PriceFilterConfig {
//!     low_period_days: 60.0, // keep slower swings
//!     ..PriceFilterConfig::default()
//! };
//! assert!(cfg.spec().is_ok());
//! ```

use crate::error::{invalid, Result};
use crate::filter::BandpassSpec;

/// Synthetic multi-tone demonstration signal and its filter.
///
/// Frequencies are given in *bins*: cycles per `n_samples` samples, so the
/// normalised frequency of bin `k` is `k / n_samples`.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Signal length.
    ///
    /// Default: `1024`.
    pub n_samples: usize,

    /// Standard deviation of the additive Gaussian noise. `0.0` disables noise.
    ///
    /// Default: `0.5`.
    pub noise_sigma: f64,

    /// Unit-amplitude tones summed into the clean signal.
    ///
    /// Default: `[1, 15, 50]` (below, inside and above the pass band).
    pub tone_bins: Vec<f64>,

    /// Lower pass-band edge. Default: `5`.
    pub low_bin: f64,

    /// Upper pass-band edge. Default: `25`.
    pub high_bin: f64,

    /// Transition bandwidth. Default: `5`.
    pub transition_bin: f64,

    /// `K` in `N = ceil(K / transition_bw)`.
    ///
    /// Default: `4.0`, which gives an 821-tap kernel at the other defaults.
    pub length_factor: f64,

    /// Seed for the noise generator. Runs with equal seeds are identical.
    ///
    /// Default: `0`.
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            n_samples: 1024,
            noise_sigma: 0.5,
            tone_bins: vec![1.0, 15.0, 50.0],
            low_bin: 5.0,
            high_bin: 25.0,
            transition_bin: 5.0,
            length_factor: 4.0,
            seed: 0,
        }
    }
}

impl SynthConfig {
    /// Normalised tone frequencies (`bin / n_samples`).
    pub fn tone_freqs(&self) -> Vec<f64> {
        let n = self.n_samples as f64;
        self.tone_bins.iter().map(|&b| b / n).collect()
    }

    /// Validated filter spec in normalised units.
    pub fn spec(&self) -> Result<BandpassSpec> {
        if self.n_samples == 0 {
            invalid!("n_samples must be > 0");
        }
        let n = self.n_samples as f64;
        BandpassSpec::with_length_factor(
            self.low_bin / n,
            self.high_bin / n,
            self.transition_bin / n,
            self.length_factor,
        )
    }
}

/// Band-pass filter for an hourly price series, in physical units.
///
/// The pass band is given as a range of *periods*: content repeating slower
/// than `low_period_days` (long-term trend) or faster than `high_period_days`
/// (short-term noise) is attenuated.
#[derive(Debug, Clone)]
pub struct PriceFilterConfig {
    /// Time between samples in hours. Default: `1.0`.
    pub sample_period_hours: f64,

    /// Longest period kept, in days. Default: `30.0`.
    pub low_period_days: f64,

    /// Shortest period kept, in days. Default: `2.0`.
    pub high_period_days: f64,

    /// Period whose frequency equals the transition bandwidth, in days.
    ///
    /// Default: `13.0`.
    pub transition_period_days: f64,

    /// `K` in `N = ceil(K / transition_bw)`.
    ///
    /// Default: `12.0`, which gives a 3 745-tap kernel (about 156 days) at
    /// the other defaults.
    pub length_factor: f64,
}

impl Default for PriceFilterConfig {
    fn default() -> Self {
        Self {
            sample_period_hours: 1.0,
            low_period_days: 30.0,
            high_period_days: 2.0,
            transition_period_days: 13.0,
            length_factor: 12.0,
        }
    }
}

impl PriceFilterConfig {
    /// Normalised frequency (cycles/sample) of a period given in days.
    ///
    /// # Examples
    ///
    /// ```
    /// use hoep::PriceFilterConfig;
    /// let cfg = PriceFilterConfig::default();
    /// assert_eq!(cfg.normalized(2.0), 1.0 / 48.0);
    /// ```
    pub fn normalized(&self, period_days: f64) -> f64 {
        self.sample_period_hours / (period_days * 24.0)
    }

    /// Validated filter spec in normalised units.
    pub fn spec(&self) -> Result<BandpassSpec> {
        if !(self.sample_period_hours > 0.0) {
            invalid!("sample_period_hours must be > 0, got {}", self.sample_period_hours);
        }
        for (name, days) in [
            ("low_period_days", self.low_period_days),
            ("high_period_days", self.high_period_days),
            ("transition_period_days", self.transition_period_days),
        ] {
            if !(days > 0.0) {
                invalid!("{name} must be > 0, got {days}");
            }
        }
        BandpassSpec::with_length_factor(
            self.normalized(self.low_period_days),
            self.normalized(self.high_period_days),
            self.normalized(self.transition_period_days),
            self.length_factor,
        )
    }
}

/// Daily-profile and outlier-day selection settings.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Samples per day. Default: `24`.
    pub hours_per_day: usize,

    /// A typical day stays strictly above this quantile of all values.
    ///
    /// Default: `0.01`.
    pub lower_quantile: f64,

    /// A typical day stays strictly below this quantile of all values.
    ///
    /// Default: `0.99`.
    pub upper_quantile: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { hours_per_day: 24, lower_quantile: 0.01, upper_quantile: 0.99 }
    }
}
