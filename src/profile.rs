//! Daily price profiles and outlier-day selection.
//!
//! An hourly series is folded into a `[days, hours_per_day]` matrix. The day
//! profile is the per-hour mean over days. "Typical" days are those whose
//! every hourly value lies strictly between two quantiles of the whole
//! matrix (1 % and 99 % by default), which drops days with price spikes.
use ndarray::{Array1, Array2, Axis};

use crate::error::{invalid, Result};

/// Fold `series` into `[days, hours_per_day]`, dropping a trailing partial day.
pub fn daily_matrix(series: &[f64], hours_per_day: usize) -> Result<Array2<f64>> {
    if hours_per_day == 0 {
        invalid!("hours_per_day must be > 0");
    }
    let n_days = series.len() / hours_per_day;
    if n_days == 0 {
        invalid!(
            "series of {} samples holds no complete day of {hours_per_day} samples",
            series.len()
        );
    }
    let used = n_days * hours_per_day;
    Ok(Array2::from_shape_vec((n_days, hours_per_day), series[..used].to_vec())?)
}

/// Mean over days for each hour of the day.
pub fn day_profile(daily: &Array2<f64>) -> Array1<f64> {
    daily
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(daily.ncols()))
}

/// Quantile `q` of `values` with linear interpolation between order
/// statistics (numpy's default method).
///
/// # Errors
///
/// `InvalidParameter` for empty input, `q` outside `[0, 1]`, or non-finite values.
///
/// # Examples
///
/// ```
/// use hoep::profile::quantile;
/// assert_eq!(quantile(&[4.0, 1.0, 3.0, 2.0], 0.5).unwrap(), 2.5);
/// ```
pub fn quantile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        invalid!("quantile of an empty sequence");
    }
    if !(0.0..=1.0).contains(&q) {
        invalid!("quantile must lie in [0, 1], got {q}");
    }
    if values.iter().any(|v| !v.is_finite()) {
        invalid!("quantile input contains NaN or infinite values");
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// `true` for each day whose every value lies strictly between the
/// `lower_q` and `upper_q` quantiles of all values in `daily`.
pub fn typical_day_mask(daily: &Array2<f64>, lower_q: f64, upper_q: f64) -> Result<Vec<bool>> {
    if !(lower_q < upper_q) {
        invalid!("lower quantile ({lower_q}) must be below upper quantile ({upper_q})");
    }
    let all: Vec<f64> = daily.iter().copied().collect();
    let lo = quantile(&all, lower_q)?;
    let hi = quantile(&all, upper_q)?;
    log::debug!("typical-day bounds: ({lo}, {hi})");

    Ok(daily
        .rows()
        .into_iter()
        .map(|day| day.iter().all(|&v| v > lo && v < hi))
        .collect())
}

/// Share of `true` entries in `mask`; `0.0` for an empty mask.
pub fn kept_fraction(mask: &[bool]) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.iter().filter(|&&m| m).count() as f64 / mask.len() as f64
}

/// Day profile over the days selected by `mask`, or `None` when no day is kept.
pub fn masked_profile(daily: &Array2<f64>, mask: &[bool]) -> Result<Option<Array1<f64>>> {
    if mask.len() != daily.nrows() {
        invalid!("mask has {} entries for {} days", mask.len(), daily.nrows());
    }
    let kept: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(i))
        .collect();
    if kept.is_empty() {
        return Ok(None);
    }
    Ok(Some(day_profile(&daily.select(Axis(0), &kept))))
}
