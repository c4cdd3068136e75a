mod common;
use hoep::{
    analyze_prices, daily_matrix, day_profile, kept_fraction, typical_day_mask, Error,
    PriceFilterConfig, ProfileConfig,
};
use std::f64::consts::PI;

const DAYS: usize = 60;
const SPIKE_DAY: usize = 10;
const DIP_DAY: usize = 20;

/// Hourly prices: daily shape + small deterministic jitter, one spike and one dip.
fn price_fixture() -> Vec<f64> {
    let mut series = Vec::with_capacity(DAYS * 24);
    for d in 0..DAYS {
        for h in 0..24 {
            let base = 30.0 + 10.0 * (2.0 * PI * h as f64 / 24.0).sin();
            let jitter = ((d * 7 + h * 3) % 11) as f64 * 0.1;
            series.push(base + jitter);
        }
    }
    series[SPIKE_DAY * 24 + 18] = 500.0;
    series[DIP_DAY * 24 + 4] = -100.0;
    series
}

#[test]
fn outlier_days_are_masked() {
    let daily = daily_matrix(&price_fixture(), 24).unwrap();
    let mask = typical_day_mask(&daily, 0.01, 0.99).unwrap();
    assert_eq!(mask.len(), DAYS);
    assert!(!mask[SPIKE_DAY], "spike day kept");
    assert!(!mask[DIP_DAY], "dip day kept");

    let frac = kept_fraction(&mask);
    assert!(frac > 0.0 && frac < 1.0, "kept fraction {frac}");
}

#[test]
fn mask_keeps_everything_between_extreme_quantiles() {
    // Strictly between min and max: only days touching either extreme drop.
    let daily = daily_matrix(&price_fixture(), 24).unwrap();
    let mask = typical_day_mask(&daily, 0.0, 1.0).unwrap();
    let dropped: Vec<usize> = (0..DAYS).filter(|&d| !mask[d]).collect();
    assert_eq!(dropped, vec![SPIKE_DAY, DIP_DAY]);
}

#[test]
fn raw_profile_reflects_spike() {
    let daily = daily_matrix(&price_fixture(), 24).unwrap();
    let profile = day_profile(&daily);
    assert_eq!(profile.len(), 24);
    // Spike adds roughly (500 - 30) / 60 to hour 18.
    assert!(profile[18] > 25.0);
}

#[test]
fn analyze_prices_end_to_end() {
    let series = price_fixture();
    let report = analyze_prices(
        &series,
        &PriceFilterConfig::default(),
        &ProfileConfig::default(),
    )
    .unwrap();

    assert_eq!(report.filtered.len(), series.len());
    assert_eq!(report.raw_profile.len(), 24);
    assert_eq!(report.filtered_profile.len(), 24);
    assert_eq!(report.typical_days.len(), DAYS);
    assert_eq!(report.spec.kernel_len(), 3745);

    let typical = report.typical_profile.expect("some days should be typical");
    // No spike left in the typical-day profile.
    assert!(typical.iter().all(|&v| v < 45.0), "typical profile {typical:?}");
    // Daily shape survives: peak near hour 6, trough near hour 18.
    assert!(typical[6] > typical[18] + 15.0);

    let expected = report.typical_days.iter().filter(|&&m| m).count() as f64 / DAYS as f64;
    approx::assert_abs_diff_eq!(report.kept_fraction, expected);
}

#[test]
fn analyze_prices_needs_a_full_day() {
    let r = analyze_prices(
        &[1.0; 23],
        &PriceFilterConfig::default(),
        &ProfileConfig::default(),
    );
    assert!(matches!(r, Err(Error::InvalidParameter(_))));
}

#[test]
fn analyze_prices_rejects_bad_quantiles() {
    let cfg = ProfileConfig { lower_quantile: 0.9, upper_quantile: 0.1, ..ProfileConfig::default() };
    let r = analyze_prices(&price_fixture(), &PriceFilterConfig::default(), &cfg);
    assert!(matches!(r, Err(Error::InvalidParameter(_))));
}
