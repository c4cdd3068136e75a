mod common;
use common::{interior, max_abs_diff, rms, sine_from};
use hoep::{run_synthetic_demo, Error, SynthConfig};

#[test]
fn demo_is_reproducible_for_a_seed() {
    let cfg = SynthConfig { seed: 17, ..SynthConfig::default() };
    let a = run_synthetic_demo(&cfg).unwrap();
    let b = run_synthetic_demo(&cfg).unwrap();
    assert_eq!(a.noisy, b.noisy);
    assert_eq!(a.noisy_filtered, b.noisy_filtered);

    let c = run_synthetic_demo(&SynthConfig { seed: 18, ..cfg }).unwrap();
    assert_ne!(a.noisy, c.noisy);
}

#[test]
fn demo_isolates_in_band_tone() {
    let run = run_synthetic_demo(&SynthConfig::default()).unwrap();
    let taps = run.spec.kernel_len();
    assert_eq!(taps, 821);
    assert_eq!(run.clean.len(), 1024);
    assert_eq!(run.clean_filtered.len(), 1024);

    // Tones at bins 1 and 50 are removed; bin 15 remains.
    let c = (taps - 1) / 2;
    let inner = interior(&run.clean_filtered, taps);
    let expected = sine_from(c, inner.len(), 15.0 / 1024.0, 1.0);
    let err = max_abs_diff(inner, &expected);
    assert!(err < 0.02, "clean residual {err:.4}");

    // Noise is mostly out of band too.
    let residual: Vec<f64> = interior(&run.noisy_filtered, taps)
        .iter()
        .zip(expected.iter())
        .map(|(y, s)| y - s)
        .collect();
    let r = rms(&residual);
    assert!(r < 0.3, "noisy residual rms {r:.4}");
}

#[test]
fn zero_noise_leaves_signals_equal() {
    let run = run_synthetic_demo(&SynthConfig { noise_sigma: 0.0, ..SynthConfig::default() }).unwrap();
    assert_eq!(run.clean, run.noisy);
    assert_eq!(run.clean_filtered, run.noisy_filtered);
}

#[test]
fn bad_synth_config_rejected() {
    let cfg = SynthConfig { low_bin: 30.0, ..SynthConfig::default() };
    assert!(matches!(run_synthetic_demo(&cfg), Err(Error::InvalidParameter(_))));

    let cfg = SynthConfig { noise_sigma: -0.5, ..SynthConfig::default() };
    assert!(matches!(run_synthetic_demo(&cfg), Err(Error::InvalidParameter(_))));
}
