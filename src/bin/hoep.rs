//! hoep: band-pass filter demonstrations and hourly price profiles.
//!
//! Input and output are plain numbers, one per line. Summaries go to stderr so
//! stdout can be piped.
//!
//!   hoep synth  [--dump]                      synthetic multi-tone demo
//!   hoep filter --low L --high H --transition B [--input FILE]
//!   hoep prices [--input FILE]                daily profiles of an hourly series
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hoep::{
    analyze_prices, design_and_apply_with, run_synthetic_demo, BandpassSpec, PriceFilterConfig,
    ProfileConfig, SynthConfig,
};

#[derive(Parser)]
#[command(name = "hoep", about = "Band-pass FIR filtering for hourly price series")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a synthetic noisy multi-tone signal.
    Synth(SynthArgs),
    /// Band-pass a series given in normalised frequencies.
    Filter(FilterArgs),
    /// Filter an hourly price series and print daily profiles.
    Prices(PricesArgs),
}

#[derive(Args)]
struct SynthArgs {
    /// Number of samples.
    #[arg(long, default_value_t = 1024)]
    samples: usize,

    /// Noise standard deviation.
    #[arg(long, default_value_t = 0.5)]
    noise: f64,

    /// Noise seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Lower pass-band edge, in cycles per `samples`.
    #[arg(long, default_value_t = 5.0)]
    low_bin: f64,

    /// Upper pass-band edge, in cycles per `samples`.
    #[arg(long, default_value_t = 25.0)]
    high_bin: f64,

    /// Transition bandwidth, in cycles per `samples`.
    #[arg(long, default_value_t = 5.0)]
    transition_bin: f64,

    /// K in N = ceil(K / transition).
    #[arg(long, default_value_t = 4.0)]
    length_factor: f64,

    /// Write `clean noisy clean_filtered noisy_filtered` rows to stdout.
    #[arg(long)]
    dump: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Lower cutoff (cycles/sample).
    #[arg(long)]
    low: f64,

    /// Upper cutoff (cycles/sample).
    #[arg(long)]
    high: f64,

    /// Transition bandwidth (cycles/sample).
    #[arg(long)]
    transition: f64,

    /// K in N = ceil(K / transition).
    #[arg(long, default_value_t = hoep::DEFAULT_LENGTH_FACTOR)]
    length_factor: f64,

    /// Input file, one sample per line (stdin when omitted).
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct PricesArgs {
    /// Input file, one hourly price per line (stdin when omitted).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Longest period kept, in days.
    #[arg(long, default_value_t = 30.0)]
    low_period_days: f64,

    /// Shortest period kept, in days.
    #[arg(long, default_value_t = 2.0)]
    high_period_days: f64,

    /// Transition period, in days.
    #[arg(long, default_value_t = 13.0)]
    transition_period_days: f64,

    /// K in N = ceil(K / transition).
    #[arg(long, default_value_t = 12.0)]
    length_factor: f64,

    /// Samples per day.
    #[arg(long, default_value_t = 24)]
    hours_per_day: usize,

    /// Typical days stay above this quantile.
    #[arg(long, default_value_t = 0.01)]
    lower_quantile: f64,

    /// Typical days stay below this quantile.
    #[arg(long, default_value_t = 0.99)]
    upper_quantile: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Synth(args) => synth(args),
        Command::Filter(args) => filter(args),
        Command::Prices(args) => prices(args),
    }
}

fn synth(args: SynthArgs) -> Result<()> {
    let cfg = SynthConfig {
        n_samples: args.samples,
        noise_sigma: args.noise,
        low_bin: args.low_bin,
        high_bin: args.high_bin,
        transition_bin: args.transition_bin,
        length_factor: args.length_factor,
        seed: args.seed,
        ..SynthConfig::default()
    };
    let run = run_synthetic_demo(&cfg)?;

    eprintln!(
        "{} samples  {} taps  rms clean={:.4} filtered={:.4}  noisy={:.4} filtered={:.4}",
        run.clean.len(),
        run.spec.kernel_len(),
        rms(&run.clean),
        rms(&run.clean_filtered),
        rms(&run.noisy),
        rms(&run.noisy_filtered),
    );

    if args.dump {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for i in 0..run.clean.len() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                run.clean[i], run.noisy[i], run.clean_filtered[i], run.noisy_filtered[i]
            )?;
        }
        out.flush()?;
    }
    Ok(())
}

fn filter(args: FilterArgs) -> Result<()> {
    let spec =
        BandpassSpec::with_length_factor(args.low, args.high, args.transition, args.length_factor)?;
    let x = read_samples(args.input.as_deref())?;
    let y = design_and_apply_with(&x, &spec)?;
    eprintln!("{} samples  {} taps", y.len(), spec.kernel_len());
    write_samples(&y)
}

fn prices(args: PricesArgs) -> Result<()> {
    let filter_cfg = PriceFilterConfig {
        sample_period_hours: 24.0 / args.hours_per_day as f64,
        low_period_days: args.low_period_days,
        high_period_days: args.high_period_days,
        transition_period_days: args.transition_period_days,
        length_factor: args.length_factor,
    };
    let profile_cfg = ProfileConfig {
        hours_per_day: args.hours_per_day,
        lower_quantile: args.lower_quantile,
        upper_quantile: args.upper_quantile,
    };

    let series = read_samples(args.input.as_deref())?;
    let report = analyze_prices(&series, &filter_cfg, &profile_cfg)?;

    eprintln!(
        "{} samples  {} taps  typical days {:.2}%",
        series.len(),
        report.spec.kernel_len(),
        report.kept_fraction * 100.0
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "hour\traw\tfiltered\ttypical")?;
    for h in 0..report.raw_profile.len() {
        let typical = report
            .typical_profile
            .as_ref()
            .map_or(String::from("-"), |p| p[h].to_string());
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            h + 1,
            report.raw_profile[h],
            report.filtered_profile[h],
            typical
        )?;
    }
    out.flush()?;
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Parse one number per line; blank lines and `#` comments are skipped.
fn read_samples(path: Option<&Path>) -> Result<Vec<f64>> {
    let reader: Box<dyn BufRead> = match path {
        Some(p) => Box::new(BufReader::new(
            std::fs::File::open(p).with_context(|| format!("opening {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut out = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("reading samples")?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let v: f64 = s
            .parse()
            .with_context(|| format!("line {}: not a number: {s:?}", lineno + 1))?;
        out.push(v);
    }
    Ok(out)
}

fn write_samples(y: &[f64]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for v in y {
        writeln!(out, "{v}")?;
    }
    out.flush()?;
    Ok(())
}

fn rms(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}
