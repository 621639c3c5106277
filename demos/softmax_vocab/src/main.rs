use anyhow::bail;
use clap::Parser;
use cordic_softmax::{CordicSoftmax, ExpKernel, StdExp};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Softmax over random token logits: CORDIC kernel vs platform expf
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Vocabulary sizes to test
    #[arg(long, value_delimiter = ',', default_values_t = vec![100, 1000, 10_000])]
    vocab: Vec<usize>,

    /// Standard deviation of the normal logit distribution
    #[arg(long, default_value_t = 3.0)]
    std_dev: f32,

    /// Timed repetitions per vocabulary size
    #[arg(long, default_value_t = 10)]
    repeats: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Comparison {
    sum: f64,
    mse: f64,
    max_abs_diff: f32,
    top1_match: bool,
    cordic_secs: f64,
    reference_secs: f64,
}

fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}

fn compare(cordic: &CordicSoftmax, logits: &[f32], repeats: usize) -> Comparison {
    let mut cordic_probs = vec![0.0f32; logits.len()];
    let mut reference_probs = vec![0.0f32; logits.len()];

    let start = Instant::now();
    for _ in 0..repeats {
        let _ = cordic.softmax_into(logits, &mut cordic_probs);
    }
    let cordic_secs = start.elapsed().as_secs_f64() / repeats as f64;

    let start = Instant::now();
    for _ in 0..repeats {
        let _ = StdExp.softmax_into(logits, &mut reference_probs);
    }
    let reference_secs = start.elapsed().as_secs_f64() / repeats as f64;

    let mut mse = 0.0f64;
    let mut max_abs_diff = 0.0f32;
    for (c, r) in cordic_probs.iter().zip(&reference_probs) {
        let d = c - r;
        mse += (d as f64).powi(2);
        max_abs_diff = max_abs_diff.max(d.abs());
    }

    Comparison {
        sum: cordic_probs.iter().map(|&p| p as f64).sum(),
        mse: mse / logits.len() as f64,
        max_abs_diff,
        top1_match: argmax(&cordic_probs) == argmax(&reference_probs),
        cordic_secs,
        reference_secs,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if args.vocab.iter().any(|&v| v == 0) {
        bail!("vocabulary sizes must be positive");
    }
    if !(args.std_dev.is_finite() && args.std_dev > 0.0) {
        bail!("--std-dev must be a positive finite number, got {}", args.std_dev);
    }
    if args.repeats == 0 {
        bail!("--repeats must be positive");
    }

    println!("=== CORDIC softmax over token vocabularies ===\n");
    println!("Logits ~ N(0, {}²), seed {}\n", args.std_dev, args.seed);

    let cordic = CordicSoftmax::new();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let normal = Normal::new(0.0f32, args.std_dev)?;
    let mut all_top1 = true;

    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>6} {:>12} {:>12}",
        "vocab", "sum", "MSE", "max |diff|", "top-1", "cordic µs", "expf µs"
    );
    println!("{}", "-".repeat(80));

    for &vocab in &args.vocab {
        let logits: Vec<f32> = (0..vocab).map(|_| normal.sample(&mut rng)).collect();
        debug!(vocab, "generated logits");

        let result = compare(&cordic, &logits, args.repeats);
        all_top1 &= result.top1_match;

        println!(
            "{:>8} {:>12.8} {:>12.3e} {:>12.3e} {:>6} {:>12.1} {:>12.1}",
            vocab,
            result.sum,
            result.mse,
            result.max_abs_diff,
            if result.top1_match { "yes" } else { "NO" },
            result.cordic_secs * 1e6,
            result.reference_secs * 1e6,
        );
        info!(
            vocab,
            sum = result.sum,
            mse = result.mse,
            top1 = result.top1_match,
            slowdown = result.cordic_secs / result.reference_secs.max(f64::MIN_POSITIVE),
            "vocabulary done"
        );
    }

    println!("{}", "-".repeat(80));
    println!(
        "Top-1 agreement: {}",
        if all_top1 { "all sizes" } else { "MISMATCH" }
    );

    Ok(())
}
