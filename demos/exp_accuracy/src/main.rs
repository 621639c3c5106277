use anyhow::bail;
use clap::Parser;
use cordic_core::{angle_table, ScaleFactorMode};
use cordic_softmax::{CordicConfig, CordicSoftmax};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Sweep the CORDIC exponential over a range and compare against `f64::exp`
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// First input of the sweep
    #[arg(long, default_value_t = -8.0, allow_negative_numbers = true)]
    start: f32,

    /// Last input of the sweep (inclusive)
    #[arg(long, default_value_t = 8.0, allow_negative_numbers = true)]
    end: f32,

    /// Number of sample points
    #[arg(long, default_value_t = 17)]
    points: usize,

    /// Rotation budget per evaluation
    #[arg(long, default_value_t = 6)]
    max_iterations: usize,

    /// Estimate the gain from sqrt(|X² - Y²|) instead of the angle product
    #[arg(long, default_value_t = false)]
    identity_gain: bool,

    /// Print the elementary angle table first
    #[arg(long, default_value_t = false)]
    show_table: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if args.points < 2 {
        bail!("--points must be at least 2, got {}", args.points);
    }
    if !(args.start.is_finite() && args.end.is_finite()) || args.start >= args.end {
        bail!("invalid range [{}, {}]", args.start, args.end);
    }
    if args.max_iterations == 0 {
        bail!("--max-iterations must be positive");
    }

    let mode = if args.identity_gain {
        ScaleFactorMode::HyperbolicIdentity
    } else {
        ScaleFactorMode::AngleProduct
    };
    let cordic = CordicSoftmax::new()
        .with_scale_mode(mode)
        .with_max_iterations(args.max_iterations)
        .with_debug(args.verbose > 0);

    println!("=== CORDIC exp accuracy sweep ===\n");
    println!("{}\n", CordicConfig::current().describe());

    if args.show_table {
        println!("{}", angle_table().render());
    }

    println!(
        "{:>9} {:>14} {:>14} {:>11} {:>4} {:>5} {:>10}",
        "x", "cordic", "reference", "rel err %", "n", "iters", "grade"
    );
    println!("{}", "-".repeat(75));

    let step = (args.end - args.start) / (args.points - 1) as f32;
    let mut worst = 0.0f64;
    let mut total = 0.0f64;
    let mut unconverged = 0usize;

    for i in 0..args.points {
        let x = args.start + step * i as f32;
        let trace = cordic.trace(x);
        let post = &trace.postprocess;

        worst = worst.max(post.relative_error);
        total += post.relative_error;
        if !trace.iteration.converged_successfully {
            unconverged += 1;
        }

        println!(
            "{:>9.4} {:>14.6} {:>14.6} {:>11.4} {:>4} {:>5} {:>10}",
            x,
            post.exponential_value,
            (x as f64).exp(),
            post.relative_error * 100.0,
            trace.preprocess.reduction_factor,
            trace.iteration.iterations_used,
            format!("{:?}", post.accuracy_grade()),
        );
    }

    println!("{}", "-".repeat(75));
    info!(
        points = args.points,
        mean_rel_err = total / args.points as f64,
        max_rel_err = worst,
        unconverged,
        "sweep complete"
    );
    println!("Mean relative error: {:.4}%", total / args.points as f64 * 100.0);
    println!("Max relative error:  {:.4}%", worst * 100.0);
    println!("Unconverged:         {}/{}", unconverged, args.points);

    Ok(())
}
