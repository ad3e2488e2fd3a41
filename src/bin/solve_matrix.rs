//! Random matrix game solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_matrix -- [OPTIONS]
//!
//! Generates a random zero-sum payoff table and iterates the chosen algorithm
//! until exploitability drops to epsilon. With `--runs N` (N > 1) it solves N
//! independent games in parallel and reports iteration statistics instead.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use matrix_game_solver::batch::{run_batch, BatchConfig};
use matrix_game_solver::cfr::config::{validate_size, ConfigError};
use matrix_game_solver::cfr::{Algorithm, ConvergenceStats, EquilibriumSolver, SolverConfig, WeightingMode};
use matrix_game_solver::games::{PayoffDistribution, PayoffTable};

#[derive(Parser, Debug)]
#[command(name = "solve_matrix")]
#[command(about = "Approximate Nash equilibria of random zero-sum matrix games")]
struct Args {
    /// Algorithm: fictitious-play (0), cfr (1) or cfr-plus (2)
    #[arg(short, long, default_value = "cfr-plus")]
    algorithm: Algorithm,

    /// Matrix size (actions per player)
    #[arg(short, long, default_value_t = 1000)]
    size: usize,

    /// Stop once exploitability is at or below this value
    #[arg(short, long, default_value_t = 0.0001)]
    epsilon: f64,

    /// Payoff distribution: uniform, normal or cauchy
    #[arg(short, long, default_value = "uniform")]
    distribution: PayoffDistribution,

    /// CFR+ iterations excluded from the average strategy
    #[arg(long, default_value_t = 0)]
    delay: u64,

    /// CFR+ weighting: constant, linear or quadratic
    #[arg(short, long, default_value = "quadratic")]
    weighting: WeightingMode,

    /// Random seed (drawn from entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent games; more than 1 runs a parallel batch
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Stop a run after this many iterations even if not converged
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Print a progress line every N iterations (single run only)
    #[arg(long, default_value_t = 1)]
    report_every: u64,

    /// Dump the payoff matrix and average strategies when done (single run only)
    #[arg(long)]
    dump: bool,

    /// Write the batch report as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = validate_args(&args)?;

    println!("Algorithm: {}", config.algorithm);
    println!("Matrix size: {}", args.size);
    println!("Epsilon: {}", config.epsilon);
    println!("Distribution: {}", args.distribution);
    if config.algorithm == Algorithm::CfrPlus {
        println!("Delay: {} | Weighting: {}", config.cfr_plus_delay, config.weighting);
    }

    let seed = args.seed.unwrap_or_else(rand::random);

    if args.runs > 1 {
        solve_batch(&args, config, seed)
    } else {
        solve_single(&args, config, seed)
    }
}

/// Check every argument before any work starts.
fn validate_args(args: &Args) -> anyhow::Result<SolverConfig> {
    let config = SolverConfig::new()
        .with_algorithm(args.algorithm)
        .with_delay(args.delay)
        .with_weighting(args.weighting)
        .with_epsilon(args.epsilon);
    config.validate().context("invalid solver configuration")?;
    validate_size(args.size).context("invalid matrix size")?;
    if args.runs == 0 {
        return Err(ConfigError::InvalidRuns(args.runs)).context("invalid run count");
    }
    Ok(config)
}

fn solve_single(args: &Args, config: SolverConfig, seed: u64) -> anyhow::Result<()> {
    println!("Seed: {}", seed);
    println!("init");

    let mut rng = StdRng::seed_from_u64(seed);
    let game = PayoffTable::random(args.size, args.distribution, &mut rng)?;
    let mut solver = EquilibriumSolver::new(game, config);

    println!("start");

    let result = solver.train_until_converged(
        args.max_iterations,
        args.report_every,
        Some(|stats: &ConvergenceStats| {
            println!(
                "i={} t={:.2} e={:.6}",
                stats.iteration, stats.elapsed_seconds, stats.exploitability
            );
        }),
    );

    if result.converged {
        println!(
            "\nConverged in {} iterations ({:.2}s)",
            result.iterations, result.elapsed_seconds
        );
    } else {
        println!(
            "\nStopped after {} iterations without converging (e={:.6})",
            result.iterations, result.exploitability
        );
    }

    if args.dump {
        println!();
        solver.dump(&mut io::stdout().lock())?;
    }

    Ok(())
}

fn solve_batch(args: &Args, config: SolverConfig, seed: u64) -> anyhow::Result<()> {
    println!("Runs: {} | Base seed: {}", args.runs, seed);

    let batch = BatchConfig::new(args.runs, args.size, config)
        .with_distribution(args.distribution)
        .with_seed(seed)
        .with_max_iterations(args.max_iterations);

    let start = Instant::now();
    let pb = ProgressBar::new(args.runs as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} runs ({eta})")?,
    );

    let report = run_batch(&batch, |outcome| {
        info!(
            "run {} done: {} iterations, e={:.6}",
            outcome.run, outcome.iterations, outcome.exploitability
        );
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let summary = &report.summary;
    println!("\n=== Summary ===");
    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    println!("Converged: {}/{}", summary.converged, summary.runs);
    println!("Mean iterations: {:.1}", summary.mean_iterations);
    println!("Median iterations: {:.1}", summary.median_iterations);
    println!("Min/Max iterations: {}/{}", summary.min_iterations, summary.max_iterations);

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        println!("Saved report: {}", path.display());
    }

    Ok(())
}
