use argh::FromArgs;
use eytzinger_report::analysis::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_MAX_SIZE_EXPONENT, DEFAULT_MIN_SIZE_EXPONENT,
    DEFAULT_SEARCHES_PER_SIZE, DEFAULT_TIMED_ITERATIONS,
};
use eytzinger_report::analysis::{run_report, ReportConfig, ReportError};
use eytzinger_report::search::benchmark::power_of_two_sizes;
use eytzinger_report::search::{run_benchmark, BenchmarkConfig, BenchmarkError, QueryDistribution};
use std::path::PathBuf;
use thiserror::Error;

/// Eytzinger vs binary search benchmark and chart report
#[derive(FromArgs, Debug)]
struct Args {
    #[argh(subcommand)]
    command: Option<Command>,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Report(ReportArgs),
    Bench(BenchArgs),
}

/// render one comparison chart and ratio summary per distribution (default command)
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "report")]
struct ReportArgs {
    /// benchmark table to read (default: search_benchmark.csv)
    #[argh(option, short = 'i', default = "PathBuf::from(DEFAULT_INPUT_FILE)")]
    input: PathBuf,

    /// directory charts are written to (default: working directory)
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,
}

/// time binary and Eytzinger upper-bound searches and write the benchmark table
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "bench")]
struct BenchArgs {
    /// table to write (default: search_benchmark.csv)
    #[argh(option, short = 'o', default = "PathBuf::from(DEFAULT_INPUT_FILE)")]
    output: PathBuf,

    /// smallest size as a power of two (default: 10)
    #[argh(option, default = "DEFAULT_MIN_SIZE_EXPONENT")]
    min_exp: u32,

    /// largest size as a power of two (default: 28)
    #[argh(option, default = "DEFAULT_MAX_SIZE_EXPONENT")]
    max_exp: u32,

    /// query values generated per size and distribution (default: 10000)
    #[argh(option, short = 's', default = "DEFAULT_SEARCHES_PER_SIZE")]
    searches: usize,

    /// timed calls per search method (default: 10000)
    #[argh(option, short = 'n', default = "DEFAULT_TIMED_ITERATIONS")]
    iterations: usize,

    /// query distribution, repeatable (default: uniform, normal, exponential)
    #[argh(option, short = 'd')]
    distribution: Vec<QueryDistribution>,

    /// fixed RNG seed for reproducible queries
    #[argh(option)]
    seed: Option<u64>,
}

/// Errors that can end the program
#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Benchmark(#[from] BenchmarkError),
}

fn run(args: Args) -> Result<(), AppError> {
    match args.command {
        None => {
            run_report(&ReportConfig::default())?;
        }
        Some(Command::Report(report)) => {
            let config = ReportConfig {
                input: report.input,
                output_dir: report.output_dir,
                ..ReportConfig::default()
            };
            run_report(&config)?;
        }
        Some(Command::Bench(bench)) => {
            let distributions = if bench.distribution.is_empty() {
                QueryDistribution::ALL.to_vec()
            } else {
                bench.distribution
            };
            let config = BenchmarkConfig {
                sizes: power_of_two_sizes(bench.min_exp, bench.max_exp),
                distributions,
                searches_per_size: bench.searches,
                iterations: bench.iterations,
                output: bench.output,
                seed: bench.seed,
            };
            run_benchmark(&config)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    if let Err(error) = run(args) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
