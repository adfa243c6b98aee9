//! Benchmark generator producing the table the report consumes
//!
//! For every size the data is `0..size`, searched once as a sorted slice with a classic binary
//! upper bound and once through its Eytzinger layout. Each (size, distribution) pair becomes one
//! [`BenchmarkRow`] holding the mean time of a single search for both methods.

use super::eytzinger::{sorted_upper_bound, upper_bound, EytzingerArray};
use crate::analysis::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_MAX_SIZE_EXPONENT, DEFAULT_MIN_SIZE_EXPONENT,
    DEFAULT_SEARCHES_PER_SIZE, DEFAULT_TIMED_ITERATIONS,
};
use crate::common::{BenchmarkRow, BenchmarkTable};
use log::{debug, info};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{Exp, Normal};
use std::fs::File;
use std::hint::black_box;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur while generating benchmark data
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Failed to write benchmark output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to build query distribution: {0}")]
    Distribution(String),

    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(String),
}

type Result<T> = core::result::Result<T, BenchmarkError>;

/// How query values are drawn from `[0, size - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDistribution {
    /// Every value equally likely
    Uniform,
    /// Centred on `size / 2` with a standard deviation of `size / 6`, clamped into range
    Normal,
    /// Exponential with rate 3, truncated to an integer and capped at `size - 1`
    Exponential,
}

impl QueryDistribution {
    pub const ALL: [QueryDistribution; 3] = [
        QueryDistribution::Uniform,
        QueryDistribution::Normal,
        QueryDistribution::Exponential,
    ];

    /// Label written to the `Distribution` column
    pub fn label(self) -> &'static str {
        match self {
            QueryDistribution::Uniform => "Uniform",
            QueryDistribution::Normal => "Normal",
            QueryDistribution::Exponential => "Exponential",
        }
    }

    /// Draws `count` query values in `[0, max]`
    pub fn sample_queries<R: Rng>(self, rng: &mut R, max: i32, count: usize) -> Result<Vec<i32>> {
        if max <= 0 {
            return Ok(vec![0; count]);
        }

        let queries = match self {
            QueryDistribution::Uniform => {
                let uniform = Uniform::new_inclusive(0, max);
                (0..count).map(|_| uniform.sample(&mut *rng)).collect()
            }
            QueryDistribution::Normal => {
                let max_f = f64::from(max);
                let normal = Normal::new(max_f / 2.0, max_f / 6.0)
                    .map_err(|e| BenchmarkError::Distribution(e.to_string()))?;
                (0..count)
                    .map(|_| (normal.sample(&mut *rng) as i32).clamp(0, max))
                    .collect()
            }
            QueryDistribution::Exponential => {
                let exp =
                    Exp::new(3.0).map_err(|e| BenchmarkError::Distribution(e.to_string()))?;
                (0..count)
                    .map(|_| (exp.sample(&mut *rng) as i32).min(max))
                    .collect()
            }
        };

        Ok(queries)
    }
}

impl FromStr for QueryDistribution {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(QueryDistribution::Uniform),
            "normal" => Ok(QueryDistribution::Normal),
            "exponential" => Ok(QueryDistribution::Exponential),
            _ => Err(format!(
                "Unknown distribution: {}. Expected one of uniform, normal, exponential",
                s
            )),
        }
    }
}

/// Powers of two from `2^min_exponent` to `2^max_exponent` inclusive
pub fn power_of_two_sizes(min_exponent: u32, max_exponent: u32) -> Vec<usize> {
    (min_exponent..=max_exponent)
        .filter_map(|exponent| 1usize.checked_shl(exponent))
        .collect()
}

/// Inputs of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Element counts, benchmarked in the given order
    pub sizes: Vec<usize>,
    pub distributions: Vec<QueryDistribution>,
    /// Query values generated per (size, distribution) pair
    pub searches_per_size: usize,
    /// Timed calls per search method; a tenth of this is run first as warm-up
    pub iterations: usize,
    /// CSV file to write
    pub output: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: power_of_two_sizes(DEFAULT_MIN_SIZE_EXPONENT, DEFAULT_MAX_SIZE_EXPONENT),
            distributions: QueryDistribution::ALL.to_vec(),
            searches_per_size: DEFAULT_SEARCHES_PER_SIZE,
            iterations: DEFAULT_TIMED_ITERATIONS,
            output: PathBuf::from(DEFAULT_INPUT_FILE),
            seed: None,
        }
    }
}

impl BenchmarkConfig {
    fn validate(&self) -> Result<()> {
        if self.searches_per_size == 0 {
            return Err(BenchmarkError::InvalidConfig(
                "searches per size must be at least 1".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(BenchmarkError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        for &size in &self.sizes {
            if size == 0 || size - 1 > i32::MAX as usize {
                return Err(BenchmarkError::InvalidConfig(format!(
                    "size {} is outside 1..=2^31",
                    size
                )));
            }
        }
        Ok(())
    }
}

/// Mean seconds per call of `search`, after a warm-up of `iterations / 10` calls
fn time_search<F: FnMut() -> usize>(mut search: F, iterations: usize) -> f64 {
    for _ in 0..iterations / 10 {
        black_box(search());
    }

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(search());
    }
    start.elapsed().as_secs_f64() / iterations as f64
}

/// Runs the benchmark and writes the CSV to [`BenchmarkConfig::output`]
///
/// The configuration is checked before the output file is created.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkTable> {
    config.validate()?;
    let file = File::create(&config.output)?;
    let table = write_benchmark(config, BufWriter::new(file))?;
    info!(
        "Wrote {} rows to {}",
        table.len(),
        config.output.display()
    );
    Ok(table)
}

/// Runs the benchmark, streaming CSV rows to `writer` as they complete
///
/// The header is always written, even when no sizes are configured.
pub fn run_benchmark_to<W: Write>(config: &BenchmarkConfig, writer: W) -> Result<BenchmarkTable> {
    config.validate()?;
    write_benchmark(config, writer)
}

// Expects an already validated configuration.
fn write_benchmark<W: Write>(config: &BenchmarkConfig, writer: W) -> Result<BenchmarkTable> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(["Size", "Distribution", "StdUpperBound", "EytzingerUpperBound"])?;

    let mut rows = Vec::with_capacity(config.sizes.len() * config.distributions.len());
    for &size in &config.sizes {
        let max = (size - 1) as i32;
        let data: Vec<i32> = (0..=max).collect();
        let layout = EytzingerArray::from_sorted(&data);
        debug!("Built layouts for size {}", size);

        for &distribution in &config.distributions {
            let queries = distribution.sample_queries(&mut rng, max, config.searches_per_size)?;

            let mut cursor = 0usize;
            let std_upper_bound = time_search(
                || {
                    cursor = (cursor + 1) % queries.len();
                    sorted_upper_bound(&data, &queries[cursor])
                },
                config.iterations,
            );

            let mut cursor = 0usize;
            let eytzinger_upper_bound = time_search(
                || {
                    cursor = (cursor + 1) % queries.len();
                    upper_bound(layout.as_slice(), &queries[cursor]).unwrap_or(layout.len())
                },
                config.iterations,
            );

            let row = BenchmarkRow::new(
                distribution.label(),
                size as u64,
                std_upper_bound,
                eytzinger_upper_bound,
            );
            csv.serialize(&row)?;
            csv.flush()?;
            info!(
                "Completed benchmark for size: {}, distribution: {}",
                size,
                distribution.label()
            );
            rows.push(row);
        }
    }

    csv.flush()?;
    Ok(BenchmarkTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::read_benchmark_table;
    use rstest::rstest;

    fn small_config(seed: u64) -> BenchmarkConfig {
        BenchmarkConfig {
            sizes: power_of_two_sizes(4, 6),
            distributions: QueryDistribution::ALL.to_vec(),
            searches_per_size: 64,
            iterations: 100,
            output: PathBuf::from("unused.csv"),
            seed: Some(seed),
        }
    }

    #[test]
    fn power_of_two_sizes_are_inclusive() {
        assert_eq!(power_of_two_sizes(10, 13), vec![1024, 2048, 4096, 8192]);
        assert_eq!(power_of_two_sizes(3, 2), Vec::<usize>::new());
    }

    #[test]
    fn default_config_matches_reference_run() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.sizes.first(), Some(&1024));
        assert_eq!(config.sizes.last(), Some(&(1 << 28)));
        assert_eq!(config.sizes.len(), 19);
        assert_eq!(config.distributions, QueryDistribution::ALL.to_vec());
        assert_eq!(config.output, PathBuf::from("search_benchmark.csv"));
    }

    #[rstest]
    #[case(QueryDistribution::Uniform)]
    #[case(QueryDistribution::Normal)]
    #[case(QueryDistribution::Exponential)]
    fn queries_stay_in_range(#[case] distribution: QueryDistribution) {
        let mut rng = StdRng::seed_from_u64(7);
        let queries = distribution.sample_queries(&mut rng, 1023, 5000).unwrap();

        assert_eq!(queries.len(), 5000);
        assert!(queries.iter().all(|q| (0..=1023).contains(q)));
    }

    #[test]
    fn single_element_range_yields_zero_queries() {
        let mut rng = StdRng::seed_from_u64(7);
        for distribution in QueryDistribution::ALL {
            let queries = distribution.sample_queries(&mut rng, 0, 8).unwrap();
            assert_eq!(queries, vec![0; 8]);
        }
    }

    #[rstest]
    #[case("uniform", QueryDistribution::Uniform)]
    #[case("Normal", QueryDistribution::Normal)]
    #[case("EXPONENTIAL", QueryDistribution::Exponential)]
    fn parses_distribution_names(#[case] name: &str, #[case] expected: QueryDistribution) {
        assert_eq!(name.parse::<QueryDistribution>(), Ok(expected));
        assert_eq!(expected.label().parse::<QueryDistribution>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_distribution() {
        assert!("zipf".parse::<QueryDistribution>().is_err());
    }

    #[test]
    fn writes_one_row_per_size_and_distribution() {
        let config = small_config(42);
        let mut output = Vec::new();

        let table = run_benchmark_to(&config, &mut output).unwrap();
        assert_eq!(table.len(), 3 * 3);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Size,Distribution,StdUpperBound,EytzingerUpperBound\n"));

        let parsed = read_benchmark_table(text.as_bytes()).unwrap();
        assert_eq!(parsed.len(), table.len());
        for (written, read) in table.rows.iter().zip(&parsed.rows) {
            assert_eq!(written.size, read.size);
            assert_eq!(written.distribution, read.distribution);
            assert!(read.std_upper_bound >= 0.0);
            assert!(read.eytzinger_upper_bound >= 0.0);
        }

        let labels: Vec<&str> = parsed
            .group_by_distribution()
            .iter()
            .map(|group| group.distribution)
            .collect();
        assert_eq!(labels, vec!["Uniform", "Normal", "Exponential"]);
    }

    #[test]
    fn empty_size_list_writes_header_only() {
        let config = BenchmarkConfig {
            sizes: Vec::new(),
            ..small_config(1)
        };
        let mut output = Vec::new();

        let table = run_benchmark_to(&config, &mut output).unwrap();
        assert!(table.is_empty());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Size,Distribution,StdUpperBound,EytzingerUpperBound\n"
        );
    }

    #[test]
    fn invalid_config_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("search_benchmark.csv");
        let config = BenchmarkConfig {
            iterations: 0,
            output: output.clone(),
            ..small_config(1)
        };

        let result = run_benchmark(&config);
        assert!(matches!(result, Err(BenchmarkError::InvalidConfig(_))));
        assert!(!output.exists());
    }

    #[rstest]
    #[case::zero_size(BenchmarkConfig { sizes: vec![0], ..small_config(1) })]
    #[case::no_searches(BenchmarkConfig { searches_per_size: 0, ..small_config(1) })]
    #[case::no_iterations(BenchmarkConfig { iterations: 0, ..small_config(1) })]
    fn rejects_invalid_config(#[case] config: BenchmarkConfig) {
        let result = run_benchmark_to(&config, Vec::new());
        assert!(matches!(result, Err(BenchmarkError::InvalidConfig(_))));
    }
}
