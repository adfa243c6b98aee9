//! Fixed names and defaults for the benchmark report
//!
//! Everything the report reads or writes is named here, so the binary's defaults and the
//! library agree on one set of values.

/// Default input table, relative to the working directory
pub const DEFAULT_INPUT_FILE: &str = "search_benchmark.csv";

/// Default directory charts are written to
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Output file name template; `{}` is replaced by the sanitized distribution label
pub const OUTPUT_FILE_TEMPLATE: &str = "eytzinger_vs_binary_comparison_{}.png";

/// Placeholder substituted inside [`OUTPUT_FILE_TEMPLATE`]
pub const TEMPLATE_PLACEHOLDER: &str = "{}";

/// Column holding the distribution label
pub const COLUMN_DISTRIBUTION: &str = "Distribution";

/// Column holding the element count
pub const COLUMN_SIZE: &str = "Size";

/// Column holding the binary search timing (seconds)
pub const COLUMN_STD_UPPER_BOUND: &str = "StdUpperBound";

/// Column holding the Eytzinger search timing (seconds)
pub const COLUMN_EYTZINGER_UPPER_BOUND: &str = "EytzingerUpperBound";

/// Columns that must be present in the input header
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_DISTRIBUTION,
    COLUMN_SIZE,
    COLUMN_STD_UPPER_BOUND,
    COLUMN_EYTZINGER_UPPER_BOUND,
];

/// Smallest benchmarked size exponent (2^10 elements)
pub const DEFAULT_MIN_SIZE_EXPONENT: u32 = 10;

/// Largest benchmarked size exponent (2^28 elements)
pub const DEFAULT_MAX_SIZE_EXPONENT: u32 = 28;

/// Query values generated per (size, distribution) pair
pub const DEFAULT_SEARCHES_PER_SIZE: usize = 10_000;

/// Timed calls per search function
pub const DEFAULT_TIMED_ITERATIONS: usize = 10_000;
