//! Search structures compared by the benchmark
//!
//! - [`eytzinger`]: breadth-first array layout and its upper-bound search
//! - [`benchmark`]: timing both searches and writing the benchmark table

pub mod benchmark;
pub mod eytzinger;

pub use benchmark::{run_benchmark, BenchmarkConfig, BenchmarkError, QueryDistribution};
pub use eytzinger::EytzingerArray;
