//! # eytzinger-report
//! Benchmarks Eytzinger-layout upper-bound search against classic binary search and renders
//! the results as one log-log comparison chart per query distribution, with ratio statistics.

/// Report generation: ratio statistics and the chart report runner.
pub mod analysis;

/// Data structures, formatting, plotting and table helpers shared across the crate.
pub mod common;

/// Loading benchmark tables from CSV.
pub mod parsing;

/// The Eytzinger layout and the benchmark generator producing the tables.
pub mod search;
