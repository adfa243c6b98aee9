//! Common infrastructure shared by the report and the benchmark generator
//!
//! This module provides reusable infrastructure for:
//! - Benchmark table data structures and grouping
//! - Scientific number formatting and file name sanitization
//! - Plotting comparison charts
//! - ASCII summary tables

pub mod data_structures;
pub mod formatting;
pub mod plots;
pub mod tables;

// Re-export commonly used items
pub use data_structures::{BenchmarkRow, BenchmarkTable, DistributionGroup};
pub use plots::{BitmapChartRenderer, ChartRenderer, ChartStyle, PlotError};
