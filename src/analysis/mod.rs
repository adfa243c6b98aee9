//! Report generation over a loaded benchmark table
//!
//! This module contains:
//! - Fixed file and column names
//! - Ratio statistics per distribution
//! - The report runner tying loading, charts and console output together

pub mod constants;
pub mod ratios;
pub mod report;

// Re-export report entry points for convenience
pub use ratios::{summarize_ratios, RatioSummary};
pub use report::{run_report, run_report_with, ReportConfig, ReportError};
