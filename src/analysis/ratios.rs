//! Binary search / Eytzinger search time ratio statistics
//!
//! A ratio above `1.0` means the Eytzinger layout was faster for that row.

use crate::common::data_structures::DistributionGroup;
use crate::common::formatting::format_ratio;
use std::fmt;

/// Min, max and mean of a distribution's per-row time ratios
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSummary {
    pub distribution: String,
    /// Rows the ratios were computed from, including skipped `NaN` rows
    pub rows: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RatioSummary {
    /// Summarizes the ratios of every row in `group`
    pub fn from_group(group: &DistributionGroup<'_>) -> Self {
        summarize_ratios(group.distribution, &group.ratios())
    }
}

/// Computes min, max and arithmetic mean of `ratios`
///
/// `NaN` entries (from `0 / 0`) are skipped. Infinite entries (a zero Eytzinger time) are kept
/// and propagate into `max` and `mean`. With no usable entry every statistic is `NaN`.
pub fn summarize_ratios(distribution: &str, ratios: &[f64]) -> RatioSummary {
    let usable: Vec<f64> = ratios.iter().copied().filter(|r| !r.is_nan()).collect();

    let (min, max, mean) = if usable.is_empty() {
        (f64::NAN, f64::NAN, f64::NAN)
    } else {
        let min = usable.iter().copied().fold(f64::INFINITY, f64::min);
        let max = usable.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = usable.iter().sum::<f64>() / usable.len() as f64;
        (min, max, mean)
    };

    RatioSummary {
        distribution: distribution.to_string(),
        rows: ratios.len(),
        min,
        max,
        mean,
    }
}

impl fmt::Display for RatioSummary {
    /// The console block printed after each chart
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performance Ratios for {} Distribution (Binary Search Time / Eytzinger Search Time):",
            self.distribution
        )?;
        writeln!(f, "  Min ratio: {}", format_ratio(self.min))?;
        writeln!(f, "  Max ratio: {}", format_ratio(self.max))?;
        write!(f, "  Mean ratio: {}", format_ratio(self.mean))
    }
}
