//! ASCII summary table of ratio statistics across all distributions
//!
//! Formatting uses the [`tabled`] crate; values are pre-formatted to two decimals so the table
//! matches the per-distribution console blocks.

use crate::analysis::ratios::RatioSummary;
use crate::common::formatting::format_ratio;
use tabled::{Table, Tabled};

/// One table row per distribution
#[derive(Debug, Clone, Tabled)]
pub struct RatioTableEntry {
    #[tabled(rename = "Distribution")]
    pub distribution: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Min ratio")]
    pub min: String,
    #[tabled(rename = "Max ratio")]
    pub max: String,
    #[tabled(rename = "Mean ratio")]
    pub mean: String,
}

impl From<&RatioSummary> for RatioTableEntry {
    fn from(summary: &RatioSummary) -> Self {
        Self {
            distribution: summary.distribution.clone(),
            rows: summary.rows,
            min: format_ratio(summary.min),
            max: format_ratio(summary.max),
            mean: format_ratio(summary.mean),
        }
    }
}

/// Formats ratio summaries as an ASCII table with an underlined title
pub fn format_ratio_table(summaries: &[RatioSummary], title: Option<&str>) -> String {
    if summaries.is_empty() {
        return "No distributions found".to_string();
    }

    let entries: Vec<RatioTableEntry> = summaries.iter().map(RatioTableEntry::from).collect();
    let table = Table::new(entries).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ratios::summarize_ratios;

    #[test]
    fn entry_formats_two_decimals() {
        let entry = RatioTableEntry::from(&summarize_ratios("Uniform", &[4.0, 5.0]));
        assert_eq!(entry.distribution, "Uniform");
        assert_eq!(entry.rows, 2);
        assert_eq!(entry.min, "4.00");
        assert_eq!(entry.max, "5.00");
        assert_eq!(entry.mean, "4.50");
    }

    #[test]
    fn formats_table_with_title() {
        let summaries = vec![
            summarize_ratios("Uniform", &[4.0, 5.0]),
            summarize_ratios("Normal", &[1.25]),
        ];

        let table = format_ratio_table(&summaries, Some("Ratio Summary"));
        assert!(table.starts_with("Ratio Summary\n============="));
        assert!(table.contains("Distribution"));
        assert!(table.contains("Mean ratio"));
        assert!(table.contains("Uniform"));
        assert!(table.contains("4.50"));
        assert!(table.contains("1.25"));

        let untitled = format_ratio_table(&summaries, None);
        assert!(!untitled.contains("Ratio Summary"));
        assert!(untitled.contains("Normal"));
    }

    #[test]
    fn empty_summaries() {
        assert_eq!(format_ratio_table(&[], None), "No distributions found");
    }
}
