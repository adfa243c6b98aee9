//! Chart report over a benchmark table
//!
//! Loads the table, then for every distribution (in first-occurrence order) renders the
//! comparison chart, prints where it was saved, and prints the ratio statistics. A summary
//! table of all distributions closes the output. The first error aborts the run; charts
//! already written stay on disk.

use super::constants::{DEFAULT_INPUT_FILE, OUTPUT_FILE_TEMPLATE, TEMPLATE_PLACEHOLDER};
use super::ratios::RatioSummary;
use crate::common::formatting::{apply_template, sanitize_label};
use crate::common::plots::{BitmapChartRenderer, ChartRenderer, ChartStyle, PlotError};
use crate::common::tables::format_ratio_table;
use crate::parsing::{parse_benchmark_table, ParsingError};
use hashbrown::HashSet;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plot generation error: {0}")]
    Plot(#[from] PlotError),

    #[error("Failed to write report output: {0}")]
    Output(#[from] io::Error),

    #[error("Output file template '{0}' has no '{{}}' placeholder")]
    InvalidTemplate(String),
}

type Result<T> = core::result::Result<T, ReportError>;

/// Inputs of a report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Benchmark table to read
    pub input: PathBuf,
    /// Directory charts are written to; `None` writes into the working directory
    pub output_dir: Option<PathBuf>,
    /// Chart file name template, `{}` receives the sanitized distribution label
    pub file_template: String,
    pub style: ChartStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: None,
            file_template: OUTPUT_FILE_TEMPLATE.to_string(),
            style: ChartStyle::default(),
        }
    }
}

impl ReportConfig {
    fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Derives one output file name per label, unique within the run
///
/// Labels are sanitized first; when two labels sanitize to the same text, ignoring ASCII case,
/// later ones get `_2`, `_3`, ... appended before substitution into `template`.
pub fn output_file_names(template: &str, labels: &[&str]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();

    labels
        .iter()
        .map(|label| {
            let base = sanitize_label(label);
            let mut key = base.clone();
            let mut suffix = 2;
            while used.contains(&key.to_ascii_lowercase()) {
                key = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            if key != *label {
                debug!("Distribution '{}' written as '{}'", label, key);
            }

            used.insert(key.to_ascii_lowercase());
            apply_template(template, &key)
        })
        .collect()
}

/// Runs the report with PNG charts, printing to stdout
pub fn run_report(config: &ReportConfig) -> Result<Vec<RatioSummary>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_report_with(config, &BitmapChartRenderer, &mut out)
}

/// Runs the report with a given chart renderer and console sink
///
/// # Returns
/// * `Ok(Vec<RatioSummary>)` - One summary per distribution, in processing order
/// * `Err(ReportError)` - The first load, render or write failure
pub fn run_report_with<R: ChartRenderer, W: Write>(
    config: &ReportConfig,
    renderer: &R,
    out: &mut W,
) -> Result<Vec<RatioSummary>> {
    if !config.file_template.contains(TEMPLATE_PLACEHOLDER) {
        return Err(ReportError::InvalidTemplate(config.file_template.clone()));
    }

    let table = parse_benchmark_table(&config.input)?;
    info!(
        "Loaded {} rows from {}",
        table.len(),
        config.input.display()
    );

    let groups = table.group_by_distribution();
    let labels: Vec<&str> = groups.iter().map(|group| group.distribution).collect();
    let file_names = output_file_names(&config.file_template, &labels);
    debug!("Distributions: {:?}", labels);

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut summaries = Vec::with_capacity(groups.len());
    for (group, file_name) in groups.iter().zip(&file_names) {
        if !group.is_sorted_by_size() {
            warn!(
                "Rows for distribution '{}' are not sorted by Size; the chart follows table order",
                group.distribution
            );
        }

        let output_path = config.output_path(file_name);
        renderer.render(group, &config.style, &output_path)?;
        writeln!(out, "Graph saved as {}", output_path.display())?;

        let summary = RatioSummary::from_group(group);
        if !summary.max.is_finite() {
            warn!(
                "Distribution '{}' has a zero EytzingerUpperBound; ratios are not finite",
                group.distribution
            );
        }
        writeln!(out)?;
        writeln!(out, "{}", summary)?;
        summaries.push(summary);
    }

    if !summaries.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", format_ratio_table(&summaries, Some("Ratio Summary")))?;
    }

    Ok(summaries)
}
