//! File parsing functionality for benchmark tables
//!
//! This module handles loading and parsing the `search_benchmark.csv` file.

use crate::analysis::constants::REQUIRED_COLUMNS;
use crate::common::{BenchmarkRow, BenchmarkTable};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Input file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read input file: {0}")]
    FileRead(#[from] io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse the benchmark CSV file and load every row
///
/// This function:
/// - Opens the file, mapping a missing file to [`ParsingError::FileNotFound`]
/// - Checks the header for every required column
/// - Deserializes all rows, ignoring extra columns
///
/// # Arguments
/// * `file_path` - Path to the benchmark CSV
///
/// # Returns
/// * `Ok(BenchmarkTable)` - Successfully parsed table, rows in file order
/// * `Err(ParsingError)` - If the file is missing, unreadable, malformed, or lacks a column
pub fn parse_benchmark_table(file_path: &Path) -> Result<BenchmarkTable> {
    let file = File::open(file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ParsingError::FileNotFound(file_path.to_path_buf()),
        _ => ParsingError::FileRead(e),
    })?;

    read_benchmark_table(file)
}

/// Parse a benchmark table from any reader
pub fn read_benchmark_table<R: Read>(reader: R) -> Result<BenchmarkTable> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    let rows = reader
        .deserialize::<BenchmarkRow>()
        .collect::<core::result::Result<Vec<_>, csv::Error>>()?;

    Ok(BenchmarkTable::new(rows))
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ParsingError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}
