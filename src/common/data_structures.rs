use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A single benchmark measurement for one input size and query distribution
///
/// Field order matches the column order written by the benchmark generator.
/// Reading is header-driven, so the input may order columns differently and carry extras.
/// Numeric cells tolerate surrounding whitespace; the distribution label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    /// Number of elements searched
    #[serde(rename = "Size", deserialize_with = "trimmed")]
    pub size: u64,
    /// Label of the query value distribution (e.g. "Uniform")
    #[serde(rename = "Distribution")]
    pub distribution: String,
    /// Mean time of one standard binary upper-bound search, in seconds
    #[serde(rename = "StdUpperBound", deserialize_with = "trimmed")]
    pub std_upper_bound: f64,
    /// Mean time of one Eytzinger upper-bound search, in seconds
    #[serde(rename = "EytzingerUpperBound", deserialize_with = "trimmed")]
    pub eytzinger_upper_bound: f64,
}

fn trimmed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let cell = String::deserialize(deserializer)?;
    cell.trim().parse().map_err(serde::de::Error::custom)
}

impl BenchmarkRow {
    pub fn new(
        distribution: impl Into<String>,
        size: u64,
        std_upper_bound: f64,
        eytzinger_upper_bound: f64,
    ) -> Self {
        Self {
            size,
            distribution: distribution.into(),
            std_upper_bound,
            eytzinger_upper_bound,
        }
    }

    /// Binary search time divided by Eytzinger search time
    ///
    /// A zero Eytzinger time is not guarded; the result is `inf` (or `NaN` for `0 / 0`).
    pub fn ratio(&self) -> f64 {
        self.std_upper_bound / self.eytzinger_upper_bound
    }
}

/// The whole benchmark table, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    pub fn new(rows: Vec<BenchmarkRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Partitions the table by distribution label
    ///
    /// Groups are returned in order of each label's first occurrence in the table.
    /// Rows inside a group keep their table order.
    pub fn group_by_distribution(&self) -> Vec<DistributionGroup<'_>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<DistributionGroup<'_>> = Vec::new();

        for row in &self.rows {
            let slot = *index
                .entry(row.distribution.as_str())
                .or_insert_with(|| {
                    groups.push(DistributionGroup {
                        distribution: row.distribution.as_str(),
                        rows: Vec::new(),
                    });
                    groups.len() - 1
                });
            groups[slot].rows.push(row);
        }

        groups
    }
}

/// All rows of the table sharing one distribution label
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionGroup<'a> {
    pub distribution: &'a str,
    pub rows: Vec<&'a BenchmarkRow>,
}

impl<'a> DistributionGroup<'a> {
    /// `(Size, StdUpperBound)` points in row order
    pub fn std_series(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|row| (row.size as f64, row.std_upper_bound))
            .collect()
    }

    /// `(Size, EytzingerUpperBound)` points in row order
    pub fn eytzinger_series(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|row| (row.size as f64, row.eytzinger_upper_bound))
            .collect()
    }

    /// Smallest and largest `Size` in the group, `None` if the group is empty
    pub fn size_range(&self) -> Option<(u64, u64)> {
        let min = self.rows.iter().map(|row| row.size).min()?;
        let max = self.rows.iter().map(|row| row.size).max()?;
        Some((min, max))
    }

    /// Whether rows are already in ascending `Size` order
    pub fn is_sorted_by_size(&self) -> bool {
        self.rows.windows(2).all(|pair| pair[0].size <= pair[1].size)
    }

    /// Elementwise ratios in row order
    pub fn ratios(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.ratio()).collect()
    }
}
