use std::collections::BTreeSet;

use crate::config::RedactionConfig;

use super::filter::{filtered_indices, FilterSelection};
use super::model::{CellValue, Dataset};

/// Column names the map surface expects.
pub const MAP_COLUMNS: [&str; 2] = ["lat", "lon"];

// ---------------------------------------------------------------------------
// Metrics strip
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Filtered row count.
    pub households: usize,
    /// Largest selected year, if any year is selected.
    pub latest_year: Option<CellValue>,
    /// Sum of the device-count column, or `households` when the worksheet
    /// has no such column.
    pub units: u64,
}

impl Metrics {
    pub fn compute(dataset: &Dataset, selection: &FilterSelection, indices: &[usize]) -> Self {
        let units = if dataset.has_device_count {
            let sum: f64 = indices
                .iter()
                .filter_map(|&i| dataset.records[i].device_count)
                .sum();
            sum.max(0.0) as u64
        } else {
            indices.len() as u64
        };

        Metrics {
            households: indices.len(),
            latest_year: selection.years.iter().next_back().cloned(),
            units,
        }
    }

    /// Latest year as shown on the dashboard.
    pub fn latest_year_label(&self) -> String {
        self.latest_year
            .as_ref()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

// ---------------------------------------------------------------------------
// Map projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub year: CellValue,
}

pub fn map_points(dataset: &Dataset, indices: &[usize]) -> Vec<MapPoint> {
    indices
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            MapPoint {
                lat: r.latitude,
                lon: r.longitude,
                year: r.year.clone(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Redacted detail table
// ---------------------------------------------------------------------------

/// Filtered rows with personally identifying columns removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedactedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RedactedTable {
    pub fn build(dataset: &Dataset, indices: &[usize], redaction: &RedactionConfig) -> Self {
        let table = RedactedTable {
            columns: dataset.columns.clone(),
            rows: indices
                .iter()
                .map(|&i| dataset.records[i].cells.clone())
                .collect(),
        };
        table.redact(redaction)
    }

    /// Drop every redacted column that is present. Absent columns are fine,
    /// and redacting an already redacted table changes nothing.
    pub fn redact(self, redaction: &RedactionConfig) -> Self {
        let hidden: BTreeSet<&str> = redaction.hidden().into_iter().collect();
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !hidden.contains(name.as_str()))
            .map(|(i, _)| i)
            .collect();

        RedactedTable {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .into_iter()
                .map(|row| {
                    keep.iter()
                        .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Null))
                        .collect()
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Everything the central panel draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub metrics: Option<Metrics>,
    pub points: Vec<MapPoint>,
    pub table: RedactedTable,
}

impl Presentation {
    pub fn build(dataset: &Dataset, selection: &FilterSelection, redaction: &RedactionConfig) -> Self {
        let indices = filtered_indices(dataset, selection);
        log::debug!("{} of {} records pass the filters", indices.len(), dataset.len());

        Presentation {
            metrics: Some(Metrics::compute(dataset, selection, &indices)),
            points: map_points(dataset, &indices),
            table: RedactedTable::build(dataset, &indices, redaction),
        }
    }
}
