use std::collections::BTreeSet;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Filter domains: the options offered by each multi-select
// ---------------------------------------------------------------------------

/// Which categorical column a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Year,
    Eligibility,
    Position,
}

impl FilterColumn {
    fn value<'a>(&self, record: &'a Record) -> Option<&'a CellValue> {
        match self {
            FilterColumn::Year => Some(&record.year),
            FilterColumn::Eligibility => record.eligibility.as_ref(),
            FilterColumn::Position => Some(&record.position),
        }
    }
}

/// Distinct observed values per filter column.
///
/// Years are ascending; positions and eligibility categories keep the order
/// in which they first appear in the worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDomains {
    pub years: Vec<CellValue>,
    /// `None` when the worksheet has no eligibility column.
    pub eligibility: Option<Vec<CellValue>>,
    pub positions: Vec<CellValue>,
}

impl FilterDomains {
    pub fn derive(dataset: &Dataset) -> Self {
        let years: BTreeSet<CellValue> = dataset.records.iter().map(|r| r.year.clone()).collect();

        FilterDomains {
            years: years.into_iter().collect(),
            eligibility: dataset
                .has_eligibility
                .then(|| first_seen(dataset, FilterColumn::Eligibility)),
            positions: first_seen(dataset, FilterColumn::Position),
        }
    }

    pub fn get(&self, column: FilterColumn) -> Option<&[CellValue]> {
        match column {
            FilterColumn::Year => Some(&self.years),
            FilterColumn::Eligibility => self.eligibility.as_deref(),
            FilterColumn::Position => Some(&self.positions),
        }
    }
}

fn first_seen(dataset: &Dataset, column: FilterColumn) -> Vec<CellValue> {
    let mut seen = BTreeSet::new();
    dataset
        .records
        .iter()
        .filter_map(|r| column.value(r))
        .filter(|v| seen.insert((*v).clone()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Filter selection: which values are currently accepted
// ---------------------------------------------------------------------------

/// Accepted values per filter column.
///
/// An empty set accepts nothing. The eligibility filter is inactive
/// (`None`) when the worksheet has no such column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub years: BTreeSet<CellValue>,
    pub eligibility: Option<BTreeSet<CellValue>>,
    pub positions: BTreeSet<CellValue>,
}

impl FilterSelection {
    /// Every observed value selected, i.e. show everything.
    pub fn all(domains: &FilterDomains) -> Self {
        FilterSelection {
            years: domains.years.iter().cloned().collect(),
            eligibility: domains
                .eligibility
                .as_ref()
                .map(|vals| vals.iter().cloned().collect()),
            positions: domains.positions.iter().cloned().collect(),
        }
    }

    pub fn get(&self, column: FilterColumn) -> Option<&BTreeSet<CellValue>> {
        match column {
            FilterColumn::Year => Some(&self.years),
            FilterColumn::Eligibility => self.eligibility.as_ref(),
            FilterColumn::Position => Some(&self.positions),
        }
    }

    pub fn get_mut(&mut self, column: FilterColumn) -> Option<&mut BTreeSet<CellValue>> {
        match column {
            FilterColumn::Year => Some(&mut self.years),
            FilterColumn::Eligibility => self.eligibility.as_mut(),
            FilterColumn::Position => Some(&mut self.positions),
        }
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle(&mut self, column: FilterColumn, value: &CellValue) {
        if let Some(selected) = self.get_mut(column) {
            if !selected.remove(value) {
                selected.insert(value.clone());
            }
        }
    }

    /// Select every observed value of a column.
    pub fn select_all(&mut self, column: FilterColumn, domains: &FilterDomains) {
        if let (Some(selected), Some(all)) = (self.get_mut(column), domains.get(column)) {
            *selected = all.iter().cloned().collect();
        }
    }

    /// Deselect every value of a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        if let Some(selected) = self.get_mut(column) {
            selected.clear();
        }
    }

    /// Whether `record` satisfies every active filter.
    pub fn accepts(&self, record: &Record) -> bool {
        if !self.years.contains(&record.year) || !self.positions.contains(&record.position) {
            return false;
        }
        match (&self.eligibility, &record.eligibility) {
            (Some(selected), Some(value)) => selected.contains(value),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// Return indices of records that pass all active filters, in row order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.accepts(r))
        .map(|(i, _)| i)
        .collect()
}
