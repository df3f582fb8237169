// FleetLens - core/filter.rs
//
// Filter engine for logistics records.
// All criteria are AND-combined; selections use literal set membership, so
// an empty zone or driver selection matches nothing.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Dataset, Record};
use chrono::NaiveDate;
use std::collections::HashSet;

/// User-selected filter criteria. All fields are AND-combined when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Zones to include. Empty = no record matches.
    pub zones: HashSet<String>,

    /// Drivers to include. Empty = no record matches.
    pub drivers: HashSet<String>,

    /// Start of the date range (inclusive).
    pub start: NaiveDate,

    /// End of the date range (inclusive). `start > end` matches nothing.
    pub end: NaiveDate,
}

impl Default for FilterCriteria {
    /// Matches nothing by selection but leaves the date range unbounded.
    fn default() -> Self {
        Self {
            zones: HashSet::new(),
            drivers: HashSet::new(),
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }
}

impl FilterCriteria {
    /// Default criteria for a freshly loaded dataset: every zone, every
    /// driver, and the dataset's own min..max date range.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            zones: dataset.distinct_zones().into_iter().collect(),
            drivers: dataset.distinct_drivers().into_iter().collect(),
            start,
            end,
        }
    }

    /// Include or exclude one zone.
    pub fn set_zone(&mut self, zone: &str, selected: bool) {
        if selected {
            self.zones.insert(zone.to_string());
        } else {
            self.zones.remove(zone);
        }
    }

    /// Include or exclude one driver.
    pub fn set_driver(&mut self, driver: &str, selected: bool) {
        if selected {
            self.drivers.insert(driver.to_string());
        } else {
            self.drivers.remove(driver);
        }
    }

    /// Set the inclusive date range. An inverted range is accepted and simply
    /// matches nothing.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start = start;
        self.end = end;
    }

    /// True when a single record satisfies every criterion.
    pub fn matches(&self, record: &Record) -> bool {
        self.zones.contains(&record.zone)
            && self.drivers.contains(&record.driver)
            && self.start <= record.date
            && record.date <= self.end
    }
}

/// Apply criteria to a slice of records, returning indices of matching
/// records in their original order.
///
/// Returns indices rather than copies so a view over a large dataset stays
/// cheap to recompute on every criteria change.
pub fn apply_filters(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.start > criteria.end || criteria.zones.is_empty() || criteria.drivers.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Filter a dataset, producing a view that borrows it.
pub fn filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView {
        dataset,
        indices: apply_filters(dataset.records(), criteria),
    }
}

/// Records of a dataset that satisfy some criteria, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over a precomputed set of indices (as held in session state).
    /// Out-of-range indices are dropped.
    pub fn from_indices(dataset: &'a Dataset, indices: &[usize]) -> Self {
        Self {
            dataset,
            indices: indices
                .iter()
                .copied()
                .filter(|&i| i < dataset.len())
                .collect(),
        }
    }

    /// Restrict this view further. Filtering is monotonic, so applying the
    /// same criteria twice yields the same view.
    pub fn filter(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let records = self.dataset.records();
        FilteredView {
            dataset: self.dataset,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| {
                    criteria.start <= criteria.end && criteria.matches(&records[i])
                })
                .collect(),
        }
    }

    /// Indices into the underlying dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Size of the dataset the view was taken from.
    pub fn dataset_len(&self) -> usize {
        self.dataset.len()
    }

    /// Matching records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}
