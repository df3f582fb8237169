// FleetLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

// =============================================================================
// Record
// =============================================================================

/// One row of logistics data: a single vehicle-trip observation.
///
/// Built by the schema validator from a raw table row; every field is typed
/// so downstream filtering and aggregation never re-parse text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Calendar date of the trip.
    pub date: NaiveDate,

    /// Vehicle identifier.
    pub vehicle_id: String,

    /// Driver name.
    pub driver: String,

    /// Delivery zone.
    pub zone: String,

    /// Number of deliveries completed.
    pub delivery_count: u64,

    /// Total time on the road, in hours.
    pub total_time: f64,

    /// Fuel consumed, in liters.
    pub fuel_used: f64,

    /// Distance driven, in km.
    pub distance: f64,

    /// Free-text incident note. `None` when the cell was empty.
    pub incident_note: Option<String>,
}

impl Record {
    /// True when this record carries a non-empty incident note. Whitespace
    /// counts as content.
    pub fn has_incident(&self) -> bool {
        self.incident_note
            .as_deref()
            .is_some_and(|note| !note.is_empty())
    }
}

// =============================================================================
// Incident
// =============================================================================

/// Projection of a record with an incident note, as shown in the incident
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub date: NaiveDate,
    pub vehicle_id: String,
    pub driver: String,
    pub zone: String,
    pub incident_note: String,
}

impl Incident {
    /// Project a record to an incident row. Returns `None` when the record
    /// has no incident note.
    pub fn from_record(record: &Record) -> Option<Self> {
        if !record.has_incident() {
            return None;
        }
        let note = record.incident_note.as_deref()?;
        Some(Self {
            date: record.date,
            vehicle_id: record.vehicle_id.clone(),
            driver: record.driver.clone(),
            zone: record.zone.clone(),
            incident_note: note.to_string(),
        })
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The full, immutable set of records loaded from one input file.
///
/// There are no mutating accessors: a new file produces a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct zones in order of first appearance.
    pub fn distinct_zones(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.zone.as_str()))
    }

    /// Distinct drivers in order of first appearance.
    pub fn distinct_drivers(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.driver.as_str()))
    }

    /// Earliest and latest record dates. `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;

    #[test]
    fn test_distinct_values_keep_first_appearance_order() {
        let ds = Dataset::new(vec![
            record("2024-01-03", "South", "Luis", 1, 1.0, 1.0, 1.0, ""),
            record("2024-01-01", "North", "Ana", 1, 1.0, 1.0, 1.0, ""),
            record("2024-01-02", "South", "Ana", 1, 1.0, 1.0, 1.0, ""),
        ]);
        assert_eq!(ds.distinct_zones(), vec!["South", "North"]);
        assert_eq!(ds.distinct_drivers(), vec!["Luis", "Ana"]);
    }

    #[test]
    fn test_date_bounds() {
        let ds = Dataset::new(vec![
            record("2024-01-03", "A", "x", 1, 1.0, 1.0, 1.0, ""),
            record("2024-01-01", "A", "x", 1, 1.0, 1.0, 1.0, ""),
            record("2024-01-02", "A", "x", 1, 1.0, 1.0, 1.0, ""),
        ]);
        let (lo, hi) = ds.date_bounds().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert!(Dataset::default().date_bounds().is_none());
    }

    #[test]
    fn test_incident_projection() {
        let with_note = record("2024-01-02", "South", "Ana", 3, 1.0, 4.0, 20.0, "flat tire");
        let incident = Incident::from_record(&with_note).unwrap();
        assert_eq!(incident.incident_note, "flat tire");
        assert_eq!(incident.zone, "South");

        let without = record("2024-01-01", "North", "Ana", 5, 2.5, 10.0, 50.0, "");
        assert!(!without.has_incident());
        assert!(Incident::from_record(&without).is_none());
    }
}
