// FleetLens - core/aggregate.rs
//
// KPI totals and group-by-sum breakdowns over a filtered view.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::filter::FilteredView;
use crate::core::model::Incident;
use crate::util::constants::KPI_DECIMALS;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the dashboard and the report show for one filtered view.
///
/// The four KPI totals are rounded to two decimals; breakdown values are
/// plain sums so consumers can format them as they see fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Records in the filtered view.
    pub record_count: usize,

    /// Records in the whole dataset.
    pub total_records: usize,

    pub total_deliveries: u64,
    pub total_time: f64,
    pub total_fuel: f64,
    pub total_distance: f64,

    /// Zone -> sum of delivery_count.
    pub deliveries_by_zone: BTreeMap<String, u64>,

    /// Driver -> sum of total_time.
    pub time_by_driver: BTreeMap<String, f64>,

    /// Date -> sum of distance, in date order.
    pub distance_by_date: BTreeMap<NaiveDate, f64>,

    /// Records with an incident note, in view order.
    pub incidents: Vec<Incident>,
}

impl Summary {
    /// Human-readable count of records remaining after filtering.
    pub fn record_count_label(&self) -> String {
        format!(
            "Filtered data: {} of {} records",
            self.record_count, self.total_records
        )
    }

    pub fn has_incidents(&self) -> bool {
        !self.incidents.is_empty()
    }
}

/// Compute KPIs, breakdowns, and the incident list for a view.
///
/// An empty view yields zero totals, empty breakdowns, and no incidents.
pub fn summarise(view: &FilteredView<'_>) -> Summary {
    let mut summary = Summary {
        record_count: view.len(),
        total_records: view.dataset_len(),
        ..Default::default()
    };

    let mut time = 0.0;
    let mut fuel = 0.0;
    let mut distance = 0.0;

    for record in view.iter() {
        summary.total_deliveries = summary
            .total_deliveries
            .saturating_add(record.delivery_count);
        time += record.total_time;
        fuel += record.fuel_used;
        distance += record.distance;

        let zone_total = summary
            .deliveries_by_zone
            .entry(record.zone.clone())
            .or_default();
        *zone_total = zone_total.saturating_add(record.delivery_count);
        *summary
            .time_by_driver
            .entry(record.driver.clone())
            .or_default() += record.total_time;
        *summary.distance_by_date.entry(record.date).or_default() += record.distance;

        if let Some(incident) = Incident::from_record(record) {
            summary.incidents.push(incident);
        }
    }

    summary.total_time = round_kpi(time);
    summary.total_fuel = round_kpi(fuel);
    summary.total_distance = round_kpi(distance);

    tracing::debug!(
        records = summary.record_count,
        deliveries = summary.total_deliveries,
        incidents = summary.incidents.len(),
        "Summary computed"
    );

    summary
}

/// Round a KPI total to `KPI_DECIMALS` places. Normalises `-0.0` to `0.0`.
pub fn round_kpi(value: f64) -> f64 {
    let factor = 10f64.powi(KPI_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
