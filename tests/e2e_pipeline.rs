// FleetLens - tests/e2e_pipeline.rs
//
// End-to-end tests for the load -> filter -> summarise -> report pipeline.
//
// These tests read real files from disk (CSV fixtures and a workbook written
// with rust_xlsxwriter) and drive them through the same functions the GUI
// and the headless report use.

use chrono::NaiveDate;
use fleetlens::app::loader::{load_dataset, LoadLimits};
use fleetlens::app::state::AppState;
use fleetlens::core::aggregate::summarise;
use fleetlens::core::filter::{filter, FilterCriteria, FilteredView};
use fleetlens::core::model::Dataset;
use fleetlens::core::report::{self, ReportFormat, NO_INCIDENTS_MESSAGE};
use fleetlens::util::error::{FleetLensError, LoadError, SchemaError};
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn load(path: &Path) -> Dataset {
    load_dataset(path, &LoadLimits::default()).unwrap()
}

fn criteria(zones: &[&str], drivers: &[&str], start: &str, end: &str) -> FilterCriteria {
    FilterCriteria {
        zones: zones.iter().map(|z| z.to_string()).collect(),
        drivers: drivers.iter().map(|d| d.to_string()).collect(),
        start: date(start),
        end: date(end),
    }
}

fn render_to_string(dataset: &Dataset, criteria: &FilterCriteria, format: ReportFormat) -> String {
    let summary = summarise(&filter(dataset, criteria));
    let mut out = Vec::new();
    report::render(&summary, format, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn e2e_loads_csv_fixture() {
    let dataset = load(&fixture("deliveries.csv"));

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.distinct_zones(), vec!["North", "South", "East"]);
    assert_eq!(dataset.distinct_drivers(), vec!["Ana", "Luis", "Marta"]);
    assert_eq!(
        dataset.date_bounds(),
        Some((date("2024-01-01"), date("2024-01-03")))
    );

    let second = &dataset.records()[1];
    assert_eq!(second.vehicle_id, "V-02");
    assert_eq!(second.delivery_count, 3);
    assert_eq!(second.incident_note.as_deref(), Some("flat tire"));
    assert!(dataset.records()[0].incident_note.is_none());
}

#[test]
fn e2e_missing_columns_halts_with_schema_error() {
    let result = load_dataset(&fixture("missing_columns.csv"), &LoadLimits::default());

    match result {
        Err(FleetLensError::Schema(SchemaError::MissingColumns { missing })) => {
            assert_eq!(missing, vec!["zone", "distance"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn e2e_bad_date_names_the_row() {
    let err = load_dataset(&fixture("bad_date.csv"), &LoadLimits::default()).unwrap_err();

    assert!(
        matches!(
            err,
            FleetLensError::Load(LoadError::DateParse { row: 3, ref value }) if value == "not-a-date"
        ),
        "expected DateParse on row 3, got {err:?}"
    );
    assert!(err.user_message().starts_with("Error reading the file: "));
}

#[test]
fn e2e_whitespace_note_counts_as_incident() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank_note.csv");
    std::fs::write(
        &path,
        "date,vehicle_id,driver,zone,delivery_count,total_time,fuel_used,distance,incident_note\n\
         2024-01-01,V-01,Ana,North,5,2.5,10,50, \n\
         2024-01-02,V-02,Ana,South,3,1.0,4,20,\n",
    )
    .unwrap();

    let dataset = load(&path);
    assert_eq!(dataset.records()[0].incident_note.as_deref(), Some(" "));
    assert!(dataset.records()[1].incident_note.is_none());

    let summary = summarise(&filter(&dataset, &FilterCriteria::for_dataset(&dataset)));
    assert_eq!(summary.incidents.len(), 1);
    assert_eq!(summary.incidents[0].vehicle_id, "V-01");
}

#[test]
fn e2e_record_limit_is_enforced() {
    let limits = LoadLimits {
        max_records: 2,
        ..LoadLimits::default()
    };
    let err = load_dataset(&fixture("deliveries.csv"), &limits).unwrap_err();
    assert!(matches!(
        err,
        FleetLensError::Load(LoadError::TooManyRecords { count: 5, max: 2 })
    ));
}

#[test]
fn e2e_xlsx_matches_csv() -> Result<(), rust_xlsxwriter::XlsxError> {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let rows: [(&str, &str, &str, &str, f64, f64, f64, f64, &str); 5] = [
        ("2024-01-01", "V-01", "Ana", "North", 5.0, 2.5, 10.0, 50.0, ""),
        ("2024-01-02", "V-02", "Ana", "South", 3.0, 1.0, 4.0, 20.0, "flat tire"),
        ("2024-01-02", "V-03", "Luis", "North", 7.0, 3.25, 12.5, 64.5, ""),
        ("2024-01-03", "V-01", "Luis", "East", 4.0, 2.0, 8.0, 35.0, "late pickup"),
        ("2024-01-03", "V-02", "Marta", "South", 6.0, 2.75, 9.5, 48.0, ""),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deliveries.xlsx");

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    for (col, name) in fleetlens::util::constants::REQUIRED_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, (d, vehicle, driver, zone, count, time, fuel, distance, note)) in
        rows.iter().enumerate()
    {
        let row = i as u32 + 1;
        sheet.write_datetime_with_format(row, 0, &ExcelDateTime::parse_from_str(d)?, &date_format)?;
        sheet.write_string(row, 1, *vehicle)?;
        sheet.write_string(row, 2, *driver)?;
        sheet.write_string(row, 3, *zone)?;
        sheet.write_number(row, 4, *count)?;
        sheet.write_number(row, 5, *time)?;
        sheet.write_number(row, 6, *fuel)?;
        sheet.write_number(row, 7, *distance)?;
        if !note.is_empty() {
            sheet.write_string(row, 8, *note)?;
        }
    }
    workbook.save(&path)?;

    let from_xlsx = load(&path);
    let from_csv = load(&fixture("deliveries.csv"));
    assert_eq!(from_xlsx, from_csv);
    Ok(())
}

// =============================================================================
// Filter + aggregate
// =============================================================================

#[test]
fn e2e_worked_example_ana_north_south() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["North", "South"], &["Ana"], "2024-01-01", "2024-01-02");
    let summary = summarise(&filter(&dataset, &c));

    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.total_records, 5);
    assert_eq!(summary.total_deliveries, 8);
    assert_eq!(summary.total_time, 3.50);
    assert_eq!(summary.total_fuel, 14.00);
    assert_eq!(summary.total_distance, 70.00);
    assert_eq!(summary.deliveries_by_zone.get("North"), Some(&5));
    assert_eq!(summary.deliveries_by_zone.get("South"), Some(&3));
    assert_eq!(summary.deliveries_by_zone.len(), 2);

    assert_eq!(summary.incidents.len(), 1);
    let incident = &summary.incidents[0];
    assert_eq!(incident.date, date("2024-01-02"));
    assert_eq!(incident.zone, "South");
    assert_eq!(incident.driver, "Ana");
    assert_eq!(incident.incident_note, "flat tire");
}

#[test]
fn e2e_worked_example_single_day() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["North", "South"], &["Ana"], "2024-01-01", "2024-01-01");
    let summary = summarise(&filter(&dataset, &c));

    assert_eq!(summary.total_deliveries, 5);
    assert!(summary.incidents.is_empty());
}

#[test]
fn e2e_default_criteria_cover_everything() {
    let dataset = load(&fixture("deliveries.csv"));
    let view = filter(&dataset, &FilterCriteria::for_dataset(&dataset));
    assert_eq!(view.len(), dataset.len());

    let summary = summarise(&view);
    assert_eq!(summary.total_deliveries, 25);
    assert_eq!(summary.total_time, 11.5);
    assert_eq!(summary.total_fuel, 44.0);
    assert_eq!(summary.total_distance, 217.5);

    let zones: Vec<(&str, u64)> = summary
        .deliveries_by_zone
        .iter()
        .map(|(z, n)| (z.as_str(), *n))
        .collect();
    assert_eq!(zones, vec![("East", 4), ("North", 12), ("South", 9)]);

    assert_eq!(summary.time_by_driver.get("Luis"), Some(&5.25));
    assert_eq!(summary.distance_by_date.get(&date("2024-01-02")), Some(&84.5));

    let notes: Vec<&str> = summary
        .incidents
        .iter()
        .map(|i| i.incident_note.as_str())
        .collect();
    assert_eq!(notes, vec!["flat tire", "late pickup"]);
}

#[test]
fn e2e_filter_keeps_source_order_and_is_idempotent() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["North", "South"], &["Ana", "Luis", "Marta"], "2024-01-01", "2024-01-03");

    let view = filter(&dataset, &c);
    assert_eq!(view.indices(), &[0, 1, 2, 4]);

    let again = view.filter(&c);
    assert_eq!(again.indices(), view.indices());

    let rebuilt = FilteredView::from_indices(&dataset, view.indices());
    assert_eq!(summarise(&rebuilt), summarise(&view));
}

#[test]
fn e2e_unknown_selection_yields_empty_view() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["West"], &["Ana"], "2024-01-01", "2024-01-03");
    let summary = summarise(&filter(&dataset, &c));

    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.total_deliveries, 0);
    assert_eq!(summary.total_distance, 0.0);
    assert!(summary.deliveries_by_zone.is_empty());
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn e2e_text_report() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["North", "South"], &["Ana"], "2024-01-01", "2024-01-02");
    let text = render_to_string(&dataset, &c, ReportFormat::Text);

    assert!(text.starts_with("Filtered data: 2 of 5 records\n"), "{text}");
    assert!(text.contains("  Total time (h)      3.50\n"), "{text}");
    assert!(text.contains("2024-01-02 | V-02 | Ana | South | flat tire"), "{text}");
    assert!(!text.contains(NO_INCIDENTS_MESSAGE));

    let narrowed = criteria(&["North", "South"], &["Ana"], "2024-01-01", "2024-01-01");
    let text = render_to_string(&dataset, &narrowed, ReportFormat::Text);
    assert!(text.contains(NO_INCIDENTS_MESSAGE), "{text}");
}

#[test]
fn e2e_json_report() {
    let dataset = load(&fixture("deliveries.csv"));
    let c = criteria(&["North", "South"], &["Ana"], "2024-01-01", "2024-01-02");
    let json = render_to_string(&dataset, &c, ReportFormat::Json);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["record_count"], 2);
    assert_eq!(value["total_deliveries"], 8);
    assert_eq!(value["total_fuel"], 14.0);
    assert_eq!(value["deliveries_by_zone"]["North"], 5);
    assert_eq!(value["incidents"][0]["incident_note"], "flat tire");
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn e2e_session_load_and_filter() {
    let mut state = AppState::new(LoadLimits::default(), true, false);
    state.load_file(&fixture("deliveries.csv")).unwrap();

    assert_eq!(state.total_records(), 5);
    assert_eq!(state.filtered_indices.len(), 5);

    state.select_all_drivers(false);
    state.set_driver("Ana", true);
    let summary = state.summary.as_ref().unwrap();
    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.total_deliveries, 8);
}

#[test]
fn e2e_session_failed_load_replaces_dashboard() {
    let mut state = AppState::new(LoadLimits::default(), true, false);
    state.load_file(&fixture("deliveries.csv")).unwrap();

    assert!(state.load_file(&fixture("missing_columns.csv")).is_err());
    assert!(state.dataset.is_none());
    assert!(state.summary.is_none());
    assert_eq!(
        state.load_error.as_deref(),
        Some("Missing columns in the file: [\"zone\", \"distance\"]")
    );
}
