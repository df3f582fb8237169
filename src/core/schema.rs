// FleetLens - core/schema.rs
//
// Schema validation: checks the required column set, then converts raw
// table rows into typed records. A table missing any required column is
// rejected before a single row is converted.

use crate::core::model::{Dataset, Record};
use crate::core::table::{Cell, RawTable};
use crate::util::constants::{self, REQUIRED_COLUMNS};
use crate::util::error::{LoadError, Result, SchemaError};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

static EMPTY_CELL: Cell = Cell::Empty;

/// Required columns absent from `headers`, in required-list order.
/// Matching is exact and case-sensitive.
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == *required))
        .collect()
}

/// Column positions of the required fields within one table.
struct ColumnMap {
    date: usize,
    vehicle_id: usize,
    driver: usize,
    zone: usize,
    delivery_count: usize,
    total_time: usize,
    fuel_used: usize,
    distance: usize,
    incident_note: usize,
}

impl ColumnMap {
    fn resolve(table: &RawTable) -> std::result::Result<Self, SchemaError> {
        let missing = missing_columns(&table.headers);
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        // Every lookup below succeeds: the missing set was empty.
        let col = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(Self {
            date: col(constants::COL_DATE),
            vehicle_id: col(constants::COL_VEHICLE_ID),
            driver: col(constants::COL_DRIVER),
            zone: col(constants::COL_ZONE),
            delivery_count: col(constants::COL_DELIVERY_COUNT),
            total_time: col(constants::COL_TOTAL_TIME),
            fuel_used: col(constants::COL_FUEL_USED),
            distance: col(constants::COL_DISTANCE),
            incident_note: col(constants::COL_INCIDENT_NOTE),
        })
    }
}

/// Validate a raw table and build the typed dataset.
///
/// Fails with `SchemaError::MissingColumns` if any required column is absent,
/// or with a `LoadError` naming the first row whose date or numeric value
/// cannot be converted. No partial dataset is ever returned.
pub fn validate(table: &RawTable) -> Result<Dataset> {
    let columns = ColumnMap::resolve(table)?;

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        // Spreadsheet row number: header is row 1.
        let row_number = idx + 2;
        records.push(convert_row(row, &columns, row_number)?);
    }

    tracing::debug!(
        records = records.len(),
        extra_columns = table.headers.len().saturating_sub(REQUIRED_COLUMNS.len()),
        "Schema validation passed"
    );

    Ok(Dataset::new(records))
}

fn convert_row(
    row: &[Cell],
    columns: &ColumnMap,
    row_number: usize,
) -> std::result::Result<Record, LoadError> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY_CELL);

    // Only a truly empty cell has no note; whitespace is kept as written.
    let incident_note = Some(cell(columns.incident_note).to_text()).filter(|n| !n.is_empty());

    Ok(Record {
        date: parse_date(cell(columns.date), row_number)?,
        vehicle_id: cell(columns.vehicle_id).to_text(),
        driver: cell(columns.driver).to_text(),
        zone: cell(columns.zone).to_text(),
        delivery_count: parse_count(cell(columns.delivery_count), row_number)?,
        total_time: parse_real(cell(columns.total_time), constants::COL_TOTAL_TIME, row_number)?,
        fuel_used: parse_real(cell(columns.fuel_used), constants::COL_FUEL_USED, row_number)?,
        distance: parse_real(cell(columns.distance), constants::COL_DISTANCE, row_number)?,
        incident_note,
    })
}

// =============================================================================
// Cell conversion
// =============================================================================

/// Convert a `date` cell to a calendar date. Any time-of-day is discarded.
pub fn parse_date(cell: &Cell, row: usize) -> std::result::Result<NaiveDate, LoadError> {
    let parsed = match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(serial) => excel_serial_to_date(*serial),
        Cell::Text(text) => parse_date_text(text.trim()),
        Cell::Empty => None,
    };
    parsed.ok_or_else(|| LoadError::DateParse {
        row,
        value: cell.to_text(),
    })
}

/// Parse date text using the accepted date, date-time, and RFC 3339 formats.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Some(date) = constants::DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(date);
    }
    if let Some(dt) = constants::DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Convert an Excel 1900-system serial number to a calendar date.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let (y, m, d) = constants::EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parse a whole-number count. Empty cells count as zero.
fn parse_count(cell: &Cell, row: usize) -> std::result::Result<u64, LoadError> {
    let value = parse_real(cell, constants::COL_DELIVERY_COUNT, row)?;
    // u64::MAX as f64 rounds up to 2^64, which is already out of range.
    if value.fract() != 0.0 || value < 0.0 || value >= u64::MAX as f64 {
        return Err(LoadError::NumberParse {
            row,
            column: constants::COL_DELIVERY_COUNT,
            value: cell.to_text(),
        });
    }
    Ok(value as u64)
}

/// Parse a real-valued cell. Empty cells count as zero.
fn parse_real(cell: &Cell, column: &'static str, row: usize) -> std::result::Result<f64, LoadError> {
    let invalid = || LoadError::NumberParse {
        row,
        column,
        value: cell.to_text(),
    };
    match cell {
        Cell::Empty => Ok(0.0),
        Cell::Number(n) if n.is_finite() => Ok(*n),
        Cell::Text(text) if text.trim().is_empty() => Ok(0.0),
        Cell::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::FleetLensError;

    fn headers() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from_text(v)).collect()
    }

    #[test]
    fn test_missing_columns_reports_exactly_the_absent_fields() {
        let partial = vec!["date", "vehicle_id", "driver", "Zone", "delivery_count"];
        assert_eq!(
            missing_columns(&partial),
            vec!["zone", "total_time", "fuel_used", "distance", "incident_note"]
        );
        assert!(missing_columns(&headers()).is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_columns_before_converting_rows() {
        // The bad date would fail conversion, but the schema check comes first.
        let table = RawTable::new(
            vec!["date".into(), "driver".into()],
            vec![text_row(&["not a date", "Ana"])],
        );
        match validate(&table) {
            Err(FleetLensError::Schema(SchemaError::MissingColumns { missing })) => {
                assert_eq!(missing.len(), REQUIRED_COLUMNS.len() - 2);
                assert!(!missing.contains(&"date".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_builds_typed_records() {
        let table = RawTable::new(
            headers(),
            vec![
                text_row(&["2024-01-01", "V1", "Ana", "North", "5", "2.5", "10", "50", ""]),
                text_row(&["2024-01-02", "V2", "Ana", "South", "3", "1.0", "4", "20", "flat tire"]),
            ],
        );
        let ds = validate(&table).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.delivery_count, 5);
        assert_eq!(first.total_time, 2.5);
        assert_eq!(first.incident_note, None);
        assert_eq!(ds.records()[1].incident_note.as_deref(), Some("flat tire"));
    }

    #[test]
    fn test_extra_columns_and_column_order_are_ignored() {
        let mut hdrs = headers();
        hdrs.reverse();
        hdrs.push("comments".into());
        let table = RawTable::new(
            hdrs,
            vec![text_row(&["", "7", "1", "2", "4", "East", "Bo", "V9", "2024-03-05", "ignored"])],
        );
        let ds = validate(&table).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.zone, "East");
        assert_eq!(r.driver, "Bo");
        assert_eq!(r.delivery_count, 4);
        assert_eq!(r.distance, 7.0);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_unparsable_date_names_the_row() {
        let table = RawTable::new(
            headers(),
            vec![
                text_row(&["2024-01-01", "V1", "Ana", "N", "1", "1", "1", "1", ""]),
                text_row(&["soon", "V1", "Ana", "N", "1", "1", "1", "1", ""]),
            ],
        );
        match validate(&table) {
            Err(FleetLensError::Load(LoadError::DateParse { row, value })) => {
                assert_eq!(row, 3);
                assert_eq!(value, "soon");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_delivery_count_is_rejected() {
        let table = RawTable::new(
            headers(),
            vec![text_row(&["2024-01-01", "V1", "Ana", "N", "2.5", "1", "1", "1", ""])],
        );
        assert!(matches!(
            validate(&table),
            Err(FleetLensError::Load(LoadError::NumberParse {
                column: "delivery_count",
                ..
            }))
        ));
    }

    #[test]
    fn test_empty_numeric_cells_count_as_zero() {
        let table = RawTable::new(
            headers(),
            vec![text_row(&["2024-01-01", "V1", "Ana", "N", "", "", "3.5", "", ""])],
        );
        let ds = validate(&table).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.delivery_count, 0);
        assert_eq!(r.total_time, 0.0);
        assert_eq!(r.fuel_used, 3.5);
        assert_eq!(r.incident_note, None);
    }

    #[test]
    fn test_whitespace_note_is_kept() {
        let table = RawTable::new(
            headers(),
            vec![text_row(&["2024-01-01", "V1", "Ana", "N", "1", "1", "1", "1", " "])],
        );
        let ds = validate(&table).unwrap();
        assert_eq!(ds.records()[0].incident_note.as_deref(), Some(" "));
        assert!(ds.records()[0].has_incident());
    }

    #[test]
    fn test_delivery_count_beyond_u64_is_rejected() {
        let table = RawTable::new(
            headers(),
            vec![text_row(&["2024-01-01", "V1", "Ana", "N", "1e30", "1", "1", "1", ""])],
        );
        assert!(matches!(
            validate(&table),
            Err(FleetLensError::Load(LoadError::NumberParse {
                row: 2,
                column: "delivery_count",
                ..
            }))
        ));

        let table = RawTable::new(
            headers(),
            vec![text_row(&["2024-01-01", "V1", "Ana", "N", "1e19", "1", "1", "1", ""])],
        );
        assert_eq!(validate(&table).unwrap().records()[0].delivery_count, 10_000_000_000_000_000_000);
    }

    #[test]
    fn test_date_cell_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let midday = expected.and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(parse_date(&Cell::DateTime(midday), 2).unwrap(), expected);
        assert_eq!(parse_date(&Cell::Number(45292.0), 2).unwrap(), expected);
        assert_eq!(parse_date(&Cell::Number(45292.75), 2).unwrap(), expected);
        for text in [
            "2024-01-01",
            "2024/01/01",
            "01/01/2024",
            "2024-01-01 08:15:00",
            "2024-01-01T08:15:00",
            "2024-01-01T08:15:00+02:00",
        ] {
            assert_eq!(parse_date_text(text), Some(expected), "format {text}");
        }
        assert!(parse_date(&Cell::Empty, 2).is_err());
    }

    #[test]
    fn test_day_first_dates_parse_when_month_first_is_impossible() {
        assert_eq!(
            parse_date_text("25/12/2024"),
            NaiveDate::from_ymd_opt(2024, 12, 25)
        );
    }
}
