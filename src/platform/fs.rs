// FleetLens - platform/fs.rs
//
// File readers: turn a CSV file or a spreadsheet workbook on disk into a
// `RawTable`. The first row is always the header; only the first worksheet
// of a workbook is read.

use crate::core::table::{Cell, RawTable};
use crate::util::constants::{CSV_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::util::error::LoadError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Read an input file into a raw table, dispatching on its extension.
///
/// Files larger than `max_bytes` are rejected before any parsing starts.
pub fn read_table(path: &Path, max_bytes: u64) -> Result<RawTable, LoadError> {
    let size = std::fs::metadata(path)
        .map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > max_bytes {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: max_bytes,
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), size, extension = %extension, "Reading input file");

    if CSV_EXTENSIONS.contains(&extension.as_str()) {
        read_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)
    } else {
        Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Read a CSV file. Every non-empty field becomes `Cell::Text`; typing
/// happens during schema validation.
pub fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Read the first worksheet of an xlsx/xlsm/xls/ods workbook.
pub fn read_workbook(path: &Path) -> Result<RawTable, LoadError> {
    let wb_err = |e: calamine::Error| LoadError::Workbook {
        path: path.to_path_buf(),
        source: e,
    };

    let mut workbook = open_workbook_auto(path).map_err(wb_err)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook.worksheet_range(&sheet).map_err(wb_err)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| data_to_cell(c).to_text()).collect(),
        None => {
            return Err(LoadError::MissingHeader {
                path: path.to_path_buf(),
            })
        }
    };

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    tracing::debug!(sheet = %sheet, rows = rows.len(), "Worksheet read");

    Ok(RawTable::new(headers, rows))
}

/// Map a calamine cell onto the reader-independent cell type.
pub fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Text(dt.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}
