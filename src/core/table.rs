// FleetLens - core/table.rs
//
// Untyped tabular data as produced by the file readers, before schema
// validation turns rows into typed records.

use chrono::NaiveDateTime;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// A cell the source format already typed as a date or date-time.
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Build a cell from CSV text. Empty text is `Cell::Empty`; everything
    /// else stays text and is converted during validation.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(t) => t.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used for string columns and error messages.
    ///
    /// Whole numbers render without a fractional part so numeric vehicle IDs
    /// read `101`, not `101.0`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(t) => t.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::DateTime(dt) => dt.to_string(),
        }
    }
}

/// Header row plus data rows, exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names, verbatim from the header row.
    pub headers: Vec<String>,

    /// Data rows. Each row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table, padding short rows with `Cell::Empty`, truncating long
    /// ones, and dropping rows with no content at all.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
