// FleetLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all FleetLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum FleetLensError {
    /// Reading or converting the input file failed.
    Load(LoadError),

    /// The input file lacks required columns.
    Schema(SchemaError),

    /// Rendering a report failed.
    Report(ReportError),
}

impl FleetLensError {
    /// Single message shown to the user when the pipeline halts.
    pub fn user_message(&self) -> String {
        match self {
            Self::Schema(SchemaError::MissingColumns { missing }) => {
                format!("Missing columns in the file: {missing:?}")
            }
            Self::Load(e) => format!("Error reading the file: {e}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FleetLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Schema(e) => write!(f, "Schema error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for FleetLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Schema(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors raised while reading an input file or converting its rows.
#[derive(Debug)]
pub enum LoadError {
    /// I/O error reading the input file.
    Io { path: PathBuf, source: io::Error },

    /// Input file exceeds the configured size limit.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The file extension is not one of the supported formats.
    UnsupportedFormat { path: PathBuf, extension: String },

    /// CSV decoding failed.
    Csv { path: PathBuf, source: csv::Error },

    /// Workbook decoding failed.
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    /// The workbook contains no worksheet.
    NoWorksheet { path: PathBuf },

    /// The file has no header row.
    MissingHeader { path: PathBuf },

    /// A `date` value could not be converted to a calendar date.
    DateParse { row: usize, value: String },

    /// A numeric column held a value that is not a valid number.
    NumberParse {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The file holds more records than the configured limit.
    TooManyRecords { count: usize, max: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::UnsupportedFormat { path, extension } => write!(
                f,
                "'{}': unsupported file type '{extension}' (expected csv, xlsx, xlsm, xls or ods)",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "'{}': invalid CSV: {source}", path.display())
            }
            Self::Workbook { path, source } => {
                write!(f, "'{}': cannot open workbook: {source}", path.display())
            }
            Self::NoWorksheet { path } => {
                write!(f, "'{}': workbook contains no worksheet", path.display())
            }
            Self::MissingHeader { path } => {
                write!(f, "'{}': file has no header row", path.display())
            }
            Self::DateParse { row, value } => {
                write!(f, "row {row}: cannot parse date '{value}'")
            }
            Self::NumberParse { row, column, value } => {
                write!(f, "row {row}: '{value}' is not a valid {column}")
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "file holds {count} records, exceeds maximum of {max}. \
                 Raise [input] max_records in config to load it."
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Workbook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for FleetLensError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Errors raised when the input columns do not satisfy the required schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// One or more required columns are absent, in required-list order.
    MissingColumns { missing: Vec<String> },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns { missing } => {
                write!(f, "missing required columns: {}", missing.join(", "))
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for FleetLensError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to report rendering.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error writing the report.
    Io { source: io::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "report I/O error: {source}"),
            Self::Json { source } => write!(f, "JSON report error: {source}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

impl From<ReportError> for FleetLensError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Never fatal: `platform::config` renders these into startup warnings and
/// falls back to defaults, so they are not part of `FleetLensError`.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Convenience type alias for FleetLens results.
pub type Result<T> = std::result::Result<T, FleetLensError>;
