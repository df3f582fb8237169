// FleetLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FleetLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "FleetLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dataset schema
// =============================================================================

pub const COL_DATE: &str = "date";
pub const COL_VEHICLE_ID: &str = "vehicle_id";
pub const COL_DRIVER: &str = "driver";
pub const COL_ZONE: &str = "zone";
pub const COL_DELIVERY_COUNT: &str = "delivery_count";
pub const COL_TOTAL_TIME: &str = "total_time";
pub const COL_FUEL_USED: &str = "fuel_used";
pub const COL_DISTANCE: &str = "distance";
pub const COL_INCIDENT_NOTE: &str = "incident_note";

/// Columns every input file must carry, matched exactly (case-sensitive).
/// Order here is the order missing columns are reported in.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_VEHICLE_ID,
    COL_DRIVER,
    COL_ZONE,
    COL_DELIVERY_COUNT,
    COL_TOTAL_TIME,
    COL_FUEL_USED,
    COL_DISTANCE,
    COL_INCIDENT_NOTE,
];

/// Date-only text formats accepted in the `date` column, tried in order.
/// Month-first is tried before day-first for ambiguous slash dates.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Date-time text formats accepted in the `date` column. The time part is
/// discarded.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Day zero of the 1900 Excel date system (serial 1 = 1900-01-01, with the
/// 1900 leap-year bug folded in for serials after February 1900).
pub const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

// =============================================================================
// Input limits
// =============================================================================

/// File extensions handled by the CSV reader.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// File extensions handled by the workbook reader.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Default maximum input file size in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024; // 100 MB

/// Smallest configurable input file size limit.
pub const MIN_MAX_FILE_SIZE: u64 = 1024;

/// Hard upper bound on the input file size limit.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024; // 1 GB

/// Default maximum number of records held in memory for one session.
pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

/// Smallest configurable record limit.
pub const MIN_MAX_RECORDS: usize = 1;

/// Hard upper bound on the record limit.
pub const ABSOLUTE_MAX_RECORDS: usize = 10_000_000;

// =============================================================================
// Aggregation
// =============================================================================

/// Decimal places KPI totals are rounded to.
pub const KPI_DECIMALS: i32 = 2;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Date format used in filter inputs and report output.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
