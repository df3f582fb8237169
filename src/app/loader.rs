// FleetLens - app/loader.rs
//
// Load pipeline: read the file, validate the schema, enforce limits.
// Either a complete dataset comes back or an error does; nothing partial.

use crate::core::model::Dataset;
use crate::core::schema;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{LoadError, Result};
use std::path::Path;
use std::time::Instant;

/// Resource bounds applied while loading one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLimits {
    pub max_file_size: u64,
    pub max_records: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            max_records: constants::DEFAULT_MAX_RECORDS,
        }
    }
}

impl From<&AppConfig> for LoadLimits {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            max_records: config.max_records,
        }
    }
}

/// Load one input file into a validated dataset.
pub fn load_dataset(path: &Path, limits: &LoadLimits) -> Result<Dataset> {
    let started = Instant::now();

    let table = fs::read_table(path, limits.max_file_size)?;
    if table.rows.len() > limits.max_records {
        return Err(LoadError::TooManyRecords {
            count: table.rows.len(),
            max: limits.max_records,
        }
        .into());
    }

    let dataset = schema::validate(&table)?;

    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        columns = table.headers.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Dataset loaded"
    );

    Ok(dataset)
}
