// FleetLens - app/state.rs
//
// Session state: the loaded dataset, the current filter criteria, and the
// derived view and summary. One `AppState` is one session; nothing here is
// global, and a new file replaces the whole session.

use crate::app::loader::{self, LoadLimits};
use crate::core::aggregate::{summarise, Summary};
use crate::core::filter::{self, FilterCriteria};
use crate::core::model::Dataset;
use crate::util::constants::DISPLAY_DATE_FORMAT;
use crate::util::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Dataset of the current session (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// File the dataset was loaded from.
    pub source_path: Option<PathBuf>,

    /// Current filter configuration.
    pub criteria: FilterCriteria,

    /// Zones present in the dataset, in first-appearance order.
    pub zone_options: Vec<String>,

    /// Drivers present in the dataset, in first-appearance order.
    pub driver_options: Vec<String>,

    /// Indices of records matching the current criteria (into the dataset).
    pub filtered_indices: Vec<usize>,

    /// Aggregates for the current view.
    pub summary: Option<Summary>,

    /// User-facing message of the last failed load. While set, nothing else
    /// is rendered.
    pub load_error: Option<String>,

    /// Date range text fields (YYYY-MM-DD) as typed by the user.
    pub start_input: String,
    pub end_input: String,

    /// Status message for the status bar.
    pub status_message: String,

    /// Resource bounds for file loading.
    pub limits: LoadLimits,

    /// Dark (true) or light (false) theme.
    pub dark_mode: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create an empty session.
    pub fn new(limits: LoadLimits, dark_mode: bool, debug_mode: bool) -> Self {
        Self {
            dataset: None,
            source_path: None,
            criteria: FilterCriteria::default(),
            zone_options: Vec::new(),
            driver_options: Vec::new(),
            filtered_indices: Vec::new(),
            summary: None,
            load_error: None,
            start_input: String::new(),
            end_input: String::new(),
            status_message: "Ready. Open a spreadsheet to begin.".to_string(),
            limits,
            dark_mode,
            show_about: false,
            debug_mode,
        }
    }

    /// Load a file and start a new session from it.
    ///
    /// On failure the previous session is discarded too: the state ends up
    /// empty apart from `load_error`, so no stale results are shown.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        match loader::load_dataset(path, &self.limits) {
            Ok(dataset) => {
                self.set_dataset(dataset, Some(path.to_path_buf()));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Load failed");
                self.clear();
                self.load_error = Some(e.user_message());
                self.status_message = format!("Failed to load {}", path.display());
                Err(e)
            }
        }
    }

    /// Start a new session from an already-built dataset with default
    /// criteria.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<PathBuf>) {
        self.criteria = FilterCriteria::for_dataset(&dataset);
        self.zone_options = dataset.distinct_zones();
        self.driver_options = dataset.distinct_drivers();
        self.status_message = match &source {
            Some(p) => format!("Loaded {} records from {}", dataset.len(), p.display()),
            None => format!("Loaded {} records", dataset.len()),
        };
        self.dataset = Some(dataset);
        self.source_path = source;
        self.load_error = None;
        self.sync_date_inputs();
        self.apply_filters();
    }

    /// Recompute the filtered view and its summary from the current criteria.
    pub fn apply_filters(&mut self) {
        let Some(dataset) = self.dataset.as_ref() else {
            self.filtered_indices.clear();
            self.summary = None;
            return;
        };
        let view = filter::filter(dataset, &self.criteria);
        self.summary = Some(summarise(&view));
        self.filtered_indices = view.indices().to_vec();
    }

    /// Restore default criteria for the loaded dataset.
    pub fn reset_filters(&mut self) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        self.criteria = FilterCriteria::for_dataset(dataset);
        self.sync_date_inputs();
        self.apply_filters();
    }

    pub fn set_zone(&mut self, zone: &str, selected: bool) {
        self.criteria.set_zone(zone, selected);
        self.apply_filters();
    }

    pub fn set_driver(&mut self, driver: &str, selected: bool) {
        self.criteria.set_driver(driver, selected);
        self.apply_filters();
    }

    pub fn select_all_zones(&mut self, selected: bool) {
        self.criteria.zones = if selected {
            self.zone_options.iter().cloned().collect()
        } else {
            Default::default()
        };
        self.apply_filters();
    }

    pub fn select_all_drivers(&mut self, selected: bool) {
        self.criteria.drivers = if selected {
            self.driver_options.iter().cloned().collect()
        } else {
            Default::default()
        };
        self.apply_filters();
    }

    /// Apply the date text fields to the criteria.
    ///
    /// Returns whether each field parsed. An unparsable field leaves its
    /// bound unchanged.
    pub fn apply_date_inputs(&mut self) -> (bool, bool) {
        let start = parse_input_date(&self.start_input);
        let end = parse_input_date(&self.end_input);
        let new_start = start.unwrap_or(self.criteria.start);
        let new_end = end.unwrap_or(self.criteria.end);
        if new_start != self.criteria.start || new_end != self.criteria.end {
            self.criteria.set_range(new_start, new_end);
            self.apply_filters();
        }
        (start.is_some(), end.is_some())
    }

    /// Clear the session and reset to the initial state.
    pub fn clear(&mut self) {
        self.dataset = None;
        self.source_path = None;
        self.criteria = FilterCriteria::default();
        self.zone_options.clear();
        self.driver_options.clear();
        self.filtered_indices.clear();
        self.summary = None;
        self.load_error = None;
        self.start_input.clear();
        self.end_input.clear();
        self.status_message = "Ready.".to_string();
    }

    /// Total records in the session's dataset.
    pub fn total_records(&self) -> usize {
        self.dataset.as_ref().map_or(0, Dataset::len)
    }

    fn sync_date_inputs(&mut self) {
        match self.dataset.as_ref().and_then(Dataset::date_bounds) {
            Some((start, end)) => {
                self.start_input = start.format(DISPLAY_DATE_FORMAT).to_string();
                self.end_input = end.format(DISPLAY_DATE_FORMAT).to_string();
            }
            None => {
                self.start_input.clear();
                self.end_input.clear();
            }
        }
    }
}

/// Parse a date typed into a filter field.
pub fn parse_input_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DISPLAY_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::test_support::{record, sample_dataset};

    fn state_with(dataset: Dataset) -> AppState {
        let mut state = AppState::new(LoadLimits::default(), true, false);
        state.set_dataset(dataset, None);
        state
    }

    #[test]
    fn test_new_session_is_empty() {
        let state = AppState::new(LoadLimits::default(), false, true);
        assert!(state.debug_mode);
        assert!(!state.dark_mode);
        assert!(state.dataset.is_none());
        assert_eq!(state.total_records(), 0);
    }

    #[test]
    fn test_new_dataset_gets_default_criteria() {
        let state = state_with(sample_dataset());
        assert_eq!(state.filtered_indices, vec![0, 1]);
        assert_eq!(state.start_input, "2024-01-01");
        assert_eq!(state.end_input, "2024-01-02");
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.total_deliveries, 8);
        assert_eq!(state.zone_options, vec!["North", "South"]);
    }

    #[test]
    fn test_filter_changes_never_touch_the_dataset() {
        let mut state = state_with(sample_dataset());
        let before = state.dataset.clone();
        state.set_zone("North", false);
        state.select_all_drivers(false);
        assert_eq!(state.dataset, before);
        assert!(state.filtered_indices.is_empty());
        assert_eq!(state.summary.as_ref().unwrap().total_deliveries, 0);
    }

    #[test]
    fn test_date_inputs() {
        let mut state = state_with(sample_dataset());
        state.end_input = "2024-01-01".to_string();
        assert_eq!(state.apply_date_inputs(), (true, true));
        assert_eq!(state.filtered_indices, vec![0]);

        state.start_input = "next week".to_string();
        assert_eq!(state.apply_date_inputs(), (false, true));
        assert_eq!(state.filtered_indices, vec![0]);
    }

    #[test]
    fn test_reset_filters_restores_identity_view() {
        let mut state = state_with(sample_dataset());
        state.select_all_zones(false);
        state.reset_filters();
        assert_eq!(state.filtered_indices, vec![0, 1]);
    }

    #[test]
    fn test_failed_load_discards_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "date,zone\n2024-01-01,North\n").unwrap();

        let mut state = state_with(sample_dataset());
        assert!(state.load_file(&bad).is_err());
        assert!(state.dataset.is_none());
        assert!(state.summary.is_none());
        assert!(state.filtered_indices.is_empty());
        let message = state.load_error.as_deref().unwrap();
        assert!(message.starts_with("Missing columns in the file:"));
        assert!(message.contains("vehicle_id"));
    }

    #[test]
    fn test_indices_and_summary_agree() {
        let mut state = state_with(Dataset::new(vec![
            record("2024-01-01", "N", "A", 1, 1.0, 1.0, 1.0, ""),
            record("2024-01-02", "S", "B", 2, 1.0, 1.0, 1.0, ""),
        ]));
        state.set_zone("N", false);
        assert_eq!(state.filtered_indices, vec![1]);
        assert_eq!(state.summary.as_ref().unwrap().record_count, 1);
        assert_eq!(state.total_records(), 2);
    }
}
