// FleetLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Headless report mode (--report)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use fleetlens::app;

pub use fleetlens::core;
pub use fleetlens::platform;
pub use fleetlens::ui;
pub use fleetlens::util;

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::app::loader::{self, LoadLimits};
use crate::app::state::AppState;
use crate::core::aggregate::summarise;
use crate::core::filter::{self, FilterCriteria};
use crate::core::report::{self, ReportFormat};
use crate::platform::config::AppConfig;
use std::path::Path;

/// FleetLens - Delivery efficiency dashboard for logistics spreadsheets.
///
/// Open a CSV or Excel file of delivery records, filter it by zone, driver
/// and date, and review KPIs, breakdowns and incidents. With --report the
/// summary is printed to stdout instead of opening a window.
#[derive(Parser, Debug)]
#[command(name = "FleetLens", version, about)]
struct Cli {
    /// Spreadsheet to open (.csv, .xlsx, .xlsm, .xls, .ods).
    path: Option<PathBuf>,

    /// Restrict to a zone (repeatable). Defaults to all zones.
    #[arg(short = 'z', long = "zone")]
    zones: Vec<String>,

    /// Restrict to a driver (repeatable). Defaults to all drivers.
    #[arg(short = 'r', long = "driver")]
    drivers: Vec<String>,

    /// First date to include (YYYY-MM-DD). Defaults to the earliest date.
    #[arg(long = "from", value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD). Defaults to the latest date.
    #[arg(long = "to", value_parser = parse_cli_date)]
    to: Option<NaiveDate>,

    /// Print a report instead of launching the GUI (--report or
    /// --report=json). The format defaults to the one set in config.toml.
    #[arg(
        long = "report",
        num_args = 0..=1,
        require_equals = true,
        value_name = "FORMAT",
        value_parser = ["text", "json"],
        requires = "path"
    )]
    report: Option<Option<String>>,

    /// Directory containing config.toml (overrides the platform default).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_cli_date(text: &str) -> Result<NaiveDate, String> {
    crate::app::state::parse_input_date(text)
        .ok_or_else(|| format!("'{text}' is not a date; expected YYYY-MM-DD"))
}

fn main() {
    let cli = Cli::parse();

    // Config comes first so its logging section can shape the subscriber.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "FleetLens starting"
    );

    if let Some(ref requested) = cli.report {
        let format_name = requested.as_deref().unwrap_or(&config.report_format);
        let format = ReportFormat::from_name(format_name).unwrap_or_default();
        let Some(ref path) = cli.path else {
            // clap enforces `requires = "path"`.
            return;
        };
        if let Err(e) = run_report(path, &cli, &config, format) {
            tracing::error!(error = %e, "Report failed");
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
        return;
    }

    launch_gui(&cli, &config);
}

/// Load, filter and summarise without a window, writing the report to stdout.
fn run_report(
    path: &Path,
    cli: &Cli,
    config: &AppConfig,
    format: ReportFormat,
) -> util::error::Result<()> {
    let dataset = loader::load_dataset(path, &LoadLimits::from(config))?;

    let mut criteria = FilterCriteria::for_dataset(&dataset);
    if !cli.zones.is_empty() {
        criteria.zones = cli.zones.iter().cloned().collect();
    }
    if !cli.drivers.is_empty() {
        criteria.drivers = cli.drivers.iter().cloned().collect();
    }
    let start = cli.from.unwrap_or(criteria.start);
    let end = cli.to.unwrap_or(criteria.end);
    criteria.set_range(start, end);

    let view = filter::filter(&dataset, &criteria);
    let summary = summarise(&view);
    tracing::info!(
        filtered = summary.record_count,
        total = summary.total_records,
        "Report computed"
    );

    let stdout = std::io::stdout();
    report::render(&summary, format, stdout.lock())?;
    Ok(())
}

fn launch_gui(cli: &Cli, config: &AppConfig) {
    let mut state = AppState::new(LoadLimits::from(config), config.dark_mode, cli.debug);

    // A path given on the command line is loaded before the first frame; a
    // failure is shown in place of the dashboard.
    if let Some(ref path) = cli.path {
        if state.load_file(path).is_ok() {
            apply_cli_criteria(&mut state, cli);
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_ID,
        native_options,
        Box::new(move |cc| {
            gui::apply_font_size(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::FleetLensApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch FleetLens GUI: {e}");
        std::process::exit(1);
    }
}

/// Seed the GUI session with any --zone/--driver/--from/--to given.
fn apply_cli_criteria(state: &mut AppState, cli: &Cli) {
    if !cli.zones.is_empty() {
        state.criteria.zones = cli.zones.iter().cloned().collect();
    }
    if !cli.drivers.is_empty() {
        state.criteria.drivers = cli.drivers.iter().cloned().collect();
    }
    if let Some(from) = cli.from {
        state.start_input = from.format(util::constants::DISPLAY_DATE_FORMAT).to_string();
    }
    if let Some(to) = cli.to {
        state.end_input = to.format(util::constants::DISPLAY_DATE_FORMAT).to_string();
    }
    state.apply_date_inputs();
    state.apply_filters();
}
