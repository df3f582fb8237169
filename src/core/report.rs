// FleetLens - core/report.rs
//
// Text and JSON rendering of a summary for headless use.
// Core layer: writes to any Write trait object.
//
// Only aggregates are rendered; the filtered rows themselves are never
// written out.

use crate::core::aggregate::Summary;
use crate::util::constants::DISPLAY_DATE_FORMAT;
use crate::util::error::ReportError;
use std::io::Write;

/// Message shown when the filtered view contains no incidents.
pub const NO_INCIDENTS_MESSAGE: &str = "No incidents detected in the current filter.";

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Parse a format name ("text" or "json", case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a summary in the requested format.
pub fn render<W: Write>(
    summary: &Summary,
    format: ReportFormat,
    writer: W,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => render_text(summary, writer),
        ReportFormat::Json => render_json(summary, writer),
    }
}

/// Render a human-readable report: record count, KPIs, breakdown tables,
/// and the incident table.
pub fn render_text<W: Write>(summary: &Summary, mut writer: W) -> Result<(), ReportError> {
    write_text(summary, &mut writer).map_err(|source| ReportError::Io { source })
}

fn write_text<W: Write>(s: &Summary, w: &mut W) -> std::io::Result<()> {
    writeln!(w, "{}", s.record_count_label())?;
    writeln!(w)?;

    writeln!(w, "Key figures")?;
    writeln!(w, "  Total deliveries    {}", s.total_deliveries)?;
    writeln!(w, "  Total time (h)      {:.2}", s.total_time)?;
    writeln!(w, "  Fuel used (L)       {:.2}", s.total_fuel)?;
    writeln!(w, "  Distance (km)       {:.2}", s.total_distance)?;
    writeln!(w)?;

    writeln!(w, "Deliveries by zone")?;
    for (zone, count) in &s.deliveries_by_zone {
        writeln!(w, "  {zone:<20} {count:>10}")?;
    }
    writeln!(w)?;

    writeln!(w, "Time by driver (h)")?;
    for (driver, hours) in &s.time_by_driver {
        writeln!(w, "  {driver:<20} {hours:>10.2}")?;
    }
    writeln!(w)?;

    writeln!(w, "Distance by date (km)")?;
    for (date, km) in &s.distance_by_date {
        writeln!(w, "  {:<20} {km:>10.2}", date.format(DISPLAY_DATE_FORMAT))?;
    }
    writeln!(w)?;

    writeln!(w, "Incidents")?;
    if s.incidents.is_empty() {
        writeln!(w, "  {NO_INCIDENTS_MESSAGE}")?;
    } else {
        for i in &s.incidents {
            writeln!(
                w,
                "  {} | {} | {} | {} | {}",
                i.date.format(DISPLAY_DATE_FORMAT),
                i.vehicle_id,
                i.driver,
                i.zone,
                i.incident_note
            )?;
        }
    }

    w.flush()
}

/// Render the summary as pretty-printed JSON.
pub fn render_json<W: Write>(summary: &Summary, mut writer: W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, summary)
        .map_err(|source| ReportError::Json { source })?;
    writeln!(writer).map_err(|source| ReportError::Io { source })
}
