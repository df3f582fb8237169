// FleetLens - ui/panels/incidents.rs
//
// Incident table for the filtered view.

use crate::core::aggregate::Summary;
use crate::core::report::NO_INCIDENTS_MESSAGE;
use crate::ui::theme;
use crate::util::constants::DISPLAY_DATE_FORMAT;

/// Render the incident table, or an informational line when the view has
/// no incidents.
pub fn render(ui: &mut egui::Ui, summary: &Summary) {
    ui.label(
        egui::RichText::new(format!("\u{26a0} Incidents ({})", summary.incidents.len()))
            .strong()
            .size(15.0),
    );

    if !summary.has_incidents() {
        ui.label(NO_INCIDENTS_MESSAGE);
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("incident_table")
        .max_height(theme::INCIDENT_TABLE_HEIGHT)
        .show(ui, |ui| {
            egui::Grid::new("incidents")
                .num_columns(5)
                .striped(true)
                .spacing([16.0, 3.0])
                .show(ui, |ui| {
                    ui.strong("Date");
                    ui.strong("Vehicle");
                    ui.strong("Driver");
                    ui.strong("Zone");
                    ui.strong("Incident");
                    ui.end_row();

                    for incident in &summary.incidents {
                        ui.label(
                            egui::RichText::new(
                                incident.date.format(DISPLAY_DATE_FORMAT).to_string(),
                            )
                            .monospace(),
                        );
                        ui.label(&incident.vehicle_id);
                        ui.label(&incident.driver);
                        ui.label(&incident.zone);
                        ui.colored_label(theme::INCIDENT_TEXT, &incident.incident_note);
                        ui.end_row();
                    }
                });
        });
}
