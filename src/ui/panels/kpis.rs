// FleetLens - ui/panels/kpis.rs
//
// Record-count heading and the four KPI cards.

use crate::core::aggregate::Summary;
use crate::ui::theme;

/// Render the record count and KPI cards.
pub fn render(ui: &mut egui::Ui, summary: &Summary) {
    ui.heading(summary.record_count_label());
    ui.add_space(6.0);

    ui.horizontal_wrapped(|ui| {
        card(ui, "Total deliveries", summary.total_deliveries.to_string());
        card(ui, "Total time (h)", format!("{:.2}", summary.total_time));
        card(ui, "Fuel used (L)", format!("{:.2}", summary.total_fuel));
        card(ui, "Distance (km)", format!("{:.2}", summary.total_distance));
    });
}

fn card(ui: &mut egui::Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(theme::KPI_CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(label).weak());
            ui.label(egui::RichText::new(value).size(24.0).strong());
        });
    });
}
