// FleetLens - ui/panels/filters.rs
//
// Filter controls sidebar: zone and driver checklists plus the inclusive
// date range.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the filter controls.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label(egui::RichText::new("Load a file to enable filters.").weak());
        return;
    }

    if ui.button("Reset Filters").clicked() {
        state.reset_filters();
    }

    ui.separator();

    // Zones
    ui.horizontal(|ui| {
        ui.strong("Zones");
        if ui.small_button("All").clicked() {
            state.select_all_zones(true);
        }
        if ui.small_button("None").clicked() {
            state.select_all_zones(false);
        }
    });
    let mut zone_change: Option<(String, bool)> = None;
    for zone in &state.zone_options {
        let mut checked = state.criteria.zones.contains(zone);
        if ui.checkbox(&mut checked, zone.as_str()).changed() {
            zone_change = Some((zone.clone(), checked));
        }
    }
    if let Some((zone, checked)) = zone_change {
        state.set_zone(&zone, checked);
    }

    ui.separator();

    // Drivers
    ui.horizontal(|ui| {
        ui.strong("Drivers");
        if ui.small_button("All").clicked() {
            state.select_all_drivers(true);
        }
        if ui.small_button("None").clicked() {
            state.select_all_drivers(false);
        }
    });
    let mut driver_change: Option<(String, bool)> = None;
    for driver in &state.driver_options {
        let mut checked = state.criteria.drivers.contains(driver);
        if ui.checkbox(&mut checked, driver.as_str()).changed() {
            driver_change = Some((driver.clone(), checked));
        }
    }
    if let Some((driver, checked)) = driver_change {
        state.set_driver(&driver, checked);
    }

    ui.separator();

    // Date range (inclusive)
    ui.strong("Date range");
    let start_ok = crate::app::state::parse_input_date(&state.start_input).is_some();
    let end_ok = crate::app::state::parse_input_date(&state.end_input).is_some();
    let mut dates_changed = false;

    egui::Grid::new("date_range")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Start:");
            dates_changed |= date_field(ui, &mut state.start_input, start_ok);
            ui.end_row();

            ui.label("End:");
            dates_changed |= date_field(ui, &mut state.end_input, end_ok);
            ui.end_row();
        });

    if dates_changed {
        state.apply_date_inputs();
    }
    if !start_ok || !end_ok {
        ui.colored_label(theme::ERROR_TEXT, "Use YYYY-MM-DD");
    } else if state.criteria.start > state.criteria.end {
        ui.colored_label(theme::INCIDENT_TEXT, "Start is after end: no records match.");
    }
}

/// Single-line date input, outlined in red while the text does not parse.
fn date_field(ui: &mut egui::Ui, text: &mut String, valid: bool) -> bool {
    let mut edit = egui::TextEdit::singleline(text)
        .desired_width(110.0)
        .hint_text("YYYY-MM-DD");
    if !valid {
        edit = edit.text_color(theme::ERROR_TEXT);
    }
    ui.add(edit).changed()
}
