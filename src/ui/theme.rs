// FleetLens - ui/theme.rs
//
// Colour scheme, chart palette, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Bar colour for the deliveries-by-zone chart.
pub const ZONE_BAR: Color32 = Color32::from_rgb(59, 130, 246); // Blue 500

/// Bar colour for the time-by-driver chart.
pub const DRIVER_BAR: Color32 = Color32::from_rgb(16, 185, 129); // Emerald 500

/// Line colour for the distance-over-time chart.
pub const DISTANCE_LINE: Color32 = Color32::from_rgb(245, 158, 11); // Amber 500

/// Error message colour.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Incident accent colour.
pub const INCIDENT_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Chart axis and grid colour for the given theme.
pub fn axis_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(107, 114, 128) // Gray 500
    } else {
        Color32::from_rgb(156, 163, 175) // Gray 400
    }
}

/// Chart label colour for the given theme.
pub fn label_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(31, 41, 55) // Gray 800
    }
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const KPI_CARD_WIDTH: f32 = 180.0;
pub const CHART_HEIGHT: f32 = 220.0;
pub const CHART_MARGIN: f32 = 36.0;
pub const INCIDENT_TABLE_HEIGHT: f32 = 260.0;
