// FleetLens - ui/panels/charts.rs
//
// Painter-drawn charts for the three breakdowns: deliveries by zone and
// time by driver as bar charts, distance by date as a line chart.
//
// Values are scaled against the largest value in the series; an all-zero
// series draws a flat baseline instead of dividing by zero.

use crate::core::aggregate::Summary;
use crate::ui::theme;
use crate::util::constants::DISPLAY_DATE_FORMAT;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

/// Render all three charts for a summary.
pub fn render(ui: &mut egui::Ui, summary: &Summary, dark_mode: bool) {
    let zones: Vec<(String, f64)> = summary
        .deliveries_by_zone
        .iter()
        .map(|(zone, count)| (zone.clone(), *count as f64))
        .collect();
    chart_heading(ui, "Deliveries by Zone");
    bar_chart(ui, &zones, theme::ZONE_BAR, dark_mode, |v| format!("{v:.0}"));

    ui.add_space(12.0);

    let drivers: Vec<(String, f64)> = summary
        .time_by_driver
        .iter()
        .map(|(driver, hours)| (driver.clone(), *hours))
        .collect();
    chart_heading(ui, "Total Time by Driver (h)");
    bar_chart(ui, &drivers, theme::DRIVER_BAR, dark_mode, |v| format!("{v:.2}"));

    ui.add_space(12.0);

    let distances: Vec<(String, f64)> = summary
        .distance_by_date
        .iter()
        .map(|(date, km)| (date.format(DISPLAY_DATE_FORMAT).to_string(), *km))
        .collect();
    chart_heading(ui, "Distance over Time (km)");
    line_chart(ui, &distances, theme::DISTANCE_LINE, dark_mode);
}

fn chart_heading(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).strong().size(15.0));
}

/// Plot area inside the allocated rect, leaving room for axis labels.
fn plot_area(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + theme::CHART_MARGIN, rect.top() + 16.0),
        Pos2::new(rect.right() - 8.0, rect.bottom() - theme::CHART_MARGIN),
    )
}

fn draw_axes(painter: &egui::Painter, plot: Rect, dark_mode: bool) {
    let stroke = Stroke::new(1.0, theme::axis_colour(dark_mode));
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], stroke);
    painter.line_segment([plot.left_top(), plot.left_bottom()], stroke);
}

fn series_max(values: &[(String, f64)]) -> f64 {
    values.iter().map(|(_, v)| *v).fold(0.0, f64::max)
}

fn empty_chart(ui: &mut egui::Ui) {
    ui.label(egui::RichText::new("No data in the current filter.").weak());
}

/// Vertical bar chart with the category label under each bar and the value
/// above it.
fn bar_chart(
    ui: &mut egui::Ui,
    values: &[(String, f64)],
    colour: Color32,
    dark_mode: bool,
    value_label: impl Fn(f64) -> String,
) {
    if values.is_empty() {
        empty_chart(ui);
        return;
    }

    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, theme::CHART_HEIGHT), Sense::hover());
    let plot = plot_area(response.rect);
    draw_axes(&painter, plot, dark_mode);

    let max = series_max(values);
    let slot = plot.width() / values.len() as f32;
    let bar_width = (slot * 0.6).max(2.0);
    let text_colour = theme::label_colour(dark_mode);
    let font = FontId::proportional(11.0);

    for (i, (label, value)) in values.iter().enumerate() {
        let centre_x = plot.left() + slot * (i as f32 + 0.5);
        let height = if max > 0.0 {
            (*value / max) as f32 * plot.height()
        } else {
            0.0
        };
        let bar = Rect::from_min_max(
            Pos2::new(centre_x - bar_width / 2.0, plot.bottom() - height),
            Pos2::new(centre_x + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(bar, 2.0, colour);
        painter.text(
            Pos2::new(centre_x, bar.top() - 2.0),
            Align2::CENTER_BOTTOM,
            value_label(*value),
            font.clone(),
            text_colour,
        );
        painter.text(
            Pos2::new(centre_x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            text_colour,
        );
    }
}

/// Line chart over an ordered series. Every point gets a marker; only the
/// first, last and a handful of intermediate x labels are drawn to avoid
/// overlap.
fn line_chart(ui: &mut egui::Ui, values: &[(String, f64)], colour: Color32, dark_mode: bool) {
    if values.is_empty() {
        empty_chart(ui);
        return;
    }

    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, theme::CHART_HEIGHT), Sense::hover());
    let plot = plot_area(response.rect);
    draw_axes(&painter, plot, dark_mode);

    let max = series_max(values);
    let text_colour = theme::label_colour(dark_mode);
    let font = FontId::proportional(11.0);
    let step = if values.len() > 1 {
        plot.width() / (values.len() - 1) as f32
    } else {
        0.0
    };
    let label_every = (values.len() / 6).max(1);

    let points: Vec<Pos2> = values
        .iter()
        .enumerate()
        .map(|(i, (_, value))| {
            let x = if values.len() > 1 {
                plot.left() + step * i as f32
            } else {
                plot.center().x
            };
            let y = if max > 0.0 {
                plot.bottom() - (*value / max) as f32 * plot.height()
            } else {
                plot.bottom()
            };
            Pos2::new(x, y)
        })
        .collect();

    painter.add(egui::Shape::line(points.clone(), Stroke::new(2.0, colour)));

    for (i, (point, (label, value))) in points.iter().zip(values).enumerate() {
        painter.circle_filled(*point, 3.0, colour);
        if i % label_every == 0 || i == values.len() - 1 {
            painter.text(
                Pos2::new(point.x, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                label,
                font.clone(),
                text_colour,
            );
        }
        if let Some(hover) = response.hover_pos() {
            if (hover.x - point.x).abs() < 6.0 {
                painter.text(
                    Pos2::new(point.x, point.y - 6.0),
                    Align2::CENTER_BOTTOM,
                    format!("{label}: {value:.2} km"),
                    font.clone(),
                    text_colour,
                );
            }
        }
    }

    // Y-axis maximum label.
    painter.text(
        Pos2::new(plot.left() - 4.0, plot.top()),
        Align2::RIGHT_CENTER,
        format!("{max:.0}"),
        font,
        text_colour,
    );
}
