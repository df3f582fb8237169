// FleetLens - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and the file-open flow.

use crate::app::state::AppState;
use crate::ui;
use crate::util::constants::{CSV_EXTENSIONS, WORKBOOK_EXTENSIONS};
use std::path::PathBuf;

/// The FleetLens application.
pub struct FleetLensApp {
    pub state: AppState,
}

impl FleetLensApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Replace the session with the contents of `path`. A failure is kept in
    /// `state.load_error` and rendered in place of the dashboard.
    fn open(&mut self, path: PathBuf) {
        tracing::info!(path = %path.display(), "Opening file");
        if self.state.load_file(&path).is_err() {
            tracing::debug!("Dashboard replaced by load error");
        }
    }
}

/// Apply the configured body font size to the egui context.
pub fn apply_font_size(ctx: &egui::Context, size: f32) {
    ctx.style_mut(|style| {
        if let Some(font) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            font.size = size;
        }
    });
}

impl eframe::App for FleetLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // A file dropped onto the window is loaded like File > Open.
        let dropped: Option<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open(path);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open\u{2026}").clicked() {
                        let extensions: Vec<&str> = WORKBOOK_EXTENSIONS
                            .iter()
                            .chain(CSV_EXTENSIONS)
                            .copied()
                            .collect();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Spreadsheets", &extensions)
                            .pick_file()
                        {
                            self.open(path);
                        }
                        ui.close_menu();
                    }
                    let loaded = self.state.source_path.clone();
                    ui.add_enabled_ui(loaded.is_some(), |ui| {
                        if ui.button("Reload").clicked() {
                            if let Some(path) = loaded {
                                self.open(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let label = if self.state.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").strong().color(ui::theme::ERROR_TEXT));
                        ui.separator();
                    }
                    let total = self.state.total_records();
                    if total > 0 {
                        let filtered = self.state.filtered_indices.len();
                        ui.label(format!("{filtered}/{total} records"));
                    }
                });
            });
        });

        // Left sidebar
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_filters")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::filters::render(ui, &mut self.state);
                    });
            });

        // Central panel: error, placeholder, or the dashboard.
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.state.load_error {
                ui.colored_label(ui::theme::ERROR_TEXT, format!("\u{274c} {message}"));
                return;
            }
            let Some(summary) = self.state.summary.as_ref() else {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        "No data loaded.\nOpen a spreadsheet via File \u{2192} Open, or drop one here.",
                    );
                });
                return;
            };
            let dark_mode = self.state.dark_mode;
            egui::ScrollArea::vertical()
                .id_salt("dashboard")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui::panels::kpis::render(ui, summary);
                    ui.add_space(12.0);
                    ui.separator();
                    ui::panels::charts::render(ui, summary, dark_mode);
                    ui.add_space(12.0);
                    ui.separator();
                    ui::panels::incidents::render(ui, summary);
                });
        });

        ui::panels::about::render(ctx, &mut self.state);
    }
}
