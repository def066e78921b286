// Thermograph - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the load lifecycle.

use crate::app::load::LoadManager;
use crate::app::state::AppState;
use crate::core::export;
use crate::core::model::{FilteredView, LoadProgress};
use crate::platform::fetch::FetchOptions;
use crate::ui;
use crate::util::constants;
use crate::util::error::ExportError;
use std::path::Path;

/// Output format chosen from the File menu.
#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Write `view` to `dest` in `format`. Returns the number of rows written.
fn export_view(view: &FilteredView, format: ExportFormat, dest: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => export::export_csv(view, writer, dest),
        ExportFormat::Json => export::export_json(view, writer, dest),
    }
}

/// The Thermograph application.
pub struct ThermographApp {
    pub state: AppState,
    pub load_manager: LoadManager,
    fetch_options: FetchOptions,
    /// Visuals and font size last pushed to the egui context.
    applied_look: Option<(bool, f32)>,
}

impl ThermographApp {
    /// Create a new application instance. A load of `state.link` starts on
    /// the first frame when `state.pending_load` is set.
    pub fn new(state: AppState, fetch_options: FetchOptions) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
            fetch_options,
            applied_look: None,
        }
    }

    fn start_load(&mut self) {
        let link = self.state.link.trim().to_string();
        if link.is_empty() {
            self.state.status_message = "Enter a sheet link first.".to_string();
            return;
        }
        self.state.load_in_progress = true;
        self.state.status_message = "Loading\u{2026}".to_string();
        self.load_manager
            .start_load(link, self.fetch_options.clone());
    }

    fn export(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("temperatures.{}", format.extension()))
            .save_file()
        else {
            return;
        };
        match export_view(&self.state.view, format, &dest) {
            Ok(n) => {
                tracing::info!(rows = n, path = %dest.display(), "Export written");
                self.state.status_message =
                    format!("Exported {n} rows to {}.", format.label());
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.state.status_message = format!("{} export failed: {e}", format.label());
            }
        }
    }

    fn apply_look(&mut self, ctx: &egui::Context) {
        let look = (self.state.dark_mode, self.state.font_size);
        if self.applied_look == Some(look) {
            return;
        }
        ctx.set_visuals(if look.0 {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        ctx.style_mut(|style| {
            for (text_style, font) in style.text_styles.iter_mut() {
                let base = match text_style {
                    egui::TextStyle::Heading => look.1 * 1.4,
                    egui::TextStyle::Small => look.1 * 0.75,
                    _ => look.1,
                };
                font.size = base;
            }
        });
        self.applied_look = Some(look);
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let messages = self.load_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                LoadProgress::Fetching { location } => {
                    self.state.status_message = format!("Fetching {location}\u{2026}");
                }
                LoadProgress::Parsed { raw_rows, columns } => {
                    self.state.status_message =
                        format!("Parsed {raw_rows} rows x {columns} columns; normalising\u{2026}");
                }
                LoadProgress::Completed(outcome) => {
                    self.state.set_outcome(*outcome);
                }
                LoadProgress::SourceFailed { error } => {
                    self.state
                        .set_failed(format!("Could not load data: {error}"), None);
                }
                LoadProgress::MissingTimestampColumn { columns } => {
                    self.state.set_failed(
                        "No 'date' or 'time' column found.".to_string(),
                        Some(columns),
                    );
                }
            }
        }
        // Repaint while a load is active so progress appears promptly.
        if had_messages || self.load_manager.is_active() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl eframe::App for ThermographApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_look(ctx);
        self.poll_load(ctx);

        // pending_load: a panel (or startup) requested a load of the link field.
        if std::mem::take(&mut self.state.pending_load) {
            self.start_load();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("\u{21bb} Reload").clicked() {
                        self.state.pending_load = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_rows = !self.state.view.is_empty();
                    ui.add_enabled_ui(has_rows, |ui| {
                        if ui.button("Export CSV\u{2026}").clicked() {
                            ui.close_menu();
                            self.export(ExportFormat::Csv);
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            ui.close_menu();
                            self.export(ExportFormat::Json);
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let label = if self.state.dark_mode {
                        "\u{2600} Light theme"
                    } else {
                        "\u{1f319} Dark theme"
                    };
                    if ui.button(label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                });
                if ui.button("About").clicked() {
                    self.state.show_about = true;
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::default().fill(ui::theme::STATUS_BG).inner_margin(4.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(ui::theme::STATUS_TEXT, &self.state.status_message);
                    if self.load_manager.is_active() && ui.small_button("Cancel").clicked() {
                        self.load_manager.cancel_load();
                        self.state.load_in_progress = false;
                        self.state.status_message = "Load cancelled.".to_string();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(table) = &self.state.table {
                            ui.colored_label(
                                ui::theme::STATUS_TEXT,
                                format!("{}/{} rows", self.state.view.len(), table.len()),
                            );
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
                    .id_salt("sidebar_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::sidebar::render(ui, &mut self.state);
                    });
            });

        // Central panel
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("central_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.heading(constants::WINDOW_TITLE);
                    ui.add_space(6.0);
                    ui::panels::preview::render(ui, &self.state);
                    ui.separator();
                    ui::panels::selection::render(ui, &mut self.state);
                    ui.separator();
                    ui::panels::chart::render(ui, &self.state);
                    ui.separator();
                    ui::panels::stats::render(ui, &self.state);
                });
        });

        ui::panels::about::render(ctx, &mut self.state);
    }
}
