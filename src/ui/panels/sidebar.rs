// Thermograph - ui/panels/sidebar.rs
//
// Left configuration panel: sheet link, reload, load status, and the
// diagnostics produced by the last load.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the sidebar contents.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Data Source");
    ui.add_space(4.0);

    ui.label("Google Sheet link");
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.link)
            .desired_width(f32::INFINITY)
            .hint_text("https://docs.google.com/spreadsheets/d/.../edit"),
    );
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        state.pending_load = true;
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let label = if state.table.is_some() {
            "\u{21bb} Reload"
        } else {
            "Load"
        };
        let enabled = !state.link.trim().is_empty();
        if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
            state.pending_load = true;
        }
        if state.load_in_progress {
            ui.spinner();
        }
    });

    ui.add_space(8.0);
    ui.separator();

    // Load status
    match (&state.table, &state.report) {
        (Some(table), Some(report)) => {
            egui::Grid::new("load_status")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Rows");
                    ui.label(table.len().to_string());
                    ui.end_row();
                    ui.label("Series");
                    ui.label(table.sensors.len().to_string());
                    ui.end_row();
                    ui.label("Timestamp column");
                    ui.monospace(&report.timestamp_column);
                    ui.end_row();
                    ui.label("Dropped rows");
                    ui.label(report.dropped_rows.to_string());
                    ui.end_row();
                    ui.label("Missing values");
                    ui.label(report.missing_values.to_string());
                    ui.end_row();
                });
            if let Some(location) = &state.export_location {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(location).small().weak())
                    .on_hover_text("Export location read by the last load");
            }
        }
        _ if state.load_in_progress => {
            ui.label("Loading\u{2026}");
        }
        _ => {
            ui.label(egui::RichText::new("No data loaded.").weak());
        }
    }

    // Detected-columns diagnostic after a missing timestamp column.
    if let Some(columns) = &state.detected_columns {
        ui.add_space(8.0);
        ui.colored_label(
            theme::WARNING_TEXT,
            "No 'date' or 'time' column found. Detected columns:",
        );
        for column in columns {
            ui.monospace(format!("\u{2022} {column}"));
        }
    }

    if !state.warnings.is_empty() || !state.config_warnings.is_empty() {
        ui.add_space(8.0);
        egui::CollapsingHeader::new(format!(
            "Warnings ({})",
            state.warnings.len() + state.config_warnings.len()
        ))
        .default_open(false)
        .show(ui, |ui| {
            for w in state.config_warnings.iter().chain(state.warnings.iter()) {
                ui.colored_label(theme::WARNING_TEXT, w);
            }
        });
    }
}
