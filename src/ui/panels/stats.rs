// Thermograph - ui/panels/stats.rs
//
// Summary statistics grid: one row per selected series.

use crate::app::state::AppState;

fn cell(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Render the min / mean / max table for the filtered view.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    if state.loaded_table().is_none() || state.stats.is_empty() {
        return;
    }

    ui.strong("Summary statistics");
    egui::Grid::new("summary_stats")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Series");
            ui.strong("Count");
            ui.strong("Min (\u{b0}C)");
            ui.strong("Mean (\u{b0}C)");
            ui.strong("Max (\u{b0}C)");
            ui.end_row();

            for s in &state.stats {
                ui.label(&s.sensor);
                ui.label(s.count.to_string());
                ui.monospace(cell(s.min));
                ui.monospace(cell(s.mean));
                ui.monospace(cell(s.max));
                ui.end_row();
            }
        });
}
