// Thermograph - ui/panels/preview.rs
//
// Data preview: the whole clean table, every sensor, newest reading first.
// Independent of the series and date selection.
//
// Uses `ScrollArea::show_rows` so only visible rows are laid out; the row
// count is additionally capped by the configured preview limit.

use crate::app::state::AppState;
use crate::core::model::CleanTable;
use crate::ui::theme;
use crate::util::constants::DISPLAY_DATE_FORMAT;

/// Row indices of `table`, newest first, capped at `limit`.
fn preview_order(table: &CleanTable, limit: usize) -> Vec<usize> {
    let mut idx = table.indices_newest_first();
    idx.truncate(limit);
    idx
}

/// Render the preview table.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(table) = state.loaded_table() else {
        return;
    };

    let order = preview_order(table, state.preview_rows);

    ui.horizontal(|ui| {
        ui.strong("Data preview");
        ui.label(
            egui::RichText::new(format!("{} of {} rows", order.len(), table.len()))
                .small()
                .weak(),
        );
    });

    let header = std::iter::once("datetime".to_string())
        .chain(table.sensors.iter().cloned())
        .collect::<Vec<_>>()
        .join(" | ");
    ui.monospace(egui::RichText::new(header).strong());

    egui::ScrollArea::both()
        .id_salt("data_preview")
        .max_height(theme::PREVIEW_HEIGHT)
        .auto_shrink([false, true])
        .show_rows(ui, theme::ROW_HEIGHT, order.len(), |ui, range| {
            for &row_idx in &order[range] {
                let row = &table.rows[row_idx];
                let mut line = row.datetime.format(DISPLAY_DATE_FORMAT).to_string();
                for (value, name) in row.values.iter().zip(&table.sensors) {
                    let text = value.map_or_else(String::new, |v| format!("{v:.2}"));
                    line.push_str(&format!(" | {text:>w$}", w = name.len()));
                }
                ui.monospace(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LoadOutcome, NormalizeReport, Reading};
    use crate::platform::config::AppConfig;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn table() -> CleanTable {
        let at = |d| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        CleanTable {
            sensors: vec!["a".into(), "b".into()],
            rows: [2, 3, 1]
                .iter()
                .map(|&d| Reading {
                    datetime: at(d),
                    values: vec![Some(d as f64), None],
                })
                .collect(),
        }
    }

    #[test]
    fn test_preview_is_newest_first_and_capped() {
        let t = table();
        assert_eq!(preview_order(&t, 10), vec![1, 0, 2]);
        assert_eq!(preview_order(&t, 2), vec![1, 0]);
    }

    #[test]
    fn test_preview_ignores_selection() {
        let mut state = AppState::new(&AppConfig::default(), false);
        state.set_outcome(LoadOutcome {
            link: "r.csv".into(),
            export_location: "r.csv".into(),
            table: table(),
            report: NormalizeReport::default(),
            duration: Duration::ZERO,
        });
        state.filter.series.clear();
        state.refilter();
        assert!(state.view.sensors.is_empty());

        let shown = state.loaded_table().unwrap();
        assert_eq!(shown.sensors, vec!["a", "b"], "deselected series still shown");
        assert_eq!(preview_order(shown, 10).len(), 3);
    }
}
