// Thermograph - ui/panels/chart.rs
//
// Line chart of the filtered view: x = reading time, y = temperature.
// One line per selected series, broken into segments wherever a value is
// missing so gaps are never bridged.

use crate::app::state::AppState;
use crate::core::model::FilteredView;
use crate::ui::{theme, time};
use crate::util::constants::{CHART_TITLE, CHART_X_LABEL, CHART_Y_LABEL, DISPLAY_DATE_FORMAT};
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Contiguous runs of present values for one series, as `[x, y]` points.
///
/// Rows are ordered by time first; the clean table keeps arrival order.
pub fn segments(view: &FilteredView, series: usize) -> Vec<Vec<[f64; 2]>> {
    let mut rows: Vec<(f64, Option<f64>)> = view
        .rows
        .iter()
        .map(|r| {
            (
                time::to_secs(r.datetime) as f64,
                r.values.get(series).copied().flatten(),
            )
        })
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (x, y) in rows {
        match y {
            Some(y) => current.push([x, y]),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Prompt shown in place of the chart, or `None` when there is something to draw.
pub fn empty_prompt(state: &AppState) -> Option<&'static str> {
    if state.loaded_table().is_none() {
        Some("No data loaded. Enter a sheet link and press Load.")
    } else if state.view.sensors.is_empty() {
        Some("Select at least one series to draw the chart.")
    } else if state.view.is_empty() {
        Some("No rows in the selected date range.")
    } else {
        None
    }
}

/// Render the chart, or the appropriate empty-state prompt.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    if let Some(text) = empty_prompt(state) {
        empty_message(ui, text);
        return;
    }

    ui.vertical_centered(|ui| {
        ui.strong(CHART_TITLE);
    });
    let view = &state.view;
    Plot::new("temperature_chart")
        .height(theme::CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(CHART_X_LABEL)
        .y_axis_label(CHART_Y_LABEL)
        .x_axis_formatter(|mark, _range| time::format_secs(mark.value, "%d/%m %H:%M"))
        .label_formatter(|name, value| {
            let when = time::format_secs(value.x, DISPLAY_DATE_FORMAT);
            if name.is_empty() {
                when
            } else {
                format!("{name}\n{when}\n{:.2} \u{b0}C", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, name) in view.sensors.iter().enumerate() {
                let (color, style) = theme::series_look(name, i);
                for points in segments(view, i) {
                    // Segments share a name so the legend shows one entry.
                    let line = Line::new(PlotPoints::from(points))
                        .name(name)
                        .color(color)
                        .style(style)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });
}

fn empty_message(ui: &mut egui::Ui, text: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(text).weak());
    });
    ui.add_space(24.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CleanTable, LoadOutcome, NormalizeReport, Reading};
    use crate::platform::config::AppConfig;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn view(values: &[Option<f64>]) -> FilteredView {
        FilteredView {
            sensors: vec!["t".into()],
            rows: values
                .iter()
                .enumerate()
                .map(|(h, v)| Reading {
                    datetime: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .and_hms_opt(h as u32, 0, 0)
                        .unwrap(),
                    values: vec![*v],
                })
                .collect(),
        }
    }

    fn loaded(rows: Vec<Reading>) -> AppState {
        let mut state = AppState::new(&AppConfig::default(), false);
        state.set_outcome(LoadOutcome {
            link: "r.csv".into(),
            export_location: "r.csv".into(),
            table: CleanTable {
                sensors: vec!["temp salon".into()],
                rows,
            },
            report: NormalizeReport {
                timestamp_column: "horodateur".into(),
                raw_rows: 1,
                ..Default::default()
            },
            duration: Duration::ZERO,
        });
        state
    }

    #[test]
    fn test_all_rows_dropped_prompts_for_data() {
        let state = loaded(Vec::new());
        assert_eq!(
            empty_prompt(&state),
            Some("No data loaded. Enter a sheet link and press Load.")
        );
    }

    #[test]
    fn test_prompts_follow_selection() {
        let mut state = loaded(view(&[Some(1.0)]).rows);
        assert_eq!(empty_prompt(&state), None);

        state.filter.series.clear();
        state.refilter();
        assert_eq!(
            empty_prompt(&state),
            Some("Select at least one series to draw the chart.")
        );
    }

    fn rendered_text(state: &AppState) -> Vec<String> {
        fn collect(shape: &egui::Shape, out: &mut Vec<String>) {
            match shape {
                egui::Shape::Text(t) => out.push(t.galley.text().to_string()),
                egui::Shape::Vec(v) => v.iter().for_each(|s| collect(s, out)),
                _ => {}
            }
        }
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| render(ui, state));
        });
        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect(&clipped.shape, &mut texts);
        }
        texts
    }

    #[test]
    fn test_chart_has_title() {
        let state = loaded(view(&[Some(1.0), Some(2.0)]).rows);
        assert!(rendered_text(&state).iter().any(|t| t == CHART_TITLE));
    }

    #[test]
    fn test_no_title_without_data() {
        let state = loaded(Vec::new());
        assert!(!rendered_text(&state).iter().any(|t| t == CHART_TITLE));
    }

    #[test]
    fn test_gap_splits_line() {
        let v = view(&[Some(1.0), Some(2.0), None, Some(4.0)]);
        let segs = segments(&v, 0);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].len(), 2);
        assert_eq!(segs[1].len(), 1);
    }

    #[test]
    fn test_all_missing_yields_nothing() {
        let v = view(&[None, None]);
        assert!(segments(&v, 0).is_empty());
    }

    #[test]
    fn test_points_sorted_by_time() {
        let mut v = view(&[Some(1.0), Some(2.0)]);
        v.rows.reverse();
        let segs = segments(&v, 0);
        assert!(segs[0][0][0] < segs[0][1][0]);
    }
}
