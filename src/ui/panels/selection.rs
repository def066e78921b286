// Thermograph - ui/panels/selection.rs
//
// Series multi-selection and the inclusive date-range sliders.
// Any change recomputes the filtered view and statistics immediately.

use crate::app::state::AppState;
use crate::ui::time;
use crate::util::constants::SLIDER_DATE_FORMAT;
use std::ops::RangeInclusive;

/// Render series checkboxes and date sliders.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(table) = state.loaded_table() else {
        return;
    };
    let sensors = table.sensors.clone();
    let bounds = table.time_bounds();
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.strong("Series");
        if ui.small_button("All").clicked() {
            state.filter.series = sensors.iter().cloned().collect();
            changed = true;
        }
        if ui.small_button("None").clicked() {
            state.filter.series.clear();
            changed = true;
        }
    });
    ui.horizontal_wrapped(|ui| {
        for name in &sensors {
            let mut checked = state.filter.series.contains(name);
            if ui.checkbox(&mut checked, name.as_str()).changed() {
                state.filter.toggle_series(name);
                changed = true;
            }
        }
    });

    ui.add_space(6.0);

    if let Some((lo, hi)) = bounds {
        let lo_s = time::to_secs(lo);
        let hi_s = time::to_secs(hi);
        let mut start = state.filter.time_start.map_or(lo_s, time::to_secs);
        let mut end = state.filter.time_end.map_or(hi_s, time::to_secs);

        ui.strong("Date range");
        let fmt = |v: f64, _: RangeInclusive<usize>| time::format_secs(v, SLIDER_DATE_FORMAT);
        let start_changed = ui
            .add(
                egui::Slider::new(&mut start, lo_s..=hi_s)
                    .text("from")
                    .custom_formatter(fmt),
            )
            .changed();
        let end_changed = ui
            .add(
                egui::Slider::new(&mut end, lo_s..=hi_s)
                    .text("to")
                    .custom_formatter(fmt),
            )
            .changed();

        if start_changed || end_changed {
            // Keep the window well-formed: the handle being dragged pushes the other.
            if start > end {
                if start_changed {
                    end = start;
                } else {
                    start = end;
                }
            }
            state.filter.time_start = time::from_secs(start);
            state.filter.time_end = time::from_secs(end);
            changed = true;
        }

        if ui.small_button("Full range").clicked() {
            state.filter.time_start = Some(lo);
            state.filter.time_end = Some(hi);
            changed = true;
        }
    }

    if changed {
        state.refilter();
    }
}
