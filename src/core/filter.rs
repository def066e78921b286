// Thermograph - core/filter.rs
//
// Date-window and series selection over a clean table.
// Produces a fresh FilteredView on every call; the clean table is never
// mutated. Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{CleanTable, FilteredView, Reading};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// User selection: which series, and which inclusive time window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Selected sensor names. Unknown names are ignored.
    pub series: HashSet<String>,

    /// Start of the window (inclusive). None = no lower bound.
    pub time_start: Option<NaiveDateTime>,

    /// End of the window (inclusive). None = no upper bound.
    pub time_end: Option<NaiveDateTime>,
}

impl FilterState {
    /// Default selection for a freshly loaded table: every sensor, full range.
    pub fn select_all(table: &CleanTable) -> Self {
        let (time_start, time_end) = match table.time_bounds() {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };
        Self {
            series: table.sensors.iter().cloned().collect(),
            time_start,
            time_end,
        }
    }

    /// Whether `t` falls inside the inclusive window.
    pub fn contains_time(&self, t: NaiveDateTime) -> bool {
        self.time_start.map_or(true, |start| t >= start)
            && self.time_end.map_or(true, |end| t <= end)
    }

    /// Toggle one series in or out of the selection.
    pub fn toggle_series(&mut self, name: &str) {
        if !self.series.remove(name) {
            self.series.insert(name.to_string());
        }
    }
}

/// Project `table` onto the selected series and time window.
pub fn apply_filter(table: &CleanTable, filter: &FilterState) -> FilteredView {
    let columns: Vec<usize> = table
        .sensors
        .iter()
        .enumerate()
        .filter(|(_, s)| filter.series.contains(*s))
        .map(|(i, _)| i)
        .collect();

    let rows = table
        .rows
        .iter()
        .filter(|r| filter.contains_time(r.datetime))
        .map(|r| Reading {
            datetime: r.datetime,
            values: columns
                .iter()
                .map(|&c| r.values.get(c).copied().flatten())
                .collect(),
        })
        .collect();

    FilteredView {
        sensors: columns.iter().map(|&c| table.sensors[c].clone()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> CleanTable {
        CleanTable {
            sensors: vec!["a".to_string(), "b".to_string()],
            rows: vec![
                Reading {
                    datetime: day(2),
                    values: vec![Some(20.0), Some(2.0)],
                },
                Reading {
                    datetime: day(1),
                    values: vec![Some(10.0), None],
                },
                Reading {
                    datetime: day(3),
                    values: vec![Some(30.0), Some(3.0)],
                },
            ],
        }
    }

    #[test]
    fn test_full_range_round_trip() {
        let table = sample();
        let view = apply_filter(&table, &FilterState::select_all(&table));
        assert_eq!(view.sensors, table.sensors);
        assert_eq!(view.rows, table.rows);
    }

    #[test]
    fn test_inclusive_bounds() {
        let table = sample();
        let filter = FilterState {
            time_start: Some(day(1)),
            time_end: Some(day(2)),
            ..FilterState::select_all(&table)
        };
        let view = apply_filter(&table, &filter);
        let times: Vec<_> = view.rows.iter().map(|r| r.datetime).collect();
        assert_eq!(times, vec![day(2), day(1)]);
    }

    #[test]
    fn test_series_subset_keeps_table_order() {
        let table = sample();
        let mut filter = FilterState::select_all(&table);
        filter.toggle_series("a");
        let view = apply_filter(&table, &filter);
        assert_eq!(view.sensors, vec!["b"]);
        assert_eq!(view.rows[1].values, vec![None]);

        filter.toggle_series("a");
        assert_eq!(apply_filter(&table, &filter).sensors, vec!["a", "b"]);
    }

    #[test]
    fn test_no_series_selected_keeps_rows() {
        let table = sample();
        let filter = FilterState {
            series: HashSet::new(),
            ..FilterState::select_all(&table)
        };
        let view = apply_filter(&table, &filter);
        assert!(view.sensors.is_empty());
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_select_all_on_empty_table() {
        let filter = FilterState::select_all(&CleanTable::default());
        assert!(filter.series.is_empty());
        assert_eq!(filter.time_start, None);
        assert_eq!(filter.time_end, None);
    }

    #[test]
    fn test_clean_table_untouched() {
        let table = sample();
        let before = table.clone();
        let filter = FilterState {
            time_start: Some(day(3)),
            ..FilterState::select_all(&table)
        };
        let _ = apply_filter(&table, &filter);
        assert_eq!(table, before);
    }
}
