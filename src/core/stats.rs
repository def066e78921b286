// Thermograph - core/stats.rs
//
// Summary statistics (min, mean, max) per selected series over a
// filtered view. Missing values are skipped, matching how the chart
// leaves gaps rather than plotting zeros.

use crate::core::model::{FilteredView, SeriesStats};

/// Compute min/mean/max for one series of values.
pub fn series_stats(sensor: &str, values: impl Iterator<Item = Option<f64>>) -> SeriesStats {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in values.flatten() {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if count == 0 {
        return SeriesStats {
            sensor: sensor.to_string(),
            count,
            min: None,
            mean: None,
            max: None,
        };
    }

    SeriesStats {
        sensor: sensor.to_string(),
        count,
        min: Some(min),
        mean: Some(sum / count as f64),
        max: Some(max),
    }
}

/// Statistics for every series of the view, in view column order.
pub fn summarize(view: &FilteredView) -> Vec<SeriesStats> {
    view.sensors
        .iter()
        .enumerate()
        .map(|(i, name)| series_stats(name, view.column(i)))
        .collect()
}

/// Render the statistics as a plain-text table (used by `--summary`).
pub fn render_text_table(stats: &[SeriesStats]) -> String {
    let width = stats
        .iter()
        .map(|s| s.sensor.chars().count())
        .max()
        .unwrap_or(0)
        .max("series".len());

    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{x:.2}"));

    let mut out = format!(
        "{:<width$}  {:>7}  {:>9}  {:>9}  {:>9}\n",
        "series", "count", "min", "mean", "max"
    );
    for s in stats {
        out.push_str(&format!(
            "{:<width$}  {:>7}  {:>9}  {:>9}  {:>9}\n",
            s.sensor,
            s.count,
            fmt(s.min),
            fmt(s.mean),
            fmt(s.max)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{apply_filter, FilterState};
    use crate::core::model::{CleanTable, Reading};
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_window_min_mean_max() {
        let table = CleanTable {
            sensors: vec!["t".to_string()],
            rows: [10.0, 20.0, 30.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| Reading {
                    datetime: day(i as u32 + 1),
                    values: vec![Some(v)],
                })
                .collect(),
        };
        let filter = FilterState {
            time_start: Some(day(1)),
            time_end: Some(day(2)),
            ..FilterState::select_all(&table)
        };
        let stats = summarize(&apply_filter(&table, &filter));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].min, Some(10.0));
        assert_eq!(stats[0].mean, Some(15.0));
        assert_eq!(stats[0].max, Some(20.0));
        assert_eq!(stats[0].count, 2);
    }

    #[test]
    fn test_missing_values_skipped() {
        let s = series_stats("x", [Some(1.0), None, Some(3.0)].into_iter());
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, Some(2.0));
    }

    #[test]
    fn test_all_missing_has_no_aggregates() {
        let s = series_stats("x", [None, None].into_iter());
        assert_eq!(s.count, 0);
        assert_eq!((s.min, s.mean, s.max), (None, None, None));
    }

    #[test]
    fn test_text_table_layout() {
        let stats = vec![
            series_stats("temp salon", [Some(19.5), Some(20.5)].into_iter()),
            series_stats("empty", std::iter::empty()),
        ];
        let text = render_text_table(&stats);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("series"));
        assert!(lines[1].contains("20.00"), "got: {}", lines[1]);
        assert!(lines[2].trim_end().ends_with('-'));
    }
}
