// Thermograph - app/state.rs
//
// Application state management. Holds the current clean table, the user's
// filter selection, and the derived view and statistics.
// Owned by the eframe::App implementation.

use crate::core::filter::{self, FilterState};
use crate::core::model::{CleanTable, FilteredView, LoadOutcome, NormalizeReport, SeriesStats};
use crate::core::stats;
use crate::platform::config::AppConfig;
use crate::util::constants;
use std::path::PathBuf;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Contents of the link field.
    pub link: String,

    /// Whether a load is currently in progress.
    pub load_in_progress: bool,

    /// Set by a panel to request a (re)load of `link`; consumed by the app.
    pub pending_load: bool,

    /// The most recently loaded table. Replaced wholesale on reload.
    pub table: Option<CleanTable>,

    /// Diagnostics for `table`.
    pub report: Option<NormalizeReport>,

    /// URL or path the current table was read from.
    pub export_location: Option<String>,

    /// Current series and date selection.
    pub filter: FilterState,

    /// Projection of `table` through `filter`.
    pub view: FilteredView,

    /// Min / mean / max per selected series over `view`.
    pub stats: Vec<SeriesStats>,

    /// Column names reported when the timestamp column could not be found.
    pub detected_columns: Option<Vec<String>>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal notes about the current table (dropped rows, renamed columns).
    pub warnings: Vec<String>,

    /// Problems found in config.toml at startup.
    pub config_warnings: Vec<String>,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Body font size in points.
    pub font_size: f32,

    /// Maximum rows rendered in the preview.
    pub preview_rows: usize,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Directory config.toml was read from, shown in About.
    pub config_dir: Option<PathBuf>,
}

impl AppState {
    /// Create initial state from validated configuration.
    pub fn new(config: &AppConfig, debug_mode: bool) -> Self {
        Self {
            link: config.link.clone(),
            load_in_progress: false,
            pending_load: false,
            table: None,
            report: None,
            export_location: None,
            filter: FilterState::default(),
            view: FilteredView::default(),
            stats: Vec::new(),
            detected_columns: None,
            status_message: "Ready. Enter a sheet link and press Load.".to_string(),
            warnings: Vec::new(),
            config_warnings: Vec::new(),
            dark_mode: config.dark_mode,
            font_size: config.font_size,
            preview_rows: config.preview_rows,
            show_about: false,
            debug_mode,
            config_dir: None,
        }
    }

    /// Install a freshly loaded table and reset the selection to everything.
    pub fn set_outcome(&mut self, outcome: LoadOutcome) {
        self.load_in_progress = false;
        self.detected_columns = None;
        self.warnings.clear();
        self.filter = FilterState::select_all(&outcome.table);

        let report = &outcome.report;
        self.status_message = format!(
            "Loaded {} rows, {} series in {:.2}s",
            outcome.table.len(),
            outcome.table.sensors.len(),
            outcome.duration.as_secs_f64()
        );
        if outcome.table.is_empty() {
            self.status_message = format!(
                "No readings: none of the {} rows had a parseable '{}' value",
                report.raw_rows, report.timestamp_column
            );
        }
        if report.dropped_rows > 0 {
            self.push_warning(format!(
                "{} of {} rows dropped: unparseable '{}' value",
                report.dropped_rows, report.raw_rows, report.timestamp_column
            ));
        }
        if report.missing_values > 0 {
            self.push_warning(format!(
                "{} non-numeric cells treated as missing",
                report.missing_values
            ));
        }
        for name in &report.renamed_duplicates {
            self.push_warning(format!("Duplicate column renamed to '{name}'"));
        }

        self.export_location = Some(outcome.export_location);
        self.report = Some(outcome.report);
        self.table = Some(outcome.table);
        self.refilter();
    }

    /// The current table, if it holds at least one reading. A table whose
    /// rows were all dropped is treated the same as no table.
    pub fn loaded_table(&self) -> Option<&CleanTable> {
        self.table.as_ref().filter(|t| !t.is_empty())
    }

    /// Recompute the filtered view and statistics from the current selection.
    pub fn refilter(&mut self) {
        match &self.table {
            Some(table) => {
                self.view = filter::apply_filter(table, &self.filter);
                self.stats = stats::summarize(&self.view);
            }
            None => {
                self.view = FilteredView::default();
                self.stats.clear();
            }
        }
    }

    /// The load failed before a table could be built. Any previous table is
    /// discarded so stale data is never shown under a new link.
    pub fn set_failed(&mut self, message: String, detected_columns: Option<Vec<String>>) {
        self.clear();
        self.detected_columns = detected_columns;
        self.status_message = message;
    }

    /// Clear all loaded data and reset to initial state.
    pub fn clear(&mut self) {
        self.load_in_progress = false;
        self.table = None;
        self.report = None;
        self.export_location = None;
        self.detected_columns = None;
        self.filter = FilterState::default();
        self.view = FilteredView::default();
        self.stats.clear();
        self.warnings.clear();
        self.status_message = "Ready.".to_string();
    }

    /// Record a non-fatal warning, capped at `MAX_WARNINGS`.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            tracing::debug!(%message, "Warning recorded");
            self.warnings.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Reading;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn outcome() -> LoadOutcome {
        let t = |h| {
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        LoadOutcome {
            link: "readings.csv".into(),
            export_location: "readings.csv".into(),
            table: CleanTable {
                sensors: vec!["a".into(), "b".into()],
                rows: vec![
                    Reading {
                        datetime: t(1),
                        values: vec![Some(10.0), None],
                    },
                    Reading {
                        datetime: t(2),
                        values: vec![Some(20.0), Some(5.0)],
                    },
                ],
            },
            report: NormalizeReport {
                timestamp_column: "horodateur".into(),
                raw_rows: 3,
                dropped_rows: 1,
                ..Default::default()
            },
            duration: Duration::from_millis(5),
        }
    }

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), false)
    }

    #[test]
    fn test_outcome_selects_everything() {
        let mut s = state();
        s.set_outcome(outcome());
        assert_eq!(s.view.sensors, vec!["a", "b"]);
        assert_eq!(s.view.len(), 2);
        assert_eq!(s.stats.len(), 2);
        assert_eq!(s.stats[0].mean, Some(15.0));
        assert_eq!(s.warnings.len(), 1, "dropped-row warning");
    }

    #[test]
    fn test_refilter_after_deselect() {
        let mut s = state();
        s.set_outcome(outcome());
        s.filter.toggle_series("a");
        s.refilter();
        assert_eq!(s.view.sensors, vec!["b"]);
        assert_eq!(s.stats[0].count, 1);
    }

    #[test]
    fn test_failure_discards_previous_table() {
        let mut s = state();
        s.set_outcome(outcome());
        s.set_failed("boom".into(), Some(vec!["x".into()]));
        assert!(s.table.is_none());
        assert!(s.view.is_empty());
        assert_eq!(s.detected_columns.as_deref(), Some(&["x".to_string()][..]));
        assert_eq!(s.status_message, "boom");
    }

    #[test]
    fn test_all_rows_dropped_counts_as_no_data() {
        let mut s = state();
        let mut o = outcome();
        o.table.rows.clear();
        o.report.dropped_rows = 3;
        s.set_outcome(o);
        assert!(s.table.is_some());
        assert!(s.loaded_table().is_none());
        assert!(s.status_message.starts_with("No readings"), "{}", s.status_message);
        assert_eq!(s.warnings.len(), 1);
    }

    #[test]
    fn test_loaded_table_present_after_load() {
        let mut s = state();
        assert!(s.loaded_table().is_none());
        s.set_outcome(outcome());
        assert_eq!(s.loaded_table().map(CleanTable::len), Some(2));
    }

    #[test]
    fn test_reload_does_not_accumulate_warnings() {
        let mut s = state();
        s.set_outcome(outcome());
        s.set_outcome(outcome());
        assert_eq!(s.warnings.len(), 1);
    }
}
