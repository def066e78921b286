// Thermograph - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use std::time::Duration;

// =============================================================================
// Raw table (loader output)
// =============================================================================

/// Unprocessed tabular data as fetched from the source.
///
/// Headers are kept exactly as written in the export (inconsistent case and
/// whitespace included). Rows may be shorter than the header; missing
/// trailing cells read as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Cell at (`row`, `col`), or "" when the row is ragged.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Clean table (normaliser output)
// =============================================================================

/// One observation with a guaranteed timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Parsed source timestamp (no timezone attached).
    pub datetime: NaiveDateTime,

    /// One value per sensor, aligned with `CleanTable::sensors`.
    /// `None` is a missing value (failed coercion or empty cell).
    pub values: Vec<Option<f64>>,
}

/// Normalised, timestamp-bearing table ready for display.
///
/// Rows stay in arrival order, which is not guaranteed chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTable {
    /// Sensor column names (normalised), excluding `datetime`.
    pub sensors: Vec<String>,

    pub rows: Vec<Reading>,
}

impl CleanTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest `datetime`, or `None` for an empty table.
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut iter = self.rows.iter().map(|r| r.datetime);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Row indices ordered newest first, for the preview table.
    pub fn indices_newest_first(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.rows.len()).collect();
        // Stable sort keeps arrival order among equal timestamps.
        idx.sort_by(|&a, &b| self.rows[b].datetime.cmp(&self.rows[a].datetime));
        idx
    }
}

/// Diagnostics produced alongside a clean table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Normalised name of the column the timestamps were parsed from.
    pub timestamp_column: String,

    /// Data rows in the raw table.
    pub raw_rows: usize,

    /// Rows dropped because their timestamp did not parse.
    pub dropped_rows: usize,

    /// Non-empty sensor cells that failed numeric coercion.
    pub missing_values: usize,

    /// Headers that had to be de-duplicated after normalisation.
    pub renamed_duplicates: Vec<String>,
}

// =============================================================================
// Filtered view and statistics
// =============================================================================

/// Immutable projection of a clean table onto a date window and a subset
/// of sensors. Sensors keep the clean table's column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub sensors: Vec<String>,

    /// Rows inside the window, in clean-table order, with `values`
    /// aligned to `self.sensors`.
    pub rows: Vec<Reading>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one selected sensor, row-aligned, missing included.
    pub fn column(&self, sensor: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows
            .iter()
            .map(move |r| r.values.get(sensor).copied().flatten())
    }
}

/// Min / mean / max of one sensor over a filtered view.
///
/// Missing values are skipped. A series with no value in the window has
/// `count == 0` and all three aggregates `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub sensor: String,
    pub count: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

// =============================================================================
// Load lifecycle
// =============================================================================

/// Outcome of a successful load, delivered to the UI thread.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The link as typed by the user.
    pub link: String,

    /// The URL or path actually read.
    pub export_location: String,

    pub table: CleanTable,
    pub report: NormalizeReport,

    /// Wall-clock time for fetch + parse + normalise.
    pub duration: Duration,
}

/// Progress messages sent from the load thread to the UI thread.
#[derive(Debug)]
pub enum LoadProgress {
    /// The fetch started for the resolved export location.
    Fetching { location: String },

    /// Raw export parsed; normalisation about to start.
    Parsed { raw_rows: usize, columns: usize },

    /// The clean table is ready.
    Completed(Box<LoadOutcome>),

    /// The export could not be fetched or parsed.
    SourceFailed { error: String },

    /// The export had no recognisable timestamp column.
    MissingTimestampColumn { columns: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn table(times: &[NaiveDateTime]) -> CleanTable {
        CleanTable {
            sensors: vec!["temp".to_string()],
            rows: times
                .iter()
                .map(|&t| Reading {
                    datetime: t,
                    values: vec![Some(1.0)],
                })
                .collect(),
        }
    }

    #[test]
    fn test_time_bounds_ignores_arrival_order() {
        let t = table(&[dt(2, 0), dt(1, 0), dt(3, 0)]);
        assert_eq!(t.time_bounds(), Some((dt(1, 0), dt(3, 0))));
    }

    #[test]
    fn test_time_bounds_empty() {
        assert_eq!(CleanTable::default().time_bounds(), None);
    }

    #[test]
    fn test_newest_first_order() {
        let t = table(&[dt(2, 0), dt(1, 0), dt(3, 0)]);
        assert_eq!(t.indices_newest_first(), vec![2, 0, 1]);
    }

    #[test]
    fn test_raw_cell_ragged_row_reads_empty() {
        let raw = RawTable {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()]],
        };
        assert_eq!(raw.cell(0, 0), "1");
        assert_eq!(raw.cell(0, 1), "");
        assert_eq!(raw.cell(5, 0), "");
    }
}
