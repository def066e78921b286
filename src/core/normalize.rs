// Thermograph - core/normalize.rs
//
// Single-pass RawTable -> CleanTable transform:
//   1. trim + lowercase headers (duplicates suffixed .1, .2, ...)
//   2. detect the timestamp column (first column matching any candidate)
//   3. parse timestamps with the fixed day/month/year pattern
//   4. coerce every other column from decimal-comma text to f64
//   5. drop rows whose timestamp did not parse
//   6. prune `horodateur`, the timestamp source column and any raw
//      `datetime` column from the sensor list
//
// Timestamps are parsed from the source column before it is pruned, so a
// `horodateur` timestamp column still populates `datetime`.
// Core layer: pure logic, no I/O.

use crate::core::model::{CleanTable, NormalizeReport, RawTable, Reading};
use crate::util::constants::{DATETIME_COLUMN, HORODATEUR_COLUMN, TIMESTAMP_FORMAT};
use crate::util::error::NormalizeError;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// A named predicate over a normalised column name.
#[derive(Debug, Clone, Copy)]
pub struct TimestampCandidate {
    pub label: &'static str,
    pub matches: fn(&str) -> bool,
}

fn contains_date(name: &str) -> bool {
    name.contains("date")
}

fn contains_time(name: &str) -> bool {
    name.contains("time")
}

fn contains_heure(name: &str) -> bool {
    name.contains("heure")
}

fn contains_horodateur(name: &str) -> bool {
    name.contains(HORODATEUR_COLUMN)
}

/// Timestamp column candidates, in priority order.
pub const TIMESTAMP_CANDIDATES: &[TimestampCandidate] = &[
    TimestampCandidate {
        label: "date",
        matches: contains_date,
    },
    TimestampCandidate {
        label: "time",
        matches: contains_time,
    },
    TimestampCandidate {
        label: "heure",
        matches: contains_heure,
    },
    TimestampCandidate {
        label: "horodateur",
        matches: contains_horodateur,
    },
];

/// `trim(h).to_lowercase()`. Idempotent.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Normalise all headers, suffixing repeated names with `.1`, `.2`, ...
///
/// Returns the new names and the list of names that had to be renamed.
pub fn normalize_headers(headers: &[String]) -> (Vec<String>, Vec<String>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut renamed = Vec::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let base = normalize_header(header);
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        if name != base {
            renamed.push(name.clone());
        }
        seen.insert(name.clone());
        out.push(name);
    }
    (out, renamed)
}

/// Coerce a locale-formatted number (`"21,5"`) to `f64`.
///
/// Empty, non-numeric and NaN cells become `None`; this never fails.
pub fn coerce_number(cell: &str) -> Option<f64> {
    let text = cell.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

/// Parse a `dd/mm/yyyy HH:MM:SS` timestamp. Failures become `None`.
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(cell.trim(), TIMESTAMP_FORMAT).ok()
}

/// Index of the first column (in header order) matching any candidate.
pub fn detect_timestamp_column(columns: &[String]) -> Option<usize> {
    columns.iter().position(|name| {
        TIMESTAMP_CANDIDATES
            .iter()
            .any(|candidate| (candidate.matches)(name))
    })
}

/// Transform a raw export into a clean table.
///
/// Fails only when no timestamp column can be found; every per-cell problem
/// degrades to a missing value or a dropped row.
pub fn normalize(raw: &RawTable) -> Result<(CleanTable, NormalizeReport), NormalizeError> {
    let (columns, renamed_duplicates) = normalize_headers(&raw.headers);
    if !renamed_duplicates.is_empty() {
        tracing::warn!(
            renamed = ?renamed_duplicates,
            "Duplicate column names after normalisation"
        );
    }

    let ts_idx = detect_timestamp_column(&columns).ok_or_else(|| {
        tracing::warn!(columns = ?columns, "No timestamp column detected");
        NormalizeError::MissingTimestampColumn {
            columns: columns.clone(),
        }
    })?;

    let matched_by = TIMESTAMP_CANDIDATES
        .iter()
        .find(|c| (c.matches)(&columns[ts_idx]))
        .map_or("", |c| c.label);
    tracing::debug!(column = %columns[ts_idx], matched_by, "Timestamp column detected");

    let sensor_cols: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(i, name)| {
            *i != ts_idx && name.as_str() != HORODATEUR_COLUMN && name.as_str() != DATETIME_COLUMN
        })
        .map(|(i, _)| i)
        .collect();

    let mut report = NormalizeReport {
        timestamp_column: columns[ts_idx].clone(),
        raw_rows: raw.len(),
        renamed_duplicates,
        ..Default::default()
    };

    let mut rows = Vec::with_capacity(raw.len());
    for row in 0..raw.len() {
        let Some(datetime) = parse_timestamp(raw.cell(row, ts_idx)) else {
            report.dropped_rows += 1;
            continue;
        };

        let values = sensor_cols
            .iter()
            .map(|&col| {
                let cell = raw.cell(row, col);
                let value = coerce_number(cell);
                if value.is_none() && !cell.trim().is_empty() {
                    report.missing_values += 1;
                }
                value
            })
            .collect();

        rows.push(Reading { datetime, values });
    }

    let table = CleanTable {
        sensors: sensor_cols.iter().map(|&i| columns[i].clone()).collect(),
        rows,
    };

    tracing::info!(
        timestamp_column = %report.timestamp_column,
        sensors = table.sensors.len(),
        rows = table.len(),
        dropped = report.dropped_rows,
        missing_values = report.missing_values,
        "Table normalised"
    );

    Ok((table, report))
}
