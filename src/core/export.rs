// Thermograph - core/export.rs
//
// CSV and JSON export of the filtered view.
// Core layer: writes to any Write trait object.

use crate::core::model::FilteredView;
use crate::util::constants::{DATETIME_COLUMN, DISPLAY_DATE_FORMAT};
use crate::util::error::ExportError;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;

/// Export the view to CSV.
///
/// Writes: datetime, then one column per selected series. Missing values
/// are written as empty cells. Returns the number of data rows written.
pub fn export_csv<W: Write>(
    view: &FilteredView,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![DATETIME_COLUMN.to_string()];
    header.extend(view.sensors.iter().cloned());
    csv_writer.write_record(&header).map_err(csv_err)?;

    for row in &view.rows {
        let mut record = vec![row.datetime.format(DISPLAY_DATE_FORMAT).to_string()];
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        csv_writer.write_record(&record).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(view.len())
}

/// Export the view as a JSON array of objects keyed by column name.
pub fn export_json<W: Write>(
    view: &FilteredView,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let records: Vec<Value> = view
        .rows
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            obj.insert(
                DATETIME_COLUMN.to_string(),
                Value::String(row.datetime.format(DISPLAY_DATE_FORMAT).to_string()),
            );
            for (name, value) in view.sensors.iter().zip(&row.values) {
                let json = value
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number);
                obj.insert(name.clone(), json);
            }
            Value::Object(obj)
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Reading;
    use chrono::NaiveDate;

    fn view() -> FilteredView {
        let at = |h| {
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        FilteredView {
            sensors: vec!["temp salon".to_string(), "temp out".to_string()],
            rows: vec![
                Reading {
                    datetime: at(10),
                    values: vec![Some(21.5), None],
                },
                Reading {
                    datetime: at(11),
                    values: vec![Some(22.0), Some(-1.5)],
                },
            ],
        }
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&view(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "datetime,temp salon,temp out");
        assert_eq!(lines[1], "2024-01-01 10:00:00,21.5,");
        assert_eq!(lines[2], "2024-01-01 11:00:00,22,-1.5");
    }

    #[test]
    fn test_json_export() {
        let mut buf = Vec::new();
        let count = export_json(&view(), &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 2);

        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["datetime"], "2024-01-01 10:00:00");
        assert_eq!(parsed[0]["temp salon"], 21.5);
        assert!(parsed[0]["temp out"].is_null());
    }
}
