// Thermograph - core/raw.rs
//
// CSV text -> RawTable. Cells are kept as text: decimal commas are handled
// later by the normaliser, so quoted values such as "21,5" survive intact.

use crate::core::model::RawTable;
use crate::util::error::DataSourceError;

/// Parse a comma-delimited export with a header row.
///
/// `location` is only used for error context. Blank lines are skipped and
/// ragged rows accepted; a leading UTF-8 BOM is stripped.
pub fn parse_raw_table(text: &str, location: &str) -> Result<RawTable, DataSourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataSourceError::Csv {
            location: location.to_string(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataSourceError::Empty {
            location: location.to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DataSourceError::Csv {
            location: location.to_string(),
            source: e,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        location,
        columns = headers.len(),
        rows = rows.len(),
        "Raw export parsed"
    );

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_decimal_comma_kept_as_text() {
        let text = "Horodateur,Temp Salon\n01/01/2024 10:00:00,\"21,5\"\n";
        let raw = parse_raw_table(text, "t.csv").unwrap();
        assert_eq!(raw.headers, vec!["Horodateur", "Temp Salon"]);
        assert_eq!(raw.rows, vec![vec!["01/01/2024 10:00:00", "21,5"]]);
    }

    #[test]
    fn test_ragged_rows_accepted() {
        let text = "a,b,c\n1,2\n1,2,3\n";
        let raw = parse_raw_table(text, "t.csv").unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.cell(0, 2), "");
    }

    #[test]
    fn test_bom_stripped() {
        let text = "\u{feff}Date,x\n01/01/2024 00:00:00,1\n";
        let raw = parse_raw_table(text, "t.csv").unwrap();
        assert_eq!(raw.headers[0], "Date");
    }

    #[test]
    fn test_empty_input_is_error() {
        let result = parse_raw_table("", "empty.csv");
        assert!(
            matches!(result, Err(DataSourceError::Empty { .. })),
            "expected Empty, got {result:?}"
        );
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let raw = parse_raw_table("Horodateur,Temp\n", "t.csv").unwrap();
        assert!(raw.is_empty());
        assert_eq!(raw.headers.len(), 2);
    }
}
