// Thermograph - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Per-value coercion failures are NOT errors: they degrade to missing
// cells in the normaliser and never reach this module.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type of the load pipeline.
/// Export and config errors are reported on their own and never wrapped.
#[derive(Debug)]
pub enum ThermographError {
    /// Fetching or parsing the raw export failed.
    Source(DataSourceError),

    /// The raw table could not be normalised.
    Normalize(NormalizeError),
}

impl fmt::Display for ThermographError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "Data source error: {e}"),
            Self::Normalize(e) => write!(f, "Normalisation error: {e}"),
        }
    }
}

impl std::error::Error for ThermographError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Normalize(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Data source errors
// ---------------------------------------------------------------------------

/// The export could not be fetched, read, or parsed as tabular data.
#[derive(Debug)]
pub enum DataSourceError {
    /// The HTTP request failed (DNS, TLS, connection, timeout).
    Http {
        url: String,
        source: Box<ureq::Transport>,
    },

    /// The server answered with a non-success status.
    HttpStatus { url: String, status: u16 },

    /// Reading the response body or a local file failed.
    Io { location: String, source: io::Error },

    /// The export exceeds the maximum accepted size.
    TooLarge { location: String, max_bytes: u64 },

    /// The CSV content is malformed.
    Csv {
        location: String,
        source: csv::Error,
    },

    /// The export contains no header row.
    Empty { location: String },
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { url, source } => write!(f, "Could not fetch '{url}': {source}"),
            Self::HttpStatus { url, status } => {
                write!(f, "Server returned HTTP {status} for '{url}'")
            }
            Self::Io { location, source } => write!(f, "Could not read '{location}': {source}"),
            Self::TooLarge {
                location,
                max_bytes,
            } => write!(
                f,
                "Export '{location}' exceeds the maximum of {max_bytes} bytes"
            ),
            Self::Csv { location, source } => {
                write!(f, "'{location}' is not valid CSV: {source}")
            }
            Self::Empty { location } => write!(f, "'{location}' contains no header row"),
        }
    }
}

impl std::error::Error for DataSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { source, .. } => Some(source.as_ref()),
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DataSourceError> for ThermographError {
    fn from(e: DataSourceError) -> Self {
        Self::Source(e)
    }
}

// ---------------------------------------------------------------------------
// Normalisation errors
// ---------------------------------------------------------------------------

/// Errors produced while turning a raw table into a clean table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// No column name matched any timestamp candidate.
    /// Carries the normalised column names for diagnosis.
    MissingTimestampColumn { columns: Vec<String> },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTimestampColumn { columns } => write!(
                f,
                "No 'date' or 'time' column found. Detected columns: [{}]",
                columns.join(", ")
            ),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<NormalizeError> for ThermographError {
    fn from(e: NormalizeError) -> Self {
        Self::Normalize(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to exporting the filtered view.
#[derive(Debug)]
pub enum ExportError {
    /// Writing a CSV record failed.
    Csv { path: PathBuf, source: csv::Error },

    /// Serialising JSON failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Creating or flushing the output file failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "CSV export to '{}' failed: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export to '{}' failed: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error writing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The config file is not valid TOML for the expected shape.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A value was present but outside its accepted range or set.
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Could not read config file '{}': {source}", path.display())
            }
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse config file '{}': {source}", path.display())
            }
            Self::InvalidValue {
                section,
                key,
                value,
                expected,
            } => write!(
                f,
                "[{section}] {key} = {value} is invalid (expected {expected}); using default"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_timestamp_lists_columns() {
        let err = NormalizeError::MissingTimestampColumn {
            columns: vec!["temp a".to_string(), "temp b".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("temp a, temp b"), "got: {msg}");
    }

    #[test]
    fn test_top_level_chains_source() {
        let err: ThermographError = DataSourceError::HttpStatus {
            url: "https://example.com/x".to_string(),
            status: 404,
        }
        .into();
        assert!(err.to_string().starts_with("Data source error:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_preserves_cause() {
        let err = DataSourceError::Io {
            location: "missing.csv".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.csv"));
    }
}
