// Thermograph - platform/fetch.rs
//
// Blocking retrieval of an export: HTTP(S) via ureq, anything else from the
// local filesystem. One request per call, no retries.

use crate::core::source::ExportLocation;
use crate::platform::fs::read_file_lossy;
use crate::util::constants;
use crate::util::error::DataSourceError;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Limits applied to a single fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overall timeout for the HTTP request.
    pub timeout: Duration,

    /// Maximum accepted export size in bytes.
    pub max_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::DEFAULT_FETCH_TIMEOUT_SECS),
            max_bytes: constants::MAX_EXPORT_BYTES,
        }
    }
}

/// Fetch the export text for `location`.
pub fn fetch_export(
    location: &ExportLocation,
    options: &FetchOptions,
) -> Result<String, DataSourceError> {
    match location {
        ExportLocation::Remote(url) => fetch_remote(url, options),
        ExportLocation::Local(path) => fetch_local(path, options),
    }
}

fn fetch_remote(url: &str, options: &FetchOptions) -> Result<String, DataSourceError> {
    tracing::debug!(url, timeout_secs = options.timeout.as_secs(), "HTTP GET");

    let agent = ureq::AgentBuilder::new().timeout(options.timeout).build();
    let response = match agent.get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::Status(status, _)) => {
            return Err(DataSourceError::HttpStatus {
                url: url.to_string(),
                status,
            })
        }
        Err(ureq::Error::Transport(t)) => {
            return Err(DataSourceError::Http {
                url: url.to_string(),
                source: Box::new(t),
            })
        }
    };

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(options.max_bytes + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| DataSourceError::Io {
            location: url.to_string(),
            source: e,
        })?;

    if bytes.len() as u64 > options.max_bytes {
        return Err(DataSourceError::TooLarge {
            location: url.to_string(),
            max_bytes: options.max_bytes,
        });
    }

    tracing::debug!(url, bytes = bytes.len(), "HTTP body received");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn fetch_local(path: &str, options: &FetchOptions) -> Result<String, DataSourceError> {
    match read_file_lossy(Path::new(path), options.max_bytes) {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Err(DataSourceError::TooLarge {
            location: path.to_string(),
            max_bytes: options.max_bytes,
        }),
        Err(e) => Err(DataSourceError::Io {
            location: path.to_string(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        std::fs::write(&path, "Horodateur,T\n").unwrap();

        let location = ExportLocation::Local(path.display().to_string());
        let text = fetch_export(&location, &FetchOptions::default()).unwrap();
        assert_eq!(text, "Horodateur,T\n");
    }

    #[test]
    fn test_missing_local_file_is_io_error() {
        let location = ExportLocation::Local("/nonexistent/thermograph/readings.csv".into());
        let result = fetch_export(&location, &FetchOptions::default());
        assert!(
            matches!(result, Err(DataSourceError::Io { .. })),
            "expected Io, got {result:?}"
        );
    }

    #[test]
    fn test_local_file_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        std::fs::write(&path, "0123456789").unwrap();

        let options = FetchOptions {
            max_bytes: 4,
            ..Default::default()
        };
        let location = ExportLocation::Local(path.display().to_string());
        let result = fetch_export(&location, &options);
        assert!(matches!(result, Err(DataSourceError::TooLarge { .. })));
    }
}
