// Thermograph - core/source.rs
//
// Resolution of a user-supplied sheet link to the location actually read.
// Pure string logic; the fetch itself lives in platform::fetch.

use crate::util::constants::{EDIT_MARKER, EXPORT_SUFFIX};

/// Where an export is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportLocation {
    /// An `http://` or `https://` URL.
    Remote(String),

    /// Anything else is treated as a filesystem path.
    Local(String),
}

impl ExportLocation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote(s) | Self::Local(s) => s,
        }
    }
}

impl std::fmt::Display for ExportLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite an editable-document link to its flat CSV export endpoint.
///
/// `https://host/d/ID/edit?usp=sharing` becomes
/// `https://host/d/ID/export?format=csv`. Links without the edit marker are
/// returned verbatim (trimmed).
pub fn export_url(link: &str) -> String {
    let link = link.trim();
    match link.find(EDIT_MARKER) {
        Some(pos) => format!("{}{EXPORT_SUFFIX}", &link[..pos]),
        None => link.to_string(),
    }
}

/// Resolve a link to a remote URL or a local path.
pub fn resolve(link: &str) -> ExportLocation {
    let url = export_url(link);
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        ExportLocation::Remote(url)
    } else {
        ExportLocation::Local(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_link_rewritten() {
        let link = "https://docs.google.com/spreadsheets/d/abc123/edit?usp=sharing";
        assert_eq!(
            export_url(link),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
    }

    #[test]
    fn test_edit_with_fragment_rewritten() {
        let link = "https://docs.google.com/spreadsheets/d/abc/edit#gid=0";
        assert_eq!(
            export_url(link),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
    }

    #[test]
    fn test_plain_link_verbatim() {
        let link = "https://example.com/data.csv";
        assert_eq!(export_url(link), link);
    }

    #[test]
    fn test_link_trimmed() {
        assert_eq!(export_url("  data.csv \n"), "data.csv");
    }

    #[test]
    fn test_resolve_remote_and_local() {
        assert!(matches!(
            resolve("HTTPS://example.com/a.csv"),
            ExportLocation::Remote(_)
        ));
        assert_eq!(
            resolve("/tmp/readings.csv"),
            ExportLocation::Local("/tmp/readings.csv".to_string())
        );
    }
}
