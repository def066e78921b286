// Thermograph - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Thermograph";

/// Application identifier used for config directories.
pub const APP_ID: &str = "Thermograph";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Window and chart title.
pub const WINDOW_TITLE: &str = "Temperature Viewer";

// =============================================================================
// Data source
// =============================================================================

/// Example sheet shown in the link field when nothing else is configured.
pub const DEFAULT_SHEET_LINK: &str =
    "https://docs.google.com/spreadsheets/d/1rOOcih0w9ggjRePOjEhC5EIhKwZVVUY7HnwgZGoRftc/edit?usp=sharing";

/// Marker identifying an editable document link.
pub const EDIT_MARKER: &str = "/edit";

/// Suffix appended to the document root to obtain the flat CSV export.
pub const EXPORT_SUFFIX: &str = "/export?format=csv";

/// Default HTTP timeout for one export fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable fetch timeout.
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable fetch timeout.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

/// Hard cap on the size of a downloaded export (64 MiB).
pub const MAX_EXPORT_BYTES: u64 = 64 * 1024 * 1024;

// =============================================================================
// Normalisation
// =============================================================================

/// Name of the canonical parsed timestamp column.
pub const DATETIME_COLUMN: &str = "datetime";

/// Source column that the canonical timestamp column supersedes.
pub const HORODATEUR_COLUMN: &str = "horodateur";

/// Fixed chrono pattern for source timestamps (day/month/year h:m:s).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Display format used by the date-range sliders.
pub const SLIDER_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Display / export format for parsed timestamps.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum configurable font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum configurable font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Default number of rows shown in the data preview table.
pub const DEFAULT_PREVIEW_ROWS: usize = 1_000;

/// Minimum configurable preview row count.
pub const MIN_PREVIEW_ROWS: usize = 10;

/// Maximum configurable preview row count.
pub const MAX_PREVIEW_ROWS: usize = 100_000;

/// Title shown above the temperature chart.
pub const CHART_TITLE: &str = "Temperature evolution";

/// Y-axis label of the temperature chart.
pub const CHART_Y_LABEL: &str = "Temperature (\u{b0}C)";

/// X-axis label of the temperature chart.
pub const CHART_X_LABEL: &str = "Date/Time";

/// Maximum number of warnings retained in the UI.
pub const MAX_WARNINGS: usize = 200;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Paths
// =============================================================================

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
