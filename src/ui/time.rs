// Thermograph - ui/time.rs
//
// Conversions between naive timestamps and the plain numbers egui sliders
// and plot axes work with. Timestamps carry no zone; they are mapped through
// UTC purely as a numbering scheme.

use chrono::{DateTime, NaiveDateTime};

/// Seconds since the epoch, treating `t` as UTC.
pub fn to_secs(t: NaiveDateTime) -> i64 {
    t.and_utc().timestamp()
}

/// Inverse of `to_secs`. `None` outside chrono's representable range.
pub fn from_secs(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|d| d.naive_utc())
}

/// Format a plot or slider value with `fmt`, or "" when out of range.
pub fn format_secs(secs: f64, fmt: &str) -> String {
    if !secs.is_finite() {
        return String::new();
    }
    from_secs(secs.round() as i64)
        .map(|t| t.format(fmt).to_string())
        .unwrap_or_default()
}
