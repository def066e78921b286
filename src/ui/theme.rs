// Thermograph - ui/theme.rs
//
// Series colours, dash mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::style::{self, Dash, Rgb};
use egui::Color32;
use egui_plot::LineStyle;

/// Fallback palette for series without a style override, by position.
const PALETTE: [Color32; 8] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(23, 190, 207),  // Cyan
];

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

pub fn to_line_style(dash: Dash) -> LineStyle {
    match dash {
        Dash::Solid => LineStyle::Solid,
        Dash::Dashed => LineStyle::dashed_loose(),
    }
}

/// Colour and line style for the series at `position` in the selection.
pub fn series_look(name: &str, position: usize) -> (Color32, LineStyle) {
    match style::style_for(name) {
        Some(s) => (to_color32(s.color), to_line_style(s.dash)),
        None => (PALETTE[position % PALETTE.len()], LineStyle::Solid),
    }
}

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Warning text (amber 600).
pub const WARNING_TEXT: Color32 = Color32::from_rgb(217, 119, 6);

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 280.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const PREVIEW_HEIGHT: f32 = 220.0;
pub const CHART_HEIGHT: f32 = 360.0;
