// Thermograph - core/style.rs
//
// Static per-series line styles, looked up by case-insensitive series name
// when the chart is built. Series without an entry get a palette colour by
// position (see ui::theme).

/// An sRGB colour without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Line dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
}

/// Colour and dash override for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: Rgb,
    pub dash: Dash,
}

/// CSS `gray`.
const GRAY: Rgb = Rgb(128, 128, 128);

/// Canonical (lowercased) series name -> style.
///
/// NOTE: the sheet this viewer was first built for painted the "cuisine"
/// colour onto the "salon" line. `#062951` is kept for cuisine here and the
/// intended colour still needs confirming with whoever owns the sheet.
pub const SERIES_STYLES: &[(&str, SeriesStyle)] = &[
    (
        "temp netatmo out",
        SeriesStyle {
            color: GRAY,
            dash: Dash::Dashed,
        },
    ),
    (
        "temp netatmo hub",
        SeriesStyle {
            color: Rgb(0xab, 0x1a, 0x0f),
            dash: Dash::Solid,
        },
    ),
    (
        "temp homepod bureau",
        SeriesStyle {
            color: Rgb(0xe1, 0x80, 0x7a),
            dash: Dash::Solid,
        },
    ),
    (
        "temp homepod salon",
        SeriesStyle {
            color: Rgb(0x79, 0x79, 0xdf),
            dash: Dash::Solid,
        },
    ),
    (
        "temp homepod cuisine",
        SeriesStyle {
            color: Rgb(0x06, 0x29, 0x51),
            dash: Dash::Solid,
        },
    ),
];

/// Style override for a series, matched case-insensitively on the exact name.
pub fn style_for(series: &str) -> Option<SeriesStyle> {
    let key = series.to_lowercase();
    SERIES_STYLES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, style)| *style)
}
