//! Color definitions for charts

/// Row colors, assigned by `row % DEFAULT_PALETTE.len()`
pub(super) const DEFAULT_PALETTE: [&str; 5] = [
    "#FF4560", // Red
    "#00E396", // Green
    "#008FFB", // Blue
    "#FEB019", // Amber
    "#775DD0", // Purple
];

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#FFFFFF";
pub(super) const COLOR_TEXT: &str = "#000000";
pub(super) const COLOR_GRID: &str = "#DCDCDC";
/// Count labels drawn over markers
pub(super) const COLOR_LABEL: &str = "#43434E";

/// Split `#RRGGBB` into components for terminal truecolor output
pub(super) fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
