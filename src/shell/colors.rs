//! Colors - Grid Theme Colors

use gpui::{rgb, Rgba};

/// Grid color palette - All colors are accessed via associated functions
pub struct GridColors;

impl GridColors {
    /// Main background
    pub fn background() -> Rgba { rgb(0xf5f5f5) }
    /// Content area background
    pub fn content_bg() -> Rgba { rgb(0xffffff) }
    /// Title bar background - Cyan/Teal
    pub fn header_bg() -> Rgba { rgb(0x2cb3b8) }

    // Text colors
    /// Primary text
    pub fn text_primary() -> Rgba { rgb(0x1f2937) }
    /// Secondary text
    pub fn text_secondary() -> Rgba { rgb(0x6b7280) }
    /// Muted text
    pub fn text_muted() -> Rgba { rgb(0x9ca3af) }
    /// Header text
    pub fn text_header() -> Rgba { rgb(0xffffff) }

    // Status colors
    /// Warning - Amber
    pub fn warning() -> Rgba { rgb(0xf59e0b) }
    /// Error/Danger - Red
    pub fn danger() -> Rgba { rgb(0xef4444) }
    /// Info - Blue
    pub fn info() -> Rgba { rgb(0x3b82f6) }

    /// Default border
    pub fn border() -> Rgba { rgb(0xe5e7eb) }

    // Table colors
    /// Table header background
    pub fn table_header_bg() -> Rgba { rgb(0xf9fafb) }
    /// Table row hover
    pub fn table_row_hover() -> Rgba { rgb(0xf3f4f6) }
    /// Table row alternate
    pub fn table_row_alt() -> Rgba { rgb(0xf9fafb) }

    /// Map an action's configured color name to a text color
    pub fn action(color: Option<&str>) -> Rgba {
        match color {
            Some("danger" | "error") => Self::danger(),
            Some("warning") => Self::warning(),
            Some("info" | "primary") => Self::info(),
            _ => Self::text_primary(),
        }
    }
}
