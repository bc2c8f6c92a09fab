//! Color theme records and the fixed theme candidate list.
//!
//! A theme is an opaque record of three hex colors. The persisted form is a
//! JSON document with camelCase keys (`color`, `background`, `linkColor`),
//! which is exactly what the preference store reads and writes.

use once_cell::sync::Lazy;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// One selectable color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Foreground text color, `#rrggbb`.
    pub color: String,
    /// Background color, `#rrggbb`.
    pub background: String,
    /// Accent color for links, prompts, and highlights, `#rrggbb`.
    pub link_color: String,
}

impl Theme {
    fn new(color: &str, background: &str, link_color: &str) -> Self {
        Self {
            color: color.to_string(),
            background: background.to_string(),
            link_color: link_color.to_string(),
        }
    }

    /// Foreground as a terminal color.
    pub fn fg(&self) -> Color {
        parse_hex(&self.color).unwrap_or(Color::Reset)
    }

    /// Background as a terminal color.
    pub fn bg(&self) -> Color {
        parse_hex(&self.background).unwrap_or(Color::Reset)
    }

    /// Accent as a terminal color.
    pub fn accent(&self) -> Color {
        parse_hex(&self.link_color).unwrap_or(Color::Reset)
    }
}

/// The ordered theme cycle. Order defines the cycle sequence.
pub static THEMES: Lazy<[Theme; 4]> = Lazy::new(|| {
    [
        // gruvbox dark
        Theme::new("#ebdbb2", "#32302f", "#b8bb26"),
        // everforest light
        Theme::new("#5c6a72", "#fdf6e3", "#88c0d0"),
        // dracula
        Theme::new("#f8f8f2", "#282a36", "#ff79c6"),
        // gruvbox light
        Theme::new("#504945", "#f2e5bc", "#689d6a"),
    ]
});

/// Parse a `#rrggbb` hex triplet.
fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
