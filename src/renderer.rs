//! The renderer capability: applying preferences to the live display.
//!
//! Cycling a preference must change the rendered state and the stored slot
//! together; this trait is the "rendered state" half, kept behind a seam so
//! the controller is testable without a real terminal.

use std::io::{Write, stdout};

use crate::theme::Theme;

/// Applies the active preferences to whatever is displaying the session.
pub trait Renderer {
    fn apply_font(&mut self, family: &str);
    fn apply_theme(&mut self, theme: &Theme);
}

/// Renderer for a real terminal.
///
/// Themes retint the terminal's default colors with OSC 10 (foreground) and
/// OSC 11 (background); terminals that ignore the sequences still get the
/// themed UI styles drawn each frame. Fonts are advisory in a terminal, so
/// applying one only records it (the status bar shows the active family).
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn apply_font(&mut self, family: &str) {
        tracing::debug!(family, "font applied");
    }

    fn apply_theme(&mut self, theme: &Theme) {
        if let Err(err) = write_osc_colors(theme) {
            tracing::warn!(%err, "failed to write theme escape sequences");
        }
    }
}

fn write_osc_colors(theme: &Theme) -> std::io::Result<()> {
    let mut out = stdout();
    out.write_all(osc_color_sequence(10, &theme.color).as_bytes())?;
    out.write_all(osc_color_sequence(11, &theme.background).as_bytes())?;
    out.flush()
}

fn osc_color_sequence(slot: u8, color: &str) -> String {
    format!("\x1b]{slot};{color}\x07")
}

/// Renderer that applies nothing; used by headless tests.
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    pub fonts_applied: Vec<String>,
    pub themes_applied: Vec<Theme>,
}

impl Renderer for NullRenderer {
    fn apply_font(&mut self, family: &str) {
        self.fonts_applied.push(family.to_string());
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.themes_applied.push(theme.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::osc_color_sequence;

    #[test]
    fn test_osc_sequence_carries_slot_and_color() {
        assert_eq!(osc_color_sequence(11, "#32302f"), "\x1b]11;#32302f\x07");
    }
}
