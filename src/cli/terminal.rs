//! Terminal capability detection and styling

use owo_colors::{colors::css, OwoColorize};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Styling for console output.
///
/// Styling is decided once, up front, so that output written to something
/// other than the terminal (a pipe, a test buffer) stays plain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette that leaves text unstyled.
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// A palette that styles text when stdout supports color.
    pub fn detect() -> Self {
        Self {
            enabled: supports_color(),
        }
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as warning (amber)
    pub fn warning(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Emphasize a heading
    pub fn heading(self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
