//! Terminal rendering of the status screen.

use std::fmt::Write as _;

use crate::view::{Color, Palette, ViewSnapshot};

const RESET: &str = "\x1b[0m";

/// Renders [`ViewSnapshot`]s as text.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    ansi: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl Renderer {
    /// Create a renderer that paints the background with ANSI colours.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ansi: true,
        }
    }

    /// Enable or disable ANSI colour output.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Render one frame. Hidden widgets produce no line.
    pub fn render(&self, snapshot: &ViewSnapshot) -> String {
        let color = self.palette.resolve(snapshot.background);
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} {} ({})",
            self.swatch(color),
            snapshot.background,
            color
        );
        let _ = writeln!(out, "  {}", snapshot.monitoring_text);
        if let Some(icon) = snapshot.icon {
            let _ = writeln!(out, "  [{icon}]");
        }
        if let Some(text) = snapshot.status_text.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out, "  {text}");
        }
        if let Some(text) = snapshot.type_text.as_deref() {
            let _ = writeln!(out, "  {text}");
        }
        let _ = writeln!(out, "  < {} >", snapshot.button_title);
        out
    }

    fn swatch(&self, color: Color) -> String {
        if self.ansi {
            format!("\x1b[48;2;{};{};{}m    {RESET}", color.r, color.g, color.b)
        } else {
            "####".to_string()
        }
    }
}
