//! The status screen's widgets.
//!
//! The screen is headless: widgets hold their state in [`Property`] values
//! and a [`StatusView`] groups them into the single status screen. Rendering
//! reads a [`ViewSnapshot`]. Every mutation asserts that it runs on the thread
//! the widget was created on, which is the UI thread.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Monitoring: enabled          │  monitoring_label
//! │ (ok)                         │  indicator
//! │ Connected                    │  status_label
//! │ Type: Wi-Fi                  │  type_label
//! │ [ Stop monitoring ]          │  button
//! └──────────────────────────────┘  background
//! ```

use std::fmt;

use netcheck_core::{Property, ThreadAffinity};
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Colours
// ============================================================================

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when parsing a malformed hex colour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}' (expected #RRGGBB)")]
pub struct ParseColorError(String);

impl Color {
    /// Create a colour from 8-bit components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from a hex string (e.g., "#34C759" or "34C759").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        // `from_str_radix` alone would accept a sign ("+1").
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Format as "#RRGGBB".
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or(ParseColorError(value))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The screen's named background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundColor {
    /// Shown while not monitoring.
    #[default]
    Default,
    /// Shown while a path is available.
    Connected,
    /// Shown while no path is available.
    NotConnected,
}

impl BackgroundColor {
    /// The colour's asset name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Connected => "Connected",
            Self::NotConnected => "Not connected",
        }
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves named background colours to RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub default: Color,
    pub connected: Color,
    pub not_connected: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: Color::from_rgb8(0xF2, 0xF2, 0xF7),
            connected: Color::from_rgb8(0x34, 0xC7, 0x59),
            not_connected: Color::from_rgb8(0xFF, 0x3B, 0x30),
        }
    }
}

impl Palette {
    /// The RGB value of a named colour.
    pub fn resolve(&self, color: BackgroundColor) -> Color {
        match color {
            BackgroundColor::Default => self.default,
            BackgroundColor::Connected => self.connected,
            BackgroundColor::NotConnected => self.not_connected,
        }
    }
}

// ============================================================================
// Icons
// ============================================================================

/// The connectivity indicator image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// A path is available.
    Ok,
    /// No path is available.
    NotOk,
}

impl Icon {
    /// The icon's image name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotOk => "not_ok",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Widgets
// ============================================================================

/// A text label that can be hidden.
#[derive(Debug)]
pub struct Label {
    affinity: ThreadAffinity,
    text: Property<String>,
    visible: Property<bool>,
}

impl Label {
    /// Create a visible label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            text: Property::new(text.into()),
            visible: Property::new(true),
        }
    }

    /// Create a hidden, empty label.
    pub fn hidden() -> Self {
        let label = Self::new(String::new());
        label.visible.init(false);
        label
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Set the text. Returns `true` if it changed.
    pub fn set_text(&self, text: &str) -> bool {
        self.affinity.assert_owner("Label::set_text");
        self.text.set_from(text)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show or hide the label. Returns `true` if visibility changed.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.affinity.assert_owner("Label::set_visible");
        self.visible.set(visible)
    }

    /// The text, if the label is visible.
    pub fn visible_text(&self) -> Option<String> {
        self.is_visible().then(|| self.text())
    }
}

/// An image that can be hidden.
#[derive(Debug)]
pub struct ImageView {
    affinity: ThreadAffinity,
    image: Property<Option<Icon>>,
    visible: Property<bool>,
}

impl ImageView {
    /// Create a hidden image view with no image.
    pub fn hidden() -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            image: Property::new(None),
            visible: Property::new(false),
        }
    }

    pub fn image(&self) -> Option<Icon> {
        self.image.get()
    }

    /// Set or clear the image. Returns `true` if it changed.
    pub fn set_image(&self, image: Option<Icon>) -> bool {
        self.affinity.assert_owner("ImageView::set_image");
        self.image.set(image)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show or hide the image. Returns `true` if visibility changed.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.affinity.assert_owner("ImageView::set_visible");
        self.visible.set(visible)
    }

    /// The image, if the view is visible and has one.
    pub fn visible_image(&self) -> Option<Icon> {
        if self.is_visible() { self.image() } else { None }
    }
}

/// A push button. Only its title is modelled; presses arrive as commands.
#[derive(Debug)]
pub struct Button {
    affinity: ThreadAffinity,
    title: Property<String>,
}

impl Button {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            title: Property::new(title.into()),
        }
    }

    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Set the title. Returns `true` if it changed.
    pub fn set_title(&self, title: &str) -> bool {
        self.affinity.assert_owner("Button::set_title");
        self.title.set_from(title)
    }
}

/// The screen's background.
#[derive(Debug)]
pub struct Background {
    affinity: ThreadAffinity,
    color: Property<BackgroundColor>,
}

impl Background {
    pub fn new(color: BackgroundColor) -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            color: Property::new(color),
        }
    }

    pub fn color(&self) -> BackgroundColor {
        self.color.get()
    }

    /// Set the colour. Returns `true` if it changed.
    pub fn set_color(&self, color: BackgroundColor) -> bool {
        self.affinity.assert_owner("Background::set_color");
        self.color.set(color)
    }
}

// ============================================================================
// StatusView
// ============================================================================

/// The status screen.
///
/// Freshly created, everything but the monitoring label and the button is
/// hidden and the background is [`BackgroundColor::Default`].
#[derive(Debug)]
pub struct StatusView {
    pub monitoring_label: Label,
    pub indicator: ImageView,
    pub status_label: Label,
    pub type_label: Label,
    pub button: Button,
    pub background: Background,
}

impl StatusView {
    /// Create the screen on the current thread, which becomes its UI thread.
    pub fn new(monitoring_text: &str, button_title: &str) -> Self {
        Self {
            monitoring_label: Label::new(monitoring_text),
            indicator: ImageView::hidden(),
            status_label: Label::hidden(),
            type_label: Label::hidden(),
            button: Button::new(button_title),
            background: Background::new(BackgroundColor::Default),
        }
    }

    /// Capture what the screen currently shows.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            monitoring_text: self.monitoring_label.text(),
            icon: self.indicator.visible_image(),
            status_text: self.status_label.visible_text(),
            type_text: self.type_label.visible_text(),
            button_title: self.button.title(),
            background: self.background.color(),
        }
    }
}

/// What the status screen shows at one point in time.
///
/// Hidden widgets are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub monitoring_text: String,
    pub icon: Option<Icon>,
    pub status_text: Option<String>,
    pub type_text: Option<String>,
    pub button_title: String,
    pub background: BackgroundColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let color = Color::from_hex("#34C759").unwrap();
        assert_eq!(color, Color::from_rgb8(0x34, 0xC7, 0x59));
        assert_eq!(color.to_hex(), "#34C759");
        assert_eq!(Color::from_hex("ff3b30"), Some(Color::from_rgb8(0xFF, 0x3B, 0x30)));

        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#€€").is_none());
        assert!(Color::from_hex("#+1+2+3").is_none());
        assert!(Color::from_hex("-1-2-3").is_none());
    }

    #[test]
    fn test_palette_resolve() {
        let palette = Palette::default();
        assert_eq!(palette.resolve(BackgroundColor::Default).to_hex(), "#F2F2F7");
        assert_eq!(palette.resolve(BackgroundColor::Connected).to_hex(), "#34C759");
        assert_eq!(palette.resolve(BackgroundColor::NotConnected).to_hex(), "#FF3B30");
    }

    #[test]
    fn test_label_change_detection() {
        let label = Label::new("Connected");
        assert!(!label.set_text("Connected"));
        assert!(label.set_text("Not connected"));
        assert!(label.set_visible(false));
        assert_eq!(label.visible_text(), None);
    }

    #[test]
    fn test_hidden_image_reads_none() {
        let image = ImageView::hidden();
        assert!(image.set_image(Some(Icon::Ok)));
        assert_eq!(image.visible_image(), None);
        assert!(image.set_visible(true));
        assert_eq!(image.visible_image(), Some(Icon::Ok));
    }

    #[test]
    fn test_new_view_snapshot() {
        let view = StatusView::new("Monitoring: disabled", "Start monitoring");
        assert_eq!(
            view.snapshot(),
            ViewSnapshot {
                monitoring_text: "Monitoring: disabled".to_string(),
                icon: None,
                status_text: None,
                type_text: None,
                button_title: "Start monitoring".to_string(),
                background: BackgroundColor::Default,
            }
        );
    }

    #[test]
    #[should_panic(expected = "off the UI thread")]
    fn test_mutation_off_ui_thread_panics() {
        let label = std::sync::Arc::new(Label::new("Connected"));
        let remote = label.clone();
        let result = std::thread::spawn(move || {
            remote.set_text("Not connected");
        })
        .join();
        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }
}
