//! NetCheck: a single-screen network reachability display.
//!
//! The screen shows whether the device has a usable network path and over
//! which kind of interface, and lets the user start and stop monitoring:
//!
//! - **StatusApp**: the UI thread's context, owning the monitor and presenter
//! - **StatusPresenter**: maps reachability to icons, labels and colours
//! - **StatusView**: the headless widgets the presenter drives
//! - **Renderer**: draws the screen in a terminal
//! - **AppConfig**: TOML configuration with command-line overrides
//!
//! The reachability monitor itself lives in [`netcheck_net`]; the UI event
//! loop in [`netcheck_core`].

pub mod app;
pub mod config;
mod error;
pub mod locale;
pub mod presenter;
pub mod render;
pub mod view;

pub use app::{StatusApp, UiCommand};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use locale::{Locale, Strings};
pub use presenter::{Presentation, StatusPresenter, present};
pub use render::Renderer;
pub use view::{BackgroundColor, Color, Icon, Palette, StatusView, ViewSnapshot};
