//! Application configuration.
//!
//! Configuration is read from a TOML file; every field is optional:
//!
//! ```toml
//! locale = "fr"
//! autostart = true
//! log_level = "debug"
//! include_loopback = false
//!
//! [palette]
//! default = "#F2F2F7"
//! connected = "#34C759"
//! not_connected = "#FF3B30"
//! ```
//!
//! Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::view::Palette;

/// Where configuration came from, for error messages.
const DEFAULTS_ORIGIN: &str = "<defaults>";

/// NetCheck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Display language.
    pub locale: Locale,
    /// Start monitoring as soon as the screen is shown.
    pub autostart: bool,
    /// Log level for NetCheck's own targets, unless `RUST_LOG` is set.
    pub log_level: String,
    /// Report a loopback-only host as connected over localhost.
    pub include_loopback: bool,
    /// Background colours.
    pub palette: Palette,
    /// The file this configuration was loaded from.
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            autostart: false,
            log_level: default_log_level(),
            include_loopback: false,
            palette: Palette::default(),
            origin: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl AppConfig {
    /// Load configuration from `path`, or the defaults if `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                tracing::debug!("no configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::debug!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(path, format!("cannot read file: {e}")))?;
        let mut config = Self::from_toml_str(&content, path)?;
        config.origin = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration text. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| AppError::config(origin, e.message()))?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::config(
                origin,
                format!(
                    "unknown log_level '{}' (expected one of: {})",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        locale: Option<Locale>,
        autostart: bool,
        log_level: Option<String>,
    ) -> Result<Self> {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self.autostart |= autostart;
        if let Some(level) = log_level {
            self.log_level = level;
            self.validate(Path::new("<command line>"))?;
        }
        Ok(self)
    }

    /// Describe where the configuration came from.
    pub fn origin_display(&self) -> String {
        self.origin
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DEFAULTS_ORIGIN.to_string())
    }
}
