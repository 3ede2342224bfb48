//! Display strings.
//!
//! Every piece of text the status screen shows comes from a [`Strings`] table
//! selected by [`Locale`]. English is the default; French carries the
//! screen's original wording.

use std::fmt;
use std::str::FromStr;

use netcheck_net::ConnectionType;
use serde::Deserialize;
use thiserror::Error;

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 2] = [Self::En, Self::Fr];

    /// The locale's language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// The locale's string table.
    pub fn strings(self) -> &'static Strings {
        match self {
            Self::En => &EN,
            Self::Fr => &FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale '{0}' (expected one of: en, fr)")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLocaleError(s.to_string()))
    }
}

/// Text shown on the status screen.
#[derive(Debug, PartialEq, Eq)]
pub struct Strings {
    pub connected: &'static str,
    pub not_connected: &'static str,
    pub monitoring_enabled: &'static str,
    pub monitoring_disabled: &'static str,
    pub start_monitoring: &'static str,
    pub stop_monitoring: &'static str,
    pub type_wifi: &'static str,
    pub type_cellular: &'static str,
    pub type_ethernet: &'static str,
    pub type_loopback: &'static str,
    pub type_unknown: &'static str,
}

impl Strings {
    /// The "Type: ..." label for a connection type.
    pub fn type_label(&self, connection_type: ConnectionType) -> &'static str {
        match connection_type {
            ConnectionType::WiFi => self.type_wifi,
            ConnectionType::Cellular => self.type_cellular,
            ConnectionType::Ethernet => self.type_ethernet,
            ConnectionType::Loopback => self.type_loopback,
            ConnectionType::Unknown => self.type_unknown,
        }
    }
}

static EN: Strings = Strings {
    connected: "Connected",
    not_connected: "Not connected",
    monitoring_enabled: "Monitoring: enabled",
    monitoring_disabled: "Monitoring: disabled",
    start_monitoring: "Start monitoring",
    stop_monitoring: "Stop monitoring",
    type_wifi: "Type: Wi-Fi",
    type_cellular: "Type: Cellular",
    type_ethernet: "Type: Ethernet",
    type_loopback: "Type: Localhost",
    type_unknown: "Type: Unknown",
};

static FR: Strings = Strings {
    connected: "Connecté",
    not_connected: "Non connecté",
    monitoring_enabled: "Monitoring de la connectivité Internet: activé",
    monitoring_disabled: "Monitoring de la connectivité Internet: désactivé",
    start_monitoring: "Démarrer le monitoring",
    stop_monitoring: "Arrêter le monitoring",
    type_wifi: "Type: Wi-Fi",
    type_cellular: "Type: Données cellulaires",
    type_ethernet: "Type: Ethernet",
    type_loopback: "Type: Localhost",
    type_unknown: "Type: Inconnu",
};
