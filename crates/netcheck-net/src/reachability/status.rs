//! Reachability status types.

use std::fmt;

/// Whether the device currently has a usable network path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionStatus {
    /// A usable path exists.
    Connected,
    /// No usable path. This is a normal state, not an error.
    #[default]
    NotConnected,
}

impl ConnectionStatus {
    /// Returns `true` for [`ConnectionStatus::Connected`].
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::NotConnected => write!(f, "not connected"),
        }
    }
}

/// The kind of interface carrying the current path.
///
/// Only meaningful while the status is [`ConnectionStatus::Connected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionType {
    /// Wireless LAN.
    WiFi,
    /// Mobile data.
    Cellular,
    /// Wired Ethernet.
    Ethernet,
    /// Loopback (localhost).
    Loopback,
    /// Anything else, including tunnels and bridges.
    #[default]
    Unknown,
}

impl ConnectionType {
    /// Every connection type, in declaration order.
    pub const ALL: [ConnectionType; 5] = [
        Self::WiFi,
        Self::Cellular,
        Self::Ethernet,
        Self::Loopback,
        Self::Unknown,
    ];
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WiFi => write!(f, "Wi-Fi"),
            Self::Cellular => write!(f, "Cellular"),
            Self::Ethernet => write!(f, "Ethernet"),
            Self::Loopback => write!(f, "Loopback"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Whether a monitor is observing the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonitoringState {
    /// Not observing; no hooks fire.
    #[default]
    Idle,
    /// Observing; on-change fires for every path update.
    Running,
}

/// One path update as reported by an observer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathSnapshot {
    /// Reachability of the path.
    pub status: ConnectionStatus,
    /// Interface kind carrying the path.
    pub connection_type: ConnectionType,
    /// Name of the interface carrying the path, if any.
    pub interface: Option<String>,
}

impl PathSnapshot {
    /// A path over the given interface kind.
    pub fn connected(connection_type: ConnectionType) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            connection_type,
            interface: None,
        }
    }

    /// The "no usable path" snapshot.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Attach the carrying interface's name.
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Returns `true` if the path is usable.
    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}

impl fmt::Display for PathSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.interface) {
            (ConnectionStatus::Connected, Some(name)) => {
                write!(f, "connected via {} ({name})", self.connection_type)
            }
            (ConnectionStatus::Connected, None) => {
                write!(f, "connected via {}", self.connection_type)
            }
            (ConnectionStatus::NotConnected, _) => write!(f, "not connected"),
        }
    }
}
