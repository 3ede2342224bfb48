//! Network interface enumeration and classification.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::status::{ConnectionType, PathSnapshot};

/// A network interface on the system, reduced to what path selection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    /// Interface name (e.g., "eth0", "en0", "wlan0").
    pub name: String,
    /// Interface index.
    pub index: u32,
    /// Interface kind.
    pub kind: ConnectionType,
    /// Whether the interface is currently up.
    pub is_up: bool,
    /// IPv4 addresses assigned to this interface.
    pub ipv4_addresses: Vec<Ipv4Addr>,
    /// IPv6 addresses assigned to this interface.
    pub ipv6_addresses: Vec<Ipv6Addr>,
}

impl NetworkInterface {
    /// Get all network interfaces on the system.
    pub fn list() -> Vec<NetworkInterface> {
        netdev::get_interfaces()
            .into_iter()
            .map(Self::from_netdev)
            .collect()
    }

    /// Index of the interface carrying the default route, if any.
    pub fn default_index() -> Option<u32> {
        netdev::get_default_interface().ok().map(|iface| iface.index)
    }

    fn from_netdev(iface: netdev::Interface) -> NetworkInterface {
        let kind = classify(&iface.name, LinkType::of(&iface));

        NetworkInterface {
            ipv4_addresses: iface.ipv4.iter().map(|net| net.addr()).collect(),
            ipv6_addresses: iface.ipv6.iter().map(|net| net.addr()).collect(),
            is_up: iface.is_up(),
            index: iface.index,
            name: iface.name,
            kind,
        }
    }

    /// Get all IP addresses (both v4 and v6) for this interface.
    pub fn all_addresses(&self) -> Vec<IpAddr> {
        let mut addrs: Vec<IpAddr> = self.ipv4_addresses.iter().map(|a| IpAddr::V4(*a)).collect();
        addrs.extend(self.ipv6_addresses.iter().map(|a| IpAddr::V6(*a)));
        addrs
    }

    /// Check if this interface has an address that can reach beyond the link.
    ///
    /// Link-local addresses (169.254/16, fe80::/10) do not count.
    pub fn has_routable_address(&self) -> bool {
        self.ipv4_addresses.iter().any(|a| !a.is_link_local() && !a.is_unspecified())
            || self
                .ipv6_addresses
                .iter()
                .any(|a| !a.is_unicast_link_local() && !a.is_unspecified())
    }

    /// Check if this is the loopback interface.
    pub fn is_loopback(&self) -> bool {
        self.kind == ConnectionType::Loopback
    }

    /// Whether this interface can carry the device's path.
    pub fn is_usable(&self) -> bool {
        self.is_up && self.has_routable_address()
    }
}

/// The link type the operating system reports for an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkType {
    /// Nothing useful reported.
    #[default]
    Unknown,
    /// 802.3 framing. Generic: Linux reports Wi-Fi and some modems this way.
    Ethernet,
    /// IEEE 802.11.
    Wireless,
    /// Mobile broadband.
    Cellular,
    Loopback,
    Tunnel,
}

impl LinkType {
    /// Combine the platform's interface type, the interface flags and (on
    /// Linux) sysfs into one link type.
    fn of(iface: &netdev::Interface) -> LinkType {
        if iface.is_loopback() {
            return LinkType::Loopback;
        }
        if iface.is_tun() {
            return LinkType::Tunnel;
        }
        let link = LinkType::from(iface.if_type);
        if !link.is_specific() && is_wireless(&iface.name) {
            return LinkType::Wireless;
        }
        link
    }

    /// Whether this type names a specific medium, as opposed to a generic
    /// framing that name heuristics may refine.
    pub fn is_specific(self) -> bool {
        !matches!(self, LinkType::Unknown | LinkType::Ethernet)
    }
}

impl From<netdev::interface::InterfaceType> for LinkType {
    fn from(if_type: netdev::interface::InterfaceType) -> Self {
        use netdev::interface::InterfaceType;

        match if_type {
            InterfaceType::Wireless80211 => LinkType::Wireless,
            InterfaceType::Wwanpp | InterfaceType::Wwanpp2 => LinkType::Cellular,
            InterfaceType::Ethernet
            | InterfaceType::Ethernet3Megabit
            | InterfaceType::FastEthernetT
            | InterfaceType::FastEthernetFx
            | InterfaceType::GigabitEthernet => LinkType::Ethernet,
            InterfaceType::Loopback => LinkType::Loopback,
            InterfaceType::Tunnel => LinkType::Tunnel,
            _ => LinkType::Unknown,
        }
    }
}

/// Name prefixes of cellular modem interfaces across Linux, Android and Apple platforms.
const CELLULAR_PREFIXES: &[&str] = &["wwan", "rmnet", "ccmni", "pdp_ip", "ppp", "usb", "wwp"];

/// Name prefixes of wireless interfaces when the kernel does not tell us.
const WIRELESS_PREFIXES: &[&str] = &["wlan", "wlp", "wlx", "wl", "ath", "ra", "wifi"];

/// Name prefixes of wired interfaces.
const ETHERNET_PREFIXES: &[&str] = &["eth", "enp", "ens", "eno", "enx", "en", "em"];

/// Classify an interface from its name and reported link type.
///
/// A specific link type (Wi-Fi, cellular, loopback, tunnel) is trusted as is.
/// Otherwise the name decides, and a generic Ethernet link with an
/// unrecognised name (a Windows adapter GUID, say) stays Ethernet. Tunnels are
/// never classified as a physical kind.
pub fn classify(name: &str, link: LinkType) -> ConnectionType {
    match link {
        LinkType::Loopback => return ConnectionType::Loopback,
        LinkType::Tunnel => return ConnectionType::Unknown,
        LinkType::Wireless => return ConnectionType::WiFi,
        LinkType::Cellular => return ConnectionType::Cellular,
        LinkType::Ethernet | LinkType::Unknown => {}
    }

    if name == "lo" || name.starts_with("lo0") {
        return ConnectionType::Loopback;
    }

    let name = name.to_ascii_lowercase();
    let has_prefix = |prefixes: &[&str]| prefixes.iter().any(|p| name.starts_with(p));

    if has_prefix(CELLULAR_PREFIXES) {
        ConnectionType::Cellular
    } else if has_prefix(WIRELESS_PREFIXES) {
        ConnectionType::WiFi
    } else if has_prefix(ETHERNET_PREFIXES) || link == LinkType::Ethernet {
        ConnectionType::Ethernet
    } else {
        ConnectionType::Unknown
    }
}

/// Ask the platform whether `name` is a wireless interface.
#[cfg(target_os = "linux")]
fn is_wireless(name: &str) -> bool {
    let base = std::path::Path::new("/sys/class/net").join(name);
    base.join("wireless").exists() || base.join("phy80211").exists()
}

/// Only Linux exposes this outside the interface type.
#[cfg(not(target_os = "linux"))]
fn is_wireless(_name: &str) -> bool {
    false
}

/// Pick the path the device would use from a set of interfaces.
///
/// The default-route interface wins when it is usable; otherwise the usable
/// interface with the lowest index. Loopback only counts when
/// `include_loopback` is set and nothing else is usable.
pub fn select_path(
    interfaces: &[NetworkInterface],
    default_index: Option<u32>,
    include_loopback: bool,
) -> PathSnapshot {
    let usable = |iface: &&NetworkInterface| !iface.is_loopback() && iface.is_usable();

    let chosen = default_index
        .and_then(|index| interfaces.iter().filter(usable).find(|i| i.index == index))
        .or_else(|| interfaces.iter().filter(usable).min_by_key(|i| i.index));

    if let Some(iface) = chosen {
        return PathSnapshot::connected(iface.kind).with_interface(iface.name.clone());
    }

    if include_loopback {
        if let Some(lo) = interfaces.iter().find(|i| i.is_loopback() && i.is_up) {
            return PathSnapshot::connected(ConnectionType::Loopback).with_interface(lo.name.clone());
        }
    }

    PathSnapshot::disconnected()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::ConnectionStatus;

    fn iface(name: &str, index: u32, kind: ConnectionType, v4: &[[u8; 4]]) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            index,
            kind,
            is_up: true,
            ipv4_addresses: v4.iter().map(|o| Ipv4Addr::from(*o)).collect(),
            ipv6_addresses: Vec::new(),
        }
    }

    #[test]
    fn test_specific_link_type_wins_over_name() {
        assert_eq!(classify("lo", LinkType::Loopback), ConnectionType::Loopback);
        assert_eq!(classify("tun0", LinkType::Tunnel), ConnectionType::Unknown);
        // Linux Wi-Fi detected through sysfs despite a wired-looking name.
        assert_eq!(classify("enp3s0", LinkType::Wireless), ConnectionType::WiFi);
        // macOS names Wi-Fi en0.
        assert_eq!(classify("en0", LinkType::Wireless), ConnectionType::WiFi);
        assert_eq!(classify("en5", LinkType::Cellular), ConnectionType::Cellular);
    }

    #[test]
    fn test_adapter_guid_uses_link_type() {
        let guid = "{4D36E972-E325-11CE-BFC1-08002BE10318}";
        assert_eq!(classify(guid, LinkType::Wireless), ConnectionType::WiFi);
        assert_eq!(classify(guid, LinkType::Cellular), ConnectionType::Cellular);
        assert_eq!(classify(guid, LinkType::Ethernet), ConnectionType::Ethernet);
        assert_eq!(classify(guid, LinkType::Unknown), ConnectionType::Unknown);
    }

    #[test]
    fn test_generic_link_type_defers_to_name() {
        let cases = [
            ("wlan0", ConnectionType::WiFi),
            ("wlp2s0", ConnectionType::WiFi),
            ("wwan0", ConnectionType::Cellular),
            ("rmnet_data0", ConnectionType::Cellular),
            ("pdp_ip0", ConnectionType::Cellular),
            ("eth0", ConnectionType::Ethernet),
            ("enp3s0", ConnectionType::Ethernet),
            ("en0", ConnectionType::Ethernet),
            ("lo", ConnectionType::Loopback),
            ("docker0", ConnectionType::Unknown),
            ("br-1234", ConnectionType::Unknown),
        ];
        for (name, expected) in cases {
            assert_eq!(classify(name, LinkType::Unknown), expected, "{name}");
        }

        // Android reports its modem with Ethernet framing.
        assert_eq!(classify("rmnet_data0", LinkType::Ethernet), ConnectionType::Cellular);
        assert_eq!(classify("docker0", LinkType::Ethernet), ConnectionType::Ethernet);
    }

    #[test]
    fn test_link_type_from_netdev() {
        use netdev::interface::InterfaceType;

        assert_eq!(LinkType::from(InterfaceType::Wireless80211), LinkType::Wireless);
        assert_eq!(LinkType::from(InterfaceType::Wwanpp), LinkType::Cellular);
        assert_eq!(LinkType::from(InterfaceType::Wwanpp2), LinkType::Cellular);
        assert_eq!(LinkType::from(InterfaceType::GigabitEthernet), LinkType::Ethernet);
        assert_eq!(LinkType::from(InterfaceType::Unknown), LinkType::Unknown);
        assert!(LinkType::Wireless.is_specific());
        assert!(!LinkType::Ethernet.is_specific());
    }

    #[test]
    fn test_select_prefers_default_route() {
        let interfaces = vec![
            iface("eth0", 2, ConnectionType::Ethernet, &[[192, 168, 1, 10]]),
            iface("wlan0", 3, ConnectionType::WiFi, &[[10, 0, 0, 5]]),
        ];

        let path = select_path(&interfaces, Some(3), false);
        assert_eq!(path, PathSnapshot::connected(ConnectionType::WiFi).with_interface("wlan0"));

        let path = select_path(&interfaces, None, false);
        assert_eq!(path.connection_type, ConnectionType::Ethernet);
    }

    #[test]
    fn test_select_skips_unusable_default() {
        let mut down = iface("wlan0", 3, ConnectionType::WiFi, &[[10, 0, 0, 5]]);
        down.is_up = false;
        let interfaces = vec![down, iface("wwan0", 4, ConnectionType::Cellular, &[[100, 64, 0, 1]])];

        let path = select_path(&interfaces, Some(3), false);
        assert_eq!(path.connection_type, ConnectionType::Cellular);
    }

    #[test]
    fn test_link_local_only_is_not_connected() {
        let interfaces = vec![iface("eth0", 2, ConnectionType::Ethernet, &[[169, 254, 3, 4]])];
        assert_eq!(select_path(&interfaces, Some(2), false).status, ConnectionStatus::NotConnected);
    }

    #[test]
    fn test_loopback_only() {
        let interfaces = vec![iface("lo", 1, ConnectionType::Loopback, &[[127, 0, 0, 1]])];

        assert_eq!(select_path(&interfaces, None, false), PathSnapshot::disconnected());

        let path = select_path(&interfaces, None, true);
        assert_eq!(path.status, ConnectionStatus::Connected);
        assert_eq!(path.connection_type, ConnectionType::Loopback);
    }

    #[test]
    fn test_all_addresses() {
        let mut eth = iface("eth0", 2, ConnectionType::Ethernet, &[[192, 168, 1, 10]]);
        eth.ipv6_addresses.push("2001:db8::1".parse().unwrap());
        assert_eq!(eth.all_addresses().len(), 2);
        assert!(eth.has_routable_address());
    }
}
