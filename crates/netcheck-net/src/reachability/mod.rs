//! Network reachability monitoring.
//!
//! [`ReachabilityMonitor`] turns a stream of [`PathSnapshot`]s from a
//! [`PathObserver`] into a small state machine with on-start, on-stop and
//! on-change hooks:
//!
//! ```text
//!        start()                 stop()
//! Idle ───────────▶ Running ───────────▶ Idle
//!                    │   ▲
//!                    └───┘ path update (on-change)
//! ```
//!
//! Two observers ship with the crate:
//!
//! - [`SystemPathObserver`] watches the host's interfaces via `netwatcher` and
//!   classifies them via `netdev`.
//! - [`ManualPathObserver`] is driven by hand, for tests and simulation.

mod interface;
mod monitor;
mod observer;
mod status;

pub use interface::{LinkType, NetworkInterface, classify, select_path};
pub use monitor::{ReachabilityMonitor, ReachabilityView};
pub use observer::{
    ManualPathObserver, ObservationHandle, PathObserver, PathSink, SystemPathObserver,
};
pub use status::{ConnectionStatus, ConnectionType, MonitoringState, PathSnapshot};
