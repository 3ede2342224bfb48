//! Network reachability monitoring for NetCheck.
//!
//! This crate wraps the operating system's network path observation behind a
//! small, callback-driven monitor:
//!
//! - **ReachabilityMonitor**: start/stop, a current status snapshot and three
//!   single-slot hooks (on-start, on-stop, on-change)
//! - **Path observers**: the [`PathObserver`](reachability::PathObserver) seam,
//!   with a system implementation built on `netwatcher` and `netdev` and a
//!   manual implementation for tests and demos
//! - **Interface classification**: mapping interfaces to Wi-Fi, cellular,
//!   Ethernet or loopback
//!
//! # Example
//!
//! ```no_run
//! use netcheck_net::reachability::{ConnectionStatus, ReachabilityMonitor};
//!
//! let monitor = ReachabilityMonitor::system();
//!
//! monitor.set_on_change(|view| {
//!     match view.current_status() {
//!         ConnectionStatus::Connected => println!("online via {}", view.current_type()),
//!         ConnectionStatus::NotConnected => println!("offline"),
//!     }
//! });
//!
//! monitor.start()?;
//! # Ok::<(), netcheck_net::NetworkError>(())
//! ```

mod error;
pub mod reachability;

pub use error::{NetworkError, Result};

pub use reachability::{
    ConnectionStatus, ConnectionType, ManualPathObserver, MonitoringState, PathObserver,
    PathSnapshot, ReachabilityMonitor, ReachabilityView, SystemPathObserver,
};
