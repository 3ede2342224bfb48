//! Tracing targets used throughout NetCheck.
//!
//! NetCheck uses the `tracing` crate for instrumentation. Libraries only emit
//! events; the binary installs a subscriber. Use these targets with `RUST_LOG`
//! style directives to filter logs by subsystem:
//!
//! ```text
//! RUST_LOG=info,netcheck_net::reachability=debug netcheck
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "netcheck_core";
    /// UI event loop target.
    pub const EVENT_LOOP: &str = "netcheck_core::event_loop";
    /// Hook invocation target.
    pub const HOOK: &str = "netcheck_core::hook";
    /// Reachability monitor target.
    pub const REACHABILITY: &str = "netcheck_net::reachability";
    /// Path observer target.
    pub const OBSERVER: &str = "netcheck_net::reachability::observer";
    /// Status presenter target.
    pub const PRESENTER: &str = "netcheck::presenter";
    /// Application wiring target.
    pub const APP: &str = "netcheck::app";
}

/// Every target, in the order they appear in documentation.
pub const ALL_TARGETS: &[&str] = &[
    targets::CORE,
    targets::EVENT_LOOP,
    targets::HOOK,
    targets::REACHABILITY,
    targets::OBSERVER,
    targets::PRESENTER,
    targets::APP,
];

/// Build an `EnvFilter`-style directive that sets every NetCheck target to
/// `level` while leaving other crates at `warn`.
pub fn default_directive(level: &str) -> String {
    let mut directive = String::from("warn");
    for target in [targets::CORE, "netcheck_net", "netcheck"] {
        directive.push(',');
        directive.push_str(target);
        directive.push('=');
        directive.push_str(level);
    }
    directive
}
