//! Path observers: the seam between the monitor and the operating system.
//!
//! A [`PathObserver`] reports [`PathSnapshot`]s to a sink until the returned
//! [`ObservationHandle`] is cancelled or dropped. The monitor never talks to
//! the platform directly, which keeps it testable with [`ManualPathObserver`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::interface::{NetworkInterface, select_path};
use super::status::PathSnapshot;
use crate::error::{NetworkError, Result};

const TARGET: &str = netcheck_core::logging::targets::OBSERVER;

/// Receives path updates from an observer, on the observer's thread.
pub type PathSink = Arc<dyn Fn(PathSnapshot) + Send + Sync>;

/// A source of network path updates.
pub trait PathObserver: Send + Sync {
    /// Begin delivering path updates to `sink`.
    ///
    /// Updates stop once the returned handle is cancelled or dropped.
    fn observe(&self, sink: PathSink) -> Result<ObservationHandle>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Keeps an observation alive. Dropping it cancels the observation.
pub struct ObservationHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ObservationHandle {
    /// Create a handle that runs `cancel` when the observation ends.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the observation now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for ObservationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// SystemPathObserver
// ============================================================================

/// Observes the real network using platform-native change notifications.
///
/// Interface changes are detected with `netwatcher`; on every notification the
/// interfaces are re-enumerated with `netdev` and reduced to one
/// [`PathSnapshot`]. Notifications that do not change the snapshot (an extra
/// IPv6 address, a renamed bridge) are coalesced, so the sink sees each
/// distinct path once. The current path is delivered as soon as observation
/// starts.
#[derive(Debug, Clone, Default)]
pub struct SystemPathObserver {
    include_loopback: bool,
}

impl SystemPathObserver {
    /// Create an observer that ignores loopback-only connectivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a loopback-only host as connected over [`Loopback`](super::ConnectionType::Loopback).
    pub fn include_loopback(mut self, include: bool) -> Self {
        self.include_loopback = include;
        self
    }

    /// Compute the current path without observing.
    pub fn current_path(&self) -> PathSnapshot {
        select_path(
            &NetworkInterface::list(),
            NetworkInterface::default_index(),
            self.include_loopback,
        )
    }
}

impl PathObserver for SystemPathObserver {
    fn observe(&self, sink: PathSink) -> Result<ObservationHandle> {
        let observer = self.clone();
        let coalescer = Arc::new(PathCoalescer::new(move || observer.current_path(), sink));

        let on_update = Arc::clone(&coalescer);
        let watch = netwatcher::watch_interfaces(move |_update| {
            on_update.deliver();
        })
        .map_err(|e| NetworkError::Observer(e.to_string()))?;

        tracing::debug!(target: TARGET, "system path observer started");
        coalescer.deliver();

        Ok(ObservationHandle::new(move || {
            drop(watch);
            tracing::debug!(target: TARGET, "system path observer stopped");
        }))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Reads a path from `source` and forwards it to the sink when it differs from
/// the last one forwarded.
///
/// Notifications can arrive on several threads at once (the initial delivery
/// on the caller's thread, the OS callback on its own). Reading, comparing and
/// forwarding all happen under one lock, so an enumeration that started
/// earlier can never be forwarded after a later one.
pub(crate) struct PathCoalescer<F> {
    source: F,
    sink: PathSink,
    last: Mutex<Option<PathSnapshot>>,
}

impl<F> PathCoalescer<F>
where
    F: Fn() -> PathSnapshot,
{
    pub(crate) fn new(source: F, sink: PathSink) -> Self {
        Self {
            source,
            sink,
            last: Mutex::new(None),
        }
    }

    /// Read the current path and forward it if it changed.
    ///
    /// Returns `true` if the sink was called.
    pub(crate) fn deliver(&self) -> bool {
        let mut last = self.last.lock();
        let snapshot = (self.source)();
        if last.as_ref() == Some(&snapshot) {
            tracing::trace!(target: TARGET, "path unchanged, coalescing update");
            return false;
        }

        *last = Some(snapshot.clone());
        tracing::debug!(target: TARGET, %snapshot, "path update");
        (self.sink)(snapshot);
        true
    }
}

// ============================================================================
// ManualPathObserver
// ============================================================================

struct ManualInner {
    /// The live observation, tagged so a stale handle cannot cancel a newer one.
    sink: Mutex<Option<(u64, PathSink)>>,
    current: Mutex<PathSnapshot>,
    next_observation: AtomicU64,
    deliver_initial: bool,
}

/// An in-process observer driven by [`push`](Self::push).
///
/// Clones share state, so a test keeps one clone and hands the other to the
/// monitor. Updates are delivered synchronously on the thread that pushes
/// them, which lets tests play the role of the OS delivery thread.
///
/// # Example
///
/// ```
/// use netcheck_net::reachability::{
///     ConnectionType, ManualPathObserver, PathSnapshot, ReachabilityMonitor,
/// };
///
/// let observer = ManualPathObserver::new();
/// let monitor = ReachabilityMonitor::new(observer.clone());
///
/// monitor.start().unwrap();
/// observer.push(PathSnapshot::connected(ConnectionType::Cellular));
/// assert_eq!(monitor.current_type(), ConnectionType::Cellular);
/// ```
#[derive(Clone)]
pub struct ManualPathObserver {
    inner: Arc<ManualInner>,
}

impl Default for ManualPathObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualPathObserver {
    /// Create an observer that starts disconnected and does not deliver an
    /// initial path.
    pub fn new() -> Self {
        Self::with_initial(PathSnapshot::disconnected(), false)
    }

    /// Create an observer whose current path is `initial`.
    ///
    /// With `deliver_initial`, every new observation immediately receives the
    /// current path, the way platform observers report their first snapshot.
    pub fn with_initial(initial: PathSnapshot, deliver_initial: bool) -> Self {
        Self {
            inner: Arc::new(ManualInner {
                sink: Mutex::new(None),
                current: Mutex::new(initial),
                next_observation: AtomicU64::new(1),
                deliver_initial,
            }),
        }
    }

    /// Set the current path and deliver it to the live observation, if any.
    ///
    /// Returns `true` if an observation received the update.
    pub fn push(&self, snapshot: PathSnapshot) -> bool {
        *self.inner.current.lock() = snapshot.clone();
        let sink = self.inner.sink.lock().as_ref().map(|(_, sink)| Arc::clone(sink));
        match sink {
            Some(sink) => {
                sink(snapshot);
                true
            }
            None => false,
        }
    }

    /// The most recently pushed path.
    pub fn current(&self) -> PathSnapshot {
        self.inner.current.lock().clone()
    }

    /// Check if an observation is live.
    pub fn is_observing(&self) -> bool {
        self.inner.sink.lock().is_some()
    }
}

impl PathObserver for ManualPathObserver {
    fn observe(&self, sink: PathSink) -> Result<ObservationHandle> {
        let id = self.inner.next_observation.fetch_add(1, Ordering::Relaxed);
        *self.inner.sink.lock() = Some((id, Arc::clone(&sink)));

        if self.inner.deliver_initial {
            sink(self.current());
        }

        let inner = Arc::clone(&self.inner);
        Ok(ObservationHandle::new(move || {
            let mut slot = inner.sink.lock();
            if matches!(*slot, Some((live, _)) if live == id) {
                *slot = None;
            }
        }))
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}

impl fmt::Debug for ManualPathObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualPathObserver")
            .field("current", &self.current())
            .field("is_observing", &self.is_observing())
            .finish()
    }
}

static_assertions::assert_impl_all!(ManualPathObserver: Send, Sync, Clone);
static_assertions::assert_impl_all!(SystemPathObserver: Send, Sync);
static_assertions::assert_impl_all!(ObservationHandle: Send);
