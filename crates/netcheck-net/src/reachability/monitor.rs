//! The reachability monitor.

use std::fmt;
use std::sync::Arc;

use netcheck_core::Hook;
use parking_lot::{Mutex, ReentrantMutex};

use super::observer::{ObservationHandle, PathObserver, PathSink, SystemPathObserver};
use super::status::{ConnectionStatus, ConnectionType, MonitoringState, PathSnapshot};
use crate::error::Result;

const TARGET: &str = netcheck_core::logging::targets::REACHABILITY;

/// Mutable monitor state, written by `start`/`stop` and the delivery path.
struct MonitorState {
    monitoring: MonitoringState,
    /// Bumped on every transition; deliveries tagged with an older value are stale.
    generation: u64,
    path: PathSnapshot,
    updates: u64,
}

/// State shared between the monitor, its views and the observer's sink.
struct MonitorShared {
    state: Mutex<MonitorState>,
    /// Held for the whole of a delivery, so `stop` can wait one out.
    delivery_gate: ReentrantMutex<()>,
    on_start: Hook<ReachabilityView>,
    on_stop: Hook<ReachabilityView>,
    on_change: Hook<ReachabilityView>,
}

impl MonitorShared {
    fn deliver(self: &Arc<Self>, generation: u64, snapshot: PathSnapshot) {
        let _gate = self.delivery_gate.lock();
        {
            let mut state = self.state.lock();
            if state.monitoring != MonitoringState::Running || state.generation != generation {
                tracing::trace!(target: TARGET, generation, "discarding stale path update");
                return;
            }
            tracing::debug!(target: TARGET, %snapshot, "path changed");
            state.path = snapshot;
            state.updates += 1;
        }
        self.on_change.fire(&ReachabilityView {
            shared: Arc::clone(self),
        });
    }
}

/// Read-only access to a monitor's current state.
///
/// Hooks receive a view instead of a payload and re-read what they need. A
/// view is cheap to clone and may be kept and read from any thread.
#[derive(Clone)]
pub struct ReachabilityView {
    shared: Arc<MonitorShared>,
}

impl ReachabilityView {
    /// Check if the monitor is running.
    pub fn is_monitoring(&self) -> bool {
        self.monitoring_state() == MonitoringState::Running
    }

    /// The monitor's current state.
    pub fn monitoring_state(&self) -> MonitoringState {
        self.shared.state.lock().monitoring
    }

    /// Best-known path. Reads as disconnected while idle.
    pub fn current_path(&self) -> PathSnapshot {
        let state = self.shared.state.lock();
        match state.monitoring {
            MonitoringState::Running => state.path.clone(),
            MonitoringState::Idle => PathSnapshot::disconnected(),
        }
    }

    /// Best-known reachability. Reads as not connected while idle.
    pub fn current_status(&self) -> ConnectionStatus {
        self.current_path().status
    }

    /// Best-known interface kind. Only meaningful while connected.
    pub fn current_type(&self) -> ConnectionType {
        self.current_path().connection_type
    }

    /// Number of path updates accepted since the monitor was created.
    pub fn update_count(&self) -> u64 {
        self.shared.state.lock().updates
    }
}

impl fmt::Debug for ReachabilityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachabilityView")
            .field("monitoring", &self.monitoring_state())
            .field("path", &self.current_path())
            .finish()
    }
}

/// Watches network reachability and notifies through single-slot hooks.
///
/// The monitor is an ordinary value: create one, register hooks, start it and
/// drop it when done. Dropping stops observation.
///
/// # Hooks
///
/// - **on-start** fires once per `Idle -> Running` transition, on the thread
///   calling [`start`](Self::start), before any on-change.
/// - **on-stop** fires once per `Running -> Idle` transition, on the thread
///   calling [`stop`](Self::stop).
/// - **on-change** fires once per path update, on the observer's thread, after
///   the snapshot has been updated.
///
/// Each hook holds one callback; registering again replaces it. Callbacks run
/// on whatever thread fires them and must hand UI work to the UI thread
/// themselves.
///
/// # Example
///
/// ```
/// use netcheck_net::reachability::{
///     ConnectionStatus, ManualPathObserver, PathSnapshot, ReachabilityMonitor,
/// };
///
/// let observer = ManualPathObserver::new();
/// let monitor = ReachabilityMonitor::new(observer.clone());
///
/// monitor.set_on_change(|view| println!("status: {}", view.current_status()));
///
/// monitor.start().unwrap();
/// assert!(monitor.is_monitoring());
///
/// observer.push(PathSnapshot::disconnected());
/// assert_eq!(monitor.current_status(), ConnectionStatus::NotConnected);
///
/// monitor.stop();
/// assert!(!monitor.is_monitoring());
/// ```
pub struct ReachabilityMonitor {
    shared: Arc<MonitorShared>,
    observer: Box<dyn PathObserver>,
    /// The live observation. Only `start` and `stop` touch it; deliveries
    /// never do.
    observation: Mutex<Option<ObservationHandle>>,
}

impl ReachabilityMonitor {
    /// Create an idle monitor over `observer`.
    pub fn new<O>(observer: O) -> Self
    where
        O: PathObserver + 'static,
    {
        Self::with_observer(Box::new(observer))
    }

    /// Create an idle monitor over a boxed observer.
    pub fn with_observer(observer: Box<dyn PathObserver>) -> Self {
        Self {
            shared: Arc::new(MonitorShared {
                state: Mutex::new(MonitorState {
                    monitoring: MonitoringState::Idle,
                    generation: 0,
                    path: PathSnapshot::disconnected(),
                    updates: 0,
                }),
                delivery_gate: ReentrantMutex::new(()),
                on_start: Hook::new(),
                on_stop: Hook::new(),
                on_change: Hook::new(),
            }),
            observer,
            observation: Mutex::new(None),
        }
    }

    /// Create an idle monitor over the platform's network.
    pub fn system() -> Self {
        Self::new(SystemPathObserver::new())
    }

    /// A read-only view of this monitor.
    pub fn view(&self) -> ReachabilityView {
        ReachabilityView {
            shared: Arc::clone(&self.shared),
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start monitoring. Does nothing if already running.
    ///
    /// Fires on-start, then begins observing. If the observer cannot start,
    /// the monitor returns to idle (firing on-stop) and the error is returned.
    pub fn start(&self) -> Result<()> {
        let generation = {
            let mut state = self.shared.state.lock();
            if state.monitoring == MonitoringState::Running {
                tracing::trace!(target: TARGET, "already monitoring, ignoring start");
                return Ok(());
            }
            state.monitoring = MonitoringState::Running;
            state.generation += 1;
            state.path = PathSnapshot::disconnected();
            state.generation
        };

        tracing::info!(target: TARGET, observer = self.observer.name(), "monitoring started");
        self.shared.on_start.fire(&self.view());

        // on-start may already have stopped us.
        if !self.is_generation(generation) {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let sink: PathSink = Arc::new(move |snapshot| shared.deliver(generation, snapshot));

        match self.observer.observe(sink) {
            Ok(handle) => {
                // Checked under the slot lock: a concurrent `stop` flips the
                // generation before it empties the slot.
                let mut observation = self.observation.lock();
                if self.is_generation(generation) {
                    *observation = Some(handle);
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!(target: TARGET, error = %err, "failed to start path observer");
                self.stop();
                Err(err)
            }
        }
    }

    /// Stop monitoring. Does nothing if already idle.
    ///
    /// Cancels the observation, waits for an in-flight on-change to finish and
    /// fires on-stop. No on-change runs after this returns. Safe to call from
    /// inside a hook.
    pub fn stop(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.monitoring == MonitoringState::Idle {
                tracing::trace!(target: TARGET, "not monitoring, ignoring stop");
                return;
            }
            state.monitoring = MonitoringState::Idle;
            state.generation += 1;
            state.path = PathSnapshot::disconnected();
        }

        let observation = self.observation.lock().take();
        drop(observation);

        // Deliveries that passed the generation check before the flip finish
        // here; later ones see the new generation and bail out.
        drop(self.shared.delivery_gate.lock());

        tracing::info!(target: TARGET, "monitoring stopped");
        self.shared.on_stop.fire(&self.view());
    }

    fn is_generation(&self, generation: u64) -> bool {
        let state = self.shared.state.lock();
        state.monitoring == MonitoringState::Running && state.generation == generation
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    /// Check if the monitor is running.
    pub fn is_monitoring(&self) -> bool {
        self.view().is_monitoring()
    }

    /// The monitor's current state.
    pub fn monitoring_state(&self) -> MonitoringState {
        self.view().monitoring_state()
    }

    /// Best-known path. Reads as disconnected while idle.
    pub fn current_path(&self) -> PathSnapshot {
        self.view().current_path()
    }

    /// Best-known reachability. Reads as not connected while idle.
    pub fn current_status(&self) -> ConnectionStatus {
        self.view().current_status()
    }

    /// Best-known interface kind. Only meaningful while connected.
    pub fn current_type(&self) -> ConnectionType {
        self.view().current_type()
    }

    // -------------------------------------------------------------------------
    // Hooks
    // -------------------------------------------------------------------------

    /// Register the on-start hook, replacing any previous one.
    pub fn set_on_start<F>(&self, hook: F)
    where
        F: Fn(&ReachabilityView) + Send + Sync + 'static,
    {
        self.shared.on_start.set(hook);
    }

    /// Register the on-stop hook, replacing any previous one.
    pub fn set_on_stop<F>(&self, hook: F)
    where
        F: Fn(&ReachabilityView) + Send + Sync + 'static,
    {
        self.shared.on_stop.set(hook);
    }

    /// Register the on-change hook, replacing any previous one.
    pub fn set_on_change<F>(&self, hook: F)
    where
        F: Fn(&ReachabilityView) + Send + Sync + 'static,
    {
        self.shared.on_change.set(hook);
    }

    /// Remove the on-start hook.
    pub fn clear_on_start(&self) {
        self.shared.on_start.clear();
    }

    /// Remove the on-stop hook.
    pub fn clear_on_stop(&self) {
        self.shared.on_stop.clear();
    }

    /// Remove the on-change hook.
    pub fn clear_on_change(&self) {
        self.shared.on_change.clear();
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        self.stop();
        // Hooks may hold views of this monitor; clearing breaks the cycle.
        self.clear_on_start();
        self.clear_on_stop();
        self.clear_on_change();
    }
}

impl fmt::Debug for ReachabilityMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachabilityMonitor")
            .field("observer", &self.observer.name())
            .field("monitoring", &self.monitoring_state())
            .field("path", &self.current_path())
            .finish()
    }
}

static_assertions::assert_impl_all!(ReachabilityView: Send, Sync, Clone);
static_assertions::assert_impl_all!(ReachabilityMonitor: Send, Sync);
