//! The single-threaded UI event loop.
//!
//! The loop owns nothing but a queue; the caller lends it a context `C` (the
//! view and whatever else lives on the UI thread) for the duration of
//! [`EventLoop::run`]. Other threads never see the context. They hold an
//! [`EventLoopProxy`] and post closures that receive `&mut C` once they reach
//! the UI thread:
//!
//! ```
//! use netcheck_core::EventLoop;
//!
//! let event_loop = EventLoop::<Vec<&'static str>>::new();
//! let proxy = event_loop.proxy();
//!
//! proxy.post(|log| log.push("first")).unwrap();
//! proxy.post(|log| log.push("second")).unwrap();
//!
//! let mut log = Vec::new();
//! assert_eq!(event_loop.process_pending(&mut log), 2);
//! assert_eq!(log, ["first", "second"]);
//! ```
//!
//! Events run in posting order. A task that was queued before the context went
//! away is dropped together with the loop instead of running against a dead
//! view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::error::{CoreError, Result};
use crate::event::UiEvent;
use crate::task::{TaskId, next_task_id};
use crate::thread_check::ThreadAffinity;

const TARGET: &str = crate::logging::targets::EVENT_LOOP;

/// How a bounded run of the event loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A quit request was processed.
    Quit,
    /// The time budget elapsed first.
    TimedOut,
}

/// State shared between the loop and its proxies.
struct LoopShared {
    /// Set as soon as a quit is requested; later posts are rejected.
    quit_requested: AtomicBool,
    /// Set once the quit event has been processed.
    exited: AtomicBool,
}

/// A single-threaded event loop that runs posted tasks against a context.
pub struct EventLoop<C: 'static> {
    sender: Sender<UiEvent<C>>,
    receiver: Receiver<UiEvent<C>>,
    shared: Arc<LoopShared>,
    /// The thread currently (or most recently) running the loop.
    affinity: Mutex<Option<ThreadAffinity>>,
}

impl<C: 'static> Default for EventLoop<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> EventLoop<C> {
    /// Create a new, empty event loop.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            shared: Arc::new(LoopShared {
                quit_requested: AtomicBool::new(false),
                exited: AtomicBool::new(false),
            }),
            affinity: Mutex::new(None),
        }
    }

    /// Create a proxy for posting to this loop from any thread.
    pub fn proxy(&self) -> EventLoopProxy<C> {
        EventLoopProxy {
            sender: self.sender.clone(),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Check if a quit has been requested.
    pub fn is_quit_requested(&self) -> bool {
        self.shared.quit_requested.load(Ordering::SeqCst)
    }

    /// Get the number of events waiting to be processed.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// The thread that runs (or last ran) this loop, if it has run at all.
    pub fn ui_affinity(&self) -> Option<ThreadAffinity> {
        *self.affinity.lock()
    }

    /// Run the loop on the calling thread until a quit is processed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EventLoopExited`] if the loop already processed a quit.
    #[tracing::instrument(skip_all, target = "netcheck_core::event_loop", level = "debug")]
    pub fn run(&self, ctx: &mut C) -> Result<()> {
        self.enter()?;
        tracing::info!(target: TARGET, "starting event loop");

        while let Ok(event) = self.receiver.recv() {
            if !self.dispatch(event, ctx) {
                break;
            }
        }

        tracing::info!(target: TARGET, "event loop finished");
        Ok(())
    }

    /// Run the loop for at most `timeout`, or until a quit is processed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EventLoopExited`] if the loop already processed a quit.
    pub fn run_for(&self, ctx: &mut C, timeout: Duration) -> Result<RunOutcome> {
        self.enter()?;
        let deadline = Instant::now() + timeout;

        loop {
            match self.receiver.recv_deadline(deadline) {
                Ok(event) => {
                    if !self.dispatch(event, ctx) {
                        return Ok(RunOutcome::Quit);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Ok(RunOutcome::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Ok(RunOutcome::Quit),
            }
        }
    }

    /// Run every event that is already queued, without blocking.
    ///
    /// Stops early if a quit is processed. Returns the number of tasks run.
    pub fn process_pending(&self, ctx: &mut C) -> usize {
        if self.enter().is_err() {
            return 0;
        }

        let mut executed = 0;
        while let Ok(event) = self.receiver.try_recv() {
            let is_task = matches!(event, UiEvent::Task { .. });
            if !self.dispatch(event, ctx) {
                break;
            }
            if is_task {
                executed += 1;
            }
        }
        executed
    }

    fn enter(&self) -> Result<()> {
        if self.shared.exited.load(Ordering::SeqCst) {
            return Err(CoreError::EventLoopExited);
        }
        *self.affinity.lock() = Some(ThreadAffinity::current());
        Ok(())
    }

    /// Dispatch one event. Returns `false` once the loop should stop.
    fn dispatch(&self, event: UiEvent<C>, ctx: &mut C) -> bool {
        tracing::trace!(target: TARGET, kind = event.kind(), "received event");
        match event {
            UiEvent::Task { id, task } => {
                tracing::trace!(target: TARGET, task_id = id.as_u64(), "executing task");
                task(ctx);
                true
            }
            UiEvent::WakeUp => true,
            UiEvent::Quit => {
                tracing::debug!(target: TARGET, "processing quit event");
                self.shared.exited.store(true, Ordering::SeqCst);
                false
            }
        }
    }
}

/// A cloneable, thread-safe handle for posting to an [`EventLoop`].
pub struct EventLoopProxy<C: 'static> {
    sender: Sender<UiEvent<C>>,
    shared: Arc<LoopShared>,
}

impl<C: 'static> Clone for EventLoopProxy<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: 'static> EventLoopProxy<C> {
    /// Post a task to run on the UI thread with the loop context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EventLoopExited`] once a quit was requested or the
    /// loop was dropped.
    pub fn post<F>(&self, task: F) -> Result<TaskId>
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        if self.shared.quit_requested.load(Ordering::SeqCst) {
            return Err(CoreError::EventLoopExited);
        }

        let id = next_task_id();
        self.send(UiEvent::Task {
            id,
            task: Box::new(task),
        })?;
        Ok(id)
    }

    /// Wake up the loop without running anything.
    pub fn wake_up(&self) -> Result<()> {
        self.send(UiEvent::WakeUp)
    }

    /// Request the loop to quit after the events already queued.
    pub fn quit(&self) {
        tracing::info!(target: TARGET, "quit requested");
        if !self.shared.quit_requested.swap(true, Ordering::SeqCst) {
            let _ = self.send(UiEvent::Quit);
        }
    }

    /// Check if a quit has been requested.
    pub fn is_quit_requested(&self) -> bool {
        self.shared.quit_requested.load(Ordering::SeqCst)
    }

    fn send(&self, event: UiEvent<C>) -> Result<()> {
        // Unbounded, so sending only fails once the loop is gone.
        self.sender
            .send(event)
            .map_err(|_| CoreError::EventLoopExited)
    }
}

static_assertions::assert_impl_all!(EventLoopProxy<Vec<u8>>: Send, Sync, Clone);
