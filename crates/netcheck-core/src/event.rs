//! Event types carried through the NetCheck UI event loop.

use std::fmt;

use crate::task::{BoxedTask, TaskId};

/// Events dispatched through the UI event loop.
///
/// Events are delivered strictly in the order they were posted, which is what
/// lets a `stop` handled on the UI thread overtake nothing that was queued
/// before it.
pub enum UiEvent<C> {
    /// Run a task against the loop context.
    Task {
        /// Identifier returned to the poster.
        id: TaskId,
        /// The closure to run on the UI thread.
        task: BoxedTask<C>,
    },

    /// Wake up the event loop without doing any work.
    WakeUp,

    /// Request to quit the event loop.
    Quit,
}

impl<C> UiEvent<C> {
    /// Short name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task { .. } => "task",
            Self::WakeUp => "wake_up",
            Self::Quit => "quit",
        }
    }
}

impl<C> fmt::Debug for UiEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task { id, .. } => f.debug_struct("Task").field("id", id).finish_non_exhaustive(),
            Self::WakeUp => write!(f, "WakeUp"),
            Self::Quit => write!(f, "Quit"),
        }
    }
}
