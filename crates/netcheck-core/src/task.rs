//! Task identifiers and the boxed task type carried to the UI thread.

use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure that runs against the loop's context.
pub(crate) type BoxedTask<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_ids_are_increasing() {
        let first = next_task_id();
        let second = next_task_id();
        assert!(second > first);
        assert_ne!(first.as_u64(), 0);
    }
}
