//! Single-slot hooks for state transition notifications.
//!
//! A [`Hook<Args>`] holds at most one callback. Registering a new callback
//! replaces the previous one, so the owner of a component decides who gets
//! notified without any bookkeeping of connection IDs.
//!
//! Hooks carry no hidden receiver. The callback gets the arguments passed to
//! [`Hook::fire`] and whatever it captured itself; anything that lives on the
//! UI thread is reached by posting through an
//! [`EventLoopProxy`](crate::EventLoopProxy) rather than by capturing it.
//!
//! # Example
//!
//! ```
//! use netcheck_core::Hook;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let hook = Hook::<usize>::new();
//! let total = Arc::new(AtomicUsize::new(0));
//!
//! let total_clone = total.clone();
//! hook.set(move |n| {
//!     total_clone.fetch_add(*n, Ordering::SeqCst);
//! });
//!
//! hook.fire(&2);
//! hook.fire(&3);
//! assert_eq!(total.load(Ordering::SeqCst), 5);
//!
//! hook.clear();
//! assert!(!hook.fire(&10));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

const TARGET: &str = crate::logging::targets::HOOK;

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A single-slot callback holder.
///
/// `Hook<Args>` is `Send + Sync`. The slot is cloned out of its lock before it
/// runs, so a callback may replace or clear the hook it was fired from.
pub struct Hook<Args> {
    slot: Mutex<Option<Slot<Args>>>,
    /// Whether firing is temporarily suppressed.
    blocked: AtomicBool,
}

impl<Args> Default for Hook<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Hook<Args> {
    /// Create an empty hook.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            blocked: AtomicBool::new(false),
        }
    }

    /// Register the callback, replacing any previous one.
    ///
    /// Returns `true` if a previous callback was replaced.
    pub fn set<F>(&self, callback: F) -> bool
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let replaced = self.slot.lock().replace(Arc::new(callback)).is_some();
        if replaced {
            tracing::trace!(target: TARGET, "hook callback replaced");
        }
        replaced
    }

    /// Remove the callback. Returns `true` if one was registered.
    pub fn clear(&self) -> bool {
        self.slot.lock().take().is_some()
    }

    /// Check if a callback is registered.
    pub fn is_set(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Suppress or re-enable firing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if firing is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke the callback, if any, on the calling thread.
    ///
    /// Returns `true` if a callback ran.
    pub fn fire(&self, args: &Args) -> bool {
        if self.is_blocked() {
            tracing::trace!(target: TARGET, "hook blocked, skipping fire");
            return false;
        }

        let slot = self.slot.lock().clone();
        match slot {
            Some(callback) => {
                callback(args);
                true
            }
            None => false,
        }
    }
}

impl<Args> fmt::Debug for Hook<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("is_set", &self.is_set())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Hook<()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_fire_without_callback() {
        let hook = Hook::<()>::new();
        assert!(!hook.is_set());
        assert!(!hook.fire(&()));
    }

    #[test]
    fn test_last_registration_wins() {
        let hook = Hook::<()>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let first = received.clone();
        assert!(!hook.set(move |_| first.lock().push("first")));
        let second = received.clone();
        assert!(hook.set(move |_| second.lock().push("second")));

        hook.fire(&());
        assert_eq!(*received.lock(), vec!["second"]);
    }

    #[test]
    fn test_clear() {
        let hook = Hook::<i32>::new();
        hook.set(|_| {});
        assert!(hook.clear());
        assert!(!hook.clear());
        assert!(!hook.fire(&1));
    }

    #[test]
    fn test_blocked() {
        let hook = Hook::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        hook.set(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        hook.fire(&1);
        hook.set_blocked(true);
        assert!(!hook.fire(&2));
        hook.set_blocked(false);
        hook.fire(&3);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_callback_may_clear_its_own_hook() {
        let hook = Arc::new(Hook::<()>::new());
        let count = Arc::new(AtomicUsize::new(0));

        let hook_clone = Arc::clone(&hook);
        let count_clone = count.clone();
        hook.set(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            hook_clone.clear();
        });

        assert!(hook.fire(&()));
        assert!(!hook.fire(&()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fire_from_multiple_threads() {
        let hook = Arc::new(Hook::<usize>::new());
        let total = Arc::new(AtomicUsize::new(0));

        let total_clone = total.clone();
        hook.set(move |n| {
            total_clone.fetch_add(*n, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hook = Arc::clone(&hook);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        hook.fire(&1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(total.load(Ordering::SeqCst), 800);
    }
}
