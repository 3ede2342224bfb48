//! Change-detecting values for view state.
//!
//! Widgets keep their text, visibility and colours in [`Property`] values.
//! Writes report whether anything changed, which is how the screen decides
//! whether a frame needs redrawing.
//!
//! # Example
//!
//! ```
//! use netcheck_core::Property;
//!
//! let title = Property::new(String::from("Start monitoring"));
//!
//! // Writing the current value is not a change.
//! assert!(!title.set_from("Start monitoring"));
//! assert!(title.set_from("Stop monitoring"));
//! assert_eq!(title.get(), "Stop monitoring");
//! assert_eq!(title.revision(), 1);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// A value with change detection and a revision counter.
///
/// `Property<T>` is `Send + Sync` whenever `T` is; thread ownership of view
/// state is enforced by the widgets, not here.
pub struct Property<T> {
    value: RwLock<T>,
    revision: AtomicU64,
}

impl<T> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            revision: AtomicU64::new(0),
        }
    }

    /// Read the value in place.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.value.read())
    }

    /// Number of changes since creation. Unchanged writes do not count.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Overwrite the value without counting a change.
    ///
    /// For initial widget setup, before anything was rendered.
    pub fn init(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone> Property<T> {
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: PartialEq> Property<T> {
    /// Store `value`. Returns `true` if it differs from the current value.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        self.revision.fetch_add(1, Ordering::Release);
        true
    }

    /// Like [`set`](Self::set), but compares against a borrowed form first and
    /// only builds an owned value on change.
    pub fn set_from<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ToOwned<Owned = T> + ?Sized,
    {
        let mut current = self.value.write();
        if Borrow::<Q>::borrow(&*current) == value {
            return false;
        }
        *current = value.to_owned();
        self.revision.fetch_add(1, Ordering::Release);
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| {
            f.debug_struct("Property")
                .field("value", value)
                .field("revision", &self.revision())
                .finish()
        })
    }
}
