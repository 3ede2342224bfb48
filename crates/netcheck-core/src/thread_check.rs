//! UI thread ownership checks.
//!
//! View state belongs to the UI thread, the one that runs the
//! [`EventLoop`](crate::EventLoop). Reachability hooks fire on the observer's
//! thread and must post their work rather than touch a widget. A widget keeps
//! the [`ThreadAffinity`] of the thread that built it and checks it on every
//! mutation, so a hook that forgets to post fails loudly at the call site.
//!
//! ```
//! use std::cell::RefCell;
//! use netcheck_core::ThreadAffinity;
//!
//! struct StatusLabel {
//!     owner: ThreadAffinity,
//!     text: RefCell<String>,
//! }
//!
//! impl StatusLabel {
//!     fn show(&self, text: &str) {
//!         self.owner.assert_owner("StatusLabel::show");
//!         self.text.replace(text.to_string());
//!     }
//! }
//!
//! let label = StatusLabel {
//!     owner: ThreadAffinity::current(),
//!     text: RefCell::new(String::new()),
//! };
//! label.show("Connected");
//! ```

use std::thread::{self, ThreadId};

/// The thread a piece of UI state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// Returns `true` when called on the owning thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Panic unless called on the owning thread.
    ///
    /// `operation` names the mutation in the panic message. The check runs in
    /// release builds too.
    #[inline]
    pub fn assert_owner(&self, operation: &str) {
        if !self.is_same_thread() {
            self.wrong_thread(operation);
        }
    }

    #[cold]
    #[inline(never)]
    fn wrong_thread(&self, operation: &str) -> ! {
        let here = thread::current();
        panic!(
            "{operation} called off the UI thread (UI thread {:?}, called from {:?} \"{}\"); \
             post it through EventLoopProxy::post instead",
            self.owner,
            here.id(),
            here.name().unwrap_or("<unnamed>"),
        )
    }
}
