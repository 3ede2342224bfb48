//! Core systems for NetCheck.
//!
//! This crate provides the small runtime the reachability screen is built on:
//!
//! - **Event Loop**: A single-threaded UI event loop that owns its context
//! - **Task Hand-off**: Thread-safe posting of closures onto the UI thread
//! - **Hooks**: Single-slot callbacks for state transition notifications
//! - **Property System**: Values with change detection for view state
//! - **Thread Affinity**: Assertions that view state is only touched on its thread
//!
//! # Event Loop Example
//!
//! ```
//! use netcheck_core::EventLoop;
//!
//! struct Counter {
//!     value: i32,
//! }
//!
//! let event_loop = EventLoop::<Counter>::new();
//! let proxy = event_loop.proxy();
//!
//! // Post from any thread; the closure runs on the loop's thread with the context.
//! std::thread::spawn(move || {
//!     proxy.post(|counter| counter.value += 1).unwrap();
//!     proxy.quit();
//! })
//! .join()
//! .unwrap();
//!
//! let mut counter = Counter { value: 0 };
//! event_loop.run(&mut counter).unwrap();
//! assert_eq!(counter.value, 1);
//! ```
//!
//! # Hook Example
//!
//! ```
//! use netcheck_core::Hook;
//!
//! let on_change = Hook::<u32>::new();
//! on_change.set(|value| println!("changed to {value}"));
//!
//! // Last registration wins.
//! on_change.set(|value| println!("now {value}"));
//! assert!(on_change.fire(&7));
//! ```

mod error;
mod event;
pub mod event_loop;
pub mod hook;
pub mod logging;
pub mod property;
mod task;
pub mod thread_check;

pub use error::{CoreError, Result};
pub use event::UiEvent;
pub use event_loop::{EventLoop, EventLoopProxy, RunOutcome};
pub use hook::Hook;
pub use property::Property;
pub use task::TaskId;
pub use thread_check::ThreadAffinity;
