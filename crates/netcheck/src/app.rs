//! The status screen application.
//!
//! [`StatusApp`] is the UI thread's context: it owns the reachability monitor
//! and the presenter. Monitor hooks run on whatever thread the observer
//! delivers on, so [`StatusApp::bind`] installs hooks that only post tasks to
//! the [`EventLoop`](netcheck_core::EventLoop); the tasks then update the
//! presenter on the UI thread.
//!
//! ```
//! use netcheck::{Locale, StatusApp, StatusPresenter};
//! use netcheck_core::EventLoop;
//! use netcheck_net::{ConnectionType, ManualPathObserver, PathSnapshot, ReachabilityMonitor};
//!
//! let observer = ManualPathObserver::new();
//! let event_loop = EventLoop::<StatusApp>::new();
//! let mut app = StatusApp::new(
//!     ReachabilityMonitor::new(observer.clone()),
//!     StatusPresenter::new(Locale::En),
//! );
//! app.bind(&event_loop.proxy());
//!
//! app.toggle_monitoring().unwrap();
//! observer.push(PathSnapshot::connected(ConnectionType::WiFi));
//! event_loop.process_pending(&mut app);
//!
//! assert_eq!(app.snapshot().type_text.as_deref(), Some("Type: Wi-Fi"));
//! ```

use std::io::{self, Write};
use std::ops::ControlFlow;

use netcheck_core::{EventLoopProxy, Result as CoreResult, TaskId};
use netcheck_net::{PathSnapshot, ReachabilityMonitor};

use crate::error::Result;
use crate::presenter::StatusPresenter;
use crate::render::Renderer;
use crate::view::ViewSnapshot;

const TARGET: &str = netcheck_core::logging::targets::APP;

/// A user command delivered to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// The monitoring button was pressed.
    Toggle,
    /// Redraw the screen.
    Render,
    /// Leave the application.
    Quit,
}

/// The UI thread's context.
pub struct StatusApp {
    monitor: ReachabilityMonitor,
    presenter: StatusPresenter,
    renderer: Renderer,
    output: Box<dyn Write>,
    frames: u64,
}

impl StatusApp {
    /// Create the application. Frames are rendered to nowhere until an
    /// output is set with [`with_output`](Self::with_output).
    pub fn new(monitor: ReachabilityMonitor, presenter: StatusPresenter) -> Self {
        Self {
            monitor,
            presenter,
            renderer: Renderer::default(),
            output: Box::new(io::sink()),
            frames: 0,
        }
    }

    /// Render frames with `renderer` into `output`.
    pub fn with_output(mut self, renderer: Renderer, output: Box<dyn Write>) -> Self {
        self.renderer = renderer;
        self.output = output;
        self
    }

    /// Install the monitor hooks, each posting its work to the UI loop.
    pub fn bind(&self, proxy: &EventLoopProxy<StatusApp>) {
        let on_start = proxy.clone();
        self.monitor.set_on_start(move |_| {
            log_post("start", on_start.post(StatusApp::on_started));
        });

        let on_stop = proxy.clone();
        self.monitor.set_on_stop(move |_| {
            log_post("stop", on_stop.post(StatusApp::on_stopped));
        });

        let on_change = proxy.clone();
        self.monitor.set_on_change(move |view| {
            let path = view.current_path();
            log_post("change", on_change.post(move |app| app.on_path(path)));
        });

        tracing::debug!(target: TARGET, "monitor hooks bound to UI loop");
    }

    /// The button action: start monitoring if idle, else stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the path observer cannot be started. The monitor is
    /// left idle and the screen shows monitoring as stopped.
    pub fn toggle_monitoring(&mut self) -> Result<()> {
        if self.monitor.is_monitoring() {
            tracing::info!(target: TARGET, "stopping monitoring");
            self.monitor.stop();
        } else {
            tracing::info!(target: TARGET, "starting monitoring");
            self.monitor.start()?;
        }
        Ok(())
    }

    /// Handle a user command.
    pub fn handle(&mut self, command: UiCommand) -> ControlFlow<()> {
        tracing::debug!(target: TARGET, ?command, "handling command");
        match command {
            UiCommand::Toggle => {
                if let Err(err) = self.toggle_monitoring() {
                    tracing::error!(target: TARGET, error = %err, "cannot toggle monitoring");
                }
            }
            UiCommand::Render => self.render(),
            UiCommand::Quit => {
                self.monitor.stop();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    pub fn monitor(&self) -> &ReachabilityMonitor {
        &self.monitor
    }

    pub fn presenter(&self) -> &StatusPresenter {
        &self.presenter
    }

    /// What the screen currently shows.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.presenter.snapshot()
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Render the current screen to the output.
    pub fn render(&mut self) {
        let frame = self.renderer.render(&self.presenter.snapshot());
        self.frames += 1;
        let written = writeln!(self.output, "{frame}").and_then(|()| self.output.flush());
        if let Err(err) = written {
            tracing::warn!(target: TARGET, error = %err, "failed to write frame");
        }
    }

    fn on_started(&mut self) {
        if self.presenter.show_started() {
            self.render();
        }
    }

    fn on_stopped(&mut self) {
        if self.presenter.show_stopped() {
            self.render();
        }
    }

    fn on_path(&mut self, path: PathSnapshot) {
        if self.presenter.apply_path(&path) {
            self.render();
        }
    }
}

impl std::fmt::Debug for StatusApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusApp")
            .field("monitor", &self.monitor)
            .field("presenter", &self.presenter)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

fn log_post(hook: &'static str, result: CoreResult<TaskId>) {
    match result {
        Ok(id) => tracing::trace!(target: TARGET, hook, task_id = id.as_u64(), "posted"),
        Err(err) => tracing::debug!(target: TARGET, hook, error = %err, "UI loop gone, dropping"),
    }
}
