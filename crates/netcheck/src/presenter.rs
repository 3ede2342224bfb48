//! Maps reachability state to what the status screen shows.

use netcheck_net::{ConnectionStatus, ConnectionType, PathSnapshot};

use crate::locale::{Locale, Strings};
use crate::view::{BackgroundColor, Icon, StatusView, ViewSnapshot};

const TARGET: &str = netcheck_core::logging::targets::PRESENTER;

/// The display of one reachability state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: Icon,
    pub status_text: &'static str,
    /// `None` hides the type label.
    pub type_text: Option<&'static str>,
    pub background: BackgroundColor,
}

/// Map a status and connection type to their display.
///
/// The type is ignored while not connected.
pub fn present(
    status: ConnectionStatus,
    connection_type: ConnectionType,
    strings: &Strings,
) -> Presentation {
    match status {
        ConnectionStatus::Connected => Presentation {
            icon: Icon::Ok,
            status_text: strings.connected,
            type_text: Some(strings.type_label(connection_type)),
            background: BackgroundColor::Connected,
        },
        ConnectionStatus::NotConnected => Presentation {
            icon: Icon::NotOk,
            status_text: strings.not_connected,
            type_text: None,
            background: BackgroundColor::NotConnected,
        },
    }
}

/// Drives the [`StatusView`] from monitor events.
///
/// The presenter is passive: it never talks to the monitor, it only reacts to
/// start, stop and path events handed to it on the UI thread. Every method
/// returns `true` if anything visible changed.
#[derive(Debug)]
pub struct StatusPresenter {
    view: StatusView,
    strings: &'static Strings,
    monitoring: bool,
}

impl StatusPresenter {
    /// Create the presenter and its view on the current thread.
    pub fn new(locale: Locale) -> Self {
        let strings = locale.strings();
        Self {
            view: StatusView::new(strings.monitoring_disabled, strings.start_monitoring),
            strings,
            monitoring: false,
        }
    }

    pub fn view(&self) -> &StatusView {
        &self.view
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.view.snapshot()
    }

    /// Whether the presenter is showing a running monitor.
    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Show that monitoring started.
    pub fn show_started(&mut self) -> bool {
        tracing::debug!(target: TARGET, "showing monitoring started");
        self.monitoring = true;

        let view = &self.view;
        let mut changed = view.monitoring_label.set_text(self.strings.monitoring_enabled);
        changed |= view.indicator.set_visible(true);
        changed |= view.status_label.set_visible(true);
        changed |= view.button.set_title(self.strings.stop_monitoring);
        changed
    }

    /// Show that monitoring stopped, resetting all status display.
    pub fn show_stopped(&mut self) -> bool {
        tracing::debug!(target: TARGET, "showing monitoring stopped");
        self.monitoring = false;

        let view = &self.view;
        let mut changed = view.indicator.set_visible(false);
        changed |= view.indicator.set_image(None);
        changed |= view.status_label.set_visible(false);
        changed |= view.status_label.set_text("");
        changed |= view.type_label.set_visible(false);
        changed |= view.type_label.set_text("");
        changed |= view.monitoring_label.set_text(self.strings.monitoring_disabled);
        changed |= view.background.set_color(BackgroundColor::Default);
        changed |= view.button.set_title(self.strings.start_monitoring);
        changed
    }

    /// Show a path update. Ignored while not monitoring.
    pub fn apply_path(&mut self, path: &PathSnapshot) -> bool {
        if !self.monitoring {
            tracing::trace!(target: TARGET, %path, "not monitoring, ignoring path update");
            return false;
        }
        tracing::debug!(target: TARGET, %path, "showing path");

        let presentation = present(path.status, path.connection_type, self.strings);
        let view = &self.view;

        let mut changed = view.indicator.set_image(Some(presentation.icon));
        changed |= view.status_label.set_text(presentation.status_text);
        match presentation.type_text {
            Some(text) => {
                changed |= view.type_label.set_text(text);
                changed |= view.type_label.set_visible(true);
            }
            None => changed |= view.type_label.set_visible(false),
        }
        changed |= view.background.set_color(presentation.background);
        changed
    }
}
