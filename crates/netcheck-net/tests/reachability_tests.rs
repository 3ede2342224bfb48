//! Reachability monitor tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use netcheck_net::reachability::{
    ConnectionStatus, ConnectionType, ManualPathObserver, MonitoringState, NetworkInterface,
    PathSnapshot, ReachabilityMonitor, ReachabilityView, SystemPathObserver,
};
use parking_lot::Mutex;

/// Records hook invocations in order.
#[derive(Clone, Default)]
struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    fn attach(&self, monitor: &ReachabilityMonitor) {
        let entries = self.entries.clone();
        monitor.set_on_start(move |_| entries.lock().push("start".to_string()));

        let entries = self.entries.clone();
        monitor.set_on_stop(move |_| entries.lock().push("stop".to_string()));

        let entries = self.entries.clone();
        monitor.set_on_change(move |view: &ReachabilityView| {
            entries.lock().push(format!("change:{}", view.current_path()));
        });
    }

    fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

#[test]
fn test_start_stop_sequences_are_idempotent() {
    // Every sequence of up to five start/stop calls ends in the state of its
    // last call, firing hooks only on real transitions.
    for mask in 0u32..(1 << 5) {
        for len in 1..=5 {
            let observer = ManualPathObserver::new();
            let monitor = ReachabilityMonitor::new(observer);
            let journal = Journal::default();
            journal.attach(&monitor);

            let mut running = false;
            let mut expected = Vec::new();
            for step in 0..len {
                let start = mask & (1 << step) != 0;
                if start {
                    monitor.start().unwrap();
                    if !running {
                        expected.push("start".to_string());
                    }
                } else {
                    monitor.stop();
                    if running {
                        expected.push("stop".to_string());
                    }
                }
                running = start;
                assert_eq!(monitor.is_monitoring(), running);
            }

            assert_eq!(journal.entries(), expected, "mask {mask:#b} len {len}");
        }
    }
}

#[test]
fn test_on_start_precedes_initial_change() {
    let initial = PathSnapshot::connected(ConnectionType::WiFi).with_interface("wlan0");
    let observer = ManualPathObserver::with_initial(initial, true);
    let monitor = ReachabilityMonitor::new(observer.clone());
    let journal = Journal::default();
    journal.attach(&monitor);

    monitor.start().unwrap();
    observer.push(PathSnapshot::disconnected());
    monitor.stop();

    assert_eq!(
        journal.entries(),
        vec![
            "start",
            "change:connected via Wi-Fi (wlan0)",
            "change:not connected",
            "stop",
        ]
    );
}

#[test]
fn test_on_change_sees_updated_snapshot() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    monitor.set_on_change(move |view| {
        seen_clone.lock().push((view.current_status(), view.current_type()));
    });

    monitor.start().unwrap();
    observer.push(PathSnapshot::connected(ConnectionType::Cellular));
    observer.push(PathSnapshot::connected(ConnectionType::Ethernet));
    observer.push(PathSnapshot::disconnected());

    assert_eq!(
        *seen.lock(),
        vec![
            (ConnectionStatus::Connected, ConnectionType::Cellular),
            (ConnectionStatus::Connected, ConnectionType::Ethernet),
            (ConnectionStatus::NotConnected, ConnectionType::Unknown),
        ]
    );
    assert_eq!(monitor.view().update_count(), 3);
}

#[test]
fn test_no_change_while_idle() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());
    let journal = Journal::default();
    journal.attach(&monitor);

    observer.push(PathSnapshot::connected(ConnectionType::WiFi));
    monitor.start().unwrap();
    monitor.stop();
    observer.push(PathSnapshot::connected(ConnectionType::Ethernet));

    assert_eq!(journal.entries(), vec!["start", "stop"]);
    assert_eq!(monitor.current_status(), ConnectionStatus::NotConnected);
}

#[test]
fn test_last_registration_wins() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = first.clone();
    monitor.set_on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = second.clone();
    monitor.set_on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    monitor.start().unwrap();
    observer.push(PathSnapshot::connected(ConnectionType::WiFi));

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    monitor.clear_on_change();
    observer.push(PathSnapshot::disconnected());
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_restart_after_stop() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());
    let journal = Journal::default();
    journal.attach(&monitor);

    monitor.start().unwrap();
    monitor.stop();
    monitor.start().unwrap();
    observer.push(PathSnapshot::connected(ConnectionType::Ethernet));

    assert_eq!(
        journal.entries(),
        vec!["start", "stop", "start", "change:connected via Ethernet"]
    );
    assert_eq!(monitor.monitoring_state(), MonitoringState::Running);
}

#[test]
fn test_stop_waits_for_in_flight_change() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());

    let entered = Arc::new(AtomicBool::new(false));
    let finished = Arc::new(AtomicBool::new(false));
    {
        let entered = entered.clone();
        let finished = finished.clone();
        monitor.set_on_change(move |_| {
            entered.store(true, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            finished.store(true, Ordering::SeqCst);
        });
    }

    monitor.start().unwrap();

    let pusher = {
        let observer = observer.clone();
        thread::spawn(move || {
            observer.push(PathSnapshot::connected(ConnectionType::WiFi));
        })
    };

    while !entered.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    monitor.stop();
    assert!(finished.load(Ordering::SeqCst), "stop returned during on-change");

    pusher.join().unwrap();
}

#[test]
fn test_no_change_after_stop_under_concurrent_updates() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());

    let stopped = Arc::new(AtomicBool::new(false));
    let violations = Arc::new(AtomicUsize::new(0));
    let changes = Arc::new(AtomicUsize::new(0));
    {
        let stopped = stopped.clone();
        let violations = violations.clone();
        let changes = changes.clone();
        monitor.set_on_change(move |_| {
            changes.fetch_add(1, Ordering::SeqCst);
            if stopped.load(Ordering::SeqCst) {
                violations.fetch_add(1, Ordering::SeqCst);
            }
        });
    }

    monitor.start().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let pusher = {
        let observer = observer.clone();
        let done = done.clone();
        thread::spawn(move || {
            let kinds = [ConnectionType::WiFi, ConnectionType::Cellular];
            let mut i = 0;
            while !done.load(Ordering::SeqCst) {
                observer.push(PathSnapshot::connected(kinds[i % kinds.len()]));
                i += 1;
            }
        })
    };

    while changes.load(Ordering::SeqCst) < 10 {
        thread::yield_now();
    }
    monitor.stop();
    stopped.store(true, Ordering::SeqCst);

    thread::sleep(Duration::from_millis(20));
    done.store(true, Ordering::SeqCst);
    pusher.join().unwrap();

    assert_eq!(violations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_stop_from_on_change_hook() {
    let observer = ManualPathObserver::new();
    let monitor = Arc::new(ReachabilityMonitor::new(observer.clone()));
    let stops = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&monitor);
    monitor.set_on_change(move |view| {
        if !view.current_status().is_connected() {
            if let Some(monitor) = weak.upgrade() {
                monitor.stop();
            }
        }
    });
    let counter = stops.clone();
    monitor.set_on_stop(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    monitor.start().unwrap();
    observer.push(PathSnapshot::connected(ConnectionType::WiFi));
    assert!(monitor.is_monitoring());

    observer.push(PathSnapshot::disconnected());
    assert!(!monitor.is_monitoring());
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_view_outlives_monitor() {
    let observer = ManualPathObserver::new();
    let monitor = ReachabilityMonitor::new(observer.clone());
    monitor.start().unwrap();
    observer.push(PathSnapshot::connected(ConnectionType::Ethernet));

    let view = monitor.view();
    assert!(view.is_monitoring());

    drop(monitor);
    assert!(!view.is_monitoring());
    assert_eq!(view.current_status(), ConnectionStatus::NotConnected);
}

// ============================================================================
// System observer
// ============================================================================

#[test]
fn test_list_interfaces() {
    let interfaces = NetworkInterface::list();
    // Should have at least a loopback interface on any system
    if let Some(lo) = interfaces.iter().find(|iface| iface.is_loopback()) {
        assert_eq!(lo.kind, ConnectionType::Loopback);
    }
    for iface in &interfaces {
        assert!(!iface.name.is_empty());
        assert_eq!(
            iface.all_addresses().len(),
            iface.ipv4_addresses.len() + iface.ipv6_addresses.len()
        );
    }
}

#[test]
fn test_system_current_path() {
    // Actual state depends on the system; just check it is well formed
    let path = SystemPathObserver::new().current_path();
    if !path.is_connected() {
        assert_eq!(path, PathSnapshot::disconnected());
    } else {
        assert!(path.interface.is_some());
    }
}

#[test]
fn test_system_monitor_start_stop() {
    let monitor = ReachabilityMonitor::system();
    assert!(!monitor.is_monitoring(), "Monitor should not be running initially");

    // Sandboxes may refuse netlink; failing to start must leave the monitor idle
    if monitor.start().is_ok() {
        assert!(monitor.is_monitoring());
        monitor.stop();
    }
    assert!(!monitor.is_monitoring());
}
