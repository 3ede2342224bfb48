use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use netcheck::{AppConfig, AppError, Locale, Renderer, StatusApp, StatusPresenter, UiCommand};
use netcheck_core::{EventLoop, EventLoopProxy, logging};
use netcheck_net::{
    ConnectionType, ManualPathObserver, PathObserver, PathSnapshot, ReachabilityMonitor,
    SystemPathObserver,
};

#[derive(Parser)]
#[command(name = "netcheck")]
#[command(about = "Show the device's network reachability and connection type")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, short, env = "NETCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Display language (en, fr)
    #[arg(long)]
    locale: Option<Locale>,

    /// Replay a scripted sequence of paths instead of watching the network
    #[arg(long)]
    simulate: bool,

    /// Seconds between simulated path changes
    #[arg(long, default_value_t = 3, requires = "simulate")]
    simulate_interval: u64,

    /// Start monitoring immediately
    #[arg(long)]
    autostart: bool,

    /// Log level for NetCheck targets (ignored when RUST_LOG is set)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colours
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(
        cli.locale,
        cli.autostart,
        cli.log_level.clone(),
    )?;

    init_tracing(&config.log_level)?;
    tracing::info!(config = %config.origin_display(), locale = %config.locale, "starting netcheck");

    run(&cli, config).inspect_err(|err| tracing::error!(error = %err, "netcheck failed"))
}

fn init_tracing(level: &str) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = logging::default_directive(&level.to_ascii_lowercase());
            EnvFilter::try_new(&directive).map_err(|e| AppError::Logging {
                directive,
                message: e.to_string(),
            })?
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn run(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::<StatusApp>::new();
    let proxy = event_loop.proxy();

    let observer: Box<dyn PathObserver> = if cli.simulate {
        let observer = ManualPathObserver::with_initial(SIMULATED_PATHS[0].snapshot(), true);
        spawn_simulator(
            observer.clone(),
            proxy.clone(),
            Duration::from_secs(cli.simulate_interval.max(1)),
        )?;
        Box::new(observer)
    } else {
        Box::new(SystemPathObserver::new().include_loopback(config.include_loopback))
    };

    let renderer = Renderer::new(config.palette).with_ansi(!cli.plain);
    let mut app = StatusApp::new(
        ReachabilityMonitor::with_observer(observer),
        StatusPresenter::new(config.locale),
    )
    .with_output(renderer, Box::new(io::stdout()));
    app.bind(&proxy);

    spawn_input(proxy)?;

    app.render();
    if config.autostart {
        if let Err(err) = app.toggle_monitoring() {
            tracing::error!(error = %err, "cannot start monitoring");
        }
    }

    event_loop.run(&mut app)?;
    tracing::info!("netcheck finished");
    Ok(())
}

/// Read commands from stdin: an empty line or `t` toggles, `r` redraws and
/// `q` (or end of input) quits.
fn spawn_input(proxy: EventLoopProxy<StatusApp>) -> io::Result<()> {
    thread::Builder::new()
        .name("netcheck-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let command = match line {
                    Ok(line) => match line.trim() {
                        "" | "t" => UiCommand::Toggle,
                        "r" => UiCommand::Render,
                        "q" => UiCommand::Quit,
                        other => {
                            tracing::warn!(input = other, "unknown command (t: toggle, r: redraw, q: quit)");
                            continue;
                        }
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "cannot read stdin");
                        break;
                    }
                };
                if !send_command(&proxy, command) {
                    return;
                }
            }
            send_command(&proxy, UiCommand::Quit);
        })?;
    Ok(())
}

fn send_command(proxy: &EventLoopProxy<StatusApp>, command: UiCommand) -> bool {
    let quit = proxy.clone();
    let posted = proxy.post(move |app: &mut StatusApp| {
        if app.handle(command).is_break() {
            quit.quit();
        }
    });
    posted.is_ok()
}

struct SimulatedPath {
    connection_type: Option<ConnectionType>,
    interface: &'static str,
}

impl SimulatedPath {
    fn snapshot(&self) -> PathSnapshot {
        match self.connection_type {
            Some(kind) => PathSnapshot::connected(kind).with_interface(self.interface),
            None => PathSnapshot::disconnected(),
        }
    }
}

const SIMULATED_PATHS: &[SimulatedPath] = &[
    SimulatedPath {
        connection_type: Some(ConnectionType::WiFi),
        interface: "wlan0",
    },
    SimulatedPath {
        connection_type: Some(ConnectionType::Cellular),
        interface: "wwan0",
    },
    SimulatedPath {
        connection_type: None,
        interface: "",
    },
    SimulatedPath {
        connection_type: Some(ConnectionType::Ethernet),
        interface: "eth0",
    },
];

/// Cycle through [`SIMULATED_PATHS`] until the UI loop quits.
fn spawn_simulator(
    observer: ManualPathObserver,
    proxy: EventLoopProxy<StatusApp>,
    interval: Duration,
) -> io::Result<()> {
    thread::Builder::new()
        .name("netcheck-simulator".to_string())
        .spawn(move || {
            for path in SIMULATED_PATHS.iter().cycle().skip(1) {
                thread::sleep(interval);
                if proxy.is_quit_requested() {
                    break;
                }
                let snapshot = path.snapshot();
                tracing::debug!(%snapshot, "simulating path change");
                observer.push(snapshot);
            }
        })?;
    Ok(())
}
