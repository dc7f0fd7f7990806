use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use can_transport as can;
use can_transport::CanBus;
use vehicle_frames as vf;

mod display;
use display::TerminalDisplay;

/// Receive timeout while waiting for frames, so keyboard input stays responsive.
const POLL_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(
    name = "can-dash",
    version,
    about = "Live terminal dashboard for vehicle CAN traffic"
)]
struct Cli {
    /// CAN interface to attach to (e.g., can0, vcan0)
    ifname: String,

    /// Frame source backend
    #[arg(long, value_enum, default_value_t = Backend::default())]
    backend: Backend,

    /// Write logs to this file instead of stderr (the terminal is owned by the display)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Maximum number of unknown identifiers to track
    #[arg(long, default_value_t = vf::DEFAULT_UNKNOWN_CAPACITY)]
    unknown_capacity: usize,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum Backend {
    /// Linux SocketCAN raw socket
    #[default]
    Socketcan,
    /// Synthetic in-process traffic
    Mock,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_file.as_deref())?;

    let hub = vf::MetricsHub::new().map_err(anyhow::Error::msg)?;
    let dispatcher = vf::Dispatcher::new(vf::UnknownTracker::new(cli.unknown_capacity))
        .with_metrics(hub.dispatch.clone());

    info!(interface = %cli.ifname, backend = ?cli.backend, "starting");
    let outcome = match cli.backend {
        #[cfg(target_os = "linux")]
        Backend::Socketcan => {
            let bus = can::SocketCanBus::open(&cli.ifname)
                .with_context(|| format!("opening {}", cli.ifname))?;
            watch(bus, dispatcher)
        }
        #[cfg(not(target_os = "linux"))]
        Backend::Socketcan => anyhow::bail!("the socketcan backend is only available on Linux"),
        Backend::Mock => {
            let bus = can::MockBus::open(&cli.ifname)?;
            watch(bus, dispatcher)
        }
    };
    let m = &hub.dispatch;
    info!(
        rx = m.rx_frames.get(),
        decoded = m.decoded_frames.get(),
        truncated = m.truncated_frames.get(),
        unknown = m.unknown_tracked.get(),
        "session summary"
    );
    debug!("{}", hub.encode_text());
    outcome
}

/// Pull frames and render them until the operator quits or the source fails.
/// The display is released before any error reaches the caller.
fn watch<B: CanBus>(mut bus: B, mut dispatcher: vf::Dispatcher) -> Result<()> {
    let mut display = TerminalDisplay::acquire().context("initialising terminal")?;
    loop {
        vf::pump_one(&mut bus, &mut dispatcher, &mut display, Some(POLL_MS))?;
        if display.quit_requested()? {
            info!("quit requested");
            return Ok(());
        }
    }
}

fn setup_tracing(log_file: Option<&Path>) -> Result<()> {
    // Best-effort; avoid panics if already set
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file: {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}
