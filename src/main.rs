//! # Vibration Monitor
//!
//! Live RPM and vibration telemetry from a serial-attached microcontroller.
//!
//! The board prints one JSON object per line; this application buffers the
//! most recent samples and periodically prints a report of the session.

use anyhow::{bail, Result};
use clap::Parser;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use vibration_monitor::args::MonitorArgs;
use vibration_monitor::config::{Config, LoggingConfig, SerialConfig};
use vibration_monitor::dashboard::{render_json, render_text};
use vibration_monitor::demo::{DemoSource, DEFAULT_STEP_SECS};
use vibration_monitor::monitor::Monitor;
use vibration_monitor::serial::{list_ports, LineSource, SerialLineSource, DEFAULT_DEVICE_PATHS};
use vibration_monitor::telemetry::TelemetrySession;

/// Period between serial polls
const SERIAL_POLL_PERIOD_MS: u64 = 20;

/// Upper bound on lines read per serial poll
const MAX_LINES_PER_POLL: usize = 32;

/// Number of refreshes between ingest status log messages
const LOG_INTERVAL_REFRESHES: u64 = 50;

/// Main entry point for the vibration monitor
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Parse arguments, load and validate configuration
///    - Set up logging (console, or daily rolling files)
///    - Open the serial port (or the demo source) and wait for the board to settle
///
/// 2. **Main Loop**
///    - Poll the source and ingest samples, exiting if the device goes away
///    - Print a snapshot report at the configured refresh rate (1-10 Hz)
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns error if:
/// - The configuration file cannot be read or is invalid
/// - The serial port cannot be opened (no retry; re-run to reconnect)
/// - The connection is lost while running
#[tokio::main]
async fn main() -> Result<()> {
    let args = MonitorArgs::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = &args.port {
        config.serial.port = port.clone();
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    config.validate()?;

    let _log_guard = init_logging(&config.logging);

    info!("Vibration Monitor v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.list_ports {
        let ports = list_ports()?;
        if ports.is_empty() {
            println!("No serial ports found");
        }
        for port in ports {
            println!("{}", port);
        }
        return Ok(());
    }

    let (source, poll_period, lines_per_poll): (Box<dyn LineSource>, Duration, usize) = if args.demo {
        info!("Running with synthetic telemetry");
        (
            Box::new(DemoSource::new()) as Box<dyn LineSource>,
            Duration::from_secs_f64(DEFAULT_STEP_SECS),
            1,
        )
    } else {
        let source = match open_serial(&config.serial).await {
            Ok(source) => source,
            Err(e) => {
                error!("Could not connect: {}", e);
                return Err(e.into());
            }
        };
        (
            Box::new(source) as Box<dyn LineSource>,
            Duration::from_millis(SERIAL_POLL_PERIOD_MS),
            MAX_LINES_PER_POLL,
        )
    };

    let device = source.describe();
    let mut monitor = Monitor::new(TelemetrySession::new(config.session.capacity));
    monitor.connect(source);

    let mut poll_interval = interval(poll_period);
    poll_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut refresh_interval = interval(config.display.refresh_period());
    refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        "Refreshing at {}Hz, keeping the last {} samples",
        config.display.update_rate_hz, config.session.capacity
    );
    info!("Press Ctrl+C to exit");

    let mut refresh_count: u64 = 0;

    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                monitor.drain(lines_per_poll).await;
                if !monitor.is_connected() {
                    error!("Connection to {} lost, re-run to reconnect", device);
                    bail!("connection to {} lost", device);
                }
            }

            _ = refresh_interval.tick() => {
                let snapshot = monitor.snapshot();
                if args.json {
                    println!("{}", render_json(&snapshot, config.session.recent_rows));
                } else {
                    print!("{}", render_text(&snapshot, &config.display, config.session.recent_rows));
                }

                refresh_count += 1;
                if refresh_count % LOG_INTERVAL_REFRESHES == 0 {
                    let stats = monitor.stats();
                    info!(
                        "Ingested {} samples ({} malformed, {} discarded, {} read errors)",
                        stats.accepted, stats.malformed, stats.discarded, stats.transport_errors
                    );
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    monitor.disconnect();
    let stats = monitor.stats();
    info!("Total samples ingested: {}", stats.accepted);

    Ok(())
}

/// Open the configured port, or the first default device when none is set,
/// then give the board time to reset.
async fn open_serial(serial: &SerialConfig) -> vibration_monitor::error::Result<SerialLineSource> {
    let source = if serial.port.is_empty() {
        SerialLineSource::open_first(DEFAULT_DEVICE_PATHS, serial.baud_rate, serial.poll_timeout())?
    } else {
        SerialLineSource::open(&serial.port, serial.baud_rate, serial.poll_timeout())?
    };

    if !serial.settle().is_zero() {
        info!("Waiting {}ms for the board to reset", serial.settle_ms);
        tokio::time::sleep(serial.settle()).await;
    }

    Ok(source)
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// must live until exit so buffered file logs are flushed.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    if logging.log_dir.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&logging.log_dir, "vibration-monitor.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_constants() {
        // A 115200 baud board printing ~100 byte lines stays well under 32 lines per 20ms
        assert_eq!(SERIAL_POLL_PERIOD_MS, 20);
        assert_eq!(MAX_LINES_PER_POLL, 32);
    }

    #[test]
    fn test_log_interval_at_default_rate() {
        // At the default 5Hz refresh, 50 refreshes = 10 seconds
        let seconds = LOG_INTERVAL_REFRESHES as f64 / 5.0;
        assert_eq!(seconds, 10.0);
    }

    #[test]
    fn test_refresh_period_matches_rate() {
        let config = Config::default();
        assert_eq!(config.display.refresh_period(), Duration::from_millis(200));
    }
}
