//! Thermal zone bridge driver.
//!
//! Discovers thermal zones at startup, polls them on a fixed interval, and
//! writes encoded samples to stdout, one payload per line. Poll failures are
//! logged and the next scheduled poll proceeds; retry policy belongs to the
//! driver, not the monitor.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use thermal_zone_bridge::config::ThermalBridgeConfig;
use thermal_zone_bridge::monitor::ZoneMonitor;
use thermal_zone_bridge::serialization::encode;
use thermal_zone_bridge::telemetry::MemoryAccumulator;

/// CLI arguments for the thermal zone bridge.
#[derive(Parser, Debug)]
#[command(about = "Thermal zone telemetry bridge")]
struct Args {
    /// Path to configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ThermalBridgeConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ThermalBridgeConfig::default(),
    };

    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    thermal_zone_bridge::init_tracing(&config.logging).map_err(|e| anyhow::anyhow!("{}", e))?;

    let hostname = config.get_hostname();
    let format = config.thermal.data_format;
    let interval = Duration::from_secs(config.thermal.poll_interval_secs);

    let monitor = ZoneMonitor::with_root(&config.thermal.sysfs_root);
    monitor
        .start()
        .context("Thermal zone discovery failed")?;

    info!(
        "Thermal bridge running ({} zones, interval: {}s, hostname: {})",
        monitor.zone_count(),
        config.thermal.poll_interval_secs,
        hostname
    );

    let mut acc = MemoryAccumulator::new();
    let stdout = std::io::stdout();

    loop {
        if let Err(e) = monitor.poll(&mut acc) {
            error!("Polling error: {}", e);
        }

        // Samples gathered before a mid-pass failure still ship.
        let samples = acc.drain();
        debug!("Shipping {} samples", samples.len());

        let mut out = stdout.lock();
        for sample in samples {
            let sample = sample.with_tag("host", hostname.clone());
            let payload = encode(&sample, format).context("Failed to encode sample")?;
            out.write_all(&payload)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        drop(out);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    monitor.stop();
    info!("Thermal bridge stopped");
    Ok(())
}
