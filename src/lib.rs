//! Thermal zone bridge.
//!
//! Reads per-zone temperatures from the Linux thermal subsystem
//! (`/sys/class/thermal/thermal_zone*`) and reports them as timestamped,
//! tagged samples to an [`Accumulator`] sink:
//!
//! - [`monitor`] - Zone discovery and polling (`ZoneMonitor`)
//! - [`telemetry`] - Sample data model and accumulator sink
//! - [`serialization`] - JSON/CBOR encoding of shipped samples
//! - [`config`] - Configuration loading (JSON5 format)
//!
//! # Example
//!
//! ```no_run
//! use thermal_zone_bridge::{MemoryAccumulator, ZoneMonitor};
//!
//! let monitor = ZoneMonitor::new();
//! monitor.start()?;
//!
//! let mut acc = MemoryAccumulator::new();
//! monitor.poll(&mut acc)?;
//! for sample in acc.drain() {
//!     println!("{:?}", sample);
//! }
//! # Ok::<(), thermal_zone_bridge::MonitorError>(())
//! ```

pub mod config;
pub mod monitor;
pub mod serialization;
pub mod telemetry;

// Re-export commonly used types at the crate root
pub use config::{ConfigError, LoggingConfig, ThermalBridgeConfig, ThermalConfig};
pub use monitor::{DEFAULT_SYSFS_ROOT, MEASUREMENT, MonitorError, ZoneMonitor};
pub use serialization::{CodecError, Format, decode, encode};
pub use telemetry::{
    Accumulator, FieldValue, MemoryAccumulator, Sample, current_timestamp_millis,
};

/// Initialize tracing with the given configuration.
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// level when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| ConfigError::Validation(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
