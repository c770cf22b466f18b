//! Thermal zone discovery and polling.
//!
//! Zones are discovered once by [`ZoneMonitor::start`], which walks the
//! thermal sysfs tree and caches each zone's descriptive type and the path of
//! its live reading. Every [`ZoneMonitor::poll`] then re-reads the cached
//! `temp` file per zone and emits one tagged sample to the accumulator.

use crate::telemetry::{Accumulator, Sample};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Default sysfs root for the Linux thermal subsystem.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/thermal";

/// Measurement name used for emitted samples.
pub const MEASUREMENT: &str = "thermal_zone";

/// Directory entries with this name prefix are treated as zones.
const ZONE_PREFIX: &str = "thermal_zone";

/// Error type for monitor operations.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to scan {path}: {source}")]
    DiscoveryScan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read zone type file {path}: {source}")]
    DiscoveryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read temperature file {path}: {source}")]
    TempRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("temperature file {path} holds {content:?}, not a base-10 integer: {source}")]
    TempParse {
        path: PathBuf,
        content: String,
        #[source]
        source: ParseIntError,
    },
}

/// One discovered thermal zone.
#[derive(Debug, Clone)]
struct ZoneRecord {
    /// Descriptive type string (e.g., "acpitz", "cpu-thermal"), read once
    /// at discovery and immutable afterwards.
    zone_type: String,

    /// Path of the file holding the live reading, re-validated only by
    /// attempting the read on each poll.
    temp_path: PathBuf,
}

/// Monitor for thermal zone temperatures.
///
/// The zone table is owned exclusively by the monitor and guarded by a
/// single lock held for the full duration of each operation, so `start`,
/// `poll`, and `stop` never interleave on the same instance.
pub struct ZoneMonitor {
    root: PathBuf,
    zones: Mutex<HashMap<String, ZoneRecord>>,
}

impl ZoneMonitor {
    /// Create a monitor scanning the default sysfs root.
    pub fn new() -> Self {
        Self::with_root(DEFAULT_SYSFS_ROOT)
    }

    /// Create a monitor scanning a custom root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            zones: Mutex::new(HashMap::new()),
        }
    }

    /// Discover thermal zones under the configured root.
    ///
    /// Resets the zone table and walks the root recursively (symlinked
    /// directories are not followed). Every entry whose name starts with
    /// `thermal_zone` becomes a zone: its `type` file is read and trimmed,
    /// and the sibling `temp` file is recorded as the reading path.
    ///
    /// Idempotent: calling `start` again replaces the table with a fresh
    /// scan. If the root is missing or unreadable, the scan fails with
    /// [`MonitorError::DiscoveryScan`] and no zones are available.
    ///
    /// A failed `type` read aborts the scan with
    /// [`MonitorError::DiscoveryRead`], but zones recorded earlier in the
    /// same scan remain in the table. Callers that need a consistent view
    /// after a failed `start` should call [`stop`](Self::stop) or retry.
    pub fn start(&self) -> Result<(), MonitorError> {
        let mut zones = self.zones.lock().unwrap_or_else(PoisonError::into_inner);
        zones.clear();
        scan_zones(&self.root, &mut zones)?;
        debug!("Discovered {} thermal zones under {}", zones.len(), self.root.display());
        Ok(())
    }

    /// Read every known zone once and emit one sample per zone.
    ///
    /// Each sample carries the measurement name `thermal_zone`, the field
    /// `value` (the raw integer reading, millidegrees on Linux), and the
    /// tags `zone` and `type`. Iteration order is unspecified.
    ///
    /// The first read or parse failure aborts the pass and is returned to
    /// the caller; samples emitted earlier in the same pass stay delivered
    /// (the accumulator has no rollback). An empty table yields zero
    /// samples and succeeds, so polling before `start` is a no-op.
    pub fn poll(&self, acc: &mut dyn Accumulator) -> Result<(), MonitorError> {
        let zones = self.zones.lock().unwrap_or_else(PoisonError::into_inner);
        let mut count = 0;

        for (label, record) in zones.iter() {
            let raw = fs::read_to_string(&record.temp_path).map_err(|source| {
                MonitorError::TempRead {
                    path: record.temp_path.clone(),
                    source,
                }
            })?;

            let trimmed = raw.trim();
            let value: i64 = trimmed.parse().map_err(|source| MonitorError::TempParse {
                path: record.temp_path.clone(),
                content: trimmed.to_string(),
                source,
            })?;

            acc.add_sample(
                Sample::new(MEASUREMENT)
                    .with_field("value", value)
                    .with_tag("zone", label.as_str())
                    .with_tag("type", record.zone_type.as_str()),
            );
            count += 1;
        }

        debug!("Emitted {} thermal zone samples", count);
        Ok(())
    }

    /// Discard the zone table. Idempotent, never fails.
    pub fn stop(&self) {
        let mut zones = self.zones.lock().unwrap_or_else(PoisonError::into_inner);
        zones.clear();
    }

    /// Number of zones currently known.
    pub fn zone_count(&self) -> usize {
        self.zones
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ZoneMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `dir`, recording zone entries and recursing into real (non-symlink)
/// subdirectories.
fn scan_zones(dir: &Path, zones: &mut HashMap<String, ZoneRecord>) -> Result<(), MonitorError> {
    let entries = fs::read_dir(dir).map_err(|source| MonitorError::DiscoveryScan {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| MonitorError::DiscoveryScan {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let path = entry.path();

        if name.to_string_lossy().starts_with(ZONE_PREFIX) {
            let type_path = path.join("type");
            let zone_type = fs::read_to_string(&type_path).map_err(|source| {
                MonitorError::DiscoveryRead {
                    path: type_path,
                    source,
                }
            })?;

            zones.insert(
                name.to_string_lossy().into_owned(),
                ZoneRecord {
                    zone_type: zone_type.trim().to_string(),
                    temp_path: path.join("temp"),
                },
            );
        }

        let file_type = entry.file_type().map_err(|source| MonitorError::DiscoveryScan {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            scan_zones(&path, zones)?;
        }
    }

    Ok(())
}
