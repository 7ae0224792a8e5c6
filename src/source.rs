// Raw metric access: the seam between the sampler and the platform

use crate::models::{Capacity, CpuTicks, NetworkCounters, SystemIdentity};
use std::path::Path;
use thiserror::Error;

/// Why a raw reading could not be produced this tick.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The platform has no such counter (no GPU engine, unknown volume, ...).
    #[error("{0} unavailable")]
    Unavailable(&'static str),
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },
}

impl SourceError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// A provider of raw host readings.
///
/// Every method answers independently; a failure in one never affects another.
/// Cumulative values (cpu ticks, network bytes) are returned as-is, rate
/// derivation happens in [`crate::rate`].
pub trait MetricSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SourceError>;

    fn memory(&mut self) -> Result<Capacity, SourceError>;

    fn disk(&mut self, volume: &Path) -> Result<Capacity, SourceError>;

    /// Instantaneous GPU engine utilization in percent.
    fn gpu_utilization(&mut self) -> Result<f64, SourceError>;

    fn network_counters(&mut self, interface: &str) -> Result<NetworkCounters, SourceError>;

    /// CPU package temperature in degrees Celsius.
    fn cpu_temperature(&mut self) -> Result<f64, SourceError>;

    /// Picks the interface whose counters should be shown.
    ///
    /// `preferred` comes from configuration and wins when it matches anything.
    fn active_interface(&mut self, preferred: Option<&str>) -> Option<String>;

    fn identity(&self) -> SystemIdentity;
}
