use crate::rate::MIN_ELAPSED;
use crate::sampler::SamplerConfig;
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Used when `CONFIG_FILE` is not set. Absent means defaults.
pub const DEFAULT_CONFIG_PATH: &str = "sysdash.toml";

/// Upper bound for graph width and height, in cells.
pub const MAX_GRAPH_CELLS: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitoring: MonitoringConfig,
    pub display: DisplayConfig,
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub sample_interval_ms: u64,
    /// Pause between the priming and the first measured cpu read.
    pub cpu_settle_ms: u64,
    /// Pause between the two gpu reads of each tick.
    pub gpu_settle_ms: u64,
    /// How often to log loop stats (frames drawn, draw failures) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            cpu_settle_ms: 200,
            gpu_settle_ms: 100,
            stats_log_interval_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Samples kept per trend graph.
    pub graph_width: usize,
    /// Vertical bands per trend graph.
    pub graph_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            graph_width: 25,
            graph_height: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Mount point whose usage is shown.
    pub disk_volume: PathBuf,
    /// Overrides interface discovery; matched ignoring case and whitespace.
    pub network_interface: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            disk_volume: default_disk_volume(),
            network_interface: None,
        }
    }
}

fn default_disk_volume() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log to this file instead of stderr, keeping the dashboard clean.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `CONFIG_FILE`, or `sysdash.toml` if it exists, or falls back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
                Err(e) => Err(e).context(format!("reading config file {DEFAULT_CONFIG_PATH}")),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            (1..=MAX_GRAPH_CELLS).contains(&self.display.graph_width),
            "display.graph_width must be in 1..={MAX_GRAPH_CELLS}, got {}",
            self.display.graph_width
        );
        anyhow::ensure!(
            (1..=MAX_GRAPH_CELLS).contains(&self.display.graph_height),
            "display.graph_height must be in 1..={MAX_GRAPH_CELLS}, got {}",
            self.display.graph_height
        );
        anyhow::ensure!(
            !self.sources.disk_volume.as_os_str().is_empty(),
            "sources.disk_volume must be non-empty"
        );
        if let Some(interface) = &self.sources.network_interface {
            anyhow::ensure!(
                !interface.trim().is_empty(),
                "sources.network_interface must be non-empty when set"
            );
        }
        Ok(())
    }

    pub fn sampler(&self) -> SamplerConfig {
        SamplerConfig {
            cpu_settle: Duration::from_millis(self.monitoring.cpu_settle_ms),
            gpu_settle: Duration::from_millis(self.monitoring.gpu_settle_ms),
            disk_volume: self.sources.disk_volume.clone(),
            network_interface: self.sources.network_interface.clone(),
            rate_floor: Duration::from_millis(self.monitoring.sample_interval_ms).min(MIN_ELAPSED),
            history_len: self.display.graph_width,
        }
    }
}
