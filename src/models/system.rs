// Host identity and per-tick snapshot models

/// Static host identity; read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemIdentity {
    pub host_name: String,
    pub os_description: String,
}

impl Default for SystemIdentity {
    fn default() -> Self {
        Self {
            host_name: "Unknown".into(),
            os_description: "Unknown".into(),
        }
    }
}

/// Everything shown for one tick. Recomputed every sample, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    pub gpu_percent: f64,
    /// KB/s.
    pub net_sent_kbps: f64,
    /// KB/s.
    pub net_recv_kbps: f64,
    pub host_name: String,
    pub os_description: String,
    /// Time since the dashboard started, `hh:mm:ss`.
    pub uptime: String,
    /// Degrees Celsius with one decimal, or `"N/A"`.
    pub cpu_temperature: String,
    /// Volume the disk percentage refers to.
    pub disk_volume: String,
}
