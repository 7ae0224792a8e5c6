// One sampling tick: raw reads, rate derivation, history update

use crate::history::HistoryBuffer;
use crate::models::{CpuTicks, MetricSnapshot, SystemIdentity};
use crate::rate::{CounterId, CpuEstimator, RateEstimator};
use crate::render::Frame;
use crate::source::{MetricSource, SourceError};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::instrument;

const BYTES_PER_KB: f64 = 1024.0;

/// Sampler timing and source selection.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Pause between the priming cpu read and the first measured one.
    /// Only the first measured tick pauses; later ticks measure cpu over
    /// the whole time since the previous tick.
    pub cpu_settle: Duration,
    /// Pause between the two gpu reads of a tick.
    pub gpu_settle: Duration,
    pub disk_volume: PathBuf,
    pub network_interface: Option<String>,
    /// Elapsed-time floor for network rates; at most one sampling interval.
    pub rate_floor: Duration,
    /// Trend window width.
    pub history_len: usize,
}

/// All state the dashboard keeps between ticks.
pub struct Sampler<S> {
    source: S,
    config: SamplerConfig,
    identity: SystemIdentity,
    interface: Option<String>,
    cpu: CpuEstimator,
    network: RateEstimator<CounterId>,
    cpu_history: HistoryBuffer,
    ram_history: HistoryBuffer,
    gpu_history: HistoryBuffer,
    started: Instant,
}

impl<S: MetricSource> Sampler<S> {
    pub fn new(mut source: S, config: SamplerConfig) -> Self {
        let identity = source.identity();
        let interface = source.active_interface(config.network_interface.as_deref());
        let history_len = config.history_len;
        let rate_floor = config.rate_floor;
        Self {
            source,
            config,
            identity,
            interface,
            cpu: CpuEstimator::new(),
            network: RateEstimator::with_min_elapsed(rate_floor),
            cpu_history: HistoryBuffer::new(history_len),
            ram_history: HistoryBuffer::new(history_len),
            gpu_history: HistoryBuffer::new(history_len),
            started: Instant::now(),
        }
    }

    /// Takes one sample of every metric. Never fails; unreadable metrics read 0.
    #[instrument(skip(self), fields(operation = "tick"))]
    pub async fn tick(&mut self) -> MetricSnapshot {
        let cpu_percent = self.sample_cpu().await;
        let ram_percent = absorb(self.source.memory(), "memory")
            .map(|m| m.usage_percent())
            .unwrap_or(0.0);
        let disk_percent = absorb(self.source.disk(&self.config.disk_volume), "disk")
            .map(|d| d.usage_percent())
            .unwrap_or(0.0);
        let gpu_percent = self.sample_gpu().await;
        let (net_sent_kbps, net_recv_kbps) = self.sample_network();

        self.cpu_history.push(cpu_percent);
        self.ram_history.push(ram_percent);
        self.gpu_history.push(gpu_percent);

        let cpu_temperature = absorb(self.source.cpu_temperature(), "cpu_temperature")
            .map(|c| format!("{c:.1}"))
            .unwrap_or_else(|| "N/A".into());

        MetricSnapshot {
            cpu_percent,
            ram_percent,
            disk_percent,
            gpu_percent,
            net_sent_kbps,
            net_recv_kbps,
            host_name: self.identity.host_name.clone(),
            os_description: self.identity.os_description.clone(),
            uptime: format_uptime(self.started.elapsed()),
            cpu_temperature,
            disk_volume: self.config.disk_volume.display().to_string(),
        }
    }

    /// Bundles a snapshot with the current trend windows for rendering.
    pub fn frame<'a>(&'a self, snapshot: &'a MetricSnapshot) -> Frame<'a> {
        Frame {
            snapshot,
            cpu_history: &self.cpu_history,
            ram_history: &self.ram_history,
            gpu_history: &self.gpu_history,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    async fn sample_cpu(&mut self) -> f64 {
        if !self.cpu.is_primed() {
            let reading = self.read_cpu();
            self.cpu.utilization(reading);
            if !self.cpu.is_primed() {
                return 0.0;
            }
            tokio::time::sleep(self.config.cpu_settle).await;
        }
        let reading = self.read_cpu();
        self.cpu.utilization(reading)
    }

    fn read_cpu(&mut self) -> Option<CpuTicks> {
        absorb(self.source.cpu_ticks(), "cpu_ticks")
    }

    /// The first read wakes the counter up; the value after the settling
    /// pause is the one reported.
    async fn sample_gpu(&mut self) -> f64 {
        if absorb(self.source.gpu_utilization(), "gpu_utilization").is_none() {
            return 0.0;
        }
        tokio::time::sleep(self.config.gpu_settle).await;
        absorb(self.source.gpu_utilization(), "gpu_utilization")
            .map(|g| g.clamp(0.0, 100.0))
            .unwrap_or(0.0)
    }

    fn sample_network(&mut self) -> (f64, f64) {
        let counters = match self.interface.as_deref() {
            Some(interface) => absorb(
                self.source.network_counters(interface),
                "network_counters",
            ),
            None => None,
        };
        let now = Instant::now();
        let sent = self
            .network
            .rate(CounterId::NetSent, counters.map(|c| c.sent), now);
        let received = self
            .network
            .rate(CounterId::NetReceived, counters.map(|c| c.received), now);
        (sent / BYTES_PER_KB, received / BYTES_PER_KB)
    }
}

/// Drops a failed reading to `None`, leaving a trace for `RUST_LOG=debug`.
fn absorb<T>(result: Result<T, SourceError>, operation: &'static str) -> Option<T> {
    result
        .map_err(|e| tracing::debug!(error = %e, operation, "metric unavailable this tick"))
        .ok()
}

/// `hh:mm:ss`; hours keep counting past a day.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
