// Shared test helpers

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysdash::models::*;
use sysdash::sampler::SamplerConfig;
use sysdash::source::{MetricSource, SourceError};

/// A scripted metric source. Queued readings are handed out in order;
/// `None` entries and exhausted queues read as unavailable.
#[derive(Default)]
pub struct FakeSource {
    pub cpu: VecDeque<Option<CpuTicks>>,
    pub memory: Option<Capacity>,
    pub disks: Vec<(PathBuf, Capacity)>,
    pub gpu: VecDeque<Option<f64>>,
    pub network: VecDeque<Option<NetworkCounters>>,
    pub temperature: Option<f64>,
    pub interfaces: Vec<String>,
    pub network_reads: Vec<String>,
}

impl FakeSource {
    pub fn cpu(mut self, readings: impl IntoIterator<Item = Option<(u64, u64)>>) -> Self {
        self.cpu = readings
            .into_iter()
            .map(|r| {
                r.map(|(total, idle)| CpuTicks {
                    busy: total - idle,
                    idle,
                    total,
                })
            })
            .collect();
        self
    }

    pub fn network(mut self, readings: impl IntoIterator<Item = Option<(u64, u64)>>) -> Self {
        self.network = readings
            .into_iter()
            .map(|r| r.map(|(sent, received)| NetworkCounters { sent, received }))
            .collect();
        self
    }
}

impl MetricSource for FakeSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SourceError> {
        self.cpu
            .pop_front()
            .flatten()
            .ok_or(SourceError::Unavailable("cpu"))
    }

    fn memory(&mut self) -> Result<Capacity, SourceError> {
        self.memory.ok_or(SourceError::Unavailable("memory"))
    }

    fn disk(&mut self, volume: &Path) -> Result<Capacity, SourceError> {
        self.disks
            .iter()
            .find(|(mount, _)| mount == volume)
            .map(|(_, capacity)| *capacity)
            .ok_or(SourceError::Unavailable("disk volume"))
    }

    fn gpu_utilization(&mut self) -> Result<f64, SourceError> {
        self.gpu
            .pop_front()
            .flatten()
            .ok_or(SourceError::Unavailable("gpu engine"))
    }

    fn network_counters(&mut self, interface: &str) -> Result<NetworkCounters, SourceError> {
        self.network_reads.push(interface.to_string());
        self.network
            .pop_front()
            .flatten()
            .ok_or(SourceError::Unavailable("network interface"))
    }

    fn cpu_temperature(&mut self) -> Result<f64, SourceError> {
        self.temperature
            .ok_or(SourceError::Unavailable("cpu temperature"))
    }

    fn active_interface(&mut self, preferred: Option<&str>) -> Option<String> {
        match preferred {
            Some(name) => self.interfaces.iter().find(|i| *i == name).cloned(),
            None => self.interfaces.first().cloned(),
        }
    }

    fn identity(&self) -> SystemIdentity {
        SystemIdentity {
            host_name: "testbox".into(),
            os_description: "TestOS 1.0".into(),
        }
    }
}

/// No settling pauses, root volume, 25-sample window.
pub fn sampler_config() -> SamplerConfig {
    SamplerConfig {
        cpu_settle: Duration::ZERO,
        gpu_settle: Duration::ZERO,
        disk_volume: PathBuf::from("/"),
        network_interface: None,
        rate_floor: Duration::from_secs(1),
        history_len: 25,
    }
}
