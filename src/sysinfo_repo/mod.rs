// Host metrics via sysinfo, with Linux /proc and /sys where sysinfo has no raw counter

mod discovery;
mod linux;

pub use discovery::{InterfaceCandidate, pick_interface};

use crate::models::*;
use crate::source::{MetricSource, SourceError};
use std::path::{Path, PathBuf};
#[cfg(not(target_os = "linux"))]
use std::time::Instant;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

pub struct SysinfoRepo {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    gpu_busy_file: Option<PathBuf>,
    /// Cumulative ticks synthesized from sysinfo's usage where /proc/stat is absent.
    #[cfg(not(target_os = "linux"))]
    emulated_cpu: Option<(Instant, CpuTicks)>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        let gpu_busy_file = linux::find_gpu_busy_file();
        match &gpu_busy_file {
            Some(path) => tracing::info!(path = %path.display(), "GPU engine found"),
            None => tracing::info!("No GPU engine exposing utilization; GPU will read 0"),
        }
        Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            gpu_busy_file,
            #[cfg(not(target_os = "linux"))]
            emulated_cpu: None,
        }
    }

    /// Turns sysinfo's since-last-refresh usage into monotonically growing
    /// millisecond counters so the estimator can treat every platform alike.
    #[cfg(not(target_os = "linux"))]
    fn emulated_cpu_ticks(&mut self) -> CpuTicks {
        self.sys.refresh_cpu_usage();
        let now = Instant::now();
        let usage = f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0);

        let ticks = match self.emulated_cpu {
            None => CpuTicks::default(),
            Some((at, prev)) => {
                let elapsed = now.duration_since(at).as_millis() as u64;
                let busy = ((elapsed as f64 * usage / 100.0).round() as u64).min(elapsed);
                CpuTicks {
                    busy: prev.busy + busy,
                    idle: prev.idle + (elapsed - busy),
                    total: prev.total + elapsed,
                }
            }
        };
        self.emulated_cpu = Some((now, ticks));
        ticks
    }
}

impl MetricSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_ticks"))]
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SourceError> {
        #[cfg(target_os = "linux")]
        {
            linux::read_cpu_ticks()
        }
        #[cfg(not(target_os = "linux"))]
        {
            Ok(self.emulated_cpu_ticks())
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    fn memory(&mut self) -> Result<Capacity, SourceError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SourceError::Unavailable("memory"));
        }
        Ok(Capacity {
            total,
            free: self.sys.available_memory(),
        })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "disk"))]
    fn disk(&mut self, volume: &Path) -> Result<Capacity, SourceError> {
        self.disks.refresh(false);
        self.disks
            .list()
            .iter()
            .find(|d| d.mount_point() == volume)
            .map(|d| Capacity {
                total: d.total_space(),
                free: d.available_space(),
            })
            .ok_or(SourceError::Unavailable("disk volume"))
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "gpu_utilization"))]
    fn gpu_utilization(&mut self) -> Result<f64, SourceError> {
        let path = self
            .gpu_busy_file
            .as_deref()
            .ok_or(SourceError::Unavailable("gpu engine"))?;
        linux::read_gpu_busy(path)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_counters"))]
    fn network_counters(&mut self, interface: &str) -> Result<NetworkCounters, SourceError> {
        self.networks.refresh(true);
        self.networks
            .list()
            .get(interface)
            .map(|data| NetworkCounters {
                sent: data.total_transmitted(),
                received: data.total_received(),
            })
            .ok_or(SourceError::Unavailable("network interface"))
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_temperature"))]
    fn cpu_temperature(&mut self) -> Result<f64, SourceError> {
        self.components.refresh(false);
        cpu_sensor_temperature(
            self.components
                .list()
                .iter()
                .map(|c| (c.label(), c.temperature())),
        )
        .ok_or(SourceError::Unavailable("cpu temperature"))
    }

    fn active_interface(&mut self, preferred: Option<&str>) -> Option<String> {
        self.networks.refresh(true);
        let candidates = self
            .networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceCandidate {
                name: name.clone(),
                is_up: linux::interface_is_up(name),
                has_address: !data.ip_networks().is_empty(),
                traffic: data.total_received().saturating_add(data.total_transmitted()),
            })
            .collect::<Vec<_>>();

        let picked = pick_interface(preferred, &candidates);
        match &picked {
            Some(name) => tracing::info!(interface = %name, "Network interface selected"),
            None => tracing::warn!("No usable network interface; network rates will read 0"),
        }
        picked
    }

    fn identity(&self) -> SystemIdentity {
        let host_name = System::host_name()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "Unknown".into());
        let os_description = linux::read_os_pretty_name()
            .or_else(System::long_os_version)
            .or_else(|| {
                System::name().map(|name| {
                    format!("{} {}", name, System::os_version().unwrap_or_default())
                        .trim()
                        .to_string()
                })
            })
            .unwrap_or_else(|| std::env::consts::OS.into());
        SystemIdentity {
            host_name,
            os_description,
        }
    }
}

/// First finite reading from a sensor whose label names the cpu package.
/// Other sensors (nvme, wifi, acpi) are never reported as the cpu.
fn cpu_sensor_temperature<'a>(
    sensors: impl IntoIterator<Item = (&'a str, Option<f32>)>,
) -> Option<f64> {
    const CPU_LABELS: [&str; 5] = ["package", "tctl", "k10temp", "coretemp", "cpu"];
    sensors
        .into_iter()
        .filter(|(label, _)| {
            let label = label.to_lowercase();
            CPU_LABELS.iter().any(|k| label.contains(k))
        })
        .filter_map(|(_, temperature)| temperature.map(f64::from))
        .find(|t| t.is_finite())
}
