// Linux-specific helpers: /proc/stat, /etc/os-release, DRM gpu_busy_percent, operstate.

use crate::models::CpuTicks;
use crate::source::SourceError;
#[cfg(target_os = "linux")]
use std::path::Path;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
const PROC_STAT: &str = "/proc/stat";

/// Read the aggregate "cpu" line of /proc/stat.
#[cfg(target_os = "linux")]
pub(super) fn read_cpu_ticks() -> Result<CpuTicks, SourceError> {
    let content =
        std::fs::read_to_string(PROC_STAT).map_err(|e| SourceError::io(PROC_STAT, e))?;
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or(SourceError::Parse {
            what: "/proc/stat",
            detail: "no aggregate cpu line".into(),
        })?;
    parse_cpu_line(line)
}

/// Parse `cpu  user nice system idle iowait irq softirq steal guest guest_nice`.
///
/// guest and guest_nice are already accounted in user and nice, so only the
/// first eight fields count toward the total. iowait counts as idle.
pub(crate) fn parse_cpu_line(line: &str) -> Result<CpuTicks, SourceError> {
    let fields = line
        .split_whitespace()
        .skip(1)
        .take(8)
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SourceError::Parse {
            what: "cpu line",
            detail: e.to_string(),
        })?;

    let [user, nice, system, idle, rest @ ..] = fields.as_slice() else {
        return Err(SourceError::Parse {
            what: "cpu line",
            detail: format!("expected at least 4 counters, got {}", fields.len()),
        });
    };
    let iowait = rest.first().copied().unwrap_or(0);

    let idle = idle + iowait;
    let total = user + nice + system + fields[3..].iter().sum::<u64>();
    Ok(CpuTicks {
        busy: total.saturating_sub(idle),
        idle,
        total,
    })
}

/// Read PRETTY_NAME (or NAME) from /etc/os-release.
pub(super) fn read_os_pretty_name() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        return parse_os_release(&content);
    }
    #[cfg(not(target_os = "linux"))]
    None
}

pub(crate) fn parse_os_release(content: &str) -> Option<String> {
    ["PRETTY_NAME=", "NAME="].iter().find_map(|key| {
        content
            .lines()
            .find_map(|line| line.strip_prefix(key))
            .map(|v| v.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// Find the first DRM card exposing a busy percentage (amdgpu and friends).
pub(super) fn find_gpu_busy_file() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let mut cards = std::fs::read_dir("/sys/class/drm")
            .ok()?
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| {
                name.strip_prefix("card")
                    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect::<Vec<_>>();
        cards.sort();
        return cards
            .into_iter()
            .map(|card| Path::new("/sys/class/drm").join(card).join("device/gpu_busy_percent"))
            .find(|path| path.is_file());
    }
    #[cfg(not(target_os = "linux"))]
    None
}

pub(super) fn read_gpu_busy(path: &std::path::Path) -> Result<f64, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    content
        .trim()
        .parse::<f64>()
        .map_err(|e| SourceError::Parse {
            what: "gpu_busy_percent",
            detail: e.to_string(),
        })
}

/// Whether /sys/class/net/<interface>/operstate says "up". `None` off Linux
/// or when the file is missing.
pub(super) fn interface_is_up(interface_name: &str) -> Option<bool> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/operstate", interface_name);
        let state = std::fs::read_to_string(path).ok()?;
        return Some(matches!(state.trim(), "up" | "unknown"));
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface_name;
        None
    }
}
