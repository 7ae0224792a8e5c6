// Raw readings handed over by a metric source

/// Cumulative CPU time counters, summed over all cpus.
///
/// Units are whatever the platform counts in (USER_HZ ticks on Linux,
/// milliseconds when emulated); only deltas between two readings matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub busy: u64,
    pub idle: u64,
    pub total: u64,
}

/// Total and free bytes of a memory pool or volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capacity {
    pub total: u64,
    pub free: u64,
}

impl Capacity {
    /// Percentage of `total` in use. An empty pool reports 0.
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let used = self.total.saturating_sub(self.free);
        (used as f64 / self.total as f64) * 100.0
    }
}

/// Cumulative bytes moved through one network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub sent: u64,
    pub received: u64,
}
