//! Rate derivation from cumulative counters.
//!
//! Both estimators keep the last good reading and compare the next one
//! against it. The first reading only primes state. A missing reading
//! yields `0` and leaves state alone, so the following tick still measures
//! against the last value that was actually observed.

use crate::models::CpuTicks;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default elapsed-time floor for [`RateEstimator::rate`]; guards against
/// tiny denominators when two samples land close together.
pub const MIN_ELAPSED: Duration = Duration::from_secs(1);

/// Counters tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterId {
    NetSent,
    NetReceived,
}

#[derive(Debug, Clone, Copy)]
struct CounterState {
    value: u64,
    at: Instant,
}

/// Per-second rates for any number of named cumulative counters.
#[derive(Debug)]
pub struct RateEstimator<K = CounterId> {
    counters: HashMap<K, CounterState>,
    min_elapsed: Duration,
}

impl<K> Default for RateEstimator<K> {
    fn default() -> Self {
        Self::with_min_elapsed(MIN_ELAPSED)
    }
}

impl<K> RateEstimator<K> {
    /// Estimator whose elapsed time never counts as less than `min_elapsed`.
    /// Should not exceed the sampling interval, or steady rates read low.
    pub fn with_min_elapsed(min_elapsed: Duration) -> Self {
        Self {
            counters: HashMap::new(),
            min_elapsed,
        }
    }
}

impl<K: Eq + Hash> RateEstimator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns units per second of `id` since its previous reading.
    ///
    /// A counter that went backwards (wrap, interface reset) reports `0`
    /// and re-baselines on the new value.
    pub fn rate(&mut self, id: K, reading: Option<u64>, now: Instant) -> f64 {
        let Some(value) = reading else {
            return 0.0;
        };

        let Some(prev) = self.counters.insert(id, CounterState { value, at: now }) else {
            return 0.0;
        };

        let delta = value.saturating_sub(prev.value);
        let elapsed = now.saturating_duration_since(prev.at).max(self.min_elapsed);
        delta as f64 / elapsed.as_secs_f64()
    }

    pub fn is_primed(&self, id: &K) -> bool {
        self.counters.contains_key(id)
    }
}

/// CPU utilization from (total, idle) tick pairs.
#[derive(Debug, Default)]
pub struct CpuEstimator {
    last: Option<CpuTicks>,
}

impl CpuEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Busy share of the cpu time elapsed since the previous reading, in `[0, 100]`.
    pub fn utilization(&mut self, reading: Option<CpuTicks>) -> f64 {
        let Some(ticks) = reading else {
            return 0.0;
        };

        let Some(prev) = self.last.replace(ticks) else {
            return 0.0;
        };

        let total = ticks.total.saturating_sub(prev.total);
        if total == 0 {
            return 0.0;
        }
        let idle = ticks.idle.saturating_sub(prev.idle);

        let percent = (1.0 - idle as f64 / total as f64) * 100.0;
        percent.clamp(0.0, 100.0)
    }

    pub fn is_primed(&self) -> bool {
        self.last.is_some()
    }
}
