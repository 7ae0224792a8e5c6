// Domain models

mod readings;
mod system;

pub use readings::{Capacity, CpuTicks, NetworkCounters};
pub use system::{MetricSnapshot, SystemIdentity};
