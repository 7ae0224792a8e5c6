// The dashboard loop: sample, draw, wait for the next tick.
// Everything runs on the caller's task; there is no background work.

use crate::render::Render;
use crate::sampler::Sampler;
use crate::source::MetricSource;
use std::future::Future;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::instrument;

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log loop stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// What the loop did before it was stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames_drawn: u64,
    pub draw_failures: u64,
}

/// Runs ticks until `shutdown` resolves.
///
/// A tick that overruns the interval delays the next one instead of
/// bunching them up. Draw errors are logged and the loop carries on; only
/// `begin`/`finish` failures are returned.
#[instrument(
    name = "worker",
    level = "debug",
    skip_all,
    fields(sample_interval_ms = config.sample_interval_ms)
)]
pub async fn run<S, R, F>(
    mut sampler: Sampler<S>,
    renderer: &mut R,
    config: WorkerConfig,
    shutdown: F,
) -> std::io::Result<LoopStats>
where
    S: MetricSource,
    R: Render,
    F: Future<Output = ()>,
{
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    let mut tick = interval(Duration::from_millis(sample_interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
    stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // the first tick of an interval fires immediately; nothing to report yet.
    stats_log_tick.tick().await;

    let mut stats = LoopStats::default();
    tokio::pin!(shutdown);

    renderer.begin()?;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let snapshot = sampler.tick().await;
                match renderer.draw(&sampler.frame(&snapshot)) {
                    Ok(()) => stats.frames_drawn += 1,
                    Err(e) => {
                        stats.draw_failures += 1;
                        tracing::warn!(error = %e, operation = "draw", "Frame draw failed");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::debug!("Worker shutting down");
                break;
            }
            _ = stats_log_tick.tick() => {
                tracing::info!(
                    frames_drawn = stats.frames_drawn,
                    draw_failures = stats.draw_failures,
                    "loop stats"
                );
            }
        }
    }

    renderer.finish()?;
    Ok(stats)
}
