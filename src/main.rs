use anyhow::{Context, Result};
use std::sync::Mutex;
use sysdash::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Default filter when RUST_LOG is unset; anything chattier would scribble over the dashboard.
const DEFAULT_LOG_FILTER: &str = "warn";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn init_tracing(logging: &config::LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter);

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let app_config = config::AppConfig::load()?;
    init_tracing(&app_config.logging)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        sample_interval_ms = app_config.monitoring.sample_interval_ms,
        "sysdash starting"
    );

    let sampler = sampler::Sampler::new(sysinfo_repo::SysinfoRepo::new(), app_config.sampler());
    let mut renderer = render::TerminalRenderer::stdout(app_config.display.graph_height);

    let stats = worker::run(
        sampler,
        &mut renderer,
        worker::WorkerConfig {
            sample_interval_ms: app_config.monitoring.sample_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
        shutdown_signal(),
    )
    .await
    .context("terminal setup")?;

    tracing::info!(
        frames_drawn = stats.frames_drawn,
        draw_failures = stats.draw_failures,
        "Received shutdown signal"
    );
    Ok(())
}
