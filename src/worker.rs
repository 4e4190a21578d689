// Daemon loop: refresh battery state, dispatch a detached sampling task, sleep.
// Sampling tasks are fire-and-forget; a slow or stuck sample never delays the
// next cycle, and records may land out of dispatch order as a result.

use crate::battery_repo::BatteryRepo;
use crate::codec;
use crate::models::Snapshot;
use crate::stat_log::StatLog;
use crate::sysinfo_repo::SysProbe;
use std::sync::Arc;
use tokio::time::Duration;

/// Repos, writer, and shutdown for the daemon loop.
pub struct WorkerDeps {
    pub battery_repo: Arc<BatteryRepo>,
    pub sys_probe: Arc<dyn SysProbe + Send + Sync>,
    pub stat_log: Arc<StatLog>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    /// Seconds between cycles. 0 runs cycles back to back.
    pub delay_secs: u64,
}

/// Spawns the daemon loop. The returned handle completes only on shutdown;
/// in normal operation the loop runs until process termination.
pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        battery_repo,
        sys_probe,
        stat_log,
        mut shutdown_rx,
    } = deps;
    // Plain sleep rather than an interval: a zero delay is valid here and
    // means no pause between dispatches.
    let delay = Duration::from_secs(config.delay_secs);

    tokio::spawn(async move {
        loop {
            if let Err(e) = battery_repo.refresh().await {
                tracing::warn!(
                    error = %e,
                    operation = "battery_refresh",
                    "failed to read battery state; sampling with cached values"
                );
            }

            let battery_repo = battery_repo.clone();
            let sys_probe = sys_probe.clone();
            let stat_log = stat_log.clone();
            tokio::spawn(async move {
                if let Err(e) = collect_stats(&battery_repo, sys_probe, &stat_log).await {
                    tracing::error!(error = %e, operation = "collect_stats", "snapshot failed");
                }
            });

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = &mut shutdown_rx => {
                    tracing::debug!("Daemon loop shutting down");
                    break;
                }
            }
        }
    })
}

/// One sampling task: cached battery reading plus a fresh system-info block
/// become one record in the stat log. The battery cache is refreshed by the
/// daemon loop, not here. Any error aborts this cycle only.
pub async fn collect_stats(
    battery_repo: &BatteryRepo,
    sys_probe: Arc<dyn SysProbe + Send + Sync>,
    stat_log: &StatLog,
) -> anyhow::Result<u64> {
    let reading = battery_repo.reading();

    let sys = tokio::task::spawn_blocking(move || sys_probe.read_sys_block())
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
        .map_err(|e| anyhow::anyhow!("failed to read system info: {}", e))?;

    let when = unix_now();
    let snapshot = Snapshot {
        percentage: reading.percentage,
        state: reading.state,
        when,
        sys,
    };

    stat_log.write_record(&codec::encode(&snapshot)).await?;
    tracing::info!(when, "wrote snapshot");
    Ok(when)
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}
