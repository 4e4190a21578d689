use anyhow::Result;
use battstat::*;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

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

/// Journald carries operational messages in both modes (the system log);
/// the fmt layer on stderr is the console echo and only exists in the
/// foreground. Without a journald socket, fall back to stderr alone.
fn init_tracing(foreground: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match tracing_journald::layer() {
        Ok(journald) if foreground => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_timer(LocalTimer);
            tracing_subscriber::registry()
                .with(filter)
                .with(journald)
                .with(fmt_layer)
                .init();
        }
        Ok(journald) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(journald)
                .init();
        }
        Err(_) => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_timer(LocalTimer);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = config::Cli::parse();
    let app_config = config::Config::from_cli(cli)?;
    init_tracing(app_config.foreground);

    // Battery resolution comes first: a bad battery name fails the process
    // before the stat file is even opened.
    let battery_repo = Arc::new(battery_repo::BatteryRepo::open(
        Path::new(battery_repo::SYSFS_POWER_SUPPLY),
        &app_config.battery,
    )?);

    // Open before daemonizing: a relative statfile path resolves in the
    // starting directory, not in "/".
    let stat_log = stat_log::StatLog::open(&app_config.statfile)?;

    if !app_config.foreground {
        daemon::daemonize()?;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(app_config, battery_repo, stat_log))
}

async fn run(
    app_config: config::Config,
    battery_repo: Arc<battery_repo::BatteryRepo>,
    stat_log: stat_log::StatLog,
) -> Result<()> {
    // Held for the life of run(); dropping the sender would stop the loop.
    let (_shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    tracing::info!(
        version = version::VERSION,
        battery = %app_config.battery,
        statfile = %app_config.statfile.display(),
        delay_secs = app_config.delay_secs,
        foreground = app_config.foreground,
        "battstatd started"
    );

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            battery_repo,
            sys_probe: Arc::new(sysinfo_repo::SysinfoRepo::new()),
            stat_log: Arc::new(stat_log),
            shutdown_rx,
        },
        worker::WorkerConfig {
            delay_secs: app_config.delay_secs,
        },
    );

    if app_config.foreground {
        // No signal handler in the foreground; terminal signals keep their
        // default dispositions and the loop runs until the process dies.
        worker_handle.await?;
    } else {
        let mut sigusr1 =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::user_defined1())?;
        tokio::select! {
            result = worker_handle => {
                result?;
            }
            _ = sigusr1.recv() => {
                tracing::info!("Received SIGUSR1, exiting");
                // Immediate exit: in-flight sampling tasks are not drained.
                std::process::exit(0);
            }
        }
    }

    // The loop only returns via shutdown, which nothing here triggers; if it
    // stops on its own something went fatally wrong underneath.
    anyhow::bail!("daemon loop exited unexpectedly")
}
