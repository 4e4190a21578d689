// CLI options and validated runtime config.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_BATTERY: &str = "BAT0";
pub const DEFAULT_STATFILE: &str = ".battstat";
pub const DEFAULT_DELAY_SECS: u64 = 60;
/// Upper bound on the configured battery name, in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// battstatd is a daemon to collect battery statistics.
#[derive(Debug, Parser)]
#[command(name = "battstatd", version = crate::version::VERSION)]
pub struct Cli {
    /// Battery name to monitor.
    #[arg(short = 'b', long = "battery", default_value = DEFAULT_BATTERY)]
    pub battery: String,

    /// Don't daemonise; run in the foreground.
    #[arg(short = 'd', long = "foreground")]
    pub foreground: bool,

    /// File to write statistics to.
    #[arg(short = 'f', long = "statfile", default_value = DEFAULT_STATFILE)]
    pub statfile: PathBuf,

    /// Delay in seconds between samples.
    #[arg(short = 't', long = "delay", default_value_t = DEFAULT_DELAY_SECS)]
    pub delay_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub battery: String,
    pub foreground: bool,
    pub statfile: PathBuf,
    pub delay_secs: u64,
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let config = Self {
            battery: cli.battery,
            foreground: cli.foreground,
            statfile: cli.statfile,
            delay_secs: cli.delay_secs,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.battery.is_empty(), "battery name must be non-empty");
        anyhow::ensure!(
            self.battery.len() <= MAX_NAME_LEN,
            "battery name must be at most {} bytes, got {}",
            MAX_NAME_LEN,
            self.battery.len()
        );
        anyhow::ensure!(
            !self.statfile.as_os_str().is_empty(),
            "statfile path must be non-empty"
        );
        // delay_secs of 0 is accepted: cycles run back to back.
        Ok(())
    }
}
