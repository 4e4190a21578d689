// Battery state via the kernel power-supply class (/sys/class/power_supply).
// The root is injectable so tests can point at a fake sysfs tree.

use crate::models::{BatteryReading, ChargeState};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default sysfs root for power supplies on Linux.
pub const SYSFS_POWER_SUPPLY: &str = "/sys/class/power_supply";

#[derive(Debug, thiserror::Error)]
pub enum BatteryError {
    #[error("no power-supply support present under {0}")]
    Unsupported(String),
    #[error("no batteries found")]
    NoBatteries,
    #[error("battery {0} wasn't found")]
    NotFound(String),
    #[error("failed to read battery state: {0}")]
    Read(#[from] std::io::Error),
}

/// Holds the selected battery's sysfs directory and the most recent reading.
/// Sampling tasks read the cache; only the daemon loop refreshes it.
#[derive(Debug)]
pub struct BatteryRepo {
    battery_dir: PathBuf,
    cached: Arc<std::sync::Mutex<BatteryReading>>,
}

impl BatteryRepo {
    /// Enumerate batteries under `root`, select `name`, and take an initial
    /// reading. All failure modes here are startup faults.
    pub fn open(root: &Path, name: &str) -> Result<Self, BatteryError> {
        if !root.is_dir() {
            return Err(BatteryError::Unsupported(root.display().to_string()));
        }

        let mut batteries: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            // The power-supply class also lists AC adapters (type "Mains") etc.
            let type_path = entry.path().join("type");
            if let Ok(kind) = std::fs::read_to_string(&type_path)
                && kind.trim() == "Battery"
            {
                batteries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        if batteries.is_empty() {
            return Err(BatteryError::NoBatteries);
        }
        if !batteries.iter().any(|b| b == name) {
            return Err(BatteryError::NotFound(name.to_string()));
        }

        let battery_dir = root.join(name);
        let initial = read_battery_dir(&battery_dir)?;
        Ok(Self {
            battery_dir,
            cached: Arc::new(std::sync::Mutex::new(initial)),
        })
    }

    /// Re-read percentage and charge state into the cache. On failure the
    /// cache keeps its previous (possibly stale) reading.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let battery_dir = self.battery_dir.clone();
        let cached = self.cached.clone();
        tokio::task::spawn_blocking(move || {
            let reading = read_battery_dir(&battery_dir)?;
            let mut guard = cached
                .lock()
                .map_err(|e| anyhow::anyhow!("battery cache lock poisoned: {}", e))?;
            *guard = reading;
            Ok(())
        })
        .await
        .map_err(|e| anyhow::anyhow!("battery refresh task join: {}", e))?
    }

    /// Most recent cached reading.
    pub fn reading(&self) -> BatteryReading {
        match self.cached.lock() {
            Ok(guard) => *guard,
            // A poisoned lock still holds the last written reading.
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

fn read_battery_dir(dir: &Path) -> Result<BatteryReading, std::io::Error> {
    let capacity = std::fs::read_to_string(dir.join("capacity"))?;
    let percentage = capacity.trim().parse::<u32>().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("bad capacity {:?}: {}", capacity.trim(), e),
        )
    })?;
    let status = std::fs::read_to_string(dir.join("status"))?;
    Ok(BatteryReading {
        percentage,
        state: ChargeState::from_sysfs(&status),
    })
}
