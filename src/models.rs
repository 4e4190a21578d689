// Domain models: the snapshot record and its parts.

/// Battery charge state as reported by the kernel power-supply class.
/// Wire codes are fixed: see `codec` for the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeState {
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

impl ChargeState {
    /// Parse from a sysfs `status` string (e.g. "Discharging", "Not charging").
    pub fn from_sysfs(s: &str) -> Self {
        match s.trim() {
            "Charging" => ChargeState::Charging,
            "Discharging" => ChargeState::Discharging,
            "Not charging" => ChargeState::NotCharging,
            "Full" => ChargeState::Full,
            _ => ChargeState::Unknown,
        }
    }

    /// Wire code for the binary record.
    pub fn code(self) -> u32 {
        match self {
            ChargeState::Unknown => 0,
            ChargeState::Charging => 1,
            ChargeState::Discharging => 2,
            ChargeState::NotCharging => 3,
            ChargeState::Full => 4,
        }
    }

    /// Inverse of [`code`](Self::code); unrecognized codes map to `Unknown`.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => ChargeState::Charging,
            2 => ChargeState::Discharging,
            3 => ChargeState::NotCharging,
            4 => ChargeState::Full,
            _ => ChargeState::Unknown,
        }
    }
}

/// Current percentage and charge state of the selected battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryReading {
    pub percentage: u32,
    pub state: ChargeState,
}

/// Fixed-size system-info block captured alongside each battery sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SysBlock {
    pub uptime_secs: u64,
    pub load_one: f64,
    pub load_five: f64,
    pub load_fifteen: f64,
    /// Memory figures in bytes.
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub procs: u32,
}

/// One persisted record: battery and system state at an instant.
/// Built, encoded, and discarded within a single sampling task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub percentage: u32,
    pub state: ChargeState,
    /// Unix timestamp in seconds, set at sample construction.
    pub when: u64,
    pub sys: SysBlock,
}
