// System stats via sysinfo

use crate::models::SysBlock;
use std::sync::Arc;
use sysinfo::{ProcessesToUpdate, System};

/// Source of the system-info block embedded in each snapshot. The trait seam
/// lets tests stand in a constant or failing probe for the real repo.
pub trait SysProbe {
    fn read_sys_block(&self) -> anyhow::Result<SysBlock>;
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
        }
    }
}

impl SysProbe for SysinfoRepo {
    fn read_sys_block(&self) -> anyhow::Result<SysBlock> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let load = System::load_average();
        Ok(SysBlock {
            uptime_secs: System::uptime(),
            load_one: load.one,
            load_five: load.five,
            load_fifteen: load.fifteen,
            mem_total: sys.total_memory(),
            mem_free: sys.free_memory(),
            mem_available: sys.available_memory(),
            swap_total: sys.total_swap(),
            swap_free: sys.free_swap(),
            procs: sys.processes().len().min(u32::MAX as usize) as u32,
        })
    }
}
