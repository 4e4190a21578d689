// Library for tests to access modules

pub mod battery_repo;
pub mod codec;
pub mod config;
#[cfg(unix)]
pub mod daemon;
pub mod models;
pub mod stat_log;
pub mod sysinfo_repo;
pub mod version;
pub mod worker;
