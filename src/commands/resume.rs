//! Resume command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::lock::LockGuard;
use crate::privileges::check_hosts_access;
use crate::suspender::Suspender;

/// Run the resume command
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    check_hosts_access(&config)?;
    let _lock = LockGuard::acquire(&config.lock_file)?;

    Suspender::new(config.hosts_path()).resume()?;

    println!("[OK] Adblocking resumed");
    Ok(())
}
