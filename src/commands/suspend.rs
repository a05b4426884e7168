//! Suspend command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::lock::LockGuard;
use crate::privileges::check_hosts_access;
use crate::suspender::Suspender;

/// Run the suspend command
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    check_hosts_access(&config)?;
    let _lock = LockGuard::acquire(&config.lock_file)?;

    info!("Suspending adblocking...");
    let suspender = Suspender::new(config.hosts_path());
    suspender.suspend()?;

    println!(
        "[OK] Adblocking suspended ({:?} moved to {:?})",
        suspender.hosts_path(),
        suspender.marker_path()
    );
    println!("Run 'hostsmate resume' to turn it back on.");
    Ok(())
}
