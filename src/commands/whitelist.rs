//! Whitelist command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::hosts::HostsWriter;
use crate::lock::LockGuard;
use crate::privileges::check_hosts_access;

/// Run the whitelist command
pub fn run(domain: &str, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    check_hosts_access(&config)?;
    let _lock = LockGuard::acquire(&config.lock_file)?;

    let writer = HostsWriter::new(config.hosts_path());
    let outcome = writer.whitelist_domain(domain)?;

    if outcome.found() {
        println!(
            "[OK] {} whitelisted ({} lines removed)",
            outcome.domain, outcome.removed
        );
    } else {
        println!("[INFO] {} was not found in {:?}", outcome.domain, writer.path());
    }
    Ok(())
}
