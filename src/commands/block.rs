//! Block command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::hosts::HostsWriter;
use crate::lock::LockGuard;
use crate::privileges::check_hosts_access;

/// Run the block command
pub fn run(domains: &[String], config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    check_hosts_access(&config)?;
    let _lock = LockGuard::acquire(&config.lock_file)?;

    let writer = HostsWriter::new(config.hosts_path());
    let count = writer.block_domain(domains)?;

    for domain in domains {
        println!("[OK] {} blocked", domain);
    }
    if count > 1 {
        println!("{} domains added to {:?}", count, writer.path());
    }
    Ok(())
}
