//! Status command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::state::HostsmateState;
use crate::suspender::{BlockingState, Suspender};
use crate::utils::{format_bytes, format_count, format_count_with_separator};

/// Run the status command
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let suspender = Suspender::new(config.hosts_path());
    let blocking = suspender.state();

    println!();
    println!("Adblocking: {}", blocking);
    match blocking {
        BlockingState::Active => {
            let size = std::fs::metadata(suspender.hosts_path())
                .map(|m| m.len())
                .unwrap_or(0);
            println!(
                "Hosts file: {:?} ({})",
                suspender.hosts_path(),
                format_bytes(size)
            );
        }
        BlockingState::Suspended => {
            println!("Hosts file: {:?}", suspender.marker_path());
            println!("Run 'hostsmate resume' to re-enable blocking.");
        }
        BlockingState::Missing => {
            println!("Hosts file: {:?} (not found)", suspender.hosts_path());
        }
    }
    println!();

    println!(
        "Blacklists: {} enabled",
        config.enabled_blacklists().len()
    );
    println!(
        "Whitelists: {} enabled",
        config.enabled_whitelists().len()
    );

    let state = HostsmateState::load(&config.state_file).unwrap_or_default();
    if let Some(last_update) = state.last_update {
        let local: chrono::DateTime<chrono::Local> = last_update.into();
        println!("Last update: {}", local.format("%Y-%m-%d %H:%M:%S"));
        println!(
            "Entries: {}",
            format_count_with_separator(state.total_entries)
        );
        for source in &state.sources {
            println!("  {:<24} {} lines", source.name, format_count(source.lines));
        }
    } else {
        println!("Last update: never");
    }
    println!();

    Ok(())
}
