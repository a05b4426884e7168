//! Backup command implementation.

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::Config;
use crate::hosts::HostsWriter;

/// Run the backup command
pub fn run(dir: Option<PathBuf>, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let writer = HostsWriter::new(config.hosts_path());

    let dir = match dir {
        Some(dir) => Some(dir),
        None if io::stdin().is_terminal() => {
            let stdin = io::stdin();
            ask_backup_directory(&mut stdin.lock(), &mut io::stdout())?
        }
        None => {
            println!("No backup directory given, nothing to do.");
            return Ok(());
        }
    };

    match dir {
        Some(dir) => {
            backup_or_report(&writer, &dir);
        }
        None => println!("Backup skipped."),
    }
    Ok(())
}

/// Back up the hosts file. A failure is reported but never aborts the caller.
pub fn backup_or_report(writer: &HostsWriter, dir: &Path) -> Option<PathBuf> {
    match writer.create_backup(dir) {
        Ok(path) => {
            println!("[OK] Backup created at {:?}", path);
            Some(path)
        }
        Err(e) => {
            warn!("Backup failed: {:#}", e);
            println!("[WARN] Could not create a backup in {:?}: {:#}", dir, e);
            None
        }
    }
}

/// Prompt for a backup directory. An empty answer means "skip".
pub fn ask_backup_directory<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<PathBuf>> {
    write!(
        output,
        "Enter the directory to store the hosts backup in (leave empty to skip): "
    )?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read backup directory")?;
    Ok(parse_backup_answer(&answer))
}

fn parse_backup_answer(answer: &str) -> Option<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    match (answer.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Some(PathBuf::from(home).join(rest)),
        _ => Some(PathBuf::from(answer)),
    }
}
