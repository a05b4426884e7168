//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "hostsmate")]
#[command(author, version, about = "Hosts-file ad blocker")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download blacklists and rewrite the hosts file
    Update {
        /// Back up the current hosts file into this directory first
        #[arg(long, value_name = "DIR")]
        backup_dir: Option<PathBuf>,

        /// Fetch and process, but don't write the hosts file
        #[arg(long)]
        dry_run: bool,
    },

    /// Suspend blocking (rename the hosts file)
    Suspend,

    /// Resume blocking (restore the renamed hosts file)
    Resume,

    /// Add domains to the hosts file's custom blocked section
    Block {
        /// Domains to block
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Remove every hosts file line mentioning a domain
    Whitelist {
        /// Domain or URL to whitelist
        domain: String,
    },

    /// Back up the current hosts file
    Backup {
        /// Destination directory (prompted for when omitted)
        dir: Option<PathBuf>,
    },

    /// Show current status
    Status,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show version
    Version,
}
