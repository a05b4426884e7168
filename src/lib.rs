//! # hostsmate - Hosts-file ad blocker
//!
//! Downloads domain blacklists, deduplicates and normalizes them, and writes
//! them into the operating system's hosts file so unwanted domains resolve to
//! `0.0.0.0`. Blocking can be suspended and resumed, single domains can be
//! whitelisted or blocked by hand, and the hosts file can be backed up first.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       hostsmate                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: update, suspend, resume, block, whitelist  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Blacklist and whitelist sources                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Raw artifact in a scratch directory                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Formatter (regex)                                          │
//! │    ├── Skip rules and whitelist filter                      │
//! │    ├── Extractor: raw line -> domain entry                  │
//! │    └── Collector: deduplicated `0.0.0.0 <domain>` set       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  HostsWriter / Suspender                                    │
//! │    └── Atomic rewrite, append, backup, rename               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use hostsmate::formatter::{format_raw_lines, PipelineContext};
//! use hostsmate::hosts::HostsWriter;
//! use hostsmate::whitelist::WhitelistSet;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let whitelist = WhitelistSet::from_text("0.0.0.0 tracker.example.com\n");
//!     let mut ctx = PipelineContext::new(whitelist);
//!
//!     format_raw_lines(&mut ctx, Path::new("/tmp/raw_hosts"))?;
//!
//!     let written = HostsWriter::new("/etc/hosts").write_to_hosts(&ctx.collector)?;
//!     println!("Blocked {} websites", written);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`collector`] - Deduplicating set of hosts entries
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Errors the dispatcher maps to exit codes
//! - [`extractor`] - Raw line to domain entry
//! - [`fetcher`] - HTTP client for blacklists and whitelists
//! - [`formatter`] - Extraction pipeline over a raw artifact
//! - [`fs_abstraction`] - Mockable filesystem operations
//! - [`hosts`] - Hosts file writer and backups
//! - [`lock`] - File locking for concurrent execution prevention
//! - [`logging`] - Console and `hosts.log` output
//! - [`privileges`] - Root check for the system hosts file
//! - [`state`] - Persistent state from the last update
//! - [`suspender`] - Suspend/resume by renaming the hosts file
//! - [`utils`] - Common formatting helpers
//! - [`validation`] - Domain and URL validation
//! - [`whitelist`] - Raw-line whitelist set

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod formatter;
pub mod fs_abstraction;
pub mod hosts;
pub mod lock;
pub mod logging;
pub mod privileges;
pub mod state;
pub mod suspender;
pub mod utils;
pub mod validation;
pub mod whitelist;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::HostsmateError;
