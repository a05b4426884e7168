//! Suspend and resume blocking by renaming the hosts file.
//!
//! ```text
//!            suspend(): hosts -> hosts~
//!   ACTIVE ─────────────────────────────▶ SUSPENDED
//!          ◀─────────────────────────────
//!            resume():  hosts~ -> hosts
//! ```
//!
//! Each transition is a single rename, so the file is never half-moved.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::HostsmateError;
use crate::fs_abstraction::{FileSystem, RealFileSystem};

/// Observable blocking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingState {
    /// Hosts file at its canonical path
    Active,
    /// Only the `~` marker file exists
    Suspended,
    /// Neither file exists
    Missing,
}

impl std::fmt::Display for BlockingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockingState::Active => write!(f, "ACTIVE"),
            BlockingState::Suspended => write!(f, "SUSPENDED"),
            BlockingState::Missing => write!(f, "MISSING"),
        }
    }
}

/// Path of the suspend marker: the hosts path with `~` appended
pub fn marker_path(hosts: &Path) -> PathBuf {
    let mut name = OsString::from(hosts.as_os_str());
    name.push("~");
    PathBuf::from(name)
}

pub struct Suspender<F: FileSystem = RealFileSystem> {
    hosts: PathBuf,
    marker: PathBuf,
    fs: F,
}

impl Suspender<RealFileSystem> {
    pub fn new(hosts: impl Into<PathBuf>) -> Self {
        Self::with_fs(hosts, RealFileSystem)
    }
}

impl<F: FileSystem> Suspender<F> {
    pub fn with_fs(hosts: impl Into<PathBuf>, fs: F) -> Self {
        let hosts = hosts.into();
        let marker = marker_path(&hosts);
        Self { hosts, marker, fs }
    }

    pub fn hosts_path(&self) -> &Path {
        &self.hosts
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    pub fn state(&self) -> BlockingState {
        if self.fs.exists(&self.hosts) {
            BlockingState::Active
        } else if self.fs.exists(&self.marker) {
            BlockingState::Suspended
        } else {
            BlockingState::Missing
        }
    }

    /// ACTIVE -> SUSPENDED
    ///
    /// Refuses to clobber an existing marker, which would lose the file a
    /// previous suspend set aside.
    pub fn suspend(&self) -> Result<()> {
        if self.fs.exists(&self.marker) && self.fs.exists(&self.hosts) {
            return Err(HostsmateError::AlreadySuspended(self.marker.clone()).into());
        }

        match self.fs.rename(&self.hosts, &self.marker) {
            Ok(()) => {
                info!(
                    "Adblocking has been suspended. {:?} renamed to {:?}",
                    self.hosts, self.marker
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Hosts file {:?} was not found", self.hosts);
                Err(HostsmateError::HostsNotFound(self.hosts.clone()).into())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to rename {:?} to {:?}", self.hosts, self.marker)
            }),
        }
    }

    /// SUSPENDED -> ACTIVE
    pub fn resume(&self) -> Result<()> {
        match self.fs.rename(&self.marker, &self.hosts) {
            Ok(()) => {
                info!("Adblocking has been resumed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No {:?} file was found", self.marker);
                Err(HostsmateError::NotSuspended(self.marker.clone()).into())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to rename {:?} to {:?}", self.marker, self.hosts)
            }),
        }
    }
}
