//! Advisory lock held while a command modifies the hosts file.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::debug;

use crate::error::HostsmateError;

/// Exclusive lock on the configured `lock_file`, released on drop
pub struct LockGuard {
    _file: File,
}

impl LockGuard {
    /// Take the lock or fail with [`HostsmateError::Locked`]; never waits.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create lock directory {:?}", parent))?;
        }

        // Opened without truncate so a held lock file is left as is
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .with_context(|| format!("Failed to open lock file: {:?}", lock_path))?;
        restrict_permissions(&file)?;

        if file.try_lock_exclusive().is_err() {
            return Err(HostsmateError::Locked(lock_path.to_path_buf()).into());
        }

        debug!("Acquired lock {:?}", lock_path);
        Ok(Self { _file: file })
    }
}

/// Owner read/write only
#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .context("Failed to set lock file permissions")
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<()> {
    Ok(())
}
