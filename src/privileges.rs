//! Privilege check before touching the system hosts file.

use anyhow::Result;

use crate::config::Config;
use crate::error::HostsmateError;

/// Check if running as root (effective UID == 0)
#[cfg(unix)]
pub fn check_root() -> Result<()> {
    // SAFETY: geteuid() is a simple syscall that reads the effective user ID.
    // It has no preconditions, never fails, and doesn't modify any state.
    let euid = unsafe { libc::geteuid() };

    if euid != 0 {
        return Err(HostsmateError::Permission(
            "Modifying the system hosts file requires root privileges. Please run with sudo."
                .to_string(),
        )
        .into());
    }
    Ok(())
}

/// Elevation is left to the user on other platforms; write errors surface
/// when the file is actually opened.
#[cfg(not(unix))]
pub fn check_root() -> Result<()> {
    Ok(())
}

/// Require root only when the configured target is the system hosts file
pub fn check_hosts_access(config: &Config) -> Result<()> {
    if config.manages_system_hosts() {
        check_root()
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_custom_hosts_file_skips_root_check() {
        let config = Config {
            hosts_file: Some(PathBuf::from("/tmp/hostsmate-test-hosts")),
            ..Default::default()
        };
        assert!(check_hosts_access(&config).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_root_matches_euid() {
        let is_root = unsafe { libc::geteuid() } == 0;
        assert_eq!(check_root().is_ok(), is_root);
    }
}
