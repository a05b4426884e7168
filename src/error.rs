//! Error types for hostsmate.
//!
//! These are the conditions the command dispatcher treats specially: each one
//! carries its own exit code. Everything else travels as `anyhow::Error`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsmateError {
    #[error("Please check your internet connection and try again. (no downloaded content at {0:?})")]
    Connectivity(PathBuf),

    #[error("Hosts file {0:?} was not found.")]
    HostsNotFound(PathBuf),

    #[error("Seems that the adblocker is running already. (no {0:?} file was found)")]
    NotSuspended(PathBuf),

    #[error("Adblocking is already suspended: {0:?} exists")]
    AlreadySuspended(PathBuf),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Another instance of hostsmate is already running (lock file: {0:?})")]
    Locked(PathBuf),
}

impl HostsmateError {
    /// Process exit code used by the dispatcher for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            HostsmateError::Connectivity(_) => 3,
            HostsmateError::HostsNotFound(_) => 4,
            HostsmateError::NotSuspended(_) => 5,
            HostsmateError::AlreadySuspended(_) => 5,
            HostsmateError::Permission(_) => 77,
            HostsmateError::InvalidDomain(_) => 65,
            HostsmateError::Config(_) => 78,
            HostsmateError::Locked(_) => 75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_message_mentions_internet() {
        let err = HostsmateError::Connectivity(PathBuf::from("/tmp/raw"));
        assert!(err.to_string().contains("internet connection"));
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            HostsmateError::Connectivity(PathBuf::new()),
            HostsmateError::HostsNotFound(PathBuf::new()),
            HostsmateError::NotSuspended(PathBuf::new()),
            HostsmateError::AlreadySuspended(PathBuf::new()),
            HostsmateError::Permission(String::new()),
            HostsmateError::InvalidDomain(String::new()),
            HostsmateError::Config(String::new()),
            HostsmateError::Locked(PathBuf::new()),
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{:?}", err);
        }
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = HostsmateError::HostsNotFound(PathBuf::from("/etc/hosts")).into();
        let inner = err.downcast_ref::<HostsmateError>().unwrap();
        assert_eq!(inner.exit_code(), 4);
    }
}
