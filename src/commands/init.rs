//! Init command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::hosts::atomic_write;

/// Run the init command
pub fn run(force: bool, config_path: &Path) -> Result<()> {
    write_default_config(config_path, force)?;
    println!("[OK] Default configuration written to {:?}", config_path);
    Ok(())
}

/// Write the commented default config, refusing to clobber an existing one
/// unless `force` is set
pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists. Use --force to overwrite it.",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
    }

    atomic_write(config_path, Config::generate_default_yaml().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_default_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("etc/hostsmate/config.yaml");

        write_default_config(&path, false).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.enabled_blacklists().is_empty());
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "custom: true\n").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "custom: true\n");

        write_default_config(&path, true).unwrap();
        assert!(Config::load(&path).is_ok());
    }
}
