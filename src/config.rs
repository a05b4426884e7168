//! Configuration management for hostsmate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::HostsmateError;
use crate::validation::validate_source_url;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hostsmate/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosts file to manage (defaults to the OS hosts file)
    pub hosts_file: Option<PathBuf>,

    /// Domain blacklist sources
    pub blacklist_sources: Vec<ListSource>,

    /// Whitelist sources (raw lines exempt from blocking)
    pub whitelist_sources: Vec<ListSource>,

    /// Directory for hosts.log (defaults to `logs/` next to the executable)
    pub log_dir: Option<PathBuf>,

    /// Persistent state written after each update
    pub state_file: PathBuf,

    /// Lock file guarding concurrent hosts file modifications
    pub lock_file: PathBuf,

    /// Per-request timeout for source downloads
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            blacklist_sources: default_blacklists(),
            whitelist_sources: default_whitelists(),
            log_dir: None,
            state_file: PathBuf::from("/var/lib/hostsmate/state.json"),
            lock_file: default_lock_file(),
            fetch_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the config file if present, built-in defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            return Err(HostsmateError::Config(
                "fetch_timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }

        for (kind, sources) in [
            ("blacklist", &self.blacklist_sources),
            ("whitelist", &self.whitelist_sources),
        ] {
            let mut names = HashSet::new();
            for source in sources {
                if source.name.trim().is_empty() {
                    return Err(HostsmateError::Config(format!(
                        "A {} source has an empty name",
                        kind
                    ))
                    .into());
                }
                if !names.insert(source.name.as_str()) {
                    return Err(HostsmateError::Config(format!(
                        "Duplicate {} source name '{}'",
                        kind, source.name
                    ))
                    .into());
                }
                if source.enabled {
                    validate_source_url(&source.url).map_err(|e| {
                        HostsmateError::Config(format!("{} source '{}': {}", kind, source.name, e))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Effective hosts file path
    pub fn hosts_path(&self) -> PathBuf {
        self.hosts_file.clone().unwrap_or_else(system_hosts_path)
    }

    /// Whether the managed file is the system one (and so needs root)
    pub fn manages_system_hosts(&self) -> bool {
        self.hosts_file.is_none() || self.hosts_path() == system_hosts_path()
    }

    /// Effective log directory
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }

    pub fn enabled_blacklists(&self) -> Vec<&ListSource> {
        self.blacklist_sources.iter().filter(|s| s.enabled).collect()
    }

    pub fn enabled_whitelists(&self) -> Vec<&ListSource> {
        self.whitelist_sources.iter().filter(|s| s.enabled).collect()
    }

    /// Generate default config with comments
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }
}

/// A remote list, identified by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// OS hosts file location
pub fn system_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Lock file in a root-owned runtime directory
fn default_lock_file() -> PathBuf {
    if cfg!(unix) {
        PathBuf::from("/run/hostsmate.lock")
    } else {
        std::env::temp_dir().join("hostsmate.lock")
    }
}

/// `logs/` next to the running executable, or under the working directory
pub fn default_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn default_blacklists() -> Vec<ListSource> {
    vec![
        ListSource {
            name: "stevenblack".to_string(),
            url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts".to_string(),
            enabled: true,
        },
        ListSource {
            name: "adaway".to_string(),
            url: "https://adaway.org/hosts.txt".to_string(),
            enabled: true,
        },
        ListSource {
            name: "yoyo".to_string(),
            url: "https://pgl.yoyo.org/adservers/serverlist.php?hostformat=hosts&showintro=0&mimetype=plaintext".to_string(),
            enabled: true,
        },
        ListSource {
            name: "anudeep_adservers".to_string(),
            url: "https://raw.githubusercontent.com/anudeepND/blacklist/master/adservers.txt".to_string(),
            enabled: true,
        },
        ListSource {
            name: "someonewhocares".to_string(),
            url: "https://someonewhocares.org/hosts/zero/hosts".to_string(),
            enabled: false,
        },
    ]
}

fn default_whitelists() -> Vec<ListSource> {
    vec![ListSource {
        name: "agneevx".to_string(),
        url: "https://raw.githubusercontent.com/agneevX/whitelist/master/whitelist.txt".to_string(),
        enabled: true,
    }]
}
