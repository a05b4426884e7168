//! Hosts file writer.
//!
//! Full rewrites and whitelist removals go through a temporary file in the
//! same directory that is renamed over the target, so readers only ever see
//! the old or the new file. Manual blocks are plain appends.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::collector::DomainCollector;
use crate::error::HostsmateError;
use crate::extractor::VOID_IP;
use crate::formatter::strip_domain_prefix;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::utils::format_count_with_separator;
use crate::validation::validate_domain;

/// File name used for backups inside the chosen directory
pub const BACKUP_FILE_NAME: &str = "hosts_backup";

const REPOSITORY_URL: &str = "https://github.com/kravchenkoda/hostsmate";

const CUSTOM_SECTION: &str = "\n############   User's custom blocked hosts   ############\n\n";

/// Static reservations every generated hosts file starts with
const RESERVED_ENTRIES: &str = "\
127.0.0.1 localhost
127.0.0.1 localhost.localdomain
127.0.0.1 local
255.255.255.255 broadcasthost
::1 localhost
::1 ip6-localhost
::1 ip6-loopback
fe80::1%lo0 localhost
ff00::0 ip6-localnet
ff00::0 ip6-mcastprefix
ff02::1 ip6-allnodes
ff02::2 ip6-allrouters
ff02::3 ip6-allhosts
";

/// Result of a whitelist request against the hosts file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistOutcome {
    /// Normalized domain that was searched for
    pub domain: String,
    /// Number of lines dropped
    pub removed: usize,
}

impl WhitelistOutcome {
    pub fn found(&self) -> bool {
        self.removed > 0
    }
}

/// Render the generated-file header
pub fn header(updated: DateTime<Local>, total_entries: usize) -> String {
    format!(
        "# This Hosts file was generated using the hostsmate app\n\
         #\n\
         # Updated: {}\n\
         #\n\
         # Total amount of entries: {}\n\
         #\n\
         # Github repository: {}\n\
         #\n\
         #\n\
         #######################################\n\
         {}",
        updated.format("%d-%b-%Y"),
        format_count_with_separator(total_entries),
        REPOSITORY_URL,
        RESERVED_ENTRIES
    )
}

pub struct HostsWriter {
    path: PathBuf,
}

impl HostsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the hosts file with the header followed by every collected
    /// entry. Returns the number of entries written.
    pub fn write_to_hosts(&self, collector: &DomainCollector) -> Result<usize> {
        info!("Writing to {:?}...", self.path);

        let total = collector.len();
        let mut content = header(Local::now(), total);
        for entry in collector.sorted() {
            content.push_str(entry);
        }

        atomic_write(&self.path, content.as_bytes())?;

        info!("Blocked {} websites", total);
        Ok(total)
    }

    /// Append domains under the custom-blocked section without touching the
    /// existing content. All domains are validated before anything is written.
    pub fn block_domain(&self, domains: &[String]) -> Result<usize> {
        for domain in domains {
            validate_domain(domain)
                .map_err(|e| HostsmateError::InvalidDomain(format!("{:#}", e)))?;
        }

        let mut block = String::from(CUSTOM_SECTION);
        for domain in domains {
            block.push_str(&format!("{} {}\n", VOID_IP, domain));
        }

        let mut hosts = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?} for appending", self.path))?;
        hosts
            .write_all(block.as_bytes())
            .with_context(|| format!("Failed to append to {:?}", self.path))?;

        for domain in domains {
            debug!("Blacklisted {}", domain);
        }
        info!("Added {} custom blocked domains", domains.len());
        Ok(domains.len())
    }

    /// Drop every line containing the normalized domain.
    ///
    /// Matching is a plain substring test, so `example.com` also removes
    /// `notexample.com` lines.
    pub fn whitelist_domain(&self, whitelisted_url: &str) -> Result<WhitelistOutcome> {
        let domain = strip_domain_prefix(whitelisted_url);
        if domain.is_empty() {
            return Err(HostsmateError::InvalidDomain(format!(
                "nothing to whitelist in {:?}",
                whitelisted_url
            ))
            .into());
        }
        // A bare label like "0" or "localhost" would match the reserved entries
        validate_domain(&domain)
            .map_err(|e| HostsmateError::InvalidDomain(format!("{:#}", e)))?;
        if !domain.contains('.') {
            return Err(HostsmateError::InvalidDomain(format!(
                "{:?} is not a fully qualified domain",
                domain
            ))
            .into());
        }

        let original = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(HostsmateError::HostsNotFound(self.path.clone()).into())
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", self.path))
            }
        };

        let mut kept = String::with_capacity(original.len());
        let mut removed = 0usize;
        for line in original.split_inclusive('\n') {
            if line.contains(domain.as_str()) {
                removed += 1;
                continue;
            }
            kept.push_str(line);
        }

        if removed == 0 {
            info!("No occurrence of '{}' found in file {:?}", domain, self.path);
        } else {
            info!("Removed {} lines containing '{}'", removed, domain);
        }

        atomic_write(&self.path, kept.as_bytes())?;

        Ok(WhitelistOutcome { domain, removed })
    }

    /// Copy the hosts file verbatim to `<dir>/hosts_backup`
    pub fn create_backup(&self, dir: &Path) -> Result<PathBuf> {
        backup_with(real_fs(), &self.path, dir)
    }
}

fn backup_with(fs: &dyn FileSystem, hosts: &Path, dir: &Path) -> Result<PathBuf> {
    let backup = dir.join(BACKUP_FILE_NAME);

    if !fs.exists(dir) {
        anyhow::bail!("Backup directory {:?} does not exist", dir);
    }

    match fs.copy(hosts, &backup) {
        Ok(bytes) => {
            info!(
                "Backup of the original Hosts file was created at: {:?} ({} bytes)",
                backup, bytes
            );
            Ok(backup)
        }
        Err(e) => {
            warn!("Error creating backup: {}", e);
            Err(e).with_context(|| format!("Failed to copy {:?} to {:?}", hosts, backup))
        }
    }
}

/// Write `content` to a temp file next to `path`, then rename it into place.
///
/// A symlinked target is resolved first so the link survives and the file it
/// points to is replaced. The permissions of an existing target are carried
/// over; a new file gets the usual world-readable hosts mode.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let resolved = match fs::canonicalize(path) {
        Ok(target) => target,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e).with_context(|| format!("Failed to resolve {:?}", path)),
    };
    let path = resolved.as_path();

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent_dir))?;

    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(meta) => temp_file
            .as_file()
            .set_permissions(meta.permissions())
            .context("Failed to copy hosts file permissions")?,
        Err(_) => set_default_mode(temp_file.as_file())?,
    }

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist {:?}", path))?;

    Ok(())
}

#[cfg(unix)]
fn set_default_mode(file: &fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
        .context("Failed to set hosts file permissions")
}

#[cfg(not(unix))]
fn set_default_mode(_file: &fs::File) -> Result<()> {
    Ok(())
}
