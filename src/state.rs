//! Persistent state from the last hosts file update.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fetcher::DownloadStats;

/// What the last successful `update` produced
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HostsmateState {
    pub last_update: Option<DateTime<Utc>>,
    pub sources: Vec<SourceStats>,
    pub whitelist_lines: usize,
    pub total_entries: usize,
}

/// Statistics for a single blacklist source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStats {
    pub name: String,
    pub lines: usize,
}

impl HostsmateState {
    /// Load state from file; a missing file is an empty state
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read state file {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse state file {:?}", path))
        } else {
            Ok(Self::default())
        }
    }

    /// Save state to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    /// Update state with the results of a pipeline run
    pub fn record_update(
        &mut self,
        downloads: &[DownloadStats],
        whitelist_lines: usize,
        total_entries: usize,
    ) {
        self.sources = downloads
            .iter()
            .map(|d| SourceStats {
                name: d.name.clone(),
                lines: d.lines,
            })
            .collect();
        self.whitelist_lines = whitelist_lines;
        self.total_entries = total_entries;
        self.last_update = Some(Utc::now());
    }
}
