//! Update command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::HostsmateError;
use crate::fetcher::{download_blacklists, load_whitelist, Fetcher, TextSource};
use crate::formatter::{format_raw_lines, PipelineContext};
use crate::hosts::HostsWriter;
use crate::lock::LockGuard;
use crate::privileges::check_hosts_access;
use crate::state::HostsmateState;
use crate::utils::format_count_with_separator;

/// Name of the raw artifact inside the per-run scratch directory
const RAW_ARTIFACT: &str = "raw_hosts";

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct UpdateSummary {
    pub sources_fetched: usize,
    pub unique_domains: usize,
    pub written: bool,
}

/// Run the update command
pub async fn run(backup_dir: Option<PathBuf>, dry_run: bool, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if !dry_run {
        check_hosts_access(&config)?;
    }
    let _lock = if dry_run {
        None
    } else {
        Some(LockGuard::acquire(&config.lock_file)?)
    };

    if let Some(dir) = backup_dir {
        let writer = HostsWriter::new(config.hosts_path());
        super::backup::backup_or_report(&writer, &dir);
    }

    let fetcher = Fetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
    let scratch = tempfile::Builder::new()
        .prefix("hostsmate-")
        .tempdir()
        .context("Failed to create scratch directory")?;

    let summary = update_hosts(&fetcher, &config, scratch.path(), dry_run).await?;

    println!();
    if summary.written {
        println!(
            "[OK] Blocked {} websites ({} sources)",
            format_count_with_separator(summary.unique_domains),
            summary.sources_fetched
        );
    } else {
        println!(
            "[DRY-RUN] {} unique domains from {} sources, hosts file untouched",
            format_count_with_separator(summary.unique_domains),
            summary.sources_fetched
        );
    }

    Ok(())
}

/// Fetch, extract, deduplicate and (unless `dry_run`) write the hosts file.
///
/// The raw artifact is materialized inside `scratch_dir`.
pub async fn update_hosts(
    source: &dyn TextSource,
    config: &Config,
    scratch_dir: &Path,
    dry_run: bool,
) -> Result<UpdateSummary> {
    let blacklists = config.enabled_blacklists();
    if blacklists.is_empty() {
        return Err(HostsmateError::Config(
            "No blacklist sources enabled. Check your configuration.".to_string(),
        )
        .into());
    }

    info!("Updating hosts file from {} sources...", blacklists.len());

    let whitelist = load_whitelist(source, &config.enabled_whitelists()).await;

    let raw_path = scratch_dir.join(RAW_ARTIFACT);
    let downloads = download_blacklists(source, &blacklists, &raw_path).await?;

    let mut ctx = PipelineContext::new(whitelist);
    println!("Extracting domains, formatting and removing duplicates...");
    format_raw_lines(&mut ctx, &raw_path)?;

    let unique_domains = ctx.collector.len();
    if dry_run {
        info!("Dry run: {} unique domains not written", unique_domains);
        return Ok(UpdateSummary {
            sources_fetched: downloads.len(),
            unique_domains,
            written: false,
        });
    }

    let writer = HostsWriter::new(config.hosts_path());
    println!("Writing to {:?}...", writer.path());
    let written = writer.write_to_hosts(&ctx.collector)?;

    let mut state = HostsmateState::load(&config.state_file).unwrap_or_default();
    state.record_update(&downloads, ctx.whitelist.len(), written);
    if let Err(e) = state.save(&config.state_file) {
        warn!("Failed to save state: {:#}", e);
    }

    Ok(UpdateSummary {
        sources_fetched: downloads.len(),
        unique_domains: written,
        written: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListSource;
    use crate::fetcher::mock::MockSource;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            hosts_file: Some(dir.path().join("hosts")),
            blacklist_sources: vec![
                ListSource {
                    name: "one".to_string(),
                    url: "https://one.test/hosts".to_string(),
                    enabled: true,
                },
                ListSource {
                    name: "two".to_string(),
                    url: "https://two.test/hosts".to_string(),
                    enabled: true,
                },
            ],
            whitelist_sources: vec![ListSource {
                name: "white".to_string(),
                url: "https://white.test/list".to_string(),
                enabled: true,
            }],
            state_file: dir.path().join("state/state.json"),
            lock_file: dir.path().join("hostsmate.lock"),
            ..Default::default()
        }
    }

    fn mock_source() -> MockSource {
        MockSource::new()
            .with(
                "https://one.test/hosts",
                "# list one\n127.0.0.1 ads.example.com\n0.0.0.0 tracker.example.com\n",
            )
            .with(
                "https://two.test/hosts",
                "0.0.0.0 ads.example.com\n||pixel.example.net^\n",
            )
            .with("https://white.test/list", "0.0.0.0 tracker.example.com\n")
    }

    #[tokio::test]
    async fn test_update_writes_hosts_and_state() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let config = test_config(&dir);

        let summary = update_hosts(&mock_source(), &config, scratch.path(), false)
            .await
            .unwrap();

        assert!(summary.written);
        assert_eq!(summary.sources_fetched, 2);
        assert_eq!(summary.unique_domains, 2);

        let hosts = std::fs::read_to_string(config.hosts_path()).unwrap();
        assert!(hosts.starts_with("# This Hosts file was generated"));
        assert!(hosts.contains("0.0.0.0 ads.example.com\n"));
        assert!(hosts.contains("0.0.0.0 pixel.example.net\n"));
        assert!(!hosts.contains("tracker.example.com"));

        let state = HostsmateState::load(&config.state_file).unwrap();
        assert_eq!(state.total_entries, 2);
        assert_eq!(state.sources.len(), 2);
    }

    #[tokio::test]
    async fn test_update_dry_run_leaves_hosts_alone() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.hosts_path(), "original\n").unwrap();

        let summary = update_hosts(&mock_source(), &config, scratch.path(), true)
            .await
            .unwrap();

        assert!(!summary.written);
        assert_eq!(summary.unique_domains, 2);
        assert_eq!(
            std::fs::read_to_string(config.hosts_path()).unwrap(),
            "original\n"
        );
        assert!(!config.state_file.exists());
    }

    #[tokio::test]
    async fn test_update_offline_is_connectivity_error() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.hosts_path(), "original\n").unwrap();

        let err = update_hosts(&MockSource::new(), &config, scratch.path(), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HostsmateError>(),
            Some(HostsmateError::Connectivity(_))
        ));
        assert_eq!(
            std::fs::read_to_string(config.hosts_path()).unwrap(),
            "original\n"
        );
    }

    #[tokio::test]
    async fn test_update_without_sources_is_config_error() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        for source in &mut config.blacklist_sources {
            source.enabled = false;
        }

        let err = update_hosts(&mock_source(), &config, scratch.path(), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HostsmateError>(),
            Some(HostsmateError::Config(_))
        ));
    }
}
