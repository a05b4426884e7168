//! HTTP fetcher for downloading blacklist and whitelist sources.
//!
//! Sources are fetched one after another. A source that fails is logged and
//! skipped; if none of the blacklists could be downloaded the raw artifact is
//! never created, which the formatter reports as a connectivity failure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ListSource;
use crate::utils::{format_bytes, format_count};
use crate::whitelist::WhitelistSet;

/// Maximum size per source body (10 MB)
/// The largest common hosts lists are ~3 MB, so 10 MB leaves ample margin
const MAX_SOURCE_SIZE: usize = 10 * 1024 * 1024;

/// Anything that can return the text body behind a URL
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Per-source outcome of a blacklist download
#[derive(Debug, Clone)]
pub struct DownloadStats {
    pub name: String,
    pub lines: usize,
}

/// HTTP client for fetching lists
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("hostsmate/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextSource for Fetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} from {}", response.status(), url);
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_SOURCE_SIZE {
                anyhow::bail!(
                    "Response too large: {} bytes (max: {} bytes)",
                    content_length,
                    MAX_SOURCE_SIZE
                );
            }
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        // Double-check actual size after download
        if body.len() > MAX_SOURCE_SIZE {
            anyhow::bail!(
                "Downloaded content too large: {} bytes (max: {} bytes)",
                body.len(),
                MAX_SOURCE_SIZE
            );
        }

        Ok(body)
    }
}

/// Download every blacklist source and concatenate the bodies into `dest`.
///
/// `dest` is only created once at least one source succeeded.
pub async fn download_blacklists(
    source: &dyn TextSource,
    lists: &[&ListSource],
    dest: &Path,
) -> Result<Vec<DownloadStats>> {
    let mut stats = Vec::new();
    let mut writer: Option<BufWriter<File>> = None;
    let mut total_bytes = 0u64;

    for list in lists {
        info!("Fetching {}...", list.name);
        let body = match source.fetch_text(&list.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch {}: {:#}", list.name, e);
                continue;
            }
        };

        let out = match writer {
            Some(ref mut out) => out,
            None => {
                let file = File::create(dest)
                    .with_context(|| format!("Failed to create raw blocklist file: {:?}", dest))?;
                writer.insert(BufWriter::new(file))
            }
        };

        out.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write {:?}", dest))?;
        if !body.ends_with('\n') {
            out.write_all(b"\n")?;
        }

        let lines = body.lines().count();
        total_bytes += body.len() as u64;
        info!("Fetched {} - {} lines", list.name, format_count(lines));
        stats.push(DownloadStats {
            name: list.name.clone(),
            lines,
        });
    }

    if let Some(mut out) = writer {
        out.flush()
            .with_context(|| format!("Failed to flush {:?}", dest))?;
    }

    info!(
        "Downloaded {} of {} blacklists ({})",
        stats.len(),
        lists.len(),
        format_bytes(total_bytes)
    );
    Ok(stats)
}

/// Fetch every whitelist source into one raw-line set.
///
/// Failing sources are logged and skipped; an empty set is a valid result.
pub async fn load_whitelist(source: &dyn TextSource, lists: &[&ListSource]) -> WhitelistSet {
    let mut whitelist = WhitelistSet::new();

    for list in lists {
        match source.fetch_text(&list.url).await {
            Ok(body) => {
                whitelist.extend_from_text(&body);
                info!("Fetched whitelist {}", list.name);
            }
            Err(e) => warn!("Failed to fetch whitelist {}: {:#}", list.name, e),
        }
    }

    info!("Whitelist: {} lines", format_count(whitelist.len()));
    whitelist
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source keyed by URL; unknown URLs fail like a dead host
    #[derive(Default)]
    pub struct MockSource {
        pub bodies: HashMap<String, String>,
        pub requested: Mutex<Vec<String>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl TextSource for MockSource {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("connection refused: {}", url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSource;
    use super::*;
    use tempfile::TempDir;

    fn list(name: &str, url: &str) -> ListSource {
        ListSource {
            name: name.to_string(),
            url: url.to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_download_concatenates_sources() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("raw");
        let source = MockSource::new()
            .with("https://a.test/hosts", "0.0.0.0 a.example.com")
            .with("https://b.test/hosts", "0.0.0.0 b.example.com\n0.0.0.0 c.example.com\n");
        let a = list("a", "https://a.test/hosts");
        let b = list("b", "https://b.test/hosts");

        let stats = download_blacklists(&source, &[&a, &b], &dest).await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].lines, 2);
        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(
            content,
            "0.0.0.0 a.example.com\n0.0.0.0 b.example.com\n0.0.0.0 c.example.com\n"
        );
    }

    #[tokio::test]
    async fn test_download_skips_failed_source() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("raw");
        let source = MockSource::new().with("https://ok.test/hosts", "0.0.0.0 ok.example.com\n");
        let dead = list("dead", "https://dead.test/hosts");
        let ok = list("ok", "https://ok.test/hosts");

        let stats = download_blacklists(&source, &[&dead, &ok], &dest).await.unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "ok");
        assert_eq!(source.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_download_all_failed_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("raw");
        let source = MockSource::new();
        let dead = list("dead", "https://dead.test/hosts");

        let stats = download_blacklists(&source, &[&dead], &dest).await.unwrap();

        assert!(stats.is_empty());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_load_whitelist_merges_and_tolerates_failures() {
        let source = MockSource::new()
            .with("https://w1.test/list", "0.0.0.0 cdn.example.com\n")
            .with("https://w2.test/list", "0.0.0.0 api.example.com\n");
        let w1 = list("w1", "https://w1.test/list");
        let w2 = list("w2", "https://w2.test/list");
        let dead = list("dead", "https://dead.test/list");

        let whitelist = load_whitelist(&source, &[&w1, &dead, &w2]).await;

        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.contains("0.0.0.0 api.example.com"));
    }

    #[test]
    fn test_fetcher_builds() {
        assert!(Fetcher::new(Duration::from_secs(5)).is_ok());
    }
}
