//! Extraction pipeline: raw downloaded lists in, unique null-routed entries out.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::collector::DomainCollector;
use crate::error::HostsmateError;
use crate::extractor::extract_domain;
use crate::whitelist::WhitelistSet;

/// IPv6 loopback token; lines mentioning it are never blocklist entries
const IPV6_LOOPBACK: &str = "::1";

/// State shared by the stages of one pipeline run
#[derive(Debug, Default)]
pub struct PipelineContext {
    pub whitelist: WhitelistSet,
    pub collector: DomainCollector,
}

impl PipelineContext {
    pub fn new(whitelist: WhitelistSet) -> Self {
        Self {
            whitelist,
            collector: DomainCollector::new(),
        }
    }
}

/// Whether a raw line is dropped before extraction
pub fn should_skip(line: &str, whitelist: &WhitelistSet) -> bool {
    line.starts_with('#')
        || line.starts_with('<')
        || line.is_empty()
        || line.contains(IPV6_LOOPBACK)
        || whitelist.contains(line)
}

/// Run every line of a raw artifact through the extractor into the collector.
///
/// A missing artifact means nothing was downloaded, which aborts the run with
/// [`HostsmateError::Connectivity`].
pub fn format_raw_lines(ctx: &mut PipelineContext, raw_path: &Path) -> Result<()> {
    if !raw_path.exists() {
        return Err(HostsmateError::Connectivity(raw_path.to_path_buf()).into());
    }

    let file = File::open(raw_path)
        .with_context(|| format!("Failed to open raw blocklist file: {:?}", raw_path))?;
    let reader = BufReader::new(file);

    info!("Extracting domains from {:?}", raw_path);
    let before = ctx.collector.len();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read {:?}", raw_path))?;
        if should_skip(&line, &ctx.whitelist) {
            skipped += 1;
            continue;
        }
        ctx.collector.insert(extract_domain(&line));
    }

    debug!("Skipped {} lines of {:?}", skipped, raw_path);
    info!(
        "Unique domain set built: {} new entries ({} total)",
        ctx.collector.len() - before,
        ctx.collector.len()
    );
    Ok(())
}

/// Reduce a URL or bare domain to the domain name, without a leading `www.`.
///
/// # Examples
/// ```
/// use hostsmate::formatter::strip_domain_prefix;
/// assert_eq!(strip_domain_prefix("http://www.example.com"), "example.com");
/// assert_eq!(strip_domain_prefix("example.com"), "example.com");
/// assert_eq!(strip_domain_prefix("http://sub.example.com:8080/path"), "sub.example.com");
/// ```
pub fn strip_domain_prefix(url: &str) -> String {
    let url = url.trim();

    // "example.com:8080" parses with "example.com" as its scheme and no host
    let host = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string));

    let domain = host.unwrap_or_else(|| url.to_string());
    match domain.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}
