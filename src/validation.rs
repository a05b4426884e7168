//! Centralized validation functions for hostsmate.
//!
//! This module provides unified validation for:
//! - Domains supplied on the command line
//! - Source URLs from the configuration

use anyhow::{bail, Result};
use url::Url;

/// Maximum total length of a domain name (RFC 1035)
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Validate a domain to be written into the hosts file.
///
/// Accepts letters, digits, hyphens and underscores in dot-separated labels.
/// Rejects anything that would break the `IP domain` line syntax.
///
/// # Examples
/// ```
/// use hostsmate::validation::validate_domain;
/// assert!(validate_domain("ads.example.com").is_ok());
/// assert!(validate_domain("bad domain").is_err());
/// assert!(validate_domain("").is_err());
/// ```
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        bail!("Domain is empty");
    }
    if domain.len() > MAX_DOMAIN_LEN {
        bail!("Domain is longer than {} characters: {}", MAX_DOMAIN_LEN, domain);
    }

    for label in domain.split('.') {
        if label.is_empty() {
            bail!("Domain has an empty label: {}", domain);
        }
        if label.len() > MAX_LABEL_LEN {
            bail!("Domain label longer than {} characters: {}", MAX_LABEL_LEN, domain);
        }
        if label.starts_with('-') || label.ends_with('-') {
            bail!("Domain label starts or ends with a hyphen: {}", domain);
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("Domain contains invalid characters: {}", domain);
        }
    }

    Ok(())
}

/// Validate a list source URL: must parse and use http or https.
///
/// # Examples
/// ```
/// use hostsmate::validation::validate_source_url;
/// assert!(validate_source_url("https://example.com/hosts").is_ok());
/// assert!(validate_source_url("ftp://example.com/hosts").is_err());
/// ```
pub fn validate_source_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", url, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("URL must use http or https, got '{}': {}", other, url),
    }
}
