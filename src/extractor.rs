//! Domain extraction from raw blocklist lines.
//!
//! Handles the three shapes found in public blacklists:
//!
//! ```text
//! 127.0.0.1 ads.example.com      -> "ads.example.com\n"
//! 0.0.0.0 tracker.example.com    -> "0.0.0.0 tracker.example.com\n"
//! ||banner.example.net^          -> "banner.example.net\n"
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Loopback address used by many hosts-format lists
pub const LOCALHOST: &str = "127.0.0.1";

/// Null-route address every blocked domain is mapped to
pub const VOID_IP: &str = "0.0.0.0";

/// One or more `label.` segments followed by a final label
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9-]+[.]+)+[a-z0-9-]+").expect("domain pattern is valid")
});

/// Extract a newline-terminated domain entry from one raw line.
///
/// Returns `None` when the line carries nothing domain-shaped, or when a
/// hosts-style line is missing its hostname token.
pub fn extract_domain(line: &str) -> Option<String> {
    if line.starts_with(LOCALHOST) {
        let mut tokens = line.split_whitespace();
        return match tokens.nth(1) {
            Some(host) => Some(format!("{}\n", host)),
            None => {
                debug!("Malformed loopback line skipped: {:?}", line);
                None
            }
        };
    }

    if line.starts_with(VOID_IP) {
        let mut tokens = line.split_whitespace();
        return match (tokens.next(), tokens.next()) {
            (Some(ip), Some(host)) => Some(format!("{} {}\n", ip, host)),
            _ => {
                debug!("Malformed null-route line skipped: {:?}", line);
                None
            }
        };
    }

    DOMAIN_RE
        .find(line)
        .map(|m| format!("{}\n", m.as_str()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn host_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9-]{1,12}", 2..5).prop_map(|labels| labels.join("."))
    }

    proptest! {
        #[test]
        fn prop_loopback_returns_host(host in host_strategy()) {
            let line = format!("{} {}\n", LOCALHOST, host);
            prop_assert_eq!(extract_domain(&line), Some(format!("{}\n", host)));
        }

        #[test]
        fn prop_null_route_returns_two_tokens(host in host_strategy(), extra in "[a-z ]{0,10}") {
            let line = format!("{} {} {}\n", VOID_IP, host, extra);
            prop_assert_eq!(extract_domain(&line), Some(format!("0.0.0.0 {}\n", host)));
        }

        #[test]
        fn prop_pattern_match_is_newline_terminated(host in host_strategy()) {
            let line = format!("||{}^", host);
            prop_assert_eq!(extract_domain(&line), Some(format!("{}\n", host)));
        }

        #[test]
        fn prop_arbitrary_input_no_panic(line in ".{0,200}") {
            if let Some(entry) = extract_domain(&line) {
                prop_assert!(entry.ends_with('\n'));
            }
        }
    }
}
