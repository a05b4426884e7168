//! Raw-line whitelist.
//!
//! Whitelist sources are matched against blacklist lines verbatim: a source
//! line is skipped only when the exact same line appears in a whitelist. Line
//! terminators (`\n` or `\r\n`) are not part of the comparison.

use std::collections::HashSet;

/// Set of raw whitelist lines loaded once per pipeline run
#[derive(Debug, Clone, Default)]
pub struct WhitelistSet {
    lines: HashSet<String>,
}

impl WhitelistSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the text body of one whitelist source
    pub fn from_text(content: &str) -> Self {
        let mut set = Self::new();
        set.extend_from_text(content);
        set
    }

    /// Add every line of a whitelist body, verbatim
    pub fn extend_from_text(&mut self, content: &str) {
        self.lines
            .extend(content.lines().map(|line| line.to_string()));
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(strip_line_ending(line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_match() {
        let set = WhitelistSet::from_text("0.0.0.0 tracker.example.com\n");
        assert!(set.contains("0.0.0.0 tracker.example.com"));
        assert!(set.contains("0.0.0.0 tracker.example.com\n"));
    }

    #[test]
    fn test_crlf_whitelist_matches_lf_line() {
        let set = WhitelistSet::from_text("0.0.0.0 cdn.example.com\r\n");
        assert!(set.contains("0.0.0.0 cdn.example.com\n"));
    }

    #[test]
    fn test_match_is_not_normalized() {
        let set = WhitelistSet::from_text("0.0.0.0 tracker.example.com\n");
        // Same domain, different raw form
        assert!(!set.contains("127.0.0.1 tracker.example.com"));
        assert!(!set.contains("tracker.example.com"));
        assert!(!set.contains("0.0.0.0  tracker.example.com"));
    }

    #[test]
    fn test_extend_merges_sources() {
        let mut set = WhitelistSet::new();
        set.extend_from_text("a.example.com\nb.example.com\n");
        set.extend_from_text("b.example.com\nc.example.com");
        assert_eq!(set.len(), 3);
        assert!(set.contains("c.example.com"));
    }

    #[test]
    fn test_empty_set() {
        let set = WhitelistSet::new();
        assert!(set.is_empty());
        assert!(!set.contains("anything.example.com"));
    }
}
