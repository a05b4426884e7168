//! Deduplicating collector of normalized `0.0.0.0 <domain>\n` entries.

use std::collections::HashSet;

use crate::extractor::VOID_IP;

/// Unique, null-routed domain entries gathered during one pipeline run
#[derive(Debug, Clone, Default)]
pub struct DomainCollector {
    entries: HashSet<String>,
}

impl DomainCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize an extraction result and insert it.
    ///
    /// `None` is a no-op. Entries already carrying the null-route prefix are
    /// kept as-is, everything else gets `0.0.0.0 ` prepended.
    pub fn insert(&mut self, extracted: Option<String>) {
        let Some(entry) = extracted else {
            return;
        };

        if entry.starts_with(VOID_IP) {
            self.entries.insert(entry);
        } else {
            self.entries.insert(format!("{} {}", VOID_IP, entry));
        }
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Entries in lexical order, for reproducible hosts files
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        entries.sort_unstable();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_ignored() {
        let mut collector = DomainCollector::new();
        collector.insert(None);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_bare_domain_gets_prefix() {
        let mut collector = DomainCollector::new();
        collector.insert(Some("ads.example.com\n".to_string()));
        assert!(collector.contains("0.0.0.0 ads.example.com\n"));
    }

    #[test]
    fn test_null_routed_entry_kept_verbatim() {
        let mut collector = DomainCollector::new();
        collector.insert(Some("0.0.0.0 tracker.example.com\n".to_string()));
        assert!(collector.contains("0.0.0.0 tracker.example.com\n"));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse_across_prefixes() {
        let mut collector = DomainCollector::new();
        // As extracted from "127.0.0.1 ads.example.com" and "0.0.0.0 ads.example.com"
        collector.insert(Some("ads.example.com\n".to_string()));
        collector.insert(Some("0.0.0.0 ads.example.com\n".to_string()));
        collector.insert(Some("ads.example.com\n".to_string()));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_sorted_is_lexical() {
        let mut collector = DomainCollector::new();
        collector.insert(Some("b.example.com\n".to_string()));
        collector.insert(Some("a.example.com\n".to_string()));
        assert_eq!(
            collector.sorted(),
            vec!["0.0.0.0 a.example.com\n", "0.0.0.0 b.example.com\n"]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_every_entry_is_null_routed(domains in prop::collection::vec("[a-z]{1,8}\\.[a-z]{2,4}\n", 0..30)) {
            let mut collector = DomainCollector::new();
            for domain in &domains {
                collector.insert(Some(domain.clone()));
            }
            for entry in collector.iter() {
                prop_assert!(entry.starts_with("0.0.0.0 "));
                prop_assert!(entry.ends_with('\n'));
            }
        }

        #[test]
        fn prop_insert_is_idempotent(domain in "[a-z]{1,8}\\.[a-z]{2,4}\n") {
            let mut collector = DomainCollector::new();
            collector.insert(Some(domain.clone()));
            collector.insert(Some(domain));
            prop_assert_eq!(collector.len(), 1);
        }
    }
}
