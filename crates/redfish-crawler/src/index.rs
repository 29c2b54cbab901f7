//! Insertion-ordered URI indices
//!
//! A completed crawl maps each discovered key to exactly one URI, and each
//! URI appears under at most one key: first discovery wins. Lookups against
//! "already seen" use a hash set rather than the linear scan a naive port
//! would do; the first-discovery invariant and key ordering are unchanged.

use std::collections::HashSet;

/// Ordered key → URI index with first-discovery-wins URI dedup.
#[derive(Debug, Clone, Default)]
pub struct UriIndex {
    entries: Vec<(String, String)>,
    seen: HashSet<String>,
}

impl UriIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a (key, uri) pair unless the exact URI string is already
    /// present anywhere in the index.
    ///
    /// Dedup is exact string equality: syntactically different URIs for the
    /// same resource (trailing slash, query string, percent-encoding) are
    /// kept as distinct entries, so the index reports the link forms the
    /// service actually uses.
    pub fn insert(&mut self, key: impl Into<String>, uri: impl Into<String>) -> bool {
        let uri = uri.into();
        if !self.seen.insert(uri.clone()) {
            return false;
        }
        self.entries.push((key.into(), uri));
        true
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.seen.contains(uri)
    }

    /// URI recorded under the given key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, uri)| uri.as_str())
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, u)| (k.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a UriIndex {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// The read-only snapshot a crawl produces: the full index plus the view
/// without `Members` collections (member lists can be very large, and some
/// consumers only want the singleton graph).
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub full: UriIndex,
    pub no_members: UriIndex,
}
