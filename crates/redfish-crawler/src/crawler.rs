//! Depth-first resource graph discovery

use crate::fetch::JsonFetcher;
use crate::index::CrawlResult;
use crate::walk::walk_links;
use tracing::{debug, info, trace};

/// The key the root URI is recorded under.
pub const ROOT_KEY: &str = "Root Service";

/// Crawls a service once, depth-first, through an injected fetcher.
///
/// Every discovered (key, uri) pair is recorded before its URI is fetched,
/// so a branch whose GET fails still contributes exactly its own entry. A
/// started crawl always runs to completion; per-branch fetch failures are
/// the only truncation.
pub struct Crawler<F: JsonFetcher> {
    fetcher: F,
}

impl<F: JsonFetcher> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Discover the full resource graph reachable from `root_uri`.
    ///
    /// Returns the read-only snapshot; a run that wants a fresh view crawls
    /// again explicitly, nothing is cached here.
    pub fn crawl(&mut self, root_uri: &str) -> CrawlResult {
        info!("starting resource graph crawl at {}", root_uri);
        let mut result = CrawlResult::default();
        result.full.insert(ROOT_KEY, root_uri);
        result.no_members.insert(ROOT_KEY, root_uri);
        self.descend(ROOT_KEY, root_uri, false, &mut result);
        info!(
            "crawl complete: {} resource(s), {} outside Members collections",
            result.full.len(),
            result.no_members.len()
        );
        result
    }

    fn descend(&mut self, key: &str, uri: &str, via_members: bool, result: &mut CrawlResult) {
        let response = self.fetcher.fetch(uri);
        if !response.is_success() {
            // Best-effort: a failing branch yields no descendants and no error.
            debug!(
                "branch {} truncated at {} (status {:?})",
                key, uri, response.status
            );
            return;
        }
        let payload = response.payload.unwrap_or_default();

        for link in walk_links(&payload, key) {
            let beneath_members = via_members || link.via_members;
            if !result.full.insert(&link.key, &link.uri) {
                trace!("already discovered, skipping {}", link.uri);
                continue;
            }
            if !beneath_members {
                result.no_members.insert(&link.key, &link.uri);
            }
            trace!("discovered {} -> {}", link.key, link.uri);
            self.descend(&link.key, &link.uri, beneath_members, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;
    use serde_json::json;

    #[test]
    fn test_root_recorded_even_when_fetch_fails() {
        let fetcher = StaticFetcher::new().with_status("/redfish/v1/", 500);
        let result = Crawler::new(fetcher).crawl("/redfish/v1/");
        assert_eq!(result.full.len(), 1);
        assert_eq!(result.full.get(ROOT_KEY), Some("/redfish/v1/"));
    }

    #[test]
    fn test_cycle_terminates() {
        // Root links to itself through a child; dedup breaks the loop.
        let fetcher = StaticFetcher::new()
            .with_payload(
                "/redfish/v1/",
                json!({"Self": {"@odata.id": "/redfish/v1/loop"}}),
            )
            .with_payload(
                "/redfish/v1/loop",
                json!({"Back": {"@odata.id": "/redfish/v1/loop"}}),
            );
        let result = Crawler::new(fetcher).crawl("/redfish/v1/");
        assert_eq!(result.full.len(), 2);
    }

    #[test]
    fn test_depth_first_key_nesting() {
        let fetcher = StaticFetcher::new()
            .with_payload(
                "/redfish/v1/",
                json!({"Managers": {"@odata.id": "/redfish/v1/Managers"}}),
            )
            .with_payload(
                "/redfish/v1/Managers",
                json!({"Members": [{"@odata.id": "/redfish/v1/Managers/BMC"}]}),
            )
            .with_payload("/redfish/v1/Managers/BMC", json!({"Id": "BMC"}));
        let result = Crawler::new(fetcher).crawl("/redfish/v1/");
        assert_eq!(
            result.full.get("Root Service_Managers_Members_1"),
            Some("/redfish/v1/Managers/BMC")
        );
    }

    #[test]
    fn test_members_descendants_excluded_transitively() {
        // A resource found beneath Members links onward through a plain
        // object; that grandchild still stays out of the no-members view.
        let fetcher = StaticFetcher::new()
            .with_payload(
                "/redfish/v1/",
                json!({"Systems": {"@odata.id": "/Systems"}}),
            )
            .with_payload("/Systems", json!({"Members": [{"@odata.id": "/Systems/1"}]}))
            .with_payload(
                "/Systems/1",
                json!({"Bios": {"@odata.id": "/Systems/1/Bios"}}),
            )
            .with_payload("/Systems/1/Bios", json!({"Id": "Bios"}));
        let result = Crawler::new(fetcher).crawl("/redfish/v1/");

        assert!(result.full.contains_uri("/Systems/1/Bios"));
        assert!(!result.no_members.contains_uri("/Systems/1"));
        assert!(!result.no_members.contains_uri("/Systems/1/Bios"));
        assert!(result.no_members.contains_uri("/Systems"));
    }
}
