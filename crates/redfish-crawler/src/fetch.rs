//! The injected fetch capability
//!
//! Transport (connection setup, auth headers, redirects, compression) is an
//! external collaborator. The crawler only needs `fetch(uri)` returning an
//! optional JSON payload, optional headers, and an optional status code;
//! anything short of a 2xx with a payload truncates the branch being
//! crawled.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Case-insensitive response header map.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    // Keys stored lowercased.
    entries: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// The result of one fetch attempt. All fields are optional: a transport
/// failure yields a response with nothing in it.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub payload: Option<Value>,
    pub headers: Option<Headers>,
    pub status: Option<u16>,
}

impl FetchResponse {
    /// A 200 response carrying the given payload.
    pub fn success(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            headers: None,
            status: Some(200),
        }
    }

    /// A response that reached the service but carries no usable payload.
    pub fn status_only(status: u16) -> Self {
        Self {
            payload: None,
            headers: None,
            status: Some(status),
        }
    }

    /// A transport-level failure: no status, no payload.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Whether the crawl may descend through this response: a 2xx status
    /// with a payload present.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(s) if (200..300).contains(&s)) && self.payload.is_some()
    }
}

/// The fetch capability injected into the crawler.
pub trait JsonFetcher {
    fn fetch(&mut self, uri: &str) -> FetchResponse;
}

impl<T: JsonFetcher + ?Sized> JsonFetcher for &mut T {
    fn fetch(&mut self, uri: &str) -> FetchResponse {
        (**self).fetch(uri)
    }
}

/// In-memory fetcher backed by a URI → payload map. Unknown URIs report 404.
/// Used by tests and anywhere a service snapshot already lives in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    payloads: HashMap<String, Value>,
    statuses: HashMap<String, u16>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` with status 200 for `uri`.
    pub fn with_payload(mut self, uri: impl Into<String>, payload: Value) -> Self {
        self.payloads.insert(uri.into(), payload);
        self
    }

    /// Serve a bare status (no payload) for `uri`.
    pub fn with_status(mut self, uri: impl Into<String>, status: u16) -> Self {
        self.statuses.insert(uri.into(), status);
        self
    }
}

impl JsonFetcher for StaticFetcher {
    fn fetch(&mut self, uri: &str) -> FetchResponse {
        if let Some(status) = self.statuses.get(uri) {
            return FetchResponse::status_only(*status);
        }
        match self.payloads.get(uri) {
            Some(payload) => FetchResponse::success(payload.clone()),
            None => FetchResponse::status_only(404),
        }
    }
}

/// Fetcher replaying a recorded service tree from disk.
///
/// Uses the Redfish mockup layout: the payload for `/redfish/v1/Systems` is
/// read from `<root>/redfish/v1/Systems/index.json`. Missing files report
/// 404; unreadable or non-JSON files report a transport failure. Either way
/// the affected branch is simply not descended.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn payload_path(&self, uri: &str) -> PathBuf {
        let trimmed = uri.trim_start_matches('/').trim_end_matches('/');
        let mut path = self.root.clone();
        for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push("index.json");
        path
    }
}

impl JsonFetcher for DirectoryFetcher {
    fn fetch(&mut self, uri: &str) -> FetchResponse {
        let path = self.payload_path(uri);
        trace!("replaying {} from {:?}", uri, path);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => {
                debug!("no recorded payload for {}", uri);
                return FetchResponse::status_only(404);
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(payload) => FetchResponse::success(payload),
            Err(err) => {
                debug!("recorded payload for {} is not JSON: {}", uri, err);
                FetchResponse::failed()
            }
        }
    }
}
