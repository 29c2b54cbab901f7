#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # redfish-crawler
//!
//! Recursive discovery of every hypermedia-linked resource instance a
//! Redfish service exposes. Starting from a root URI, the crawler follows
//! each `@odata.id` link depth-first, producing two insertion-ordered URI
//! indices: the full resource graph, and a "no-members" view that omits
//! everything discovered beneath a `Members` collection.
//!
//! The crawl is synchronous, single-threaded, and best-effort: a fetch
//! failure truncates only the affected branch and is never surfaced as an
//! error. The transport itself is injected through the [`JsonFetcher`]
//! trait; this crate carries no HTTP code.

/// Depth-first resource graph discovery.
pub mod crawler;
/// The injected fetch capability and bundled implementations.
pub mod fetch;
/// Insertion-ordered URI indices.
pub mod index;
/// Transport-free link extraction from one JSON payload.
pub mod walk;

pub use crawler::{Crawler, ROOT_KEY};
pub use fetch::{DirectoryFetcher, FetchResponse, Headers, JsonFetcher, StaticFetcher};
pub use index::{CrawlResult, UriIndex};
pub use walk::{walk_links, Link};
