//! # redfish-registry
//!
//! Aggregates parsed CSDL documents and answers type questions about them:
//! fully-qualified type resolution, inheritance-aware annotation and property
//! lookups, and reference reachability checks across documents.
//!
//! The registry is populated once during service setup and is read-only
//! afterward. Schema sets are frequently partial by design (only locally
//! available documents get loaded), so every lookup reports misses as a
//! distinct "not found" value rather than an error.

/// The `TypeBinder` bridge consumed by assertion logic.
pub mod binder;
/// Registry aggregation and lookup operations.
pub mod registry;

pub use binder::{BoundType, TypeBinder};
pub use registry::{SchemaRegistry, StructuredType, TypeDef};

pub use redfish_csdl::{Error, Result};
