//! Binding resource instances to their declared types
//!
//! Redfish payloads declare their type in `@odata.type`
//! (`#ComputerSystem.v1_5_0.ComputerSystem`). The binder is the thin bridge
//! between a live payload and the registry's type graph, consumed by the
//! external assertion layer.

use crate::registry::{SchemaRegistry, TypeDef};
use redfish_csdl::model::Namespace;
use serde_json::Value;
use tracing::trace;

/// A resource type bound to its schema definition.
#[derive(Debug, Clone, Copy)]
pub struct BoundType<'a> {
    pub namespace: &'a Namespace,
    pub type_def: TypeDef<'a>,
}

/// Resolves declared type strings against a populated registry.
pub struct TypeBinder<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> TypeBinder<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Bind a declared type string (with or without the leading `#`).
    ///
    /// Returns `None` for malformed identifiers and for types the loaded
    /// schema set does not cover; callers treat that as a policy decision.
    pub fn bind(&self, declared: &str) -> Option<BoundType<'a>> {
        let (namespace, type_def) = self.registry.resolve_type(declared)?;
        Some(BoundType {
            namespace,
            type_def,
        })
    }

    /// Bind a resource payload via its `@odata.type` property.
    pub fn bind_payload(&self, payload: &Value) -> Option<BoundType<'a>> {
        let declared = payload.get("@odata.type")?.as_str()?;
        trace!("binding payload declaring type {}", declared);
        self.bind(declared)
    }
}
