#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # redfish-csdl
//!
//! CSDL (OData Common Schema Definition Language) document model and parser
//! for Redfish schemas.
//!
//! This crate turns one CSDL/XML document into a navigable object graph:
//! an Edmx envelope with its references, and one or more Schema namespaces
//! holding entity types, complex types, enum types, and actions. Aggregation
//! and cross-document lookups live in `redfish-registry`.

/// CSDL object-graph types and the `Annotated` trait.
pub mod model;
/// Event-driven XML parser producing `SchemaDocument`s.
pub mod parser;
/// Shared `namespace.typename` identifier parsing.
pub mod typeref;

pub use model::{
    Action, Annotated, Annotation, ComplexType, EntityType, EnumMember, EnumType, Include,
    Namespace, NavigationProperty, Parameter, Property, Reference, SchemaDocument,
};
pub use parser::SchemaDocumentParser;
pub use typeref::TypeRef;

use thiserror::Error;

/// Errors raised while parsing a CSDL document.
///
/// A parse error is fatal for the affected document only; the caller decides
/// whether to abort the run or skip the document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML error in {document}: {cause}")]
    Xml {
        document: String,
        #[source]
        cause: quick_xml::Error,
    },

    #[error("invalid CSDL in {document}: {reason}")]
    Invalid { document: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an invalid-document error with the document identifier.
    pub fn invalid(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            document: document.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for CSDL operations.
pub type Result<T> = std::result::Result<T, Error>;
