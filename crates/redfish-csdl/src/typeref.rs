//! Fully-qualified type identifier parsing
//!
//! CSDL refers to types by `namespace.typename` strings, and Redfish JSON
//! payloads prefix them with `#` (`#ServiceRoot.v1_5_0.ServiceRoot`). Every
//! place that needs to split such an identifier (type resolution, BaseType
//! chasing, property recursion) goes through [`TypeRef::parse`].

/// A parsed `namespace.typename` identifier.
///
/// The namespace is everything up to the rightmost `.`; the name is the
/// remainder. Versioned Redfish namespaces (`ServiceRoot.v1_5_0`) therefore
/// parse with the version kept on the namespace side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
}

impl TypeRef {
    /// Parse an identifier, tolerating one leading `#`.
    ///
    /// Returns `None` for malformed identifiers (no `.`, or an empty
    /// namespace or name half). Never panics.
    pub fn parse(identifier: &str) -> Option<Self> {
        let trimmed = identifier.strip_prefix('#').unwrap_or(identifier);
        let dot = trimmed.rfind('.')?;
        let (namespace, name) = (&trimmed[..dot], &trimmed[dot + 1..]);
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}
