//! Schema registry: cross-document type resolution and recursive lookups

use redfish_csdl::model::{
    Action, Annotated, Annotation, ComplexType, EntityType, EnumType, Namespace,
    NavigationProperty, Property, SchemaDocument,
};
use redfish_csdl::{Result, SchemaDocumentParser, TypeRef};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

/// A resolved type definition of any CSDL kind.
#[derive(Debug, Clone, Copy)]
pub enum TypeDef<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
    Enum(&'a EnumType),
    Action(&'a Action),
}

impl<'a> TypeDef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            TypeDef::Entity(t) => &t.name,
            TypeDef::Complex(t) => &t.name,
            TypeDef::Enum(t) => &t.name,
            TypeDef::Action(a) => &a.name,
        }
    }

    /// The structured view, when this is an entity or complex type.
    pub fn as_structured(&self) -> Option<StructuredType<'a>> {
        match self {
            TypeDef::Entity(t) => Some(StructuredType::Entity(t)),
            TypeDef::Complex(t) => Some(StructuredType::Complex(t)),
            _ => None,
        }
    }
}

/// An entity or complex type: the two kinds that carry properties and can
/// inherit through BaseType.
#[derive(Debug, Clone, Copy)]
pub enum StructuredType<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
}

impl<'a> StructuredType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            StructuredType::Entity(t) => &t.name,
            StructuredType::Complex(t) => &t.name,
        }
    }

    pub fn base_type(&self) -> Option<&'a str> {
        match self {
            StructuredType::Entity(t) => t.base_type.as_deref(),
            StructuredType::Complex(t) => t.base_type.as_deref(),
        }
    }

    pub fn properties(&self) -> &'a [Property] {
        match self {
            StructuredType::Entity(t) => &t.properties,
            StructuredType::Complex(t) => &t.properties,
        }
    }

    pub fn navigation_properties(&self) -> &'a [NavigationProperty] {
        match self {
            StructuredType::Entity(t) => &t.navigation_properties,
            StructuredType::Complex(t) => &t.navigation_properties,
        }
    }

    pub fn annotations(&self) -> &'a [Annotation] {
        match self {
            StructuredType::Entity(t) => &t.annotations,
            StructuredType::Complex(t) => &t.annotations,
        }
    }
}

/// Registry of parsed CSDL documents.
///
/// Populated during setup via the `load_*` methods, read-only afterward.
/// Loading appends unconditionally: re-loading the same source keeps both
/// copies, and namespace names are assumed unique across the registry.
pub struct SchemaRegistry {
    documents: Vec<SchemaDocument>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    /// Parse a CSDL file and append it.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let doc = SchemaDocumentParser::parse_file(path)?;
        self.add_document(doc);
        Ok(())
    }

    /// Parse in-memory CSDL bytes tagged with a source URI and append them.
    pub fn load_bytes(&mut self, bytes: &[u8], source: &str) -> Result<()> {
        let doc = SchemaDocumentParser::parse_bytes(bytes, source)?;
        self.add_document(doc);
        Ok(())
    }

    /// Append an already-parsed document.
    pub fn add_document(&mut self, doc: SchemaDocument) {
        debug!(
            "registered schema document {} ({} namespace(s))",
            doc.source,
            doc.namespaces.len()
        );
        self.documents.push(doc);
    }

    /// All registered documents, in load order.
    pub fn documents(&self) -> &[SchemaDocument] {
        &self.documents
    }

    /// All registered namespaces, in document load order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.documents.iter().flat_map(|d| d.namespaces.iter())
    }

    /// First registered namespace with the exact given name.
    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces().find(|ns| ns.name == name)
    }

    /// Resolve a fully-qualified type identifier to its definition.
    ///
    /// Accepts an optional leading `#`. The identifier is split on the
    /// rightmost `.`, the namespace is matched exactly, then the namespace's
    /// entity types, complex types, enum types, and actions are scanned in
    /// that order; first match wins. Malformed identifiers and unknown
    /// names return `None`, never an error.
    pub fn resolve_type(&self, identifier: &str) -> Option<(&Namespace, TypeDef<'_>)> {
        let type_ref = TypeRef::parse(identifier)?;
        let ns = self.find_namespace(&type_ref.namespace)?;

        let def = ns
            .find_entity_type(&type_ref.name)
            .map(TypeDef::Entity)
            .or_else(|| ns.find_complex_type(&type_ref.name).map(TypeDef::Complex))
            .or_else(|| ns.find_enum_type(&type_ref.name).map(TypeDef::Enum))
            .or_else(|| ns.find_action(&type_ref.name).map(TypeDef::Action));

        match &def {
            Some(d) => trace!("resolved {} to {} in {}", identifier, d.name(), ns.name),
            None => trace!("type {} not found in namespace {}", identifier, ns.name),
        }
        def.map(|d| (ns, d))
    }

    /// Resolve an identifier to a structured (entity or complex) type.
    pub fn resolve_structured(&self, identifier: &str) -> Option<(&Namespace, StructuredType<'_>)> {
        let (ns, def) = self.resolve_type(identifier)?;
        def.as_structured().map(|s| (ns, s))
    }

    /// Whether `namespace.type_name` is reachable from the references of the
    /// given metadata document.
    ///
    /// Matching rule: a Reference matches a loaded document when the final
    /// `/`-segment of the Reference URI equals the final path segment of the
    /// document's source. For each Reference whose Include names the
    /// namespace, the matched document must actually define the type in that
    /// namespace.
    pub fn type_reachable_from_metadata(
        &self,
        namespace: &str,
        type_name: &str,
        metadata: &SchemaDocument,
    ) -> bool {
        for reference in &metadata.references {
            let referenced_file = reference.uri.rsplit('/').next().unwrap_or(&reference.uri);
            if !reference
                .includes
                .iter()
                .any(|inc| inc.namespace == namespace)
            {
                continue;
            }
            for doc in &self.documents {
                if doc.source_file_name() != referenced_file {
                    continue;
                }
                if let Some(ns) = doc.find_namespace(namespace) {
                    let found = ns.find_entity_type(type_name).is_some()
                        || ns.find_complex_type(type_name).is_some()
                        || ns.find_enum_type(type_name).is_some()
                        || ns.find_action(type_name).is_some();
                    if found {
                        trace!(
                            "{}.{} reachable via {} -> {}",
                            namespace, type_name, metadata.source, doc.source
                        );
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Direct annotation lookup on one element.
    pub fn annotation<'a>(
        &self,
        element: &'a (impl Annotated + ?Sized),
        term: &str,
    ) -> Option<&'a Annotation> {
        element.find_annotation(term)
    }

    /// Annotation lookup walking the BaseType chain.
    ///
    /// Only entity and complex types expose a base type, so properties and
    /// navigation properties never inherit annotations here. Any link in the
    /// chain that cannot be resolved ends the walk as "not found". A visited
    /// guard stops BaseType cycles in malformed schema sets.
    pub fn annotation_recursive<'a>(
        &'a self,
        element: &'a (impl Annotated + ?Sized),
        term: &str,
    ) -> Option<&'a Annotation> {
        if let Some(annotation) = element.find_annotation(term) {
            return Some(annotation);
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut base = element.base_type().map(str::to_string);
        while let Some(identifier) = base {
            if !visited.insert(identifier.clone()) {
                return None;
            }
            let Some((_, parent)) = self.resolve_structured(&identifier) else {
                return None;
            };
            if let Some(annotation) = parent.annotations().iter().find(|a| a.term == term) {
                return Some(annotation);
            }
            base = parent.base_type().map(str::to_string);
        }
        None
    }

    /// Whether a structured type carries the named property, searching its
    /// properties, navigation properties, same-named complex types and
    /// actions in the supplied namespace, then the BaseType chain.
    ///
    /// Every unresolvable step terminates that branch as "not found".
    pub fn has_property_recursive(
        &self,
        structured: StructuredType<'_>,
        property: &str,
        namespace: Option<&str>,
    ) -> bool {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = structured;

        loop {
            if current.properties().iter().any(|p| p.name == property) {
                return true;
            }
            if current
                .navigation_properties()
                .iter()
                .any(|p| p.name == property)
            {
                return true;
            }
            if let Some(ns_name) = namespace {
                if let Some(ns) = self.find_namespace(ns_name) {
                    if ns.find_complex_type(property).is_some() || ns.find_action(property).is_some()
                    {
                        return true;
                    }
                }
            }

            let Some(base) = current.base_type() else {
                return false;
            };
            if !visited.insert(base.to_string()) {
                return false;
            }
            let Some((_, parent)) = self.resolve_structured(base) else {
                trace!(
                    "property search for {} stopped at unresolvable base {}",
                    property, base
                );
                return false;
            };
            current = parent;
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
