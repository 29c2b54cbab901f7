//! CSDL object-graph model
//!
//! One [`SchemaDocument`] per parsed Edmx file. Documents hold references to
//! external schema documents plus one or more named [`Namespace`] containers
//! of type definitions. The model is deliberately flat and owned: the
//! registry resolves cross-document links by name at lookup time, never by
//! pointer.

/// One parsed CSDL document (the Edmx envelope).
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Where the document came from: a filesystem path or a source URI.
    pub source: String,
    /// The Edmx `Version` attribute; absent is tolerated.
    pub version: Option<String>,
    /// External document references declared by this document.
    pub references: Vec<Reference>,
    /// Schema namespaces declared by this document.
    pub namespaces: Vec<Namespace>,
}

impl SchemaDocument {
    /// Create an empty document for the given source identifier.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            version: None,
            references: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// The final path segment of the source (the filename for file sources).
    pub fn source_file_name(&self) -> &str {
        self.source.rsplit('/').next().unwrap_or(&self.source)
    }

    /// Find a declared namespace by exact name.
    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }
}

/// An `edmx:Reference`: the URI of an external document plus the namespaces
/// imported from it.
#[derive(Debug, Clone)]
pub struct Reference {
    pub uri: String,
    pub includes: Vec<Include>,
}

/// An `edmx:Include` inside a reference.
#[derive(Debug, Clone)]
pub struct Include {
    pub namespace: String,
    pub alias: Option<String>,
}

/// A `Schema` element: a named container of type definitions.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: String,
    pub entity_types: Vec<EntityType>,
    pub complex_types: Vec<ComplexType>,
    pub enum_types: Vec<EnumType>,
    pub actions: Vec<Action>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_types: Vec::new(),
            complex_types: Vec::new(),
            enum_types: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    pub fn find_complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|t| t.name == name)
    }

    pub fn find_enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|t| t.name == name)
    }

    pub fn find_action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }
}

/// A CSDL `EntityType`: a structured type with resource identity.
#[derive(Debug, Clone)]
pub struct EntityType {
    pub name: String,
    /// Fully-qualified `namespace.typename` of the parent type, if any.
    pub base_type: Option<String>,
    pub annotations: Vec<Annotation>,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            annotations: Vec::new(),
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }
}

/// A CSDL `ComplexType`: a structured type without resource identity.
#[derive(Debug, Clone)]
pub struct ComplexType {
    pub name: String,
    pub base_type: Option<String>,
    pub annotations: Vec<Annotation>,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
}

impl ComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            annotations: Vec::new(),
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }
}

/// A CSDL `EnumType` with its ordered members.
#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// One `Member` of an enum type.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub annotations: Vec<Annotation>,
}

/// A CSDL `Action` with its ordered parameters.
#[derive(Debug, Clone)]
pub struct Action {
    pub name: String,
    pub is_bound: bool,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<Parameter>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bound: false,
            annotations: Vec::new(),
            parameters: Vec::new(),
        }
    }
}

/// One `Parameter` of an action.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub param_type: Option<String>,
    pub nullable: bool,
    pub annotations: Vec<Annotation>,
}

/// A structural `Property` holding an inline value.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub type_name: String,
    pub nullable: bool,
    pub annotations: Vec<Annotation>,
}

/// A `NavigationProperty`: a property referencing another resource.
#[derive(Debug, Clone)]
pub struct NavigationProperty {
    pub name: String,
    pub type_name: String,
    pub nullable: bool,
    /// Whether the target resource is contained in this one (`ContainsTarget`).
    pub contains_target: bool,
    pub annotations: Vec<Annotation>,
}

/// A CSDL `Annotation`: a term plus at most one attribute key/value pair.
///
/// The full OData annotation value grammar (records, collections, nested
/// expressions) is out of scope; conformance checks only consume the term and
/// a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub term: String,
    pub attribute: Option<(String, String)>,
}

impl Annotation {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute = Some((key.into(), value.into()));
        self
    }
}

/// Uniform annotation access across schema elements.
///
/// `base_type` is `Some` only for EntityType and ComplexType. Properties,
/// navigation properties, enum types, members, actions, and parameters have
/// no inheritance of their own: OData properties are not overridden, so
/// recursive annotation lookups stop at them by construction.
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    fn base_type(&self) -> Option<&str> {
        None
    }

    /// First annotation matching the given term, if any.
    fn find_annotation(&self, term: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.term == term)
    }
}

impl Annotated for EntityType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }
}

impl Annotated for ComplexType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }
}

impl Annotated for EnumType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for EnumMember {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for Action {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for Parameter {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for Property {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for NavigationProperty {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
