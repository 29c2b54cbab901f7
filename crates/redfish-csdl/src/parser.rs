//! CSDL document parser
//!
//! Event-driven parse of one Edmx/CSDL XML document into a
//! [`SchemaDocument`]. CSDL mixes two XML namespaces: the Edmx envelope
//! namespace carries `Edmx`, `Reference`, `Include`, and `DataServices`,
//! while the Edm namespace carries `Schema` and everything below it. Elements
//! are matched against a fixed (local name, namespace) table; anything
//! unknown or in the wrong namespace is skipped, not an error.
//!
//! Malformed XML is fatal for the affected document only. The caller decides
//! whether to abort the run or skip the document.

use crate::model::{
    Action, Annotation, ComplexType, EntityType, EnumMember, EnumType, Include, Namespace,
    NavigationProperty, Parameter, Property, Reference, SchemaDocument,
};
use crate::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::path::Path;
use tracing::{debug, trace};

const EDMX_NS: &[u8] = b"http://docs.oasis-open.org/odata/ns/edmx";
const EDM_NS: &[u8] = b"http://docs.oasis-open.org/odata/ns/edm";

/// Which of the two CSDL namespaces an element resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XmlNs {
    Edmx,
    Edm,
    Other,
}

/// Parser producing one [`SchemaDocument`] per CSDL source.
///
/// Re-parsing the same source yields a fresh document each time; callers
/// wanting dedup filter by [`SchemaDocument::source`] themselves.
pub struct SchemaDocumentParser;

impl SchemaDocumentParser {
    /// Parse a CSDL document from a filesystem path.
    pub fn parse_file(path: &Path) -> Result<SchemaDocument> {
        trace!("parsing CSDL file: {:?}", path);
        let bytes = std::fs::read(path)?;
        Self::parse_bytes(&bytes, &path.display().to_string())
    }

    /// Parse a CSDL document from in-memory bytes tagged with a source URI.
    pub fn parse_bytes(bytes: &[u8], source: &str) -> Result<SchemaDocument> {
        let mut reader = NsReader::from_reader(bytes);
        reader.config_mut().trim_text(true);
        let parser = DocParser {
            reader,
            source: source.to_string(),
        };
        parser.parse()
    }
}

/// One in-flight document parse; holds the reader and the source identifier
/// used in error messages.
struct DocParser<'a> {
    reader: NsReader<&'a [u8]>,
    source: String,
}

impl DocParser<'_> {
    fn parse(mut self) -> Result<SchemaDocument> {
        let mut doc = SchemaDocument::new(self.source.clone());
        let mut seen_root = false;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            match ev {
                Event::Start(e) if ns == XmlNs::Edmx && local(&e) == b"Edmx" => {
                    seen_root = true;
                    doc.version = attr(&e, "Version");
                    self.parse_edmx(&mut doc)?;
                }
                Event::Empty(e) if ns == XmlNs::Edmx && local(&e) == b"Edmx" => {
                    seen_root = true;
                    doc.version = attr(&e, "Version");
                }
                Event::Start(e) => self.skip(&e)?,
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(Error::invalid(&self.source, "missing edmx:Edmx root element"));
        }

        debug!(
            "parsed CSDL document {}: {} reference(s), {} namespace(s)",
            doc.source,
            doc.references.len(),
            doc.namespaces.len()
        );
        Ok(doc)
    }

    /// Children of `edmx:Edmx`: `Reference` and `DataServices`.
    fn parse_edmx(&mut self, doc: &mut SchemaDocument) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            match ev {
                Event::Start(e) if ns == XmlNs::Edmx && local(&e) == b"Reference" => {
                    let uri = self.require_attr(&e, "Uri")?;
                    let includes = self.parse_reference_body()?;
                    doc.references.push(Reference { uri, includes });
                }
                Event::Empty(e) if ns == XmlNs::Edmx && local(&e) == b"Reference" => {
                    let uri = self.require_attr(&e, "Uri")?;
                    doc.references.push(Reference {
                        uri,
                        includes: Vec::new(),
                    });
                }
                Event::Start(e) if ns == XmlNs::Edmx && local(&e) == b"DataServices" => {
                    self.parse_data_services(doc)?;
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.eof("edmx:Edmx")),
                _ => {}
            }
        }
    }

    /// `edmx:Include` children of an `edmx:Reference`.
    fn parse_reference_body(&mut self) -> Result<Vec<Include>> {
        let mut includes = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            match ev {
                Event::Empty(e) if ns == XmlNs::Edmx && local(&e) == b"Include" => {
                    includes.push(Include {
                        namespace: self.require_attr(&e, "Namespace")?,
                        alias: attr(&e, "Alias"),
                    });
                }
                Event::Start(e) if ns == XmlNs::Edmx && local(&e) == b"Include" => {
                    includes.push(Include {
                        namespace: self.require_attr(&e, "Namespace")?,
                        alias: attr(&e, "Alias"),
                    });
                    self.skip(&e)?;
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(includes),
                Event::Eof => return Err(self.eof("edmx:Reference")),
                _ => {}
            }
        }
    }

    /// `Schema` children of `edmx:DataServices`.
    fn parse_data_services(&mut self, doc: &mut SchemaDocument) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            match ev {
                Event::Start(e) if ns == XmlNs::Edm && local(&e) == b"Schema" => {
                    let namespace = self.parse_schema(&e)?;
                    doc.namespaces.push(namespace);
                }
                Event::Empty(e) if ns == XmlNs::Edm && local(&e) == b"Schema" => {
                    doc.namespaces
                        .push(Namespace::new(self.require_attr(&e, "Namespace")?));
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.eof("edmx:DataServices")),
                _ => {}
            }
        }
    }

    /// One `Schema` element: entity types, complex types, enum types, and
    /// actions, in any order.
    fn parse_schema(&mut self, start: &BytesStart<'_>) -> Result<Namespace> {
        let mut namespace = Namespace::new(self.require_attr(start, "Namespace")?);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            let (is_start, e) = match ev {
                Event::Start(e) => (true, e),
                Event::Empty(e) => (false, e),
                Event::End(_) => {
                    trace!(
                        "parsed namespace {}: {} entity, {} complex, {} enum, {} action",
                        namespace.name,
                        namespace.entity_types.len(),
                        namespace.complex_types.len(),
                        namespace.enum_types.len(),
                        namespace.actions.len()
                    );
                    return Ok(namespace);
                }
                Event::Eof => return Err(self.eof("Schema")),
                _ => continue,
            };

            if ns != XmlNs::Edm {
                if is_start {
                    self.skip(&e)?;
                }
                continue;
            }

            match local(&e) {
                b"EntityType" => {
                    let mut entity = EntityType::new(self.require_attr(&e, "Name")?);
                    entity.base_type = attr(&e, "BaseType");
                    if is_start {
                        let body = self.parse_structured_body(&entity.name)?;
                        entity.annotations = body.annotations;
                        entity.properties = body.properties;
                        entity.navigation_properties = body.navigation_properties;
                    }
                    namespace.entity_types.push(entity);
                }
                b"ComplexType" => {
                    let mut complex = ComplexType::new(self.require_attr(&e, "Name")?);
                    complex.base_type = attr(&e, "BaseType");
                    if is_start {
                        let body = self.parse_structured_body(&complex.name)?;
                        complex.annotations = body.annotations;
                        complex.properties = body.properties;
                        complex.navigation_properties = body.navigation_properties;
                    }
                    namespace.complex_types.push(complex);
                }
                b"EnumType" => {
                    let mut en = EnumType::new(self.require_attr(&e, "Name")?);
                    if is_start {
                        self.parse_enum_body(&mut en)?;
                    }
                    namespace.enum_types.push(en);
                }
                b"Action" => {
                    let mut action = Action::new(self.require_attr(&e, "Name")?);
                    action.is_bound = bool_attr(&e, "IsBound", false);
                    if is_start {
                        self.parse_action_body(&mut action)?;
                    }
                    namespace.actions.push(action);
                }
                _ => {
                    if is_start {
                        self.skip(&e)?;
                    }
                }
            }
        }
    }

    /// Body shared by `EntityType` and `ComplexType`: annotations,
    /// properties, and navigation properties.
    fn parse_structured_body(&mut self, owner: &str) -> Result<StructuredBody> {
        let mut body = StructuredBody::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            let (is_start, e) = match ev {
                Event::Start(e) => (true, e),
                Event::Empty(e) => (false, e),
                Event::End(_) => return Ok(body),
                Event::Eof => return Err(self.eof(owner)),
                _ => continue,
            };

            if ns != XmlNs::Edm {
                if is_start {
                    self.skip(&e)?;
                }
                continue;
            }

            match local(&e) {
                b"Property" => {
                    let mut prop = Property {
                        name: self.require_attr(&e, "Name")?,
                        type_name: self.require_attr(&e, "Type")?,
                        nullable: bool_attr(&e, "Nullable", true),
                        annotations: Vec::new(),
                    };
                    if is_start {
                        prop.annotations = self.parse_annotation_list(&prop.name)?;
                    }
                    body.properties.push(prop);
                }
                b"NavigationProperty" => {
                    let mut nav = NavigationProperty {
                        name: self.require_attr(&e, "Name")?,
                        type_name: self.require_attr(&e, "Type")?,
                        nullable: bool_attr(&e, "Nullable", true),
                        contains_target: bool_attr(&e, "ContainsTarget", false),
                        annotations: Vec::new(),
                    };
                    if is_start {
                        nav.annotations = self.parse_annotation_list(&nav.name)?;
                    }
                    body.navigation_properties.push(nav);
                }
                b"Annotation" => {
                    body.annotations.push(self.parse_annotation(&e, is_start)?);
                }
                _ => {
                    if is_start {
                        self.skip(&e)?;
                    }
                }
            }
        }
    }

    /// Body of an `EnumType`: members and annotations.
    fn parse_enum_body(&mut self, en: &mut EnumType) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            let (is_start, e) = match ev {
                Event::Start(e) => (true, e),
                Event::Empty(e) => (false, e),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.eof("EnumType")),
                _ => continue,
            };

            if ns != XmlNs::Edm {
                if is_start {
                    self.skip(&e)?;
                }
                continue;
            }

            match local(&e) {
                b"Member" => {
                    let mut member = EnumMember {
                        name: self.require_attr(&e, "Name")?,
                        annotations: Vec::new(),
                    };
                    if is_start {
                        member.annotations = self.parse_annotation_list(&member.name)?;
                    }
                    en.members.push(member);
                }
                b"Annotation" => {
                    en.annotations.push(self.parse_annotation(&e, is_start)?);
                }
                _ => {
                    if is_start {
                        self.skip(&e)?;
                    }
                }
            }
        }
    }

    /// Body of an `Action`: parameters and annotations.
    fn parse_action_body(&mut self, action: &mut Action) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            let (is_start, e) = match ev {
                Event::Start(e) => (true, e),
                Event::Empty(e) => (false, e),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.eof("Action")),
                _ => continue,
            };

            if ns != XmlNs::Edm {
                if is_start {
                    self.skip(&e)?;
                }
                continue;
            }

            match local(&e) {
                b"Parameter" => {
                    let mut param = Parameter {
                        name: self.require_attr(&e, "Name")?,
                        param_type: attr(&e, "Type"),
                        nullable: bool_attr(&e, "Nullable", true),
                        annotations: Vec::new(),
                    };
                    if is_start {
                        param.annotations = self.parse_annotation_list(&param.name)?;
                    }
                    action.parameters.push(param);
                }
                b"Annotation" => {
                    action.annotations.push(self.parse_annotation(&e, is_start)?);
                }
                _ => {
                    if is_start {
                        self.skip(&e)?;
                    }
                }
            }
        }
    }

    /// Annotations hanging off a property, navigation property, member, or
    /// parameter element; anything else inside is skipped.
    fn parse_annotation_list(&mut self, owner: &str) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let (ns, ev) = self.read(&mut buf)?;
            match ev {
                Event::Empty(e) if ns == XmlNs::Edm && local(&e) == b"Annotation" => {
                    annotations.push(self.parse_annotation(&e, false)?);
                }
                Event::Start(e) if ns == XmlNs::Edm && local(&e) == b"Annotation" => {
                    annotations.push(self.parse_annotation(&e, true)?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(annotations),
                Event::Eof => return Err(self.eof(owner)),
                _ => {}
            }
        }
    }

    /// One `Annotation`: the Term plus at most one other attribute pair.
    /// Nested annotation expression bodies are not modeled and are skipped.
    fn parse_annotation(&mut self, e: &BytesStart<'_>, is_start: bool) -> Result<Annotation> {
        let term = self.require_attr(e, "Term")?;
        let attribute = e.attributes().flatten().find_map(|a| {
            let key = String::from_utf8_lossy(a.key.into_inner()).into_owned();
            if key == "Term" {
                None
            } else {
                Some((key, String::from_utf8_lossy(&a.value).into_owned()))
            }
        });
        if is_start {
            self.skip(e)?;
        }
        Ok(Annotation { term, attribute })
    }

    /// Read the next event, resolving its namespace against the fixed table.
    fn read<'b>(&mut self, buf: &'b mut Vec<u8>) -> Result<(XmlNs, Event<'b>)> {
        match self.reader.read_resolved_event_into(buf) {
            Ok((res, ev)) => {
                let ns = match res {
                    ResolveResult::Bound(n) if n.as_ref() == EDMX_NS => XmlNs::Edmx,
                    ResolveResult::Bound(n) if n.as_ref() == EDM_NS => XmlNs::Edm,
                    _ => XmlNs::Other,
                };
                Ok((ns, ev))
            }
            Err(cause) => Err(Error::Xml {
                document: self.source.clone(),
                cause,
            }),
        }
    }

    /// Skip the rest of the element opened by `start`.
    fn skip(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let mut buf = Vec::new();
        match self.reader.read_to_end_into(start.name(), &mut buf) {
            Ok(_) => Ok(()),
            Err(cause) => Err(Error::Xml {
                document: self.source.clone(),
                cause,
            }),
        }
    }

    fn require_attr(&self, e: &BytesStart<'_>, name: &str) -> Result<String> {
        attr(e, name).ok_or_else(|| {
            Error::invalid(
                &self.source,
                format!(
                    "<{}> is missing the {} attribute",
                    String::from_utf8_lossy(local(e)),
                    name
                ),
            )
        })
    }

    fn eof(&self, context: &str) -> Error {
        Error::invalid(&self.source, format!("unexpected end of document inside {context}"))
    }
}

#[derive(Default)]
struct StructuredBody {
    annotations: Vec<Annotation>,
    properties: Vec<Property>,
    navigation_properties: Vec<NavigationProperty>,
}

fn local<'a>(e: &'a BytesStart<'_>) -> &'a [u8] {
    e.local_name().into_inner()
}

fn attr(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        (a.key.into_inner() == name.as_bytes())
            .then(|| String::from_utf8_lossy(&a.value).into_owned())
    })
}

fn bool_attr(e: &BytesStart<'_>, name: &str, default: bool) -> bool {
    attr(e, name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Annotated;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Thermal.v1_0_0">
      <EntityType Name="Thermal">
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

    #[test]
    fn test_parse_minimal_document() {
        let doc = SchemaDocumentParser::parse_bytes(MINIMAL.as_bytes(), "Thermal_v1.xml").unwrap();
        assert_eq!(doc.source, "Thermal_v1.xml");
        assert_eq!(doc.version.as_deref(), Some("4.0"));
        assert_eq!(doc.namespaces.len(), 1);

        let ns = &doc.namespaces[0];
        assert_eq!(ns.name, "Thermal.v1_0_0");
        let entity = ns.find_entity_type("Thermal").unwrap();
        assert_eq!(entity.properties.len(), 1);
        assert_eq!(entity.properties[0].name, "Id");
        assert_eq!(entity.properties[0].type_name, "Edm.String");
        assert!(!entity.properties[0].nullable);
    }

    #[test]
    fn test_parse_missing_version_is_tolerated() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
  <edmx:DataServices/>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "noversion.xml").unwrap();
        assert!(doc.version.is_none());
    }

    #[test]
    fn test_parse_references_and_includes() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:Reference Uri="http://redfish.dmtf.org/schemas/v1/Resource_v1.xml">
    <edmx:Include Namespace="Resource"/>
    <edmx:Include Namespace="Resource.v1_0_0" Alias="Res"/>
  </edmx:Reference>
  <edmx:DataServices/>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "refs.xml").unwrap();
        assert_eq!(doc.references.len(), 1);
        let r = &doc.references[0];
        assert_eq!(r.uri, "http://redfish.dmtf.org/schemas/v1/Resource_v1.xml");
        assert_eq!(r.includes.len(), 2);
        assert_eq!(r.includes[0].namespace, "Resource");
        assert_eq!(r.includes[0].alias, None);
        assert_eq!(r.includes[1].alias.as_deref(), Some("Res"));
    }

    #[test]
    fn test_parse_multiple_namespaces() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Chassis"/>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Chassis.v1_0_0">
      <EntityType Name="Chassis" BaseType="Resource.v1_0_0.Resource"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "Chassis_v1.xml").unwrap();
        assert_eq!(doc.namespaces.len(), 2);
        assert!(doc.find_namespace("Chassis").is_some());
        let versioned = doc.find_namespace("Chassis.v1_0_0").unwrap();
        let entity = versioned.find_entity_type("Chassis").unwrap();
        assert_eq!(entity.base_type.as_deref(), Some("Resource.v1_0_0.Resource"));
    }

    #[test]
    fn test_parse_annotations_on_type_and_property() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Power.v1_0_0">
      <EntityType Name="Power">
        <Annotation Term="OData.Description" String="Power metrics."/>
        <Property Name="PowerControl" Type="Edm.Decimal">
          <Annotation Term="OData.Permissions" EnumMember="OData.Permission/Read"/>
        </Property>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "Power_v1.xml").unwrap();
        let entity = doc.namespaces[0].find_entity_type("Power").unwrap();

        let a = entity.find_annotation("OData.Description").unwrap();
        assert_eq!(
            a.attribute,
            Some(("String".to_string(), "Power metrics.".to_string()))
        );

        let prop = &entity.properties[0];
        let pa = prop.find_annotation("OData.Permissions").unwrap();
        assert_eq!(
            pa.attribute,
            Some(("EnumMember".to_string(), "OData.Permission/Read".to_string()))
        );
    }

    #[test]
    fn test_parse_enum_and_action() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="ComputerSystem.v1_0_0">
      <EnumType Name="BootSource">
        <Member Name="None"/>
        <Member Name="Pxe">
          <Annotation Term="OData.Description" String="Network boot."/>
        </Member>
      </EnumType>
      <Action Name="Reset" IsBound="true">
        <Parameter Name="System" Type="ComputerSystem.v1_0_0.Actions"/>
        <Parameter Name="ResetType" Type="Resource.ResetType" Nullable="false"/>
      </Action>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "System_v1.xml").unwrap();
        let ns = &doc.namespaces[0];

        let en = ns.find_enum_type("BootSource").unwrap();
        assert_eq!(en.members.len(), 2);
        assert_eq!(en.members[1].name, "Pxe");
        assert!(en.members[1].find_annotation("OData.Description").is_some());

        let action = ns.find_action("Reset").unwrap();
        assert!(action.is_bound);
        assert_eq!(action.parameters.len(), 2);
        assert_eq!(action.parameters[1].name, "ResetType");
        assert!(!action.parameters[1].nullable);
    }

    #[test]
    fn test_parse_navigation_property() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="ServiceRoot.v1_0_0">
      <EntityType Name="ServiceRoot">
        <NavigationProperty Name="Systems" Type="SystemCollection.SystemCollection" ContainsTarget="true"/>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "ServiceRoot_v1.xml").unwrap();
        let entity = doc.namespaces[0].find_entity_type("ServiceRoot").unwrap();
        let nav = &entity.navigation_properties[0];
        assert_eq!(nav.name, "Systems");
        assert!(nav.contains_target);
        assert!(nav.nullable);
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="X.v1_0_0">
      <TypeDefinition Name="Frequency" UnderlyingType="Edm.Decimal"/>
      <EntityContainer Name="Service">
        <EntitySet Name="Systems" EntityType="X.v1_0_0.X"/>
      </EntityContainer>
      <EntityType Name="X"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "X_v1.xml").unwrap();
        let ns = &doc.namespaces[0];
        assert_eq!(ns.entity_types.len(), 1);
        assert!(ns.find_entity_type("X").is_some());
    }

    #[test]
    fn test_element_in_wrong_namespace_is_ignored() {
        // A Schema element in the edmx namespace must not match the table.
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <edmx:Schema Namespace="Wrong"/>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Right"/>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let doc = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "ns.xml").unwrap();
        assert_eq!(doc.namespaces.len(), 1);
        assert_eq!(doc.namespaces[0].name, "Right");
    }

    #[test]
    fn test_malformed_xml_is_fatal_for_document() {
        let xml = "<edmx:Edmx xmlns:edmx=\"http://docs.oasis-open.org/odata/ns/edmx\"><broken";
        let result = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "broken.xml");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("broken.xml"));
    }

    #[test]
    fn test_missing_root_is_invalid() {
        let xml = r#"<NotEdmx xmlns="http://example.org/other"/>"#;
        let result = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "notedmx.xml");
        match result {
            Err(Error::Invalid { document, .. }) => assert_eq!(document, "notedmx.xml"),
            other => panic!("expected Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_attribute_is_invalid() {
        let xml = r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="X">
      <EntityType BaseType="Resource.Resource"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let result = SchemaDocumentParser::parse_bytes(xml.as_bytes(), "unnamed.xml");
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }

    #[test]
    fn test_reparse_yields_fresh_document() {
        let first = SchemaDocumentParser::parse_bytes(MINIMAL.as_bytes(), "Thermal_v1.xml").unwrap();
        let second =
            SchemaDocumentParser::parse_bytes(MINIMAL.as_bytes(), "Thermal_v1.xml").unwrap();
        assert_eq!(first.source, second.source);
        assert_eq!(first.namespaces.len(), second.namespaces.len());
    }
}
