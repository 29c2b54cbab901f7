//! Integration tests for redfish-registry
//!
//! These load real CSDL documents through the parser and exercise the
//! registry's cross-document lookups end to end.

use redfish_registry::{SchemaRegistry, TypeBinder, TypeDef};

const RESOURCE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Resource.v1_0_0">
      <EntityType Name="Resource">
        <Annotation Term="OData.Description" String="Base resource."/>
        <Property Name="Id" Type="Edm.String" Nullable="false"/>
        <Property Name="Name" Type="Edm.String" Nullable="false"/>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

const CHASSIS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:Reference Uri="http://redfish.dmtf.org/schemas/v1/Resource_v1.xml">
    <edmx:Include Namespace="Resource.v1_0_0"/>
  </edmx:Reference>
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Chassis.v1_0_0">
      <EntityType Name="Chassis" BaseType="Resource.v1_0_0.Resource">
        <Property Name="ChassisType" Type="Chassis.v1_0_0.ChassisType" Nullable="false">
          <Annotation Term="OData.Permissions" EnumMember="OData.Permission/Read"/>
        </Property>
        <NavigationProperty Name="Thermal" Type="Thermal.Thermal" ContainsTarget="true"/>
      </EntityType>
      <EnumType Name="ChassisType">
        <Member Name="Rack"/>
        <Member Name="Blade"/>
      </EnumType>
      <Action Name="Reset" IsBound="true">
        <Parameter Name="Chassis" Type="Chassis.v1_0_0.Actions"/>
      </Action>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

fn loaded_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .load_bytes(RESOURCE_XML.as_bytes(), "Resource_v1.xml")
        .unwrap();
    registry
        .load_bytes(CHASSIS_XML.as_bytes(), "Chassis_v1.xml")
        .unwrap();
    registry
}

#[test]
fn test_parse_then_resolve_preserves_properties() {
    let registry = loaded_registry();

    let (ns, def) = registry.resolve_type("Resource.v1_0_0.Resource").unwrap();
    assert_eq!(ns.name, "Resource.v1_0_0");
    let TypeDef::Entity(entity) = def else {
        panic!("expected entity type")
    };
    assert_eq!(entity.properties.len(), 2);
    assert_eq!(entity.properties[0].name, "Id");
    assert_eq!(entity.properties[0].type_name, "Edm.String");
    assert!(!entity.properties[0].nullable);
}

#[test]
fn test_annotation_inherited_across_documents() {
    let registry = loaded_registry();

    let (_, chassis) = registry.resolve_structured("Chassis.v1_0_0.Chassis").unwrap();
    // Chassis itself carries no OData.Description; its base in the other
    // document does.
    let redfish_registry::StructuredType::Entity(entity) = chassis else {
        panic!("expected entity type")
    };
    assert!(registry.annotation(entity, "OData.Description").is_none());
    let inherited = registry
        .annotation_recursive(entity, "OData.Description")
        .unwrap();
    assert_eq!(inherited.attribute.as_ref().unwrap().1, "Base resource.");
}

#[test]
fn test_property_annotations_do_not_inherit() {
    let registry = loaded_registry();

    let (_, def) = registry.resolve_type("Chassis.v1_0_0.Chassis").unwrap();
    let TypeDef::Entity(entity) = def else {
        panic!("expected entity type")
    };
    let prop = &entity.properties[0];
    assert!(registry.annotation(prop, "OData.Permissions").is_some());
    // The owning type inherits OData.Description, the property must not.
    assert!(registry
        .annotation_recursive(prop, "OData.Description")
        .is_none());
}

#[test]
fn test_has_property_recursive_across_documents() {
    let registry = loaded_registry();

    let (_, chassis) = registry.resolve_structured("Chassis.v1_0_0.Chassis").unwrap();
    assert!(registry.has_property_recursive(chassis, "ChassisType", None));
    assert!(registry.has_property_recursive(chassis, "Thermal", None));
    // Inherited from Resource.v1_0_0.Resource in the other document.
    assert!(registry.has_property_recursive(chassis, "Id", None));
    assert!(!registry.has_property_recursive(chassis, "SerialNumber", None));
}

#[test]
fn test_type_reachable_from_metadata() {
    let registry = loaded_registry();
    let chassis_doc = &registry.documents()[1];

    // Resource_v1.xml is referenced by Chassis_v1.xml and loaded locally.
    assert!(registry.type_reachable_from_metadata(
        "Resource.v1_0_0",
        "Resource",
        chassis_doc
    ));
    // The namespace is referenced but the type does not exist there.
    assert!(!registry.type_reachable_from_metadata(
        "Resource.v1_0_0",
        "NotAType",
        chassis_doc
    ));
    // Namespace not named by any Include.
    assert!(!registry.type_reachable_from_metadata(
        "Thermal.v1_0_0",
        "Thermal",
        chassis_doc
    ));
}

#[test]
fn test_type_reachable_requires_matching_filename() {
    let mut registry = SchemaRegistry::new();
    // Loaded under a different filename than the Reference URI names.
    registry
        .load_bytes(RESOURCE_XML.as_bytes(), "Renamed_v1.xml")
        .unwrap();
    registry
        .load_bytes(CHASSIS_XML.as_bytes(), "Chassis_v1.xml")
        .unwrap();
    let chassis_doc = &registry.documents()[1];

    assert!(!registry.type_reachable_from_metadata(
        "Resource.v1_0_0",
        "Resource",
        chassis_doc
    ));
}

#[test]
fn test_binder_binds_enum_and_action_kinds() {
    let registry = loaded_registry();
    let binder = TypeBinder::new(&registry);

    let bound = binder.bind("#Chassis.v1_0_0.ChassisType").unwrap();
    assert!(matches!(bound.type_def, TypeDef::Enum(_)));

    let bound = binder.bind("Chassis.v1_0_0.Reset").unwrap();
    assert!(matches!(bound.type_def, TypeDef::Action(_)));
}
