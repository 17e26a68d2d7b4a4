//! System unit classes, internal elements and their links in CAEX 3.0

use super::class::{Attribute, InterfaceClass};
use crate::common::{AttributeNameMapping, Header, ObjectHeader};
use crate::error::Result;
use crate::xml::{FromXml, XmlElement};
use caex_generic::{AttributeSlot, ChildSlot, SchemaDescriptor, SlotValue};

/// Content shared by system unit classes and internal elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemUnitBody {
    pub attributes: Vec<Attribute>,
    pub external_interfaces: Vec<InterfaceClass>,
    pub internal_elements: Vec<InternalElement>,
    pub supported_role_classes: Vec<SupportedRoleClass>,
    pub internal_links: Vec<InternalLink>,
}

impl SystemUnitBody {
    fn read(element: XmlElement<'_>) -> Result<Self> {
        Ok(Self {
            attributes: element.read_all("Attribute")?,
            external_interfaces: element.read_all("ExternalInterface")?,
            internal_elements: element.read_all("InternalElement")?,
            supported_role_classes: element.read_all("SupportedRoleClass")?,
            internal_links: element.read_all("InternalLink")?,
        })
    }

    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "Attribute" => SlotValue::objects(&self.attributes),
            "ExternalInterface" => SlotValue::objects(&self.external_interfaces),
            "InternalElement" => SlotValue::objects(&self.internal_elements),
            "SupportedRoleClass" => SlotValue::objects(&self.supported_role_classes),
            "InternalLink" => SlotValue::objects(&self.internal_links),
            _ => return None,
        })
    }
}

/// A system unit class, possibly containing derived classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemUnitClass {
    pub object: ObjectHeader,
    pub body: SystemUnitBody,
    pub system_unit_classes: Vec<SystemUnitClass>,
    pub ref_base_class_path: Option<String>,
}

pub static SYSTEM_UNIT_CLASS: SchemaDescriptor = object_descriptor!(
    "SystemUnitClass",
    attributes: [AttributeSlot::optional("RefBaseClassPath")],
    children: [
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("ExternalInterface"),
        ChildSlot::object_list("InternalElement"),
        ChildSlot::object_list("SupportedRoleClass"),
        ChildSlot::object_list("InternalLink"),
        ChildSlot::object_list("SystemUnitClass"),
    ],
);

impl SystemUnitClass {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "RefBaseClassPath" => Some(SlotValue::text(&self.ref_base_class_path)),
            "SystemUnitClass" => Some(SlotValue::objects(&self.system_unit_classes)),
            _ => self
                .body
                .lookup(name)
                .or_else(|| self.object.lookup(name)),
        }
    }
}

impl FromXml for SystemUnitClass {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&SYSTEM_UNIT_CLASS);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            body: SystemUnitBody::read(element)?,
            system_unit_classes: element.read_all("SystemUnitClass")?,
            ref_base_class_path: element.attribute_string("RefBaseClassPath"),
        })
    }
}

impl_generalizable!(SystemUnitClass, SYSTEM_UNIT_CLASS);

/// An instance inside an instance hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternalElement {
    pub object: ObjectHeader,
    pub body: SystemUnitBody,
    pub role_requirements: Option<RoleRequirements>,
    pub ref_base_system_unit_path: Option<String>,
}

pub static INTERNAL_ELEMENT: SchemaDescriptor = object_descriptor!(
    "InternalElement",
    attributes: [AttributeSlot::optional("RefBaseSystemUnitPath")],
    children: [
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("ExternalInterface"),
        ChildSlot::object_list("InternalElement"),
        ChildSlot::object_list("SupportedRoleClass"),
        ChildSlot::object_list("InternalLink"),
        ChildSlot::object("RoleRequirements"),
    ],
);

impl InternalElement {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "RefBaseSystemUnitPath" => Some(SlotValue::text(&self.ref_base_system_unit_path)),
            "RoleRequirements" => Some(SlotValue::object(&self.role_requirements)),
            _ => self
                .body
                .lookup(name)
                .or_else(|| self.object.lookup(name)),
        }
    }
}

impl FromXml for InternalElement {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INTERNAL_ELEMENT);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            body: SystemUnitBody::read(element)?,
            role_requirements: element.read_one("RoleRequirements")?,
            ref_base_system_unit_path: element.attribute_string("RefBaseSystemUnitPath"),
        })
    }
}

impl_generalizable!(InternalElement, INTERNAL_ELEMENT);

/// The role an internal element is required to play, with its mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRequirements {
    pub header: Header,
    pub attributes: Vec<Attribute>,
    pub external_interfaces: Vec<InterfaceClass>,
    pub mapping_object: Option<Mapping>,
    pub ref_base_role_class_path: Option<String>,
}

pub static ROLE_REQUIREMENTS: SchemaDescriptor = basic_descriptor!(
    "RoleRequirements",
    attributes: [AttributeSlot::optional("RefBaseRoleClassPath")],
    children: [
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("ExternalInterface"),
        ChildSlot::object("MappingObject"),
    ],
);

impl RoleRequirements {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "RefBaseRoleClassPath" => SlotValue::text(&self.ref_base_role_class_path),
            "Attribute" => SlotValue::objects(&self.attributes),
            "ExternalInterface" => SlotValue::objects(&self.external_interfaces),
            "MappingObject" => SlotValue::object(&self.mapping_object),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for RoleRequirements {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ROLE_REQUIREMENTS);
        Ok(Self {
            header: Header::read(element)?,
            attributes: element.read_all("Attribute")?,
            external_interfaces: element.read_all("ExternalInterface")?,
            mapping_object: element.read_one("MappingObject")?,
            ref_base_role_class_path: element.attribute_string("RefBaseRoleClassPath"),
        })
    }
}

impl_generalizable!(RoleRequirements, ROLE_REQUIREMENTS);

/// A role class the owning system unit can fulfil
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportedRoleClass {
    pub header: Header,
    pub mapping_object: Option<Mapping>,
    pub ref_role_class_path: Option<String>,
}

pub static SUPPORTED_ROLE_CLASS: SchemaDescriptor = basic_descriptor!(
    "SupportedRoleClass",
    attributes: [AttributeSlot::required("RefRoleClassPath")],
    children: [ChildSlot::object("MappingObject")],
);

impl SupportedRoleClass {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "RefRoleClassPath" => SlotValue::text(&self.ref_role_class_path),
            "MappingObject" => SlotValue::object(&self.mapping_object),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for SupportedRoleClass {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&SUPPORTED_ROLE_CLASS);
        Ok(Self {
            header: Header::read(element)?,
            mapping_object: element.read_one("MappingObject")?,
            ref_role_class_path: element.attribute_string("RefRoleClassPath"),
        })
    }
}

impl_generalizable!(SupportedRoleClass, SUPPORTED_ROLE_CLASS);

/// A link between two interfaces, addressed by path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternalLink {
    pub object: ObjectHeader,
    pub ref_partner_side_a: Option<String>,
    pub ref_partner_side_b: Option<String>,
}

pub static INTERNAL_LINK: SchemaDescriptor = object_descriptor!(
    "InternalLink",
    attributes: [
        AttributeSlot::required("RefPartnerSideA"),
        AttributeSlot::required("RefPartnerSideB"),
    ],
    children: [],
);

impl InternalLink {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "RefPartnerSideA" => Some(SlotValue::text(&self.ref_partner_side_a)),
            "RefPartnerSideB" => Some(SlotValue::text(&self.ref_partner_side_b)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for InternalLink {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INTERNAL_LINK);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            ref_partner_side_a: element.attribute_string("RefPartnerSideA"),
            ref_partner_side_b: element.attribute_string("RefPartnerSideB"),
        })
    }
}

impl_generalizable!(InternalLink, INTERNAL_LINK);

/// Mapping between a role class and the hosting system unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    pub header: Header,
    pub attribute_name_mappings: Vec<AttributeNameMapping>,
    pub interface_id_mappings: Vec<InterfaceIdMapping>,
}

pub static MAPPING: SchemaDescriptor = basic_descriptor!(
    "Mapping",
    attributes: [],
    children: [
        ChildSlot::object_list("AttributeNameMapping"),
        ChildSlot::object_list("InterfaceIDMapping"),
    ],
);

impl Mapping {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "AttributeNameMapping" => SlotValue::objects(&self.attribute_name_mappings),
            "InterfaceIDMapping" => SlotValue::objects(&self.interface_id_mappings),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for Mapping {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&MAPPING);
        Ok(Self {
            header: Header::read(element)?,
            attribute_name_mappings: element.read_all("AttributeNameMapping")?,
            interface_id_mappings: element.read_all("InterfaceIDMapping")?,
        })
    }
}

impl_generalizable!(Mapping, MAPPING);

/// Mapping between a system unit interface and a role interface, by ID
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceIdMapping {
    pub header: Header,
    pub system_unit_interface_id: Option<String>,
    pub role_interface_id: Option<String>,
}

pub static INTERFACE_ID_MAPPING: SchemaDescriptor = basic_descriptor!(
    "InterfaceIDMapping",
    attributes: [
        AttributeSlot::required("SystemUnitInterfaceID"),
        AttributeSlot::required("RoleInterfaceID"),
    ],
    children: [],
);

impl InterfaceIdMapping {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "SystemUnitInterfaceID" => Some(SlotValue::text(&self.system_unit_interface_id)),
            "RoleInterfaceID" => Some(SlotValue::text(&self.role_interface_id)),
            _ => self.header.lookup(name),
        }
    }
}

impl FromXml for InterfaceIdMapping {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INTERFACE_ID_MAPPING);
        Ok(Self {
            header: Header::read(element)?,
            system_unit_interface_id: element.attribute_string("SystemUnitInterfaceID"),
            role_interface_id: element.attribute_string("RoleInterfaceID"),
        })
    }
}

impl_generalizable!(InterfaceIdMapping, INTERFACE_ID_MAPPING);
