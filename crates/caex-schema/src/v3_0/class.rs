//! Attributes, attribute types, interface classes and role classes of CAEX 3.0

use crate::common::{AttributeValueRequirement, ObjectHeader, RefSemantic};
use crate::error::Result;
use crate::xml::{FromXml, XmlElement};
use caex_generic::{AttributeSlot, ChildSlot, SchemaDescriptor, SlotValue};

/// A property of an element, possibly nested and typed by an attribute type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribute {
    pub object: ObjectHeader,
    pub default_value: Option<String>,
    pub value: Option<String>,
    pub ref_semantics: Vec<RefSemantic>,
    pub constraints: Vec<AttributeValueRequirement>,
    pub attributes: Vec<Attribute>,
    pub unit: Option<String>,
    pub attribute_data_type: Option<String>,
    pub ref_attribute_type: Option<String>,
}

pub static ATTRIBUTE: SchemaDescriptor = object_descriptor!(
    "Attribute",
    attributes: [
        AttributeSlot::optional("Unit"),
        AttributeSlot::optional("AttributeDataType"),
        AttributeSlot::optional("RefAttributeType"),
    ],
    children: [
        ChildSlot::simple("DefaultValue"),
        ChildSlot::simple("Value"),
        ChildSlot::object_list("RefSemantic"),
        ChildSlot::object_list("Constraint"),
        ChildSlot::object_list("Attribute"),
    ],
);

impl Attribute {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "Unit" => SlotValue::text(&self.unit),
            "AttributeDataType" => SlotValue::text(&self.attribute_data_type),
            "RefAttributeType" => SlotValue::text(&self.ref_attribute_type),
            "DefaultValue" => SlotValue::text(&self.default_value),
            "Value" => SlotValue::text(&self.value),
            "RefSemantic" => SlotValue::objects(&self.ref_semantics),
            "Constraint" => SlotValue::objects(&self.constraints),
            "Attribute" => SlotValue::objects(&self.attributes),
            _ => return self.object.lookup(name),
        })
    }
}

impl FromXml for Attribute {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ATTRIBUTE);
        Self::read(element)
    }
}

impl Attribute {
    fn read(element: XmlElement<'_>) -> Result<Self> {
        Ok(Self {
            object: ObjectHeader::read(element)?,
            default_value: element.child_text("DefaultValue"),
            value: element.child_text("Value"),
            ref_semantics: element.read_all("RefSemantic")?,
            constraints: element.read_all("Constraint")?,
            attributes: element.read_all("Attribute")?,
            unit: element.attribute_string("Unit"),
            attribute_data_type: element.attribute_string("AttributeDataType"),
            ref_attribute_type: element.attribute_string("RefAttributeType"),
        })
    }
}

impl_generalizable!(Attribute, ATTRIBUTE);

/// A reusable attribute definition inside an `AttributeTypeLib`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeType {
    pub attribute: Attribute,
    pub attribute_types: Vec<AttributeType>,
}

pub static ATTRIBUTE_TYPE: SchemaDescriptor = object_descriptor!(
    "AttributeType",
    attributes: [
        AttributeSlot::optional("Unit"),
        AttributeSlot::optional("AttributeDataType"),
        AttributeSlot::optional("RefAttributeType"),
    ],
    children: [
        ChildSlot::simple("DefaultValue"),
        ChildSlot::simple("Value"),
        ChildSlot::object_list("RefSemantic"),
        ChildSlot::object_list("Constraint"),
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("AttributeType"),
    ],
);

impl AttributeType {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "AttributeType" => Some(SlotValue::objects(&self.attribute_types)),
            _ => self.attribute.lookup(name),
        }
    }
}

impl FromXml for AttributeType {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ATTRIBUTE_TYPE);
        Ok(Self {
            attribute: Attribute::read(element)?,
            attribute_types: element.read_all("AttributeType")?,
        })
    }
}

impl_generalizable!(AttributeType, ATTRIBUTE_TYPE);

/// An interface class, also used for `ExternalInterface` instances.
///
/// Interfaces may nest further interfaces; inside an `InterfaceClassLib`
/// the class may also contain derived classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceClass {
    pub object: ObjectHeader,
    pub attributes: Vec<Attribute>,
    pub external_interfaces: Vec<InterfaceClass>,
    pub interface_classes: Vec<InterfaceClass>,
    pub ref_base_class_path: Option<String>,
}

pub static INTERFACE_CLASS: SchemaDescriptor = object_descriptor!(
    "InterfaceClass",
    attributes: [AttributeSlot::optional("RefBaseClassPath")],
    children: [
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("ExternalInterface"),
        ChildSlot::object_list("InterfaceClass"),
    ],
);

impl InterfaceClass {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "RefBaseClassPath" => SlotValue::text(&self.ref_base_class_path),
            "Attribute" => SlotValue::objects(&self.attributes),
            "ExternalInterface" => SlotValue::objects(&self.external_interfaces),
            "InterfaceClass" => SlotValue::objects(&self.interface_classes),
            _ => return self.object.lookup(name),
        })
    }
}

impl FromXml for InterfaceClass {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INTERFACE_CLASS);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            attributes: element.read_all("Attribute")?,
            external_interfaces: element.read_all("ExternalInterface")?,
            interface_classes: element.read_all("InterfaceClass")?,
            ref_base_class_path: element.attribute_string("RefBaseClassPath"),
        })
    }
}

impl_generalizable!(InterfaceClass, INTERFACE_CLASS);

/// A role class, possibly containing derived role classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleClass {
    pub object: ObjectHeader,
    pub attributes: Vec<Attribute>,
    pub external_interfaces: Vec<InterfaceClass>,
    pub role_classes: Vec<RoleClass>,
    pub ref_base_class_path: Option<String>,
}

pub static ROLE_CLASS: SchemaDescriptor = object_descriptor!(
    "RoleClass",
    attributes: [AttributeSlot::optional("RefBaseClassPath")],
    children: [
        ChildSlot::object_list("Attribute"),
        ChildSlot::object_list("ExternalInterface"),
        ChildSlot::object_list("RoleClass"),
    ],
);

impl RoleClass {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "RefBaseClassPath" => SlotValue::text(&self.ref_base_class_path),
            "Attribute" => SlotValue::objects(&self.attributes),
            "ExternalInterface" => SlotValue::objects(&self.external_interfaces),
            "RoleClass" => SlotValue::objects(&self.role_classes),
            _ => return self.object.lookup(name),
        })
    }
}

impl FromXml for RoleClass {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ROLE_CLASS);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            attributes: element.read_all("Attribute")?,
            external_interfaces: element.read_all("ExternalInterface")?,
            role_classes: element.read_all("RoleClass")?,
            ref_base_class_path: element.attribute_string("RefBaseClassPath"),
        })
    }
}

impl_generalizable!(RoleClass, ROLE_CLASS);
