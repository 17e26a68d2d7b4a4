//! Object model of CAEX 2.15.
//!
//! Each type mirrors one complex type of the 2.15 schema, reads itself from
//! an XML element and publishes a static descriptor for generalization.

mod class;
mod system_unit;

pub use class::{Attribute, InterfaceClass, RoleClass, ATTRIBUTE, INTERFACE_CLASS, ROLE_CLASS};
pub use system_unit::{
    InterfaceNameMapping, InternalElement, InternalLink, Mapping, RoleRequirements,
    SupportedRoleClass, SystemUnitBody, SystemUnitClass, INTERFACE_NAME_MAPPING,
    INTERNAL_ELEMENT, INTERNAL_LINK, MAPPING, ROLE_REQUIREMENTS, SUPPORTED_ROLE_CLASS,
    SYSTEM_UNIT_CLASS,
};

use crate::common::{ExternalReference, Header, ObjectHeader};
use crate::error::Result;
use crate::xml::{FromXml, XmlElement};
use caex_generic::{AttributeSlot, ChildSlot, SchemaDescriptor, SlotValue};

/// Root of a CAEX 2.15 document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaexFile {
    pub header: Header,
    pub external_references: Vec<ExternalReference>,
    pub instance_hierarchies: Vec<InstanceHierarchy>,
    pub interface_class_libs: Vec<InterfaceClassLib>,
    pub role_class_libs: Vec<RoleClassLib>,
    pub system_unit_class_libs: Vec<SystemUnitClassLib>,
    pub file_name: Option<String>,
    pub schema_version: Option<String>,
}

pub static CAEX_FILE: SchemaDescriptor = basic_descriptor!(
    "CAEXFile",
    attributes: [
        AttributeSlot::optional("FileName"),
        AttributeSlot::required("SchemaVersion"),
    ],
    children: [
        ChildSlot::object_list("ExternalReference"),
        ChildSlot::object_list("InstanceHierarchy"),
        ChildSlot::object_list("InterfaceClassLib"),
        ChildSlot::object_list("RoleClassLib"),
        ChildSlot::object_list("SystemUnitClassLib"),
    ],
);

impl CaexFile {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "FileName" => SlotValue::text(&self.file_name),
            "SchemaVersion" => SlotValue::text(&self.schema_version),
            "ExternalReference" => SlotValue::objects(&self.external_references),
            "InstanceHierarchy" => SlotValue::objects(&self.instance_hierarchies),
            "InterfaceClassLib" => SlotValue::objects(&self.interface_class_libs),
            "RoleClassLib" => SlotValue::objects(&self.role_class_libs),
            "SystemUnitClassLib" => SlotValue::objects(&self.system_unit_class_libs),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for CaexFile {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&CAEX_FILE);
        Ok(Self {
            header: Header::read(element)?,
            external_references: element.read_all("ExternalReference")?,
            instance_hierarchies: element.read_all("InstanceHierarchy")?,
            interface_class_libs: element.read_all("InterfaceClassLib")?,
            role_class_libs: element.read_all("RoleClassLib")?,
            system_unit_class_libs: element.read_all("SystemUnitClassLib")?,
            file_name: element.attribute_string("FileName"),
            schema_version: element.attribute_string("SchemaVersion"),
        })
    }
}

impl_generalizable!(CaexFile, CAEX_FILE);

/// A hierarchy of object instances
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceHierarchy {
    pub object: ObjectHeader,
    pub internal_elements: Vec<InternalElement>,
}

pub static INSTANCE_HIERARCHY: SchemaDescriptor = object_descriptor!(
    "InstanceHierarchy",
    attributes: [],
    children: [ChildSlot::object_list("InternalElement")],
);

impl InstanceHierarchy {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "InternalElement" => Some(SlotValue::objects(&self.internal_elements)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for InstanceHierarchy {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INSTANCE_HIERARCHY);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            internal_elements: element.read_all("InternalElement")?,
        })
    }
}

impl_generalizable!(InstanceHierarchy, INSTANCE_HIERARCHY);

/// A library of interface classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceClassLib {
    pub object: ObjectHeader,
    pub interface_classes: Vec<InterfaceClass>,
}

pub static INTERFACE_CLASS_LIB: SchemaDescriptor = object_descriptor!(
    "InterfaceClassLib",
    attributes: [],
    children: [ChildSlot::object_list("InterfaceClass")],
);

impl InterfaceClassLib {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "InterfaceClass" => Some(SlotValue::objects(&self.interface_classes)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for InterfaceClassLib {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&INTERFACE_CLASS_LIB);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            interface_classes: element.read_all("InterfaceClass")?,
        })
    }
}

impl_generalizable!(InterfaceClassLib, INTERFACE_CLASS_LIB);

/// A library of role classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleClassLib {
    pub object: ObjectHeader,
    pub role_classes: Vec<RoleClass>,
}

pub static ROLE_CLASS_LIB: SchemaDescriptor = object_descriptor!(
    "RoleClassLib",
    attributes: [],
    children: [ChildSlot::object_list("RoleClass")],
);

impl RoleClassLib {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "RoleClass" => Some(SlotValue::objects(&self.role_classes)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for RoleClassLib {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ROLE_CLASS_LIB);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            role_classes: element.read_all("RoleClass")?,
        })
    }
}

impl_generalizable!(RoleClassLib, ROLE_CLASS_LIB);

/// A library of system unit classes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemUnitClassLib {
    pub object: ObjectHeader,
    pub system_unit_classes: Vec<SystemUnitClass>,
}

pub static SYSTEM_UNIT_CLASS_LIB: SchemaDescriptor = object_descriptor!(
    "SystemUnitClassLib",
    attributes: [],
    children: [ChildSlot::object_list("SystemUnitClass")],
);

impl SystemUnitClassLib {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "SystemUnitClass" => Some(SlotValue::objects(&self.system_unit_classes)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for SystemUnitClassLib {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&SYSTEM_UNIT_CLASS_LIB);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            system_unit_classes: element.read_all("SystemUnitClass")?,
        })
    }
}

impl_generalizable!(SystemUnitClassLib, SYSTEM_UNIT_CLASS_LIB);
