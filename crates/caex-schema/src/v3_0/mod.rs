//! Object model of CAEX 3.0.
//!
//! Compared to 2.15 the root records where the document came from
//! (`SourceDocumentInformation`) and which AutomationML version it follows,
//! attributes can be typed through attribute type libraries, and interface
//! mappings are expressed by ID.

mod class;
mod system_unit;

pub use class::{
    Attribute, AttributeType, InterfaceClass, RoleClass, ATTRIBUTE, ATTRIBUTE_TYPE,
    INTERFACE_CLASS, ROLE_CLASS,
};
pub use system_unit::{
    InterfaceIdMapping, InternalElement, InternalLink, Mapping, RoleRequirements,
    SupportedRoleClass, SystemUnitBody, SystemUnitClass, INTERFACE_ID_MAPPING, INTERNAL_ELEMENT,
    INTERNAL_LINK, MAPPING, ROLE_REQUIREMENTS, SUPPORTED_ROLE_CLASS, SYSTEM_UNIT_CLASS,
};

use crate::common::{ExternalReference, Header, ObjectHeader};
use crate::error::Result;
use crate::xml::{FromXml, XmlElement};
use caex_generic::{AttributeSlot, ChildSlot, SchemaDescriptor, SlotValue};

/// Root of a CAEX 3.0 document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaexFile {
    pub header: Header,
    pub superior_standard_versions: Vec<String>,
    pub source_document_information: Vec<SourceDocumentInformation>,
    pub external_references: Vec<ExternalReference>,
    pub instance_hierarchies: Vec<InstanceHierarchy>,
    pub interface_class_libs: Vec<InterfaceClassLib>,
    pub role_class_libs: Vec<RoleClassLib>,
    pub system_unit_class_libs: Vec<SystemUnitClassLib>,
    pub attribute_type_libs: Vec<AttributeTypeLib>,
    pub file_name: Option<String>,
    pub schema_version: Option<String>,
}

pub static CAEX_FILE: SchemaDescriptor = basic_descriptor!(
    "CAEXFile",
    attributes: [
        AttributeSlot::required("FileName"),
        AttributeSlot::required("SchemaVersion"),
    ],
    children: [
        ChildSlot::simple_list("SuperiorStandardVersion"),
        ChildSlot::object_list("SourceDocumentInformation").required(),
        ChildSlot::object_list("ExternalReference"),
        ChildSlot::object_list("InstanceHierarchy"),
        ChildSlot::object_list("InterfaceClassLib"),
        ChildSlot::object_list("RoleClassLib"),
        ChildSlot::object_list("SystemUnitClassLib"),
        ChildSlot::object_list("AttributeTypeLib"),
    ],
);

impl CaexFile {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "FileName" => SlotValue::text(&self.file_name),
            "SchemaVersion" => SlotValue::text(&self.schema_version),
            "SuperiorStandardVersion" => SlotValue::texts(&self.superior_standard_versions),
            "SourceDocumentInformation" => SlotValue::objects(&self.source_document_information),
            "ExternalReference" => SlotValue::objects(&self.external_references),
            "InstanceHierarchy" => SlotValue::objects(&self.instance_hierarchies),
            "InterfaceClassLib" => SlotValue::objects(&self.interface_class_libs),
            "RoleClassLib" => SlotValue::objects(&self.role_class_libs),
            "SystemUnitClassLib" => SlotValue::objects(&self.system_unit_class_libs),
            "AttributeTypeLib" => SlotValue::objects(&self.attribute_type_libs),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for CaexFile {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&CAEX_FILE);
        Ok(Self {
            header: Header::read(element)?,
            superior_standard_versions: element.child_texts("SuperiorStandardVersion"),
            source_document_information: element.read_all("SourceDocumentInformation")?,
            external_references: element.read_all("ExternalReference")?,
            instance_hierarchies: element.read_all("InstanceHierarchy")?,
            interface_class_libs: element.read_all("InterfaceClassLib")?,
            role_class_libs: element.read_all("RoleClassLib")?,
            system_unit_class_libs: element.read_all("SystemUnitClassLib")?,
            attribute_type_libs: element.read_all("AttributeTypeLib")?,
            file_name: element.attribute_string("FileName"),
            schema_version: element.attribute_string("SchemaVersion"),
        })
    }
}

impl_generalizable!(CaexFile, CAEX_FILE);

/// Provenance of the document: the tool and project that wrote it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocumentInformation {
    pub origin_name: Option<String>,
    pub origin_id: Option<String>,
    pub origin_vendor: Option<String>,
    pub origin_vendor_url: Option<String>,
    pub origin_version: Option<String>,
    pub origin_release: Option<String>,
    pub last_writing_date_time: Option<String>,
    pub origin_project_title: Option<String>,
    pub origin_project_id: Option<String>,
}

pub static SOURCE_DOCUMENT_INFORMATION: SchemaDescriptor = SchemaDescriptor {
    element: "SourceDocumentInformation",
    attributes: &[
        AttributeSlot::required("OriginName"),
        AttributeSlot::required("OriginID"),
        AttributeSlot::optional("OriginVendor"),
        AttributeSlot::optional("OriginVendorURL"),
        AttributeSlot::required("OriginVersion"),
        AttributeSlot::optional("OriginRelease"),
        AttributeSlot::required("LastWritingDateTime"),
        AttributeSlot::optional("OriginProjectTitle"),
        AttributeSlot::optional("OriginProjectID"),
    ],
    children: &[],
};

impl SourceDocumentInformation {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        let value = match name {
            "OriginName" => &self.origin_name,
            "OriginID" => &self.origin_id,
            "OriginVendor" => &self.origin_vendor,
            "OriginVendorURL" => &self.origin_vendor_url,
            "OriginVersion" => &self.origin_version,
            "OriginRelease" => &self.origin_release,
            "LastWritingDateTime" => &self.last_writing_date_time,
            "OriginProjectTitle" => &self.origin_project_title,
            "OriginProjectID" => &self.origin_project_id,
            _ => return None,
        };
        Some(SlotValue::text(value))
    }
}

impl FromXml for SourceDocumentInformation {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        Ok(Self {
            origin_name: element.attribute_string("OriginName"),
            origin_id: element.attribute_string("OriginID"),
            origin_vendor: element.attribute_string("OriginVendor"),
            origin_vendor_url: element.attribute_string("OriginVendorURL"),
            origin_version: element.attribute_string("OriginVersion"),
            origin_release: element.attribute_string("OriginRelease"),
            last_writing_date_time: element.attribute_string("LastWritingDateTime"),
            origin_project_title: element.attribute_string("OriginProjectTitle"),
            origin_project_id: element.attribute_string("OriginProjectID"),
        })
    }
}

impl_generalizable!(SourceDocumentInformation, SOURCE_DOCUMENT_INFORMATION);

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

/// A library of attribute types
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTypeLib {
    pub object: ObjectHeader,
    pub attribute_types: Vec<AttributeType>,
}

pub static ATTRIBUTE_TYPE_LIB: SchemaDescriptor = object_descriptor!(
    "AttributeTypeLib",
    attributes: [],
    children: [ChildSlot::object_list("AttributeType")],
);

impl AttributeTypeLib {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "AttributeType" => Some(SlotValue::objects(&self.attribute_types)),
            _ => self.object.lookup(name),
        }
    }
}

impl FromXml for AttributeTypeLib {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ATTRIBUTE_TYPE_LIB);
        Ok(Self {
            object: ObjectHeader::read(element)?,
            attribute_types: element.read_all("AttributeType")?,
        })
    }
}

impl_generalizable!(AttributeTypeLib, ATTRIBUTE_TYPE_LIB);
