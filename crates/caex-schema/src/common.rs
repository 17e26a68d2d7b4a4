//! Types shared by the CAEX 2.15 and 3.0 models.
//!
//! Every CAEX element carries the same organisational header
//! ([`Header`]), and most are named objects ([`ObjectHeader`]). The leaf
//! types below are identical in both schema versions.

use crate::error::Result;
use crate::xml::{FromXml, XmlElement};
use caex_generic::{AttributeSlot, ChildSlot, SchemaDescriptor, SlotValue};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Lifecycle state of an element in incremental exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeMode {
    State,
    Create,
    Delete,
    Change,
}

impl ChangeMode {
    /// The attribute value used in documents
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeMode::State => "state",
            ChangeMode::Create => "create",
            ChangeMode::Delete => "delete",
            ChangeMode::Change => "change",
        }
    }
}

impl FromStr for ChangeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "state" => Ok(ChangeMode::State),
            "create" => Ok(ChangeMode::Create),
            "delete" => Ok(ChangeMode::Delete),
            "change" => Ok(ChangeMode::Change),
            other => Err(format!("unknown change mode '{}'", other)),
        }
    }
}

impl fmt::Display for ChangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organisational data carried by every CAEX element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub change_mode: Option<ChangeMode>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub revisions: Vec<Revision>,
    pub copyright: Option<String>,
    pub additional_information: Vec<String>,
}

impl Header {
    pub(crate) fn read(element: XmlElement<'_>) -> Result<Self> {
        let change_mode = element.attribute("ChangeMode").and_then(|value| {
            value
                .parse()
                .map_err(|err| warn!(element = element.name(), "{}", err))
                .ok()
        });
        Ok(Self {
            change_mode,
            description: element.child_text("Description"),
            version: element.child_text("Version"),
            revisions: element.read_all("Revision")?,
            copyright: element.child_text("Copyright"),
            additional_information: element.child_texts("AdditionalInformation"),
        })
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "ChangeMode" => self
                .change_mode
                .map_or(SlotValue::Absent, |mode| SlotValue::Text(mode.as_str())),
            "Description" => SlotValue::text(&self.description),
            "Version" => SlotValue::text(&self.version),
            "Revision" => SlotValue::objects(&self.revisions),
            "Copyright" => SlotValue::text(&self.copyright),
            "AdditionalInformation" => SlotValue::texts(&self.additional_information),
            _ => return None,
        })
    }
}

/// Header of a named CAEX object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectHeader {
    pub header: Header,
    pub id: Option<String>,
    /// Required by the schema
    pub name: Option<String>,
}

impl ObjectHeader {
    pub(crate) fn read(element: XmlElement<'_>) -> Result<Self> {
        Ok(Self {
            header: Header::read(element)?,
            id: element.attribute_string("ID"),
            name: element.attribute_string("Name"),
        })
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "ID" => Some(SlotValue::text(&self.id)),
            "Name" => Some(SlotValue::text(&self.name)),
            _ => self.header.lookup(name),
        }
    }
}

/// A revision record in an element's header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revision {
    pub header: Header,
    pub revision_date: Option<String>,
    pub old_version: Option<String>,
    pub new_version: Option<String>,
    pub author_name: Option<String>,
    pub comment: Option<String>,
}

pub static REVISION: SchemaDescriptor = basic_descriptor!(
    "Revision",
    attributes: [],
    children: [
        ChildSlot::simple("RevisionDate"),
        ChildSlot::simple("OldVersion"),
        ChildSlot::simple("NewVersion"),
        ChildSlot::simple("AuthorName"),
        ChildSlot::simple("Comment"),
    ],
);

impl Revision {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        Some(match name {
            "RevisionDate" => SlotValue::text(&self.revision_date),
            "OldVersion" => SlotValue::text(&self.old_version),
            "NewVersion" => SlotValue::text(&self.new_version),
            "AuthorName" => SlotValue::text(&self.author_name),
            "Comment" => SlotValue::text(&self.comment),
            _ => return self.header.lookup(name),
        })
    }
}

impl FromXml for Revision {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&REVISION);
        Ok(Self {
            header: Header::read(element)?,
            revision_date: element.child_text("RevisionDate"),
            old_version: element.child_text("OldVersion"),
            new_version: element.child_text("NewVersion"),
            author_name: element.child_text("AuthorName"),
            comment: element.child_text("Comment"),
        })
    }
}

impl_generalizable!(Revision, REVISION);

/// Reference to another CAEX file, addressed through an alias
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalReference {
    pub header: Header,
    pub path: Option<String>,
    pub alias: Option<String>,
}

pub static EXTERNAL_REFERENCE: SchemaDescriptor = basic_descriptor!(
    "ExternalReference",
    attributes: [
        AttributeSlot::required("Path"),
        AttributeSlot::required("Alias"),
    ],
    children: [],
);

impl ExternalReference {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "Path" => Some(SlotValue::text(&self.path)),
            "Alias" => Some(SlotValue::text(&self.alias)),
            _ => self.header.lookup(name),
        }
    }
}

impl FromXml for ExternalReference {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&EXTERNAL_REFERENCE);
        Ok(Self {
            header: Header::read(element)?,
            path: element.attribute_string("Path"),
            alias: element.attribute_string("Alias"),
        })
    }
}

impl_generalizable!(ExternalReference, EXTERNAL_REFERENCE);

/// Semantic reference of an attribute to an external standard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefSemantic {
    pub header: Header,
    pub corresponding_attribute_path: Option<String>,
}

pub static REF_SEMANTIC: SchemaDescriptor = basic_descriptor!(
    "RefSemantic",
    attributes: [AttributeSlot::required("CorrespondingAttributePath")],
    children: [],
);

impl RefSemantic {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "CorrespondingAttributePath" => {
                Some(SlotValue::text(&self.corresponding_attribute_path))
            }
            _ => self.header.lookup(name),
        }
    }
}

impl FromXml for RefSemantic {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&REF_SEMANTIC);
        Ok(Self {
            header: Header::read(element)?,
            corresponding_attribute_path: element.attribute_string("CorrespondingAttributePath"),
        })
    }
}

impl_generalizable!(RefSemantic, REF_SEMANTIC);

/// Mapping between a system unit attribute and a role attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeNameMapping {
    pub header: Header,
    pub system_unit_attribute_name: Option<String>,
    pub role_attribute_name: Option<String>,
}

pub static ATTRIBUTE_NAME_MAPPING: SchemaDescriptor = basic_descriptor!(
    "AttributeNameMapping",
    attributes: [
        AttributeSlot::required("SystemUnitAttributeName"),
        AttributeSlot::required("RoleAttributeName"),
    ],
    children: [],
);

impl AttributeNameMapping {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "SystemUnitAttributeName" => Some(SlotValue::text(&self.system_unit_attribute_name)),
            "RoleAttributeName" => Some(SlotValue::text(&self.role_attribute_name)),
            _ => self.header.lookup(name),
        }
    }
}

impl FromXml for AttributeNameMapping {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        element.trace_unknown(&ATTRIBUTE_NAME_MAPPING);
        Ok(Self {
            header: Header::read(element)?,
            system_unit_attribute_name: element.attribute_string("SystemUnitAttributeName"),
            role_attribute_name: element.attribute_string("RoleAttributeName"),
        })
    }
}

impl_generalizable!(AttributeNameMapping, ATTRIBUTE_NAME_MAPPING);

/// How an attribute's value is constrained
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// A value range, each bound optional
    OrdinalScaled {
        minimum: Option<String>,
        maximum: Option<String>,
        required_value: Option<String>,
    },
    /// An enumeration of allowed values
    NominalScaled { values: Vec<String> },
    /// A free text requirement
    Unknown { requirements: Option<String> },
}

impl Requirement {
    fn read(element: XmlElement<'_>) -> Option<Self> {
        if let Some(ordinal) = element.elements_named("OrdinalScaledType").next() {
            return Some(Requirement::OrdinalScaled {
                minimum: ordinal.child_text("RequiredMinValue"),
                maximum: ordinal.child_text("RequiredMaxValue"),
                required_value: ordinal.child_text("RequiredValue"),
            });
        }
        if let Some(nominal) = element.elements_named("NominalScaledType").next() {
            return Some(Requirement::NominalScaled {
                values: nominal.child_texts("RequiredValue"),
            });
        }
        element
            .elements_named("UnknownType")
            .next()
            .map(|unknown| Requirement::Unknown {
                requirements: unknown.child_text("Requirements"),
            })
    }
}

/// A value constraint attached to an attribute (`Constraint` element).
///
/// Only the name is generalized; the choice between the requirement kinds
/// stays on the typed object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeValueRequirement {
    pub header: Header,
    pub name: Option<String>,
    pub requirement: Option<Requirement>,
}

pub static ATTRIBUTE_VALUE_REQUIREMENT: SchemaDescriptor = basic_descriptor!(
    "AttributeValueRequirement",
    attributes: [AttributeSlot::required("Name")],
    children: [],
);

impl AttributeValueRequirement {
    fn lookup(&self, name: &str) -> Option<SlotValue<'_>> {
        match name {
            "Name" => Some(SlotValue::text(&self.name)),
            _ => self.header.lookup(name),
        }
    }
}

impl FromXml for AttributeValueRequirement {
    fn from_xml(element: XmlElement<'_>) -> Result<Self> {
        Ok(Self {
            header: Header::read(element)?,
            name: element.attribute_string("Name"),
            requirement: Requirement::read(element),
        })
    }
}

impl_generalizable!(AttributeValueRequirement, ATTRIBUTE_VALUE_REQUIREMENT);
