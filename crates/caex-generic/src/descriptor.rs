//! Static schema descriptors and the generalization capability.
//!
//! Every CAEX schema type publishes one [`SchemaDescriptor`] listing its
//! attribute slots and child slots in document order. The generalizer walks
//! the descriptor and asks the object for each slot by name, so no runtime
//! reflection is needed.

use std::any::Any;
use std::fmt::Debug;

/// An XML attribute slot of a schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSlot {
    /// Attribute name as it appears in the document
    pub name: &'static str,
    /// Whether the schema requires the attribute
    pub required: bool,
}

impl AttributeSlot {
    /// Create an optional attribute slot
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }

    /// Create a required attribute slot
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }
}

/// Shape of a child slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// A single generalizable child element
    Object,
    /// A repeated generalizable child element
    ObjectList,
    /// A single simple (text only) child element
    Simple,
    /// A repeated simple child element
    SimpleList,
}

impl SlotKind {
    /// Whether values in this slot become generic nodes
    pub fn is_generalizable(self) -> bool {
        matches!(self, SlotKind::Object | SlotKind::ObjectList)
    }

    /// Whether the slot may hold several elements
    pub fn is_list(self) -> bool {
        matches!(self, SlotKind::ObjectList | SlotKind::SimpleList)
    }

    pub(crate) fn describe(self) -> &'static str {
        match self {
            SlotKind::Object => "a single object",
            SlotKind::ObjectList => "an object list",
            SlotKind::Simple => "a simple value",
            SlotKind::SimpleList => "a simple list",
        }
    }
}

/// A child element slot of a schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSlot {
    /// Element name as it appears in the document
    pub name: &'static str,
    pub kind: SlotKind,
    pub required: bool,
}

impl ChildSlot {
    /// A single generalizable child
    pub const fn object(name: &'static str) -> Self {
        Self::new(name, SlotKind::Object)
    }

    /// A repeated generalizable child
    pub const fn object_list(name: &'static str) -> Self {
        Self::new(name, SlotKind::ObjectList)
    }

    /// A single simple child
    pub const fn simple(name: &'static str) -> Self {
        Self::new(name, SlotKind::Simple)
    }

    /// A repeated simple child
    pub const fn simple_list(name: &'static str) -> Self {
        Self::new(name, SlotKind::SimpleList)
    }

    /// Mark the slot as required by the schema
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn new(name: &'static str, kind: SlotKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// The static description of one schema type.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// The schema's name for the type, e.g. `InternalElement`
    pub element: &'static str,
    pub attributes: &'static [AttributeSlot],
    /// Child slots in document order
    pub children: &'static [ChildSlot],
}

impl SchemaDescriptor {
    /// Look up an attribute slot by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeSlot> {
        self.attributes.iter().find(|slot| slot.name == name)
    }

    /// Look up a child slot by name
    pub fn child(&self, name: &str) -> Option<&ChildSlot> {
        self.children.iter().find(|slot| slot.name == name)
    }

    /// Whether the type has an attribute or child slot with this name
    pub fn has_slot(&self, name: &str) -> bool {
        self.attribute(name).is_some() || self.child(name).is_some()
    }
}

/// The value an object currently holds in one of its slots.
#[derive(Debug, Clone)]
pub enum SlotValue<'a> {
    /// Not present in the document
    Absent,
    Text(&'a str),
    Texts(Vec<&'a str>),
    Object(&'a dyn Generalizable),
    Objects(Vec<&'a dyn Generalizable>),
}

impl<'a> SlotValue<'a> {
    /// An optional textual slot
    pub fn text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(SlotValue::Absent, SlotValue::Text)
    }

    /// A repeated textual slot
    pub fn texts(values: &'a [String]) -> Self {
        SlotValue::Texts(values.iter().map(String::as_str).collect())
    }

    /// An optional object slot
    pub fn object<T: Generalizable>(value: &'a Option<T>) -> Self {
        match value {
            Some(object) => SlotValue::Object(object),
            None => SlotValue::Absent,
        }
    }

    /// A repeated object slot
    pub fn objects<T: Generalizable>(values: &'a [T]) -> Self {
        SlotValue::Objects(
            values
                .iter()
                .map(|object| object as &dyn Generalizable)
                .collect(),
        )
    }

    /// Whether the slot holds nothing
    pub fn is_absent(&self) -> bool {
        match self {
            SlotValue::Absent => true,
            SlotValue::Texts(values) => values.is_empty(),
            SlotValue::Objects(values) => values.is_empty(),
            _ => false,
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            SlotValue::Absent => "nothing",
            SlotValue::Text(_) => "a simple value",
            SlotValue::Texts(_) => "a simple list",
            SlotValue::Object(_) => "a single object",
            SlotValue::Objects(_) => "an object list",
        }
    }
}

/// Capability of a typed schema object to be turned into a generic node.
///
/// Implementors must return a value from [`slot`](Generalizable::slot) for
/// every slot named by their descriptor, and `None` for anything else.
pub trait Generalizable: Debug {
    /// The static descriptor of this object's schema type
    fn descriptor(&self) -> &'static SchemaDescriptor;

    /// Read a slot by its attribute or element name
    fn slot(&self, name: &str) -> Option<SlotValue<'_>>;

    /// Access the concrete type, for downcasting a node's origin
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    static DESCRIPTOR: SchemaDescriptor = SchemaDescriptor {
        element: "RefSemantic",
        attributes: &[
            AttributeSlot::optional("ChangeMode"),
            AttributeSlot::required("CorrespondingAttributePath"),
        ],
        children: &[
            ChildSlot::simple("Description"),
            ChildSlot::simple_list("AdditionalInformation"),
            ChildSlot::object_list("Revision").required(),
        ],
    };

    #[test]
    fn test_descriptor_lookup() {
        assert!(DESCRIPTOR.attribute("CorrespondingAttributePath").unwrap().required);
        assert!(!DESCRIPTOR.attribute("ChangeMode").unwrap().required);
        assert!(DESCRIPTOR.attribute("Description").is_none());

        let revision = DESCRIPTOR.child("Revision").unwrap();
        assert_eq!(revision.kind, SlotKind::ObjectList);
        assert!(revision.required);
        assert!(DESCRIPTOR.has_slot("AdditionalInformation"));
        assert!(!DESCRIPTOR.has_slot("Value"));
    }

    #[test]
    fn test_slot_kind_classification() {
        assert!(SlotKind::Object.is_generalizable());
        assert!(SlotKind::ObjectList.is_generalizable());
        assert!(!SlotKind::Simple.is_generalizable());
        assert!(SlotKind::SimpleList.is_list());
        assert!(!SlotKind::Object.is_list());
    }

    #[test]
    fn test_slot_value_helpers() {
        let present = Some("x".to_string());
        let absent: Option<String> = None;
        assert!(matches!(SlotValue::text(&present), SlotValue::Text("x")));
        assert!(SlotValue::text(&absent).is_absent());
        assert!(SlotValue::texts(&[]).is_absent());
        assert!(!SlotValue::texts(&["a".to_string()]).is_absent());
    }
}
