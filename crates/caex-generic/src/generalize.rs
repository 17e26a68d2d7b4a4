//! Conversion of typed schema objects into a [`GenericTree`]

use crate::descriptor::{ChildSlot, Generalizable, SlotKind, SlotValue};
use crate::error::{Error, Result};
use crate::tree::{Child, GenericTree, NodeData, NodeId};
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Generalize a typed document root.
///
/// The root node is named after the root object's schema type; every other
/// node is named after the slot it was found in. Attribute slots become
/// string attributes, generalizable child slots become child nodes (lists
/// become groups) and everything else is kept as a raw [`Value`]. Optional
/// slots that are absent are omitted; required ones are recorded as
/// [`Value::Missing`] (or an empty group for object lists).
pub fn generalize(source: &dyn Generalizable) -> Result<GenericTree<'_>> {
    let mut builder = TreeBuilder { nodes: Vec::new() };
    let root = builder.build(source, source.descriptor().element)?;
    debug!(
        root = source.descriptor().element,
        nodes = builder.nodes.len(),
        "generalized document"
    );
    Ok(GenericTree {
        nodes: builder.nodes,
        root,
    })
}

impl<'doc> GenericTree<'doc> {
    /// Generalize a typed document root, see [`generalize`]
    pub fn from_source(source: &'doc dyn Generalizable) -> Result<Self> {
        generalize(source)
    }
}

struct TreeBuilder<'doc> {
    nodes: Vec<NodeData<'doc>>,
}

impl<'doc> TreeBuilder<'doc> {
    fn build(
        &mut self,
        source: &'doc dyn Generalizable,
        element_name: &'static str,
    ) -> Result<NodeId> {
        let descriptor = source.descriptor();

        let mut attributes = BTreeMap::new();
        for slot in descriptor.attributes {
            match read_slot(source, slot.name)? {
                SlotValue::Text(text) => {
                    attributes.insert(slot.name, Value::text(text));
                }
                SlotValue::Absent if slot.required => {
                    attributes.insert(slot.name, Value::Missing);
                }
                SlotValue::Absent => {}
                other => {
                    return Err(Error::kind_mismatch(
                        descriptor.element,
                        slot.name,
                        "an attribute",
                        other.describe(),
                    ))
                }
            }
        }

        let mut children = Vec::with_capacity(descriptor.children.len());
        let mut attached = Vec::new();
        for slot in descriptor.children {
            let value = read_slot(source, slot.name)?;
            if value.is_absent() {
                if let Some(child) = required_placeholder(slot) {
                    children.push((slot.name, child));
                }
                continue;
            }
            let child = match (slot.kind, value) {
                (SlotKind::Object, SlotValue::Object(object)) => {
                    let id = self.build(object, slot.name)?;
                    attached.push(id);
                    Child::Node(id)
                }
                (SlotKind::ObjectList, SlotValue::Objects(objects)) => {
                    let ids = objects
                        .into_iter()
                        .map(|object| self.build(object, slot.name))
                        .collect::<Result<Vec<_>>>()?;
                    attached.extend_from_slice(&ids);
                    Child::Group(ids)
                }
                (SlotKind::Simple, SlotValue::Text(text)) => Child::Value(Value::text(text)),
                (SlotKind::SimpleList, SlotValue::Texts(texts)) => {
                    Child::Value(Value::List(texts.into_iter().map(str::to_owned).collect()))
                }
                (kind, other) => {
                    return Err(Error::kind_mismatch(
                        descriptor.element,
                        slot.name,
                        kind.describe(),
                        other.describe(),
                    ))
                }
            };
            children.push((slot.name, child));
        }

        let id = NodeId(self.nodes.len());
        trace!(element = element_name, id = id.0, "generalized object");
        self.nodes.push(NodeData {
            element_name,
            attributes,
            children,
            parent: None,
            origin: source,
        });
        for child in attached {
            self.nodes[child.0].parent = Some(id);
        }
        Ok(id)
    }
}

fn read_slot<'doc>(source: &'doc dyn Generalizable, name: &'static str) -> Result<SlotValue<'doc>> {
    source
        .slot(name)
        .ok_or_else(|| Error::unknown_slot(source.descriptor().element, name))
}

/// What a required slot holds when the document leaves it out.
///
/// A missing single object cannot be represented as a node, so it is
/// simply not recorded.
fn required_placeholder(slot: &ChildSlot) -> Option<Child> {
    if !slot.required {
        return None;
    }
    match slot.kind {
        SlotKind::Object => None,
        SlotKind::ObjectList => Some(Child::Group(Vec::new())),
        SlotKind::Simple => Some(Child::Value(Value::Missing)),
        SlotKind::SimpleList => Some(Child::Value(Value::List(Vec::new()))),
    }
}
