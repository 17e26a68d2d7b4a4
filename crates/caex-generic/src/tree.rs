//! Generic tree representation
//!
//! A [`GenericTree`] is an arena of nodes. Each node carries the element
//! name it was reached by, its attributes, its children in schema order,
//! a parent link and a reference back to the typed object it came from.
//! Nodes are addressed by [`NodeId`] and viewed through the cheap, copyable
//! [`GenericNode`] handle.

use crate::descriptor::Generalizable;
use crate::value::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// The content of one child slot of a generic node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A single generalized child element
    Node(NodeId),
    /// A repeated generalized child element, in document order
    Group(Vec<NodeId>),
    /// A raw value
    Value(Value),
}

impl Child {
    /// The generalized nodes held by this slot
    pub fn node_ids(&self) -> &[NodeId] {
        match self {
            Child::Node(id) => std::slice::from_ref(id),
            Child::Group(ids) => ids,
            Child::Value(_) => &[],
        }
    }

    /// The raw value held by this slot, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Child::Value(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct NodeData<'doc> {
    pub(crate) element_name: &'static str,
    pub(crate) attributes: BTreeMap<&'static str, Value>,
    pub(crate) children: Vec<(&'static str, Child)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) origin: &'doc dyn Generalizable,
}

/// A generalized CAEX document.
///
/// The tree borrows the typed document it was built from; every node's
/// origin points back into it.
#[derive(Debug)]
pub struct GenericTree<'doc> {
    pub(crate) nodes: Vec<NodeData<'doc>>,
    pub(crate) root: NodeId,
}

impl<'doc> GenericTree<'doc> {
    /// The root node
    pub fn root(&self) -> GenericNode<'_> {
        self.node(self.root)
    }

    /// View a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> GenericNode<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        GenericNode { tree: self, id }
    }

    /// View a node by id, if it belongs to this tree
    pub fn get(&self, id: NodeId) -> Option<GenericNode<'_>> {
        (id.0 < self.nodes.len()).then(|| GenericNode { tree: self, id })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order (children before their parents)
    pub fn iter(&self) -> impl Iterator<Item = GenericNode<'_>> + '_ {
        let tree: &GenericTree<'_> = self;
        (0..tree.nodes.len()).map(move |index| GenericNode {
            tree,
            id: NodeId(index),
        })
    }

    /// All nodes reached through the given element name
    pub fn find_all<'t>(&'t self, element_name: &'t str) -> impl Iterator<Item = GenericNode<'t>> + 't {
        self.iter()
            .filter(move |node| node.element_name() == element_name)
    }
}

/// A handle to one node of a [`GenericTree`].
///
/// Handles compare equal when they point at the same node of the same tree.
#[derive(Clone, Copy)]
pub struct GenericNode<'a> {
    tree: &'a GenericTree<'a>,
    id: NodeId,
}

impl<'a> GenericNode<'a> {
    fn data(&self) -> &'a NodeData<'a> {
        &self.tree.nodes[self.id.0]
    }

    /// The node's id within its tree
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to
    pub fn tree(&self) -> &'a GenericTree<'a> {
        self.tree
    }

    /// The name of the slot this node was reached through, or the type name
    /// for the root
    pub fn element_name(&self) -> &'static str {
        self.data().element_name
    }

    /// Attributes by name
    pub fn attributes(&self) -> &'a BTreeMap<&'static str, Value> {
        &self.data().attributes
    }

    /// Look up one attribute
    pub fn attribute(&self, name: &str) -> Option<&'a Value> {
        self.data().attributes.get(name)
    }

    /// Child slots in schema order.
    ///
    /// Absent optional slots are not listed.
    pub fn children(&self) -> impl Iterator<Item = (&'static str, &'a Child)> + 'a {
        self.data()
            .children
            .iter()
            .map(|(name, child)| (*name, child))
    }

    /// Look up one child slot
    pub fn child(&self, name: &str) -> Option<&'a Child> {
        self.data()
            .children
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, child)| child)
    }

    /// Number of child slots present
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// The raw value of a simple child element, e.g. `Value`
    pub fn child_value(&self, name: &str) -> Option<&'a Value> {
        self.child(name).and_then(Child::value)
    }

    /// All generalized child nodes, groups expanded, in schema order
    pub fn child_nodes(&self) -> impl Iterator<Item = GenericNode<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .flat_map(|(_, child)| child.node_ids())
            .map(move |id| GenericNode { tree, id: *id })
    }

    /// Generalized child nodes held by one slot
    pub fn children_named(&self, name: &str) -> impl Iterator<Item = GenericNode<'a>> + 'a {
        let tree = self.tree;
        self.child(name)
            .map(Child::node_ids)
            .unwrap_or_default()
            .iter()
            .map(move |id| GenericNode { tree, id: *id })
    }

    /// The generalized node this node is a child of
    pub fn parent(&self) -> Option<GenericNode<'a>> {
        self.data().parent.map(|id| GenericNode {
            tree: self.tree,
            id,
        })
    }

    /// Iterate from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = GenericNode<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// All nodes below this one, depth first, in schema order
    pub fn descendants(&self) -> Vec<GenericNode<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<GenericNode<'a>> = self.child_nodes().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mark = stack.len();
            stack.extend(node.child_nodes());
            stack[mark..].reverse();
        }
        out
    }

    /// The typed object this node was generalized from
    pub fn origin(&self) -> &'a dyn Generalizable {
        self.data().origin
    }

    /// The origin downcast to its concrete type
    pub fn origin_as<T: Any>(&self) -> Option<&'a T> {
        self.origin().as_any().downcast_ref::<T>()
    }
}

impl PartialEq for GenericNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for GenericNode<'_> {}

impl Hash for GenericNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

/// Renders as `Element[Attr='value'][Other='value']`.
impl fmt::Display for GenericNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())?;
        for (name, value) in self.attributes() {
            write!(f, "[{}='{}']", name, value)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GenericNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenericNode({}, {})", self.id.0, self)
    }
}
