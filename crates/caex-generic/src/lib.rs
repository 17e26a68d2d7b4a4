//! Version-agnostic generic tree over typed CAEX documents.
//!
//! CAEX schema versions produce structurally different object graphs.
//! This crate defines the capability those graphs implement
//! ([`Generalizable`]) and converts any of them into one uniform
//! [`GenericTree`] of named elements, attributes and children, so that
//! downstream code (filtering, querying, reporting) never has to know which
//! schema version it is looking at.

pub mod descriptor;
pub mod error;
pub mod generalize;
pub mod tree;
pub mod value;

pub use descriptor::{
    AttributeSlot, ChildSlot, Generalizable, SchemaDescriptor, SlotKind, SlotValue,
};
pub use error::{Error, Result};
pub use generalize::generalize;
pub use tree::{Child, GenericNode, GenericTree, NodeId};
pub use value::Value;
