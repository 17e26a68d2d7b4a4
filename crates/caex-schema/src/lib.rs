//! Typed CAEX 2.15 and 3.0 object models.
//!
//! Documents are read with [`CaexDocument::parse`] or [`CaexDocument::read`],
//! which look at the root's `SchemaVersion` and populate the matching model.
//! Every model type implements [`caex_generic::Generalizable`], so a loaded
//! document can be turned into a version-agnostic tree with
//! [`CaexDocument::generalize`].

#[macro_use]
mod macros;

pub mod common;
pub mod document;
pub mod error;
pub mod v2_15;
pub mod v3_0;
pub mod xml;

pub use document::{CaexDocument, SchemaVersion};
pub use error::{Error, Result};
