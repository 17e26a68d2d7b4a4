//! Filters over generic CAEX trees.
//!
//! Two ways to query a [`caex_generic::GenericTree`] are provided:
//!
//! - criteria text such as `InternalElement[Name='Tank.*'],Attribute[Unit]`,
//!   evaluated with [`apply_filter`];
//! - a [`CaexFilter`] expression built stage by stage, where each stage
//!   selects elements and may require conditions on their children.
//!
//! ```ignore
//! let mut filter = CaexFilter::for_tree(&tree);
//! filter
//!     .all()
//!     .element("ExternalInterface")?
//!     .having_child()
//!     .element_with("Attribute", ["Name='Type'"])?
//!     .having_child()
//!     .text_node("Value", "Digital")?;
//! let interfaces = filter.execute();
//! ```

pub mod criteria;
pub mod element;
pub mod error;
pub mod filter;
pub mod node;
pub mod text;

pub use criteria::{apply_filter, apply_filter_all, parse, AttributePredicate, Criterion};
pub use element::ElementFilter;
pub use error::{FilterError, Result};
pub use filter::{CaexFilter, FilterNodeBuilder};
pub use node::{FilterNodeId, Operator, SearchMode, TextFilterHandle};
pub use text::TextNodeFilter;
