//! Selection of nodes by a single simple child value

use caex_generic::{Child, GenericNode};
use std::fmt;

/// Accepts nodes whose only child is a simple element with the given name
/// and exactly the given text, such as an `Attribute` holding nothing but
/// `<Value>Digital</Value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNodeFilter {
    name: String,
    value: String,
}

impl TextNodeFilter {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The simple child's element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expected text
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_value<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Whether the node has exactly one child slot and it holds the
    /// expected text
    pub fn accepts(&self, node: &GenericNode<'_>) -> bool {
        let mut children = node.children();
        match (children.next(), children.next()) {
            (Some((name, Child::Value(value))), None) => {
                name == self.name && value.as_text() == Some(self.value.as_str())
            }
            _ => false,
        }
    }

    /// Keep the origins this filter accepts, in order
    pub fn select<'a>(&self, origins: &[GenericNode<'a>]) -> Vec<GenericNode<'a>> {
        origins
            .iter()
            .copied()
            .filter(|node| self.accepts(node))
            .collect()
    }
}

impl fmt::Display for TextNodeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.name, self.value)
    }
}
