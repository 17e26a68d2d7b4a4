//! Read-only element view over a xot document.
//!
//! The object models only need three things from XML: local element names,
//! attribute values and text content. Namespaces are ignored so CAEX 3.0's
//! default namespace reads exactly like the namespace-less 2.15 files.

use crate::error::{Error, Result};
use caex_generic::SchemaDescriptor;
use tracing::trace;
use xot::{Node, Xot};

/// A parsed XML document
pub struct XmlDocument {
    xot: Xot,
    root: Node,
}

impl XmlDocument {
    /// Parse XML text
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let root = xot.parse(xml).map_err(|e| Error::Xml(e.to_string()))?;
        Ok(Self { xot, root })
    }

    /// The outermost element
    pub fn document_element(&self) -> Option<XmlElement<'_>> {
        self.xot
            .children(self.root)
            .find_map(|node| XmlElement::new(&self.xot, node))
    }

    /// Every element with the given local name, in document order
    pub fn elements_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = XmlElement<'a>> + 'a {
        self.xot
            .descendants(self.root)
            .filter_map(|node| XmlElement::new(&self.xot, node))
            .filter(move |element| element.name() == local_name)
    }
}

/// An element node
#[derive(Clone, Copy)]
pub struct XmlElement<'x> {
    xot: &'x Xot,
    node: Node,
    name: &'x str,
}

impl<'x> XmlElement<'x> {
    fn new(xot: &'x Xot, node: Node) -> Option<Self> {
        let element = xot.element(node)?;
        Some(Self {
            xot,
            node,
            name: xot.local_name_str(element.name()),
        })
    }

    /// Local name, without prefix or namespace
    pub fn name(&self) -> &'x str {
        self.name
    }

    /// Value of an attribute without namespace
    pub fn attribute(&self, name: &str) -> Option<&'x str> {
        let name = self.xot.name(name)?;
        self.xot.get_attribute(self.node, name)
    }

    /// Owned value of an attribute
    pub fn attribute_string(&self, name: &str) -> Option<String> {
        self.attribute(name).map(str::to_owned)
    }

    /// Concatenated text children, untrimmed
    pub fn text(&self) -> String {
        self.xot
            .children(self.node)
            .filter_map(|child| self.xot.text_str(child))
            .collect()
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = XmlElement<'x>> + 'x {
        let xot = self.xot;
        xot.children(self.node)
            .filter_map(move |node| XmlElement::new(xot, node))
    }

    /// Child elements with the given local name
    pub fn elements_named<'n>(
        &self,
        name: &'n str,
    ) -> impl Iterator<Item = XmlElement<'x>> + 'n
    where
        'x: 'n,
    {
        self.elements().filter(move |element| element.name() == name)
    }

    /// Text of the first child element with the given name
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.elements_named(name).next().map(|element| element.text())
    }

    /// Texts of every child element with the given name
    pub fn child_texts(&self, name: &str) -> Vec<String> {
        self.elements_named(name).map(|element| element.text()).collect()
    }

    /// Read the first child element with the given name
    pub fn read_one<T: FromXml>(&self, name: &str) -> Result<Option<T>> {
        self.elements_named(name).next().map(T::from_xml).transpose()
    }

    /// Read every child element with the given name
    pub fn read_all<T: FromXml>(&self, name: &str) -> Result<Vec<T>> {
        self.elements_named(name).map(T::from_xml).collect()
    }

    /// Log child elements the descriptor has no slot for
    pub fn trace_unknown(&self, descriptor: &SchemaDescriptor) {
        for element in self.elements() {
            if descriptor.child(element.name()).is_none() {
                trace!(
                    parent = self.name,
                    element = element.name(),
                    "skipping unknown element"
                );
            }
        }
    }
}

/// Types that can be read from an element
pub trait FromXml: Sized {
    fn from_xml(element: XmlElement<'_>) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<root xmlns="http://www.dke.de/CAEX" a="1">
    <item Name="x">  padded </item>
    <other/>
    <item Name="y">second</item>
</root>"#;

    #[test]
    fn test_local_names_ignore_default_namespace() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(root.name(), "root");
        assert_eq!(root.attribute("a"), Some("1"));
        assert_eq!(doc.elements_named("item").count(), 2);
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(root.child_text("item").as_deref(), Some("  padded "));
        assert_eq!(root.child_texts("item"), vec!["  padded ", "second"]);
        assert_eq!(root.child_text("missing"), None);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(XmlDocument::parse("<open>"), Err(Error::Xml(_))));
    }
}
