//! Element selection by name and attribute predicates

use crate::criteria::Criterion;
use std::fmt;

/// Selects elements by name, optionally constrained by attribute predicates.
///
/// Predicates use the criteria syntax without brackets, e.g. `Name` or
/// `Name='Tank.*'`. An empty element name matches any element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    element: String,
    attributes: Vec<String>,
}

impl ElementFilter {
    /// Match elements named `element`
    pub fn named<S: Into<String>>(element: S) -> Self {
        Self {
            element: element.into(),
            attributes: Vec::new(),
        }
    }

    /// Match any element
    pub fn any() -> Self {
        Self::default()
    }

    /// Add attribute predicates
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    /// The element name, empty for any element
    pub fn element_name(&self) -> &str {
        &self.element
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The equivalent criteria text, e.g. `Attribute[Name='Type']`
    pub fn criteria(&self) -> String {
        let mut text = self.element.clone();
        for attribute in &self.attributes {
            text.push('[');
            text.push_str(attribute);
            text.push(']');
        }
        text
    }

    /// Compile to a criterion; `None` if a predicate is malformed.
    ///
    /// Compile once and reuse the result with [`Criterion::select`].
    pub fn compile(&self) -> Option<Criterion> {
        if self.element.is_empty() && self.attributes.is_empty() {
            return Some(Criterion::any());
        }
        Criterion::parse(&self.criteria())
    }
}

impl fmt::Display for ElementFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.element.is_empty() {
            f.write_str("*")?;
        }
        f.write_str(&self.criteria())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_rendering() {
        let filter = ElementFilter::named("Attribute").with_attributes(["Name='Type'", "Unit"]);
        assert_eq!(filter.criteria(), "Attribute[Name='Type'][Unit]");
        assert_eq!(filter.to_string(), "Attribute[Name='Type'][Unit]");
        assert_eq!(ElementFilter::any().to_string(), "*");
    }

    #[test]
    fn test_compile() {
        let criterion = ElementFilter::named("Attribute")
            .with_attributes(["Name='Type'"])
            .compile()
            .unwrap();
        assert_eq!(criterion.element_name(), Some("Attribute"));
        assert_eq!(criterion.predicates().len(), 1);

        let any = ElementFilter::any().compile().unwrap();
        assert_eq!(any.element_name(), None);

        let any_with_id = ElementFilter::any().with_attributes(["ID"]).compile().unwrap();
        assert_eq!(any_with_id.to_string(), "[ID]");
    }

    #[test]
    fn test_malformed_predicate_does_not_compile() {
        assert!(ElementFilter::named("Attribute")
            .with_attributes(["Name='('"])
            .compile()
            .is_none());
        assert!(ElementFilter::named("Bad Name").compile().is_none());
    }
}
