//! Raw values stored on generic nodes

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A raw (non-generalizable) value held by a generic node.
///
/// Attribute values and simple child elements such as `Value` or
/// `Description` end up here. `Missing` marks a required slot that the
/// document left out; optional slots that are absent are not stored at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Required but absent in the document
    Missing,
    /// A single textual value
    Text(String),
    /// A repeated simple element, e.g. `AdditionalInformation`
    List(Vec<String>),
}

impl Value {
    /// Create a text value
    pub fn text<S: Into<String>>(text: S) -> Self {
        Value::Text(text.into())
    }

    /// The text if this is a single textual value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this marks a required but absent slot
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The textual rendering used when matching against patterns.
    ///
    /// `Missing` renders as the empty string, lists are joined with a
    /// single space.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Value::Missing => Cow::Borrowed(""),
            Value::Text(text) => Cow::Borrowed(text),
            Value::List(items) => Cow::Owned(items.join(" ")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Value::Missing.as_str(), "");
        assert_eq!(Value::text("Digital").as_str(), "Digital");
        assert_eq!(
            Value::List(vec!["a".into(), "b".into()]).as_str(),
            "a b"
        );
    }

    #[test]
    fn test_as_text_only_for_single_text() {
        assert_eq!(Value::text("x").as_text(), Some("x"));
        assert_eq!(Value::Missing.as_text(), None);
        assert_eq!(Value::List(vec!["x".into()]).as_text(), None);
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Missing,
            Value::text("a"),
            Value::List(vec!["b".into()]),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,"a",["b"]]"#);
    }
}
