//! Filter criteria text.
//!
//! A criteria string is a comma separated list of alternatives. Each
//! alternative names an element and any number of attribute predicates:
//!
//! ```text
//! InternalElement[Name='Tank.*'][RefBaseSystemUnitPath],["ID"='42']
//! ```
//!
//! `[attr]` requires the attribute to be present, `[attr='pattern']`
//! requires its value to match the regular expression in full. An
//! alternative without an element name matches any element. Alternatives
//! that do not follow this grammar are skipped.

use crate::node::SearchMode;
use caex_generic::{GenericNode, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

static ALTERNATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?P<element>\w+)?\s*(?P<predicates>(?:\[\s*(?:"\w+"|\w+)\s*(?:=\s*'[^']*'\s*)?\]\s*)*)$"#,
    )
    .unwrap()
});

static PREDICATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[\s*(?:"(?P<quoted>\w+)"|(?P<name>\w+))\s*(?:=\s*'(?P<pattern>[^']*)'\s*)?\]"#)
        .unwrap()
});

/// A condition on one attribute of a node
#[derive(Debug, Clone)]
pub struct AttributePredicate {
    name: String,
    pattern: Option<(String, Regex)>,
}

impl AttributePredicate {
    /// Require the attribute to be present
    pub fn present<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            pattern: None,
        }
    }

    /// Require the attribute value to match `pattern` in full
    pub fn matching<S: Into<String>>(name: S, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            name: name.into(),
            pattern: Some((pattern.to_string(), regex)),
        })
    }

    /// Parse `attr` or `attr='pattern'`, with or without surrounding brackets
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let bracketed = if trimmed.starts_with('[') {
            trimmed.to_string()
        } else {
            format!("[{}]", trimmed)
        };
        let captures = PREDICATE.captures(&bracketed)?;
        if captures.get(0).map(|m| m.as_str().len()) != Some(bracketed.len()) {
            return None;
        }
        Self::from_captures(&captures)
    }

    fn from_captures(captures: &regex::Captures<'_>) -> Option<Self> {
        let name = captures
            .name("quoted")
            .or_else(|| captures.name("name"))?
            .as_str();
        match captures.name("pattern") {
            None => Some(Self::present(name)),
            Some(pattern) => match Self::matching(name, pattern.as_str()) {
                Ok(predicate) => Some(predicate),
                Err(err) => {
                    debug!(attribute = name, error = %err, "invalid attribute pattern");
                    None
                }
            },
        }
    }

    /// The attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern as written, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|(source, _)| source.as_str())
    }

    /// Whether an attribute value satisfies the predicate
    pub fn matches(&self, value: &Value) -> bool {
        match &self.pattern {
            None => true,
            Some((_, regex)) => regex.is_match(&value.as_str()),
        }
    }

    /// Whether the node has the attribute and its value satisfies the
    /// predicate
    pub fn accepts(&self, node: &GenericNode<'_>) -> bool {
        node.attribute(&self.name)
            .is_some_and(|value| self.matches(value))
    }
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern() {
            Some(pattern) => write!(f, "[{}='{}']", self.name, pattern),
            None => write!(f, "[{}]", self.name),
        }
    }
}

/// One alternative of a criteria string
#[derive(Debug, Clone, Default)]
pub struct Criterion {
    element: Option<String>,
    predicates: Vec<AttributePredicate>,
}

impl Criterion {
    /// Match any element
    pub fn any() -> Self {
        Self::default()
    }

    /// Match elements reached through `name`
    pub fn element<S: Into<String>>(name: S) -> Self {
        Self {
            element: Some(name.into()),
            predicates: Vec::new(),
        }
    }

    /// Add an attribute predicate
    pub fn with_predicate(mut self, predicate: AttributePredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Parse a single alternative; `None` if it does not follow the grammar
    pub fn parse(text: &str) -> Option<Self> {
        let captures = ALTERNATIVE.captures(text)?;
        let element = captures.name("element").map(|m| m.as_str().to_string());
        let predicates = captures.name("predicates").map_or("", |m| m.as_str());
        if element.is_none() && predicates.trim().is_empty() {
            return None;
        }
        let predicates = PREDICATE
            .captures_iter(predicates)
            .map(|captures| AttributePredicate::from_captures(&captures))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            element,
            predicates,
        })
    }

    /// The element name, `None` for any element
    pub fn element_name(&self) -> Option<&str> {
        self.element.as_deref()
    }

    pub fn predicates(&self) -> &[AttributePredicate] {
        &self.predicates
    }

    /// Whether the node satisfies every attribute predicate.
    ///
    /// The element name is checked during selection, not here.
    pub fn matches(&self, node: &GenericNode<'_>) -> bool {
        self.predicates.iter().all(|predicate| predicate.accepts(node))
    }

    /// Select matching nodes below `origin`.
    ///
    /// With [`SearchMode::Children`] only the origin's direct children are
    /// considered; with [`SearchMode::All`] every descendant is. Results are
    /// ordered level first at each node: the node's own matching children,
    /// then the matches found below each child in turn.
    pub fn select<'a>(&self, origin: GenericNode<'a>, mode: SearchMode) -> Vec<GenericNode<'a>> {
        let mut candidates = Vec::new();
        self.collect(origin, mode, &mut candidates);
        candidates.retain(|node| self.matches(node));
        candidates
    }

    fn collect<'a>(&self, origin: GenericNode<'a>, mode: SearchMode, out: &mut Vec<GenericNode<'a>>) {
        match &self.element {
            Some(name) => out.extend(origin.children_named(name)),
            None => out.extend(origin.child_nodes()),
        }
        if mode.is_deep() {
            for child in origin.child_nodes() {
                self.collect(child, mode, out);
            }
        }
    }
}

/// Renders the canonical criteria text
impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name().unwrap_or(""))?;
        for predicate in &self.predicates {
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}

/// Parse criteria text into its conforming alternatives
pub fn parse(text: &str) -> Vec<Criterion> {
    split_alternatives(text)
        .into_iter()
        .filter_map(|alternative| {
            let criterion = Criterion::parse(alternative);
            if criterion.is_none() {
                debug!(alternative, "skipping non-conforming filter criteria");
            }
            criterion
        })
        .collect()
}

/// Evaluate criteria text below one node
pub fn apply_filter<'a>(origin: GenericNode<'a>, text: &str, mode: SearchMode) -> Vec<GenericNode<'a>> {
    apply_filter_all(&[origin], text, mode)
}

/// Evaluate criteria text below each of the given nodes, concatenating
/// results in origin order and, per origin, in alternative order
pub fn apply_filter_all<'a>(
    origins: &[GenericNode<'a>],
    text: &str,
    mode: SearchMode,
) -> Vec<GenericNode<'a>> {
    let criteria = parse(text);
    origins
        .iter()
        .flat_map(|origin| {
            criteria
                .iter()
                .flat_map(move |criterion| criterion.select(*origin, mode))
        })
        .collect()
}

/// Split on commas outside brackets and quotes
fn split_alternatives(text: &str) -> Vec<&str> {
    let mut alternatives = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '\'' if depth > 0 => quoted = !quoted,
            '[' if !quoted => depth += 1,
            ']' if !quoted => depth = depth.saturating_sub(1),
            ',' if depth == 0 && !quoted => {
                alternatives.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    alternatives.push(&text[start..]);
    alternatives
}
