//! Filter stages and how their results combine

use crate::criteria::Criterion;
use crate::element::ElementFilter;
use crate::text::TextNodeFilter;
use caex_generic::{GenericNode, NodeId};
use std::collections::HashSet;
use std::fmt;

/// How far below its origins a stage looks for elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Every descendant
    All,
    /// Direct children only
    Children,
}

impl SearchMode {
    pub fn is_deep(self) -> bool {
        self == SearchMode::All
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::All => "all",
            SearchMode::Children => "children",
        })
    }
}

/// How a stage's result combines with the results of the stages before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::And => "and",
            Operator::Or => "or",
        })
    }
}

/// Identifies a stage of a [`CaexFilter`](crate::CaexFilter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterNodeId(pub(crate) usize);

impl FilterNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a text node filter registered on a
/// [`CaexFilter`](crate::CaexFilter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextFilterHandle(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    Element {
        filter: ElementFilter,
        /// `None` when the filter's predicates are malformed
        criterion: Option<Criterion>,
    },
    /// A filter registered on the owning `CaexFilter`
    Text(TextFilterHandle),
    /// A filter created for this stage alone, dropped with it
    InlineText(TextNodeFilter),
}

impl Matcher {
    pub(crate) fn element(filter: ElementFilter) -> Self {
        let criterion = filter.compile();
        Matcher::Element { filter, criterion }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FilterNode {
    pub(crate) mode: SearchMode,
    pub(crate) operator: Operator,
    pub(crate) matcher: Option<Matcher>,
    pub(crate) parent: Option<FilterNodeId>,
    pub(crate) children: Vec<FilterNodeId>,
}

impl FilterNode {
    pub(crate) fn new(mode: SearchMode, operator: Operator, parent: Option<FilterNodeId>) -> Self {
        Self {
            mode,
            operator,
            matcher: None,
            parent,
            children: Vec::new(),
        }
    }
}

/// Fold one stage result into the accumulated result.
///
/// `Or` concatenates. `And` keeps nodes whose parent also parents a node on
/// the other side. Only the shorter side's nodes are kept; on equal lengths
/// both sides are kept, accumulated nodes first.
pub(crate) fn combine<'a>(
    operator: Operator,
    mut accumulated: Vec<GenericNode<'a>>,
    incoming: Vec<GenericNode<'a>>,
) -> Vec<GenericNode<'a>> {
    match operator {
        Operator::Or => {
            accumulated.extend(incoming);
            accumulated
        }
        Operator::And => {
            let accumulated_parents = parent_ids(&accumulated);
            let incoming_parents = parent_ids(&incoming);
            let keep = |nodes: Vec<GenericNode<'a>>, other: &HashSet<NodeId>| {
                nodes
                    .into_iter()
                    .filter(|node| node.parent().is_some_and(|p| other.contains(&p.id())))
                    .collect::<Vec<_>>()
            };
            if incoming.len() < accumulated.len() {
                keep(incoming, &accumulated_parents)
            } else if accumulated.len() < incoming.len() {
                keep(accumulated, &incoming_parents)
            } else {
                let mut kept = keep(accumulated, &incoming_parents);
                let seen: HashSet<GenericNode<'a>> = kept.iter().copied().collect();
                kept.extend(
                    keep(incoming, &accumulated_parents)
                        .into_iter()
                        .filter(|node| !seen.contains(node)),
                );
                kept
            }
        }
    }
}

fn parent_ids(nodes: &[GenericNode<'_>]) -> HashSet<NodeId> {
    nodes
        .iter()
        .filter_map(|node| node.parent())
        .map(|parent| parent.id())
        .collect()
}
