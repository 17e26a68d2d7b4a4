//! Filter expressions built stage by stage over one origin node

use crate::element::ElementFilter;
use crate::error::{FilterError, Result};
use crate::node::{combine, FilterNode, FilterNodeId, Matcher, Operator, SearchMode, TextFilterHandle};
use crate::text::TextNodeFilter;
use caex_generic::{GenericNode, GenericTree};
use std::fmt;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone)]
struct TextSlot {
    filter: TextNodeFilter,
    owner: Option<FilterNodeId>,
}

/// A filter expression bound to an origin node.
///
/// Each call to [`all`](Self::all) or [`children`](Self::children) starts an
/// independent top-level stage; [`execute`](Self::execute) concatenates their
/// results. Stages get refined through the returned [`FilterNodeBuilder`].
///
/// A stage with child stages keeps its matches only where the child stages
/// agree: child results are folded left to right (the first with `OR`, later
/// ones with their own operator) and, below the top level, projected back to
/// their parents.
#[derive(Debug, Clone)]
pub struct CaexFilter<'a> {
    origin: GenericNode<'a>,
    stages: Vec<FilterNode>,
    roots: Vec<FilterNodeId>,
    text_filters: Vec<TextSlot>,
}

impl<'a> CaexFilter<'a> {
    pub fn new(origin: GenericNode<'a>) -> Self {
        Self {
            origin,
            stages: Vec::new(),
            roots: Vec::new(),
            text_filters: Vec::new(),
        }
    }

    /// Filter starting at the root of `tree`
    pub fn for_tree(tree: &'a GenericTree<'a>) -> Self {
        Self::new(tree.root())
    }

    pub fn origin(&self) -> GenericNode<'a> {
        self.origin
    }

    /// Start a top-level stage that searches all descendants of the origin
    pub fn all(&mut self) -> FilterNodeBuilder<'_, 'a> {
        self.top_level(SearchMode::All)
    }

    /// Start a top-level stage that searches the origin's direct children
    pub fn children(&mut self) -> FilterNodeBuilder<'_, 'a> {
        self.top_level(SearchMode::Children)
    }

    fn top_level(&mut self, mode: SearchMode) -> FilterNodeBuilder<'_, 'a> {
        let id = self.push_stage(FilterNode::new(mode, Operator::Or, None));
        self.roots.push(id);
        FilterNodeBuilder { filter: self, id }
    }

    fn push_stage(&mut self, stage: FilterNode) -> FilterNodeId {
        let id = FilterNodeId(self.stages.len());
        if let Some(parent) = stage.parent {
            self.stages[parent.0].children.push(id);
        }
        self.stages.push(stage);
        id
    }

    /// Register a text node filter that can be changed between executions.
    ///
    /// Bind it to a stage with [`FilterNodeBuilder::text_node_filter`].
    pub fn register_text_filter(&mut self, filter: TextNodeFilter) -> TextFilterHandle {
        self.text_filters.push(TextSlot {
            filter,
            owner: None,
        });
        TextFilterHandle(self.text_filters.len() - 1)
    }

    /// Number of registered text node filters
    pub fn text_filter_count(&self) -> usize {
        self.text_filters.len()
    }

    pub fn text_filter(&self, handle: TextFilterHandle) -> Option<&TextNodeFilter> {
        self.text_filters.get(handle.0).map(|slot| &slot.filter)
    }

    /// Change a registered text node filter; the next execution uses the new
    /// name and value
    pub fn text_filter_mut(&mut self, handle: TextFilterHandle) -> Option<&mut TextNodeFilter> {
        self.text_filters.get_mut(handle.0).map(|slot| &mut slot.filter)
    }

    /// Discard all stages so a new query can be built against the same origin.
    ///
    /// Registered text node filters stay registered but are detached.
    pub fn clear(&mut self) -> &mut Self {
        self.stages.clear();
        self.roots.clear();
        for slot in &mut self.text_filters {
            slot.owner = None;
        }
        self
    }

    /// Number of top-level stages
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Evaluate every top-level stage against the origin
    pub fn execute(&self) -> Vec<GenericNode<'a>> {
        let origins = [self.origin];
        let results: Vec<_> = self
            .roots
            .iter()
            .flat_map(|&root| self.evaluate(root, &origins))
            .collect();
        debug!(
            stages = self.stages.len(),
            results = results.len(),
            "executed filter"
        );
        results
    }

    /// Evaluate and map each result
    pub fn execute_and_map<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(GenericNode<'a>) -> T,
    {
        self.execute().into_iter().map(f).collect()
    }

    fn evaluate(&self, id: FilterNodeId, origins: &[GenericNode<'a>]) -> Vec<GenericNode<'a>> {
        let stage = &self.stages[id.0];
        let matched = self.match_stage(id, stage, origins);
        trace!(stage = id.0, origins = origins.len(), matched = matched.len(), "matched stage");
        if stage.children.is_empty() {
            return matched;
        }

        let mut folded = Vec::new();
        for (position, &child) in stage.children.iter().enumerate() {
            let operator = match position {
                0 => Operator::Or,
                _ => self.stages[child.0].operator,
            };
            let result = self.evaluate(child, &matched);
            folded = combine(operator, folded, result);
        }

        match stage.parent {
            Some(_) => folded.iter().filter_map(GenericNode::parent).collect(),
            None => folded,
        }
    }

    fn match_stage(
        &self,
        id: FilterNodeId,
        stage: &FilterNode,
        origins: &[GenericNode<'a>],
    ) -> Vec<GenericNode<'a>> {
        match &stage.matcher {
            None => {
                warn!(stage = id.0, "filter stage has no matcher and matches nothing");
                Vec::new()
            }
            Some(Matcher::Element { criterion: None, .. }) => Vec::new(),
            Some(Matcher::Element {
                criterion: Some(criterion),
                ..
            }) => origins
                .iter()
                .flat_map(|origin| criterion.select(*origin, stage.mode))
                .collect(),
            Some(Matcher::Text(handle)) => self
                .text_filter(*handle)
                .map(|filter| filter.select(origins))
                .unwrap_or_default(),
            Some(Matcher::InlineText(filter)) => filter.select(origins),
        }
    }

    fn write_stage(&self, f: &mut fmt::Formatter<'_>, id: FilterNodeId, depth: usize, first: bool) -> fmt::Result {
        let stage = &self.stages[id.0];
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        if !first {
            write!(f, "{} ", stage.operator)?;
        }
        write!(f, "{} ", stage.mode)?;
        match &stage.matcher {
            None => f.write_str("<unbound>")?,
            Some(Matcher::Element { filter, .. }) => write!(f, "{filter}")?,
            Some(Matcher::Text(handle)) => match self.text_filter(*handle) {
                Some(filter) => write!(f, "text {filter}")?,
                None => f.write_str("text <unknown>")?,
            },
            Some(Matcher::InlineText(filter)) => write!(f, "text {filter}")?,
        }
        writeln!(f)?;
        for (position, &child) in stage.children.iter().enumerate() {
            self.write_stage(f, child, depth + 1, position == 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for CaexFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &root in &self.roots {
            self.write_stage(f, root, 0, true)?;
        }
        Ok(())
    }
}

/// Cursor on one stage of a [`CaexFilter`].
///
/// Binding methods fail when the stage already has a matcher; structural
/// methods move the cursor to another stage.
pub struct FilterNodeBuilder<'f, 'a> {
    filter: &'f mut CaexFilter<'a>,
    id: FilterNodeId,
}

impl<'f, 'a> FilterNodeBuilder<'f, 'a> {
    /// The stage under the cursor
    pub fn id(&self) -> FilterNodeId {
        self.id
    }

    /// Select elements named `name`
    pub fn element(self, name: &str) -> Result<Self> {
        self.element_filter(ElementFilter::named(name))
    }

    /// Select elements named `name` whose attributes satisfy every predicate,
    /// e.g. `["Name='Type'"]`
    pub fn element_with<I, S>(self, name: &str, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.element_filter(ElementFilter::named(name).with_attributes(attributes))
    }

    /// Select every element
    pub fn any_element(self) -> Result<Self> {
        self.element_filter(ElementFilter::any())
    }

    pub fn element_filter(self, filter: ElementFilter) -> Result<Self> {
        self.ensure_unbound()?;
        let matcher = Matcher::element(filter);
        if let Matcher::Element {
            filter,
            criterion: None,
        } = &matcher
        {
            warn!(stage = self.id.0, %filter, "malformed element filter matches nothing");
        }
        self.bind(matcher)
    }

    /// Keep the nodes whose only child is `name` with text `value`.
    ///
    /// The filter belongs to this stage; register one with
    /// [`CaexFilter::register_text_filter`] to change it between executions.
    pub fn text_node(self, name: &str, value: &str) -> Result<Self> {
        self.ensure_unbound()?;
        self.bind(Matcher::InlineText(TextNodeFilter::new(name, value)))
    }

    /// Bind a registered text node filter to this stage
    pub fn text_node_filter(self, handle: TextFilterHandle) -> Result<Self> {
        let slot = self
            .filter
            .text_filters
            .get(handle.0)
            .ok_or(FilterError::UnknownTextFilter(handle.0))?;
        if let Some(owner) = slot.owner {
            return Err(FilterError::AlreadyAssigned {
                filter: slot.filter.to_string(),
                stage: owner.0,
            });
        }
        self.ensure_unbound()?;
        self.filter.text_filters[handle.0].owner = Some(self.id);
        self.bind(Matcher::Text(handle))
    }

    /// Require a matching direct child; moves the cursor to the new child stage
    pub fn having_child(self) -> Self {
        self.child_stage(SearchMode::Children)
    }

    /// Require a matching descendant; moves the cursor to the new child stage
    pub fn having_all(self) -> Self {
        self.child_stage(SearchMode::All)
    }

    /// Add a stage that must also match
    pub fn and(self) -> Self {
        self.sibling_stage(Operator::And)
    }

    /// Add a stage whose matches are added
    pub fn or(self) -> Self {
        self.sibling_stage(Operator::Or)
    }

    /// Move the cursor back to the parent stage
    pub fn done(self) -> Self {
        let parent = self.filter.stages[self.id.0].parent;
        match parent {
            Some(parent) => Self {
                filter: self.filter,
                id: parent,
            },
            None => self,
        }
    }

    /// Evaluate the whole filter this stage belongs to
    pub fn execute(&self) -> Vec<GenericNode<'a>> {
        self.filter.execute()
    }

    fn ensure_unbound(&self) -> Result<()> {
        match self.filter.stages[self.id.0].matcher {
            Some(_) => Err(FilterError::MatcherAlreadyBound { stage: self.id.0 }),
            None => Ok(()),
        }
    }

    fn bind(self, matcher: Matcher) -> Result<Self> {
        self.filter.stages[self.id.0].matcher = Some(matcher);
        Ok(self)
    }

    fn child_stage(self, mode: SearchMode) -> Self {
        let id = self
            .filter
            .push_stage(FilterNode::new(mode, Operator::Or, Some(self.id)));
        Self {
            filter: self.filter,
            id,
        }
    }

    fn sibling_stage(self, operator: Operator) -> Self {
        let current = &self.filter.stages[self.id.0];
        let parent = current.parent.unwrap_or(self.id);
        let mode = current.mode;
        let id = self
            .filter
            .push_stage(FilterNode::new(mode, operator, Some(parent)));
        Self {
            filter: self.filter,
            id,
        }
    }
}

