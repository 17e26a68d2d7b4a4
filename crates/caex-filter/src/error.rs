//! Error types for building filters

/// Result type for building filters
pub type Result<T> = std::result::Result<T, FilterError>;

/// Misuse of the filter builder.
///
/// Evaluation itself never fails: malformed criteria simply match nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The stage already selects something
    #[error("filter stage {stage} already has a matcher")]
    MatcherAlreadyBound { stage: usize },

    /// A registered text node filter can drive only one stage
    #[error("text node filter {filter} is already assigned to stage {stage}")]
    AlreadyAssigned { filter: String, stage: usize },

    /// The handle does not belong to this filter
    #[error("unknown text node filter handle {0}")]
    UnknownTextFilter(usize),
}
