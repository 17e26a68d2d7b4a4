//! Error types for generalization

/// Result type for generalization
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a typed object graph into a generic tree.
///
/// Both variants point at a disagreement between a type's static
/// descriptor and what its `slot` implementation actually returns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The descriptor lists a slot the object does not know about
    #[error("descriptor of <{element}> declares slot '{slot}' but the object does not expose it")]
    UnknownSlot {
        element: &'static str,
        slot: &'static str,
    },

    /// The object returned a value of the wrong shape for a slot
    #[error("slot '{slot}' of <{element}> is declared as {expected} but the object returned {found}")]
    SlotKindMismatch {
        element: &'static str,
        slot: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    /// Create a new unknown slot error
    pub fn unknown_slot(element: &'static str, slot: &'static str) -> Self {
        Error::UnknownSlot { element, slot }
    }

    /// Create a new slot kind mismatch error
    pub fn kind_mismatch(
        element: &'static str,
        slot: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Error::SlotKindMismatch {
            element,
            slot,
            expected,
            found,
        }
    }
}
