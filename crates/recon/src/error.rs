use std::fmt;

/// Caller-level validation failures. The engine itself is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// The selected template has no items.
    EmptyTemplate,
    /// The on-hand export produced no rows with an item code.
    EmptyOnHand,
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTemplate => write!(f, "template has no items"),
            Self::EmptyOnHand => write!(f, "no items found in the on-hand inventory file"),
        }
    }
}

impl std::error::Error for ReconError {}
