//! Error kinds raised by prelude construction and queries.

use std::fmt;

/// Failure of a prelude/epilogue construction or query.
///
/// Every variant is a precondition violation: the computation is deterministic,
/// so a failed call fails identically when repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreludeError {
    /// The container reference was absent (or did not name an element)
    InvalidArgument,
    /// The ordering specification is empty or repeats a tag
    InvalidSpec(String),
    /// A query named a tag outside the ordering specification
    InvalidTag(String),
}

impl PreludeError {
    /// Stable reason code, used as the atom returned across the NIF boundary
    pub fn reason(&self) -> &'static str {
        match self {
            PreludeError::InvalidArgument => "invalid_argument",
            PreludeError::InvalidSpec(_) => "invalid_spec",
            PreludeError::InvalidTag(_) => "invalid_tag",
        }
    }
}

impl fmt::Display for PreludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreludeError::InvalidArgument => write!(f, "container is absent"),
            PreludeError::InvalidSpec(reason) => write!(f, "invalid order spec: {}", reason),
            PreludeError::InvalidTag(tag) => write!(f, "tag not in order spec: {}", tag),
        }
    }
}

impl std::error::Error for PreludeError {}
