//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid inputs to the scanning rules themselves.
///
/// Malformed or ambiguous source text is never an error: it only changes the
/// shape of the resulting tree.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid tag matcher for '{tag}': {reason}")]
    InvalidMatcher { tag: String, reason: String },

    #[error("invalid extension '{0}': must start with '.'")]
    InvalidExtension(String),
}
