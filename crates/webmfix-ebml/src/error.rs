//! Error types for webmfix-ebml.

use thiserror::Error;

/// Result type for webmfix-ebml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for webmfix-ebml operations.
///
/// None of these are raised for "nothing to fix" conditions; those are
/// reported through [`crate::FixOutcome`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A vint started with a zero byte, so it carries no length marker.
    #[error("Invalid vint at offset {offset}")]
    InvalidVint { offset: usize },

    /// A vint runs past the end of its buffer.
    #[error("Truncated vint at offset {offset}: need {need} bytes, have {have}")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// Value too large for an 8-byte vint.
    #[error("Value {0} does not fit in an 8-byte vint")]
    VintOverflow(u64),

    /// A container operation was requested on a leaf element.
    #[error("Element {id:#x} is not a container")]
    NotAContainer { id: u64 },
}
