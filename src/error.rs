//! Error types for tag operations and configuration loading.
//!
//! Candidate and renderer failures are not errors: they surface as `None`
//! and the field keeps the text as plain text.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the tag field.
#[derive(Error, Debug)]
pub enum TagError {
    /// A tag operation named an index the registry does not hold.
    #[error("tag index {index} out of bounds (registry holds {len} tags)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The registry and the buffer disagree about a tag's attachment slot.
    #[error("tag {index} has no attachment slot in the buffer")]
    MissingSlot { index: usize },

    /// No tag is selected, so a menu action has nothing to act on.
    #[error("no tag is selected")]
    NoSelection,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load font: {0}")]
    Font(String),
}

pub type Result<T, E = TagError> = std::result::Result<T, E>;
