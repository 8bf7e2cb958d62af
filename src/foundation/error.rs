use crate::foundation::core::RectId;

/// Result alias used across the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors surfaced by host-facing operations.
///
/// Layout passes themselves never fail: malformed inputs degrade to snapping or to padding-only
/// totals. Only the utilities around them (scene edits, group registration, config loading)
/// report errors.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// A sibling index outside `0..len`.
    #[error("index {index} out of range for {len} children")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children at the time of the request.
        len: usize,
    },

    /// The rect id does not exist in the scene.
    #[error("unknown rect {0}")]
    UnknownRect(RectId),

    /// A second layout group was attached to a rect that already has one.
    #[error("rect {0} already has a layout group")]
    DuplicateGroup(RectId),

    /// Config (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Out-of-range sibling index.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Serialization failure with a human readable message.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
