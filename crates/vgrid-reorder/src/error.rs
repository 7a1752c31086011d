use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReorderError>;

/// Caller contract violations detected by the reorder engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// A drag computation was requested against an empty window.
    #[error("in-range window is empty")]
    EmptyWindow,

    /// An id was referenced that the supplied input does not contain.
    #[error("unknown item: {id}")]
    UnknownItem { id: String },
}

impl ReorderError {
    #[must_use]
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownItem { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::ReorderError;

    #[test]
    fn unknown_item_message_names_the_id() {
        let error = ReorderError::unknown("row-7");
        assert_eq!(error.to_string(), "unknown item: row-7");
    }

    #[test]
    fn empty_window_message() {
        assert_eq!(
            ReorderError::EmptyWindow.to_string(),
            "in-range window is empty"
        );
    }
}
