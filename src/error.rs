//! Error types for the view-state engine.
//!
//! None of these are fatal: a rejected intent leaves the view state untouched,
//! and a failed fetch leaves the dataset as it was.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// The column is unknown or does not support the requested operation
    #[error("column '{column}' is not {capability}")]
    InvalidColumn { column: String, capability: &'static str },

    /// Pages are 1-indexed
    #[error("page {0} is out of range, pages start at 1")]
    InvalidPage(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("could not decode dataset: {0}")]
    Decode(String),
}

impl ViewError {
    pub(crate) fn not_sortable(column: &str) -> Self {
        ViewError::InvalidColumn {
            column: column.to_string(),
            capability: "sortable",
        }
    }

    pub(crate) fn not_filterable(column: &str) -> Self {
        ViewError::InvalidColumn {
            column: column.to_string(),
            capability: "filterable",
        }
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::Decode(err.to_string())
    }
}
