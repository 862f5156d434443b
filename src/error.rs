//! Error types for the app monitor lookup

use std::time::Duration;
use thiserror::Error;

use crate::client::RumClientError;
use crate::schema::AttributeError;

/// Main error type for a data source read
#[derive(Debug, Error)]
pub enum LookupError {
    /// No summary matched, or the fetch returned no monitor
    #[error("no app monitor found with name {name:?}")]
    NotFound { name: String },

    /// The list or get call itself failed; carried unchanged
    #[error(transparent)]
    Transport(#[from] RumClientError),

    #[error("setting {field} error: {source}")]
    FieldProjection {
        field: &'static str,
        #[source]
        source: AttributeError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lookup cancelled")]
    Cancelled,

    #[error("Lookup exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LookupError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LookupError::NotFound { name: name.into() }
    }

    pub fn field(field: &'static str, source: AttributeError) -> Self {
        LookupError::FieldProjection { field, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

/// Result type for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;
