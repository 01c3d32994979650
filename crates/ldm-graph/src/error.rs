//! Error types for graph decoding

/// Errors raised while reading linked-data documents
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Input is not valid JSON
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level structure is not a JSON-LD document
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A property value has an unsupported shape
    #[error("unsupported value for <{predicate}>: {found}")]
    UnsupportedValue {
        /// Predicate the value belongs to
        predicate: String,
        /// Offending JSON fragment
        found: String,
    },

    /// A keyword carries a value of the wrong kind
    #[error("invalid {keyword}: expected {expected}")]
    InvalidKeyword {
        /// JSON-LD keyword, e.g. `@id`
        keyword: &'static str,
        /// What was expected
        expected: &'static str,
    },
}

/// Result alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
