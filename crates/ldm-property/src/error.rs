//! Error types for property edits

use ldm_graph::Iri;

/// Errors raised by edit mutators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// Index outside the current value list
    #[error("index {index} out of range for <{key}> with {len} values")]
    IndexOutOfRange {
        /// Property key
        key: Iri,
        /// Requested index
        index: usize,
        /// Current number of values
        len: usize,
    },

    /// Property does not accept edits
    #[error("property <{0}> is not editable")]
    NotEditable(Iri),

    /// Value is a system property of a fixed shape
    #[error("value {value} of <{key}> is protected")]
    ProtectedValue {
        /// Property key
        key: Iri,
        /// Protected value
        value: Iri,
    },
}
