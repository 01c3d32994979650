//! Error types for LDM Core
//!
//! Two layers:
//! - [`BackendError`]: what a [`LinkedDataBackend`](crate::LinkedDataBackend) reports
//! - [`FormError`]: what form operations report, backend failures included

use crate::types::{FormKey, FormStatus};
use ldm_graph::Iri;
use ldm_property::{PropertyError, ValidationError};

/// Failures reported by a linked-data backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Request rejected for lack of rights (401/403)
    #[error("not authorized (status {status})")]
    Auth {
        /// HTTP status
        status: u16,
    },

    /// Submitted statements violate the vocabulary (400)
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Subject does not exist
    #[error("subject not found: {0}")]
    NotFound(Iri),

    /// Request did not finish in time
    #[error("request timed out after {duration_secs}s")]
    Timeout {
        /// Configured limit
        duration_secs: u64,
    },
}

impl BackendError {
    /// Check if repeating the request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }

    /// Validation errors carried by this failure
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Form operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// No form is registered under this key
    #[error("unknown form: {0}")]
    UnknownFormKey(FormKey),

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

    /// Form has not loaded its subject yet
    #[error("form {0} is not ready")]
    NotReady(FormKey),

    /// A submission for this form is still running
    #[error("form {0} is already submitting")]
    SubmitInFlight(FormKey),

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

    /// Lifecycle transition not in the transition table
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        /// Current status
        from: FormStatus,
        /// Requested status
        to: FormStatus,
    },

    /// Local validation rejected the pending edits
    #[error("invalid values: {}", summary(.0))]
    Invalid(Vec<ValidationError>),

    /// Backend failure
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl FormError {
    /// Check if the operation may succeed when repeated
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_retryable(),
            Self::SubmitInFlight(_) | Self::NotReady(_) => true,
            _ => false,
        }
    }

    /// Check if the error is a caller bug rather than a runtime condition
    #[inline]
    #[must_use]
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Self::UnknownFormKey(_) | Self::IndexOutOfRange { .. })
    }
}

impl From<PropertyError> for FormError {
    fn from(error: PropertyError) -> Self {
        match error {
            PropertyError::IndexOutOfRange { key, index, len } => Self::IndexOutOfRange { key, index, len },
            PropertyError::NotEditable(key) => Self::NotEditable(key),
            PropertyError::ProtectedValue { key, value } => Self::ProtectedValue { key, value },
        }
    }
}

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;
