//! LDM Core - linked-data forms
//!
//! Ties the property model to a backend:
//! - [`FormStateMachine`]: lifecycle, edit buffer and submission of one form
//! - [`LinkedDataBackend`]: what forms need from a statement store
//! - [`LinkedDataForms`]: per-key forms with a shared vocabulary cache
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ldm_core::prelude::*;
//!
//! let forms = LinkedDataForms::new(Arc::new(backend), FormConfig::default());
//! forms.initialize_form(key.clone(), subject, EditContext::Metadata).await?;
//! forms.add_value(&key, &comment, ValueEntry::literal("hello"))?;
//! forms.submit(&key).await?;
//! ```

#![warn(unreachable_pub)]

pub mod backend;
pub mod error;
pub mod forms;
pub mod state_machine;
pub mod types;

pub use backend::{InMemoryBackend, LinkedDataBackend};
pub use error::{BackendError, FormError, Result};
pub use forms::LinkedDataForms;
pub use ldm_property::{PendingEdits, PropertyDescriptor, Updates, ValidationError};
pub use state_machine::{allowed_transitions, validate_transition, EditCommand, FormStateMachine, LoadTicket};
pub use types::{EditContext, FormConfig, FormKey, FormStatus};

/// Common imports for driving forms
pub mod prelude {
    pub use crate::backend::{InMemoryBackend, LinkedDataBackend};
    pub use crate::error::{BackendError, FormError};
    pub use crate::forms::LinkedDataForms;
    pub use crate::state_machine::FormStateMachine;
    pub use crate::types::{EditContext, FormConfig, FormKey, FormStatus};
    pub use ldm_graph::{Iri, ValueEntry};
    pub use ldm_property::PropertyDescriptor;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
