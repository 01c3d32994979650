//! LDM Property - property descriptors
//!
//! Converts between the statements about a subject and the editable,
//! vocabulary-constrained list of [`PropertyDescriptor`]s forms are built on:
//! - [`convert`]: graph to ordered descriptors
//! - [`order`]: deterministic display order
//! - [`overlay`]: pending edits layered over fetched values
//! - [`validate`]: shape checks and error partitioning
//! - [`patch`]: edited values back to statements
//! - [`editing`]: which descriptors accept edits
//! - [`visibility`]: which descriptors a form shows
//!
//! # Example
//!
//! ```rust,ignore
//! use ldm_property::{convert, PendingEdits};
//!
//! let base = convert::from_graph(&graph, &subject, &vocabulary);
//! let mut edits = PendingEdits::new();
//! edits.add_value(&base, &comment, ValueEntry::literal("hello"))?;
//! let effective = edits.merge(&base);
//! ```

#![warn(unreachable_pub)]

pub mod convert;
pub mod descriptor;
pub mod editing;
pub mod error;
pub mod order;
pub mod overlay;
pub mod patch;
pub mod validate;
pub mod visibility;

pub use convert::{empty_properties, from_graph, type_descriptor};
pub use descriptor::PropertyDescriptor;
pub use editing::{EditContext, EditingRules};
pub use error::PropertyError;
pub use order::{compare, sort_properties};
pub use overlay::{merge, PendingEdits, Updates};
pub use patch::{to_graph, GraphPatch, PropertyPatch};
pub use validate::{
    attach_errors, partition_errors, validate_messages, PartitionedErrors, ValidationError,
    Violation,
};
pub use visibility::visible_properties;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with property descriptors
    pub use crate::{
        EditContext, GraphPatch, PendingEdits, PropertyDescriptor, PropertyError, PropertyPatch,
        ValidationError, Violation,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
