//! LDM Graph - linked-data statements
//!
//! Provides the statement-level data model shared by the workspace:
//! - [`Iri`], [`Literal`] and [`Value`] for statement parts
//! - [`Statement`] and [`Graph`] with lookup helpers
//! - [`ValueEntry`], the editable form of one property value
//! - well-known vocabulary terms in [`vocab`]
//! - an expanded JSON-LD codec in [`jsonld`]

#![warn(unreachable_pub)]

pub mod error;
pub mod iri;
pub mod jsonld;
pub mod literal;
pub mod statement;
pub mod value_entry;
pub mod vocab;

pub use error::GraphError;
pub use iri::Iri;
pub use literal::{Literal, Value};
pub use statement::{Graph, Statement};
pub use value_entry::ValueEntry;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with graphs
    pub use crate::vocab::{dash, fs, rdf, rdfs, sh, xsd};
    pub use crate::{Graph, Iri, Literal, Statement, Value, ValueEntry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
