//! Linked-data backend interface
//!
//! Forms fetch and store statements through [`LinkedDataBackend`]. Each call
//! names the [`EditContext`]: metadata requests address the instance graph
//! (constrained by the vocabulary), vocabulary requests address the
//! vocabulary (constrained by the meta-vocabulary).

mod memory;

pub use memory::InMemoryBackend;

use crate::error::BackendError;
use crate::types::EditContext;
use async_trait::async_trait;
use ldm_graph::{Graph, Iri};

/// Remote store of linked-data statements
#[async_trait]
pub trait LinkedDataBackend: Send + Sync {
    /// Statements about `subject`, together with the labels of the
    /// resources it references
    async fn fetch_graph(&self, context: EditContext, subject: &Iri) -> Result<Graph, BackendError>;

    /// Shapes constraining subjects of `context`
    async fn fetch_vocabulary(&self, context: EditContext) -> Result<Graph, BackendError>;

    /// Replace the values of every `(subject, predicate)` pair in `statements`
    ///
    /// A statement whose object is `fs:nil` removes the pair entirely.
    async fn submit_graph_patch(&self, context: EditContext, statements: Graph) -> Result<(), BackendError>;

    /// Remove every statement about `subject`
    async fn delete_subject(&self, context: EditContext, subject: &Iri) -> Result<(), BackendError>;
}
