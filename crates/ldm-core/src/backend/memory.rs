//! In-memory backend
//!
//! Holds one graph per editing context plus the meta-vocabulary. Useful for
//! tests and for tools working on local files.

use super::LinkedDataBackend;
use crate::error::BackendError;
use crate::types::EditContext;
use async_trait::async_trait;
use indexmap::IndexSet;
use ldm_graph::vocab::{fs, rdfs, sh};
use ldm_graph::{Graph, Iri, Value};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

/// Backend keeping its graphs in memory
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    metadata: RwLock<Graph>,
    vocabulary: RwLock<Graph>,
    meta_vocabulary: RwLock<Graph>,
    fail_next_submit: Mutex<Option<BackendError>>,
    submitted: Mutex<Vec<(EditContext, Graph)>>,
}

impl InMemoryBackend {
    /// Backend over the given graphs
    #[must_use]
    pub fn new(metadata: Graph, vocabulary: Graph, meta_vocabulary: Graph) -> Self {
        Self {
            metadata: RwLock::new(metadata),
            vocabulary: RwLock::new(vocabulary),
            meta_vocabulary: RwLock::new(meta_vocabulary),
            ..Self::default()
        }
    }

    /// Make the next submission fail with `error`
    pub fn fail_next_submit(&self, error: BackendError) {
        *self.fail_next_submit.lock() = Some(error);
    }

    /// Statements received by successful and failed submissions, in order
    #[must_use]
    pub fn submitted(&self) -> Vec<(EditContext, Graph)> {
        self.submitted.lock().clone()
    }

    /// Copy of the graph edited in `context`
    #[must_use]
    pub fn graph(&self, context: EditContext) -> Graph {
        self.store(context).read().clone()
    }

    fn store(&self, context: EditContext) -> &RwLock<Graph> {
        match context {
            EditContext::Metadata => &self.metadata,
            EditContext::Vocabulary => &self.vocabulary,
        }
    }

    fn shapes(&self, context: EditContext) -> &RwLock<Graph> {
        match context {
            EditContext::Metadata => &self.vocabulary,
            EditContext::Vocabulary => &self.meta_vocabulary,
        }
    }
}

/// Statements about `subject` plus labels of the resources it references
fn subject_view(graph: &Graph, subject: &Iri) -> Graph {
    let mut view: Graph = graph.about(subject).cloned().collect();
    let mut referenced = IndexSet::new();
    for statement in view.iter() {
        collect_references(&statement.object, &mut referenced);
    }
    for statement in graph.iter() {
        if referenced.contains(&statement.subject)
            && &statement.subject != subject
            && (statement.predicate == rdfs::LABEL || statement.predicate == sh::NAME)
        {
            view.insert(statement.clone());
        }
    }
    view
}

fn collect_references(value: &Value, out: &mut IndexSet<Iri>) {
    match value {
        Value::Reference(iri) => {
            out.insert(iri.clone());
        }
        Value::List(items) => items.iter().for_each(|v| collect_references(v, out)),
        Value::Literal(_) => {}
    }
}

/// Replace the values of each `(subject, predicate)` pair of `patch` in `graph`
fn apply_patch(graph: &mut Graph, patch: &Graph) {
    let pairs: IndexSet<(&Iri, &Iri)> = patch.iter().map(|s| (&s.subject, &s.predicate)).collect();
    for (subject, predicate) in pairs {
        graph.remove_property(subject, predicate);
    }
    graph.extend(
        patch
            .iter()
            .filter(|s| s.object.as_iri().map_or(true, |o| o != fs::NIL))
            .cloned(),
    );
}

#[async_trait]
impl LinkedDataBackend for InMemoryBackend {
    async fn fetch_graph(&self, context: EditContext, subject: &Iri) -> Result<Graph, BackendError> {
        Ok(subject_view(&self.store(context).read(), subject))
    }

    async fn fetch_vocabulary(&self, context: EditContext) -> Result<Graph, BackendError> {
        Ok(self.shapes(context).read().clone())
    }

    async fn submit_graph_patch(&self, context: EditContext, statements: Graph) -> Result<(), BackendError> {
        self.submitted.lock().push((context, statements.clone()));
        if let Some(error) = self.fail_next_submit.lock().take() {
            debug!(%context, %error, "injected submission failure");
            return Err(error);
        }
        apply_patch(&mut self.store(context).write(), &statements);
        debug!(%context, statements = statements.len(), "applied patch");
        Ok(())
    }

    async fn delete_subject(&self, context: EditContext, subject: &Iri) -> Result<(), BackendError> {
        let removed = self.store(context).write().remove_subject(subject);
        if removed == 0 {
            return Err(BackendError::NotFound(subject.clone()));
        }
        debug!(%context, subject = %subject, removed, "deleted subject");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldm_graph::Statement;
    use ldm_test_utils::*;
    use pretty_assertions::assert_eq;

    fn backend() -> InMemoryBackend {
        InMemoryBackend::new(metadata(), vocabulary(), meta_vocabulary())
    }

    #[tokio::test]
    async fn fetch_includes_referenced_labels() {
        let graph = backend().fetch_graph(EditContext::Metadata, &iri(COLLECTION_1)).await.unwrap();
        assert_eq!(graph.label_of(&iri(USER_1)), Some("John"));
        assert_eq!(graph.label_of(&iri(PERSON_2)), Some("Bob"));
        assert!(graph.types_of(&iri(USER_1)).is_empty());
    }

    #[tokio::test]
    async fn vocabulary_per_context() {
        let backend = backend();
        assert_eq!(backend.fetch_vocabulary(EditContext::Metadata).await.unwrap(), vocabulary());
        assert_eq!(backend.fetch_vocabulary(EditContext::Vocabulary).await.unwrap(), meta_vocabulary());
    }

    #[tokio::test]
    async fn patches_replace_and_delete() {
        let backend = backend();
        let subject = iri(COLLECTION_1);
        let patch: Graph = [
            Statement::new(subject.clone(), KEYWORD, Value::literal("gamma")),
            Statement::new(subject.clone(), STATUS, iri(fs::NIL)),
        ]
        .into_iter()
        .collect();
        backend.submit_graph_patch(EditContext::Metadata, patch).await.unwrap();

        let graph = backend.graph(EditContext::Metadata);
        let keywords: Vec<_> = graph.objects(&subject, KEYWORD).collect();
        assert_eq!(keywords, [&Value::literal("gamma")]);
        assert_eq!(graph.objects(&subject, STATUS).count(), 0);
        assert_eq!(backend.submitted().len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_is_reported_once() {
        let backend = backend();
        backend.fail_next_submit(BackendError::Network("down".into()));
        let first = backend.submit_graph_patch(EditContext::Metadata, Graph::new()).await;
        assert_eq!(first, Err(BackendError::Network("down".into())));
        assert!(backend.submit_graph_patch(EditContext::Metadata, Graph::new()).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_unknown_subject_fails() {
        let backend = backend();
        let missing = iri("http://example.com/iri/missing");
        assert_eq!(
            backend.delete_subject(EditContext::Metadata, &missing).await,
            Err(BackendError::NotFound(missing))
        );
        assert!(backend.delete_subject(EditContext::Metadata, &iri(USER_1)).await.is_ok());
        assert!(!backend.graph(EditContext::Metadata).has_subject(&iri(USER_1)));
    }
}
