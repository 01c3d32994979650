//! Backend interaction checked with mocks

use async_trait::async_trait;
use ldm_core::prelude::*;
use ldm_core::ValidationError;
use ldm_graph::vocab::rdfs;
use ldm_graph::Graph;
use ldm_test_utils::*;
use mockall::mock;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use std::sync::Arc;

mock! {
    pub Backend {}

    #[async_trait]
    impl LinkedDataBackend for Backend {
        async fn fetch_graph(&self, context: EditContext, subject: &Iri) -> Result<Graph, BackendError>;
        async fn fetch_vocabulary(&self, context: EditContext) -> Result<Graph, BackendError>;
        async fn submit_graph_patch(&self, context: EditContext, statements: Graph) -> Result<(), BackendError>;
        async fn delete_subject(&self, context: EditContext, subject: &Iri) -> Result<(), BackendError>;
    }
}

fn serving_metadata(mock: &mut MockBackend) {
    mock.expect_fetch_vocabulary()
        .with(eq(EditContext::Metadata))
        .times(1)
        .returning(|_| Ok(vocabulary()));
    mock.expect_fetch_graph().returning(|_, _| Ok(metadata()));
}

async fn ready_form(mock: MockBackend) -> (LinkedDataForms<MockBackend>, FormKey) {
    let forms = LinkedDataForms::new(Arc::new(mock), FormConfig::default());
    let key = FormKey::new("collection");
    forms
        .initialize_form(key.clone(), iri(COLLECTION_1), EditContext::Metadata)
        .await
        .unwrap();
    (forms, key)
}

#[tokio::test]
async fn vocabulary_is_fetched_once_per_context() {
    let mut mock = MockBackend::new();
    serving_metadata(&mut mock);
    let (forms, _) = ready_form(mock).await;

    forms
        .initialize_form(FormKey::new("user"), iri(USER_1), EditContext::Metadata)
        .await
        .unwrap();
    assert_eq!(forms.namespaces().await.unwrap().len(), 2);
}

#[tokio::test]
async fn auth_failure_moves_form_to_error() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_vocabulary().returning(|_| Ok(vocabulary()));
    mock.expect_fetch_graph()
        .returning(|_, _| Err(BackendError::Auth { status: 403 }));
    let forms = LinkedDataForms::new(Arc::new(mock), FormConfig::default());
    let key = FormKey::new("collection");

    let error = forms
        .initialize_form(key.clone(), iri(COLLECTION_1), EditContext::Metadata)
        .await
        .unwrap_err();
    assert_eq!(error, FormError::Backend(BackendError::Auth { status: 403 }));
    assert!(!error.is_retryable());
    assert_eq!(forms.status(&key), Some(FormStatus::Error));
    assert!(matches!(
        forms.add_value(&key, &iri(KEYWORD), ValueEntry::literal("x")),
        Err(FormError::NotReady(_))
    ));
}

#[tokio::test]
async fn submission_sends_only_changed_properties() {
    let mut mock = MockBackend::new();
    serving_metadata(&mut mock);
    mock.expect_submit_graph_patch()
        .withf(|context, statements| {
            *context == EditContext::Metadata
                && statements.len() == 3
                && statements.iter().all(|s| s.predicate == KEYWORD && s.subject == COLLECTION_1)
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let (forms, key) = ready_form(mock).await;

    forms.add_value(&key, &iri(KEYWORD), ValueEntry::literal("gamma")).unwrap();
    forms.submit(&key).await.unwrap();
    assert_eq!(forms.status(&key), Some(FormStatus::Ready));
}

#[tokio::test]
async fn reverted_edits_submit_nothing() {
    let mut mock = MockBackend::new();
    serving_metadata(&mut mock);
    mock.expect_submit_graph_patch()
        .withf(|_, statements| statements.is_empty())
        .times(1)
        .returning(|_, _| Ok(()));
    let (forms, key) = ready_form(mock).await;

    forms.add_value(&key, &iri(KEYWORD), ValueEntry::literal("gamma")).unwrap();
    assert!(forms.has_form_updates(&key));
    forms.delete_value(&key, &iri(KEYWORD), 2).unwrap();
    assert!(!forms.has_form_updates(&key));
    forms.submit(&key).await.unwrap();
}

#[tokio::test]
async fn local_violations_never_reach_the_backend() {
    let mut mock = MockBackend::new();
    serving_metadata(&mut mock);
    mock.expect_submit_graph_patch().never();
    let (forms, key) = ready_form(mock).await;

    forms.delete_value(&key, &iri(rdfs::LABEL), 0).unwrap();
    assert_eq!(
        forms.validate_property(&key, &iri(rdfs::LABEL)).unwrap(),
        vec!["too few values: at least 1 required".to_string()]
    );
    assert!(matches!(forms.submit(&key).await, Err(FormError::Invalid(_))));
    assert_eq!(forms.status(&key), Some(FormStatus::Ready));
}

#[tokio::test]
async fn backend_validation_errors_are_partitioned() {
    let mut mock = MockBackend::new();
    serving_metadata(&mut mock);
    mock.expect_submit_graph_patch().returning(|_, _| {
        Err(BackendError::Validation(vec![
            ValidationError::new(COLLECTION_1, STATUS, "not an allowed value"),
            ValidationError::new(USER_1, rdfs::LABEL, "label is required"),
        ]))
    });
    let (forms, key) = ready_form(mock).await;

    forms.add_value(&key, &iri(KEYWORD), ValueEntry::literal("gamma")).unwrap();
    let error = forms.submit(&key).await.unwrap_err();
    assert!(matches!(error, FormError::Backend(BackendError::Validation(_))));

    assert_eq!(
        forms.other_entity_errors(&key).unwrap(),
        vec![ValidationError::new(USER_1, rdfs::LABEL, "label is required")]
    );
    let status = forms
        .effective_properties(&key)
        .unwrap()
        .into_iter()
        .find(|p| p.key == STATUS)
        .unwrap();
    assert_eq!(status.errors, vec!["not an allowed value".to_string()]);
    assert!(forms.has_form_updates(&key));
}
