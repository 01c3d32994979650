//! Forms facade
//!
//! [`LinkedDataForms`] owns one [`FormStateMachine`] per form key and
//! drives it against a [`LinkedDataBackend`]:
//! - loads fetch the subject and its vocabulary concurrently
//! - vocabularies are indexed once per editing context and shared
//! - submissions are single flight per form key
//!
//! Form entries are never borrowed across an `.await`; every step takes the
//! entry, updates the machine and releases it before the next request.

use crate::backend::LinkedDataBackend;
use crate::error::{BackendError, FormError, Result};
use crate::state_machine::{FormStateMachine, LoadTicket};
use crate::types::{EditContext, FormConfig, FormKey, FormStatus};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ldm_graph::{Iri, ValueEntry};
use ldm_property::{PropertyDescriptor, ValidationError};
use ldm_vocabulary::{Namespace, VocabularyIndex};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Editable forms over a linked-data backend
#[derive(Debug)]
pub struct LinkedDataForms<B> {
    backend: Arc<B>,
    config: FormConfig,
    forms: DashMap<FormKey, FormStateMachine>,
    vocabularies: DashMap<EditContext, Arc<VocabularyIndex>>,
}

impl<B: LinkedDataBackend> LinkedDataForms<B> {
    /// Create a facade with the given settings
    #[must_use]
    pub fn new(backend: Arc<B>, config: FormConfig) -> Self {
        Self {
            backend,
            config,
            forms: DashMap::new(),
            vocabularies: DashMap::new(),
        }
    }

    /// Backend in use
    #[must_use]
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Settings applied to new forms
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Open (or reopen) the form `key` on `subject` and load it
    ///
    /// A form already registered under `key` is replaced and its unsaved
    /// edits are dropped. Use [`LinkedDataForms::reload`] to refetch while
    /// keeping edits.
    ///
    /// # Errors
    ///
    /// [`FormError::SubmitInFlight`] while the form submits, or the backend
    /// failure that made the load fail.
    pub async fn initialize_form(&self, key: FormKey, subject: Iri, context: EditContext) -> Result<()> {
        let form = FormStateMachine::new(key.clone(), subject, context, self.config.clone());
        self.open(key, form).await
    }

    /// Open the form `key` for a subject to be created with `classes`
    ///
    /// # Errors
    ///
    /// As for [`LinkedDataForms::initialize_form`].
    pub async fn initialize_new_form(
        &self,
        key: FormKey,
        subject: Iri,
        context: EditContext,
        classes: Vec<Iri>,
    ) -> Result<()> {
        let form = FormStateMachine::for_new_subject(key.clone(), subject, context, self.config.clone(), classes);
        self.open(key, form).await
    }

    /// Open the form `key` for a new subject minted below `base`
    ///
    /// Returns the minted IRI. `base` should end with a separator.
    ///
    /// # Errors
    ///
    /// As for [`LinkedDataForms::initialize_form`].
    pub async fn create_form(
        &self,
        key: FormKey,
        base: &str,
        context: EditContext,
        classes: Vec<Iri>,
    ) -> Result<Iri> {
        let subject = Iri::mint(base);
        debug!(form_key = %key, subject = %subject, "minted subject");
        self.initialize_new_form(key, subject.clone(), context, classes).await?;
        Ok(subject)
    }

    async fn open(&self, key: FormKey, fresh: FormStateMachine) -> Result<()> {
        let subject = fresh.subject().clone();
        let context = fresh.context();
        let ticket = match self.forms.entry(key) {
            Entry::Occupied(mut entry) => {
                let form = entry.get_mut();
                if form.status() == FormStatus::Submitting {
                    return Err(FormError::SubmitInFlight(form.key().clone()));
                }
                form.replace(fresh);
                form.begin_load()?
            }
            Entry::Vacant(entry) => entry.insert(fresh).begin_load()?,
        };
        self.load(ticket, &subject, context).await
    }

    /// Refetch the form `key`, keeping its edits
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`], [`FormError::SubmitInFlight`] or the
    /// backend failure that made the load fail.
    pub async fn reload(&self, key: &FormKey) -> Result<()> {
        let (ticket, subject, context) =
            self.with_form_mut(key, |form| Ok((form.begin_load()?, form.subject().clone(), form.context())))?;
        self.load(ticket, &subject, context).await
    }

    async fn load(&self, ticket: LoadTicket, subject: &Iri, context: EditContext) -> Result<()> {
        let (graph, vocabulary) = futures::join!(
            self.with_timeout(self.backend.fetch_graph(context, subject)),
            self.vocabulary(context),
        );
        let fetched = graph.and_then(|graph| vocabulary.map(|vocabulary| (graph, vocabulary)));

        let Some(mut form) = self.forms.get_mut(&ticket.form_key) else {
            debug!(form_key = %ticket.form_key, "form disposed while loading");
            return Ok(());
        };
        match fetched {
            Ok((graph, vocabulary)) => form.complete_load(&ticket, &graph, vocabulary).map(drop),
            Err(error) => {
                if form.fail_load(&ticket, &error)? {
                    Err(error.into())
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn vocabulary(&self, context: EditContext) -> std::result::Result<Arc<VocabularyIndex>, BackendError> {
        let cached = self.vocabularies.get(&context).map(|v| Arc::clone(&v));
        if let Some(vocabulary) = cached {
            debug!(%context, "vocabulary cache hit");
            return Ok(vocabulary);
        }
        let graph = self.with_timeout(self.backend.fetch_vocabulary(context)).await?;
        let vocabulary = Arc::new(VocabularyIndex::from_graph(graph).with_resolution(self.config.resolution));
        debug!(%context, statements = vocabulary.graph().len(), "indexed vocabulary");
        self.vocabularies.insert(context, Arc::clone(&vocabulary));
        Ok(vocabulary)
    }

    async fn with_timeout<T>(
        &self,
        request: impl Future<Output = std::result::Result<T, BackendError>>,
    ) -> std::result::Result<T, BackendError> {
        match self.config.request_timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), request)
                .await
                .map_err(|_| BackendError::Timeout { duration_secs: secs })?,
            None => request.await,
        }
    }

    /// Drop the cached vocabulary of `context`
    pub fn invalidate_vocabulary(&self, context: EditContext) {
        if self.vocabularies.remove(&context).is_some() {
            debug!(%context, "vocabulary invalidated");
        }
    }

    /// Forget the form `key`, returning whether it existed
    pub fn dispose_form(&self, key: &FormKey) -> bool {
        self.forms.remove(key).is_some()
    }

    /// Status of the form `key`
    #[must_use]
    pub fn status(&self, key: &FormKey) -> Option<FormStatus> {
        self.forms.get(key).map(|form| form.status())
    }

    /// Check whether the form `key` has unsaved changes
    #[must_use]
    pub fn has_form_updates(&self, key: &FormKey) -> bool {
        self.forms.get(key).is_some_and(|form| form.has_updates())
    }

    /// Merged, ordered and validated descriptors of the form `key`
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`].
    pub fn effective_properties(&self, key: &FormKey) -> Result<Vec<PropertyDescriptor>> {
        self.with_form(key, FormStateMachine::effective_properties)
    }

    /// Append a value
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`] or an edit rule error.
    pub fn add_value(&self, key: &FormKey, property: &Iri, entry: ValueEntry) -> Result<()> {
        self.with_form_mut(key, |form| form.add_value(property, entry))
    }

    /// Replace the value at `index`
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`] or an edit rule error.
    pub fn update_value(&self, key: &FormKey, property: &Iri, index: usize, entry: ValueEntry) -> Result<()> {
        self.with_form_mut(key, |form| form.update_value(property, index, entry))
    }

    /// Remove the value at `index`
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`] or an edit rule error.
    pub fn delete_value(&self, key: &FormKey, property: &Iri, index: usize) -> Result<()> {
        self.with_form_mut(key, |form| form.delete_value(property, index))
    }

    /// Shape violations of the current values of `property`
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`].
    pub fn validate_property(&self, key: &FormKey, property: &Iri) -> Result<Vec<String>> {
        self.with_form(key, |form| form.validate_property(property))
    }

    /// Backend errors about entities other than the subject of form `key`
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`].
    pub fn other_entity_errors(&self, key: &FormKey) -> Result<Vec<ValidationError>> {
        self.with_form(key, |form| form.other_entity_errors().to_vec())
    }

    /// Submit the pending edits of form `key` and refetch it
    ///
    /// On failure the edits are kept and the form moves to
    /// [`FormStatus::Error`]. A successful vocabulary submission also drops
    /// the cached metadata vocabulary.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownFormKey`], [`FormError::SubmitInFlight`],
    /// [`FormError::NotReady`], [`FormError::Invalid`] from local validation,
    /// or the backend failure.
    pub async fn submit(&self, key: &FormKey) -> Result<()> {
        let (patch, subject, context) =
            self.with_form_mut(key, |form| Ok((form.begin_submit()?, form.subject().clone(), form.context())))?;

        let outcome = self
            .with_timeout(self.backend.submit_graph_patch(context, patch.statements()))
            .await;

        if let Err(error) = outcome {
            self.with_form_mut(key, |form| form.submit_failed(&error))?;
            return Err(error.into());
        }

        info!(form_key = %key, subject = %subject, %context, "submitted form");
        if context == EditContext::Vocabulary {
            self.invalidate_vocabulary(EditContext::Metadata);
        }
        let ticket = match self.forms.get_mut(key) {
            Some(mut form) => form.submit_succeeded()?,
            None => return Ok(()),
        };
        self.load(ticket, &subject, context).await
    }

    /// Delete `subject` and dispose every form editing it
    ///
    /// # Errors
    ///
    /// The backend failure.
    pub async fn delete_subject(&self, context: EditContext, subject: &Iri) -> Result<()> {
        self.with_timeout(self.backend.delete_subject(context, subject)).await?;
        info!(subject = %subject, %context, "deleted subject");
        self.forms
            .retain(|_, form| !(form.subject() == subject && form.context() == context));
        if context == EditContext::Vocabulary {
            self.invalidate_vocabulary(EditContext::Metadata);
        }
        Ok(())
    }

    /// Namespaces declared by the metadata vocabulary
    ///
    /// # Errors
    ///
    /// The backend failure when the vocabulary is not cached yet.
    pub async fn namespaces(&self) -> Result<Vec<Namespace>> {
        Ok(self.vocabulary(EditContext::Metadata).await?.namespaces().to_vec())
    }

    fn with_form<T>(&self, key: &FormKey, f: impl FnOnce(&FormStateMachine) -> T) -> Result<T> {
        let form = self
            .forms
            .get(key)
            .ok_or_else(|| FormError::UnknownFormKey(key.clone()))?;
        Ok(f(&*form))
    }

    fn with_form_mut<T>(&self, key: &FormKey, f: impl FnOnce(&mut FormStateMachine) -> Result<T>) -> Result<T> {
        let mut form = self
            .forms
            .get_mut(key)
            .ok_or_else(|| FormError::UnknownFormKey(key.clone()))?;
        f(&mut *form)
    }
}
