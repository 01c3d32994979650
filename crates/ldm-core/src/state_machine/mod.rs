//! Form lifecycle
//!
//! One [`FormStateMachine`] per form key coordinates fetching, the pending
//! edit overlay, validation and submission for a single subject:
//!
//! ```text
//! Idle -> Loading -> Ready -> Submitting -> Loading -> Ready
//!            |                    |
//!            +------> Error <-----+
//! ```
//!
//! The machine itself performs no I/O. Callers obtain a [`LoadTicket`] from
//! [`FormStateMachine::begin_load`], fetch, and hand the results back; a
//! completion carrying an outdated ticket is discarded.

use crate::error::{BackendError, FormError, Result};
use crate::types::{EditContext, FormConfig, FormKey, FormStatus};
use ldm_graph::{Graph, Iri, ValueEntry};
use ldm_property::{
    attach_errors, convert, partition_errors, to_graph, validate_messages, visible_properties,
    EditingRules, GraphPatch, PartitionedErrors, PendingEdits, PropertyDescriptor, PropertyError,
    PropertyPatch, ValidationError,
};
use ldm_vocabulary::VocabularyIndex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validates a status transition against the transition table.
///
/// # Errors
///
/// [`FormError::IllegalTransition`] when `to` is not reachable from `from`.
pub fn validate_transition(from: FormStatus, to: FormStatus) -> Result<()> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(FormError::IllegalTransition { from, to })
    }
}

/// Statuses reachable from `from`
#[must_use]
pub fn allowed_transitions(from: FormStatus) -> Vec<FormStatus> {
    use FormStatus::*;
    match from {
        Idle => vec![Loading],
        Loading => vec![Loading, Ready, Error],
        Ready => vec![Loading, Submitting],
        Submitting => vec![Loading, Ready, Error],
        Error => vec![Loading, Submitting],
    }
}

fn allowed(from: FormStatus, to: FormStatus) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

/// Identifies one load of one form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// Form being loaded
    pub form_key: FormKey,
    /// Subject the load fetches
    pub subject: Iri,
    /// Load counter of that form key
    pub generation: u64,
}

/// An edit issued while the form was loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Append a value
    Add {
        /// Property key
        key: Iri,
        /// New value
        entry: ValueEntry,
    },
    /// Replace the value at `index`
    Update {
        /// Property key
        key: Iri,
        /// Position in the effective list
        index: usize,
        /// New value
        entry: ValueEntry,
    },
    /// Remove the value at `index`
    Delete {
        /// Property key
        key: Iri,
        /// Position in the effective list
        index: usize,
    },
}

impl EditCommand {
    /// Property the command edits
    #[must_use]
    pub fn key(&self) -> &Iri {
        match self {
            Self::Add { key, .. } | Self::Update { key, .. } | Self::Delete { key, .. } => key,
        }
    }

    fn apply(self, edits: &mut PendingEdits, base: &[PropertyDescriptor]) -> std::result::Result<(), PropertyError> {
        match self {
            Self::Add { key, entry } => edits.add_value(base, &key, entry),
            Self::Update { key, index, entry } => edits.update_value(base, &key, index, entry),
            Self::Delete { key, index } => edits.delete_value(base, &key, index).map(drop),
        }
    }
}

/// Lifecycle and edit state of one form
#[derive(Debug)]
pub struct FormStateMachine {
    key: FormKey,
    subject: Iri,
    context: EditContext,
    config: FormConfig,
    /// Types of a subject that does not exist yet
    new_types: Vec<Iri>,
    is_new: bool,
    status: FormStatus,
    generation: u64,
    loaded: bool,
    vocabulary: Arc<VocabularyIndex>,
    types: Vec<Iri>,
    base: Vec<PropertyDescriptor>,
    rules: Option<EditingRules>,
    edits: PendingEdits,
    queued: Vec<EditCommand>,
    errors: PartitionedErrors,
    last_error: Option<String>,
}

impl FormStateMachine {
    /// Form for an existing subject
    #[must_use]
    pub fn new(key: FormKey, subject: Iri, context: EditContext, config: FormConfig) -> Self {
        Self {
            key,
            subject,
            context,
            config,
            new_types: Vec::new(),
            is_new: false,
            status: FormStatus::Idle,
            generation: 0,
            loaded: false,
            vocabulary: Arc::default(),
            types: Vec::new(),
            base: Vec::new(),
            rules: None,
            edits: PendingEdits::new(),
            queued: Vec::new(),
            errors: PartitionedErrors::default(),
            last_error: None,
        }
    }

    /// Form for a subject to be created with the given types
    ///
    /// Until the subject exists the form offers every property its types
    /// declare, empty, and submits the types along with the edits.
    #[must_use]
    pub fn for_new_subject(
        key: FormKey,
        subject: Iri,
        context: EditContext,
        config: FormConfig,
        classes: Vec<Iri>,
    ) -> Self {
        Self {
            new_types: classes,
            ..Self::new(key, subject, context, config)
        }
    }

    /// Form key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &FormKey {
        &self.key
    }

    /// Edited subject
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// Editing context
    #[inline]
    #[must_use]
    pub fn context(&self) -> EditContext {
        self.context
    }

    /// Current status
    #[inline]
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Check whether a load has completed at least once
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Vocabulary of the last completed load
    #[must_use]
    pub fn vocabulary(&self) -> &Arc<VocabularyIndex> {
        &self.vocabulary
    }

    /// Types of the subject
    #[must_use]
    pub fn types(&self) -> &[Iri] {
        &self.types
    }

    /// Descriptors as fetched, without edits
    #[must_use]
    pub fn base_properties(&self) -> &[PropertyDescriptor] {
        &self.base
    }

    /// Buffered edits
    #[must_use]
    pub fn pending_edits(&self) -> &PendingEdits {
        &self.edits
    }

    /// Check for unsaved changes, queued edits included
    #[must_use]
    pub fn has_updates(&self) -> bool {
        self.edits.has_updates() || !self.queued.is_empty()
    }

    /// Edits waiting for the running load
    #[must_use]
    pub fn queued_edits(&self) -> &[EditCommand] {
        &self.queued
    }

    /// Backend errors about the edited subject
    #[must_use]
    pub fn entity_errors(&self) -> &[ValidationError] {
        &self.errors.entity_errors
    }

    /// Backend errors about other entities affected by the last submission
    #[must_use]
    pub fn other_entity_errors(&self) -> &[ValidationError] {
        &self.errors.other_errors
    }

    /// Cause of the last failed fetch or submission
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a load
    ///
    /// # Errors
    ///
    /// [`FormError::SubmitInFlight`] while a submission runs.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        if self.status == FormStatus::Submitting {
            return Err(FormError::SubmitInFlight(self.key.clone()));
        }
        self.start_load()
    }

    fn start_load(&mut self) -> Result<LoadTicket> {
        self.transition(FormStatus::Loading)?;
        self.generation += 1;
        info!(form_key = %self.key, subject = %self.subject, generation = self.generation, "loading form");
        Ok(self.ticket())
    }

    fn ticket(&self) -> LoadTicket {
        LoadTicket {
            form_key: self.key.clone(),
            subject: self.subject.clone(),
            generation: self.generation,
        }
    }

    /// Check whether `ticket` belongs to the running load
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.status == FormStatus::Loading
            && ticket.form_key == self.key
            && ticket.subject == self.subject
            && ticket.generation == self.generation
    }

    /// Install `next` in place of this form
    ///
    /// The load counter carries over, so loads started before the
    /// replacement stay stale for `next`.
    pub fn replace(&mut self, next: Self) {
        let generation = self.generation;
        *self = Self { generation, ..next };
    }

    /// Finish a load with the fetched subject graph and vocabulary
    ///
    /// Returns `false` when the ticket is stale and the results were ignored.
    /// Edits queued during the load are replayed against the new base.
    ///
    /// # Errors
    ///
    /// [`FormError::IllegalTransition`] if the machine is in an unexpected state.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        graph: &Graph,
        vocabulary: Arc<VocabularyIndex>,
    ) -> Result<bool> {
        if !self.is_current(ticket) {
            warn!(form_key = %self.key, generation = ticket.generation, "discarding stale load");
            return Ok(false);
        }

        self.is_new = !graph.has_subject(&self.subject) && !self.new_types.is_empty();
        let mut base = if self.is_new {
            self.types.clone_from(&self.new_types);
            convert::empty_properties(&vocabulary, &self.new_types)
        } else {
            self.types = graph.types_of(&self.subject);
            convert::from_graph(graph, &self.subject, &vocabulary)
        };

        let rules = EditingRules::for_subject(self.context, self.config.can_edit, graph, &self.subject);
        rules.apply(&mut base);
        if self.config.type_machine_only {
            for property in base.iter_mut().filter(|p| p.is_type()) {
                property.machine_only = true;
                property.is_editable = false;
            }
        }

        self.base = base;
        self.rules = Some(rules);
        self.vocabulary = vocabulary;
        self.loaded = true;
        self.transition(FormStatus::Ready)?;
        debug!(form_key = %self.key, properties = self.base.len(), "form loaded");
        self.replay_queued();
        Ok(true)
    }

    /// Finish a load that failed
    ///
    /// Returns `false` when the ticket is stale. The cause is kept and the
    /// form moves to [`FormStatus::Error`].
    ///
    /// # Errors
    ///
    /// [`FormError::IllegalTransition`] if the machine is in an unexpected state.
    pub fn fail_load(&mut self, ticket: &LoadTicket, error: &BackendError) -> Result<bool> {
        if !self.is_current(ticket) {
            warn!(form_key = %self.key, generation = ticket.generation, "discarding stale load failure");
            return Ok(false);
        }
        warn!(form_key = %self.key, subject = %self.subject, %error, "loading form failed");
        self.last_error = Some(error.to_string());
        self.transition(FormStatus::Error)?;
        self.replay_queued();
        Ok(true)
    }

    fn replay_queued(&mut self) {
        for command in std::mem::take(&mut self.queued) {
            if !self.loaded {
                warn!(form_key = %self.key, property = %command.key(), "dropping queued edit, nothing loaded");
                continue;
            }
            let key = command.key().clone();
            if let Err(error) = self.apply(command) {
                warn!(form_key = %self.key, property = %key, %error, "dropping queued edit");
            }
        }
    }

    /// Append a value to `key`
    ///
    /// # Errors
    ///
    /// See [`FormStateMachine::edit`].
    pub fn add_value(&mut self, key: &Iri, entry: ValueEntry) -> Result<()> {
        self.edit(EditCommand::Add {
            key: key.clone(),
            entry,
        })
    }

    /// Replace the value of `key` at `index`
    ///
    /// # Errors
    ///
    /// See [`FormStateMachine::edit`].
    pub fn update_value(&mut self, key: &Iri, index: usize, entry: ValueEntry) -> Result<()> {
        self.edit(EditCommand::Update {
            key: key.clone(),
            index,
            entry,
        })
    }

    /// Remove the value of `key` at `index`
    ///
    /// # Errors
    ///
    /// See [`FormStateMachine::edit`].
    pub fn delete_value(&mut self, key: &Iri, index: usize) -> Result<()> {
        self.edit(EditCommand::Delete { key: key.clone(), index })
    }

    /// Apply an edit, or queue it while loading
    ///
    /// # Errors
    ///
    /// [`FormError::NotReady`] before the first load,
    /// [`FormError::SubmitInFlight`] while submitting, and the edit rule
    /// errors ([`FormError::IndexOutOfRange`], [`FormError::NotEditable`],
    /// [`FormError::ProtectedValue`]).
    pub fn edit(&mut self, command: EditCommand) -> Result<()> {
        match self.status {
            FormStatus::Loading => {
                debug!(form_key = %self.key, property = %command.key(), "queueing edit until loaded");
                self.queued.push(command);
                Ok(())
            }
            FormStatus::Submitting => Err(FormError::SubmitInFlight(self.key.clone())),
            FormStatus::Ready | FormStatus::Error if self.loaded => self.apply(command).map_err(FormError::from),
            _ => Err(FormError::NotReady(self.key.clone())),
        }
    }

    fn apply(&mut self, command: EditCommand) -> std::result::Result<(), PropertyError> {
        if let Some(rules) = &self.rules {
            rules.check_known(&self.base, command.key())?;
        }
        command.apply(&mut self.edits, &self.base)
    }

    /// Descriptors as a form shows them
    ///
    /// Fetched values are overlaid with pending edits. Backend errors are
    /// attached to unedited properties and local shape violations to edited
    /// ones. Hidden and empty machine-only properties are left out.
    #[must_use]
    pub fn effective_properties(&self) -> Vec<PropertyDescriptor> {
        let updates = self.edits.updates();
        let mut properties = self.edits.merge(&self.base);

        let backend_errors: Vec<ValidationError> = self
            .errors
            .entity_errors
            .iter()
            .filter(|e| !updates.contains_key(&e.predicate))
            .cloned()
            .collect();
        attach_errors(&mut properties, &backend_errors);

        for property in properties.iter_mut().filter(|p| updates.contains_key(&p.key)) {
            for message in validate_messages(property, &property.values) {
                if !property.errors.contains(&message) {
                    property.errors.push(message);
                }
            }
        }

        visible_properties(properties, &self.config.hidden_properties)
    }

    /// Shape violations of the effective values of `key`
    #[must_use]
    pub fn validate_property(&self, key: &Iri) -> Vec<String> {
        let values = self.edits.effective_values(&self.base, key);
        self.base
            .iter()
            .find(|p| &p.key == key)
            .map(|property| validate_messages(property, &values))
            .unwrap_or_default()
    }

    /// Shape violations of every edited property
    #[must_use]
    pub fn validate_edits(&self) -> Vec<ValidationError> {
        self.edits
            .updates()
            .keys()
            .flat_map(|key| {
                self.validate_property(key)
                    .into_iter()
                    .map(move |message| ValidationError::new(self.subject.clone(), key.clone(), message))
            })
            .collect()
    }

    /// Patch for the pending edits
    #[must_use]
    pub fn patch(&self) -> GraphPatch {
        let mut patch = GraphPatch::new();
        if self.is_new {
            if let Some(types) = self.base.iter().find(|p| p.is_type() && !self.edits.updates().contains_key(&p.key)) {
                patch.push(PropertyPatch::from_descriptor(&self.subject, types, &types.values));
            }
        }
        for (key, values) in self.edits.updates() {
            let property_patch = match self.base.iter().find(|p| &p.key == key) {
                Some(property) => PropertyPatch::from_descriptor(&self.subject, property, values),
                None => to_graph(&self.subject, key, values, &self.vocabulary, &self.types),
            };
            patch.push(property_patch);
        }
        patch
    }

    /// Start a submission, returning what to send
    ///
    /// # Errors
    ///
    /// [`FormError::SubmitInFlight`] while another submission runs,
    /// [`FormError::NotReady`] before the form has loaded and
    /// [`FormError::Invalid`] when local validation fails; the status is
    /// left unchanged in all three cases.
    pub fn begin_submit(&mut self) -> Result<GraphPatch> {
        match self.status {
            FormStatus::Submitting => return Err(FormError::SubmitInFlight(self.key.clone())),
            FormStatus::Ready | FormStatus::Error if self.loaded => {}
            _ => return Err(FormError::NotReady(self.key.clone())),
        }

        if self.config.validate_before_submit {
            let errors = self.validate_edits();
            if !errors.is_empty() {
                debug!(form_key = %self.key, errors = errors.len(), "local validation failed");
                return Err(FormError::Invalid(errors));
            }
        }

        let patch = self.patch();
        self.transition(FormStatus::Submitting)?;
        info!(form_key = %self.key, subject = %self.subject, patches = patch.patches().len(), "submitting form");
        Ok(patch)
    }

    /// Record a successful submission and start the refetch
    ///
    /// # Errors
    ///
    /// [`FormError::IllegalTransition`] unless a submission was running.
    pub fn submit_succeeded(&mut self) -> Result<LoadTicket> {
        if self.status != FormStatus::Submitting {
            return Err(FormError::IllegalTransition {
                from: self.status,
                to: FormStatus::Loading,
            });
        }
        info!(form_key = %self.key, subject = %self.subject, "submission succeeded");
        self.edits.clear();
        self.errors = PartitionedErrors::default();
        self.last_error = None;
        self.start_load()
    }

    /// Record a failed submission
    ///
    /// Pending edits are kept. Validation errors from the backend are split
    /// into errors about this subject and errors about other entities.
    ///
    /// # Errors
    ///
    /// [`FormError::IllegalTransition`] unless a submission was running.
    pub fn submit_failed(&mut self, error: &BackendError) -> Result<()> {
        if self.status != FormStatus::Submitting {
            return Err(FormError::IllegalTransition {
                from: self.status,
                to: FormStatus::Error,
            });
        }
        warn!(form_key = %self.key, subject = %self.subject, %error, "submission failed");
        self.errors = partition_errors(error.validation_errors(), &self.subject);
        self.last_error = Some(error.to_string());
        self.transition(FormStatus::Error)
    }

    fn transition(&mut self, to: FormStatus) -> Result<()> {
        validate_transition(self.status, to)?;
        debug!(form_key = %self.key, from = %self.status, to = %to, "form transition");
        self.status = to;
        Ok(())
    }
}
