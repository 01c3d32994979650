//! Editing rules
//!
//! Decides which descriptors accept edits. Metadata forms follow the edit
//! right and the machine-only flag. Vocabulary forms additionally honour
//! `fs:fixedShape` on the edited node shape: only its `sh:property` list stays
//! editable, and the property shapes listed as `fs:systemProperties` cannot
//! be removed from it.

use crate::descriptor::PropertyDescriptor;
use crate::error::PropertyError;
use ldm_graph::vocab::{fs, sh};
use ldm_graph::{Graph, Iri, ValueEntry};
use serde::{Deserialize, Serialize};

/// Which graph a form edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditContext {
    /// Instance metadata, constrained by the vocabulary
    #[default]
    Metadata,
    /// The vocabulary itself, constrained by the meta-vocabulary
    Vocabulary,
}

impl std::fmt::Display for EditContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metadata => f.write_str("metadata"),
            Self::Vocabulary => f.write_str("vocabulary"),
        }
    }
}

/// Edit permissions for one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingRules {
    context: EditContext,
    can_edit: bool,
    is_fixed: bool,
    system_properties: Vec<Iri>,
}

impl EditingRules {
    /// Rules for `subject` as stored in `graph`
    ///
    /// In the vocabulary context the fixed-shape flags are read from the
    /// subject's own statements.
    #[must_use]
    pub fn for_subject(context: EditContext, can_edit: bool, graph: &Graph, subject: &Iri) -> Self {
        let (is_fixed, system_properties) = match context {
            EditContext::Metadata => (false, Vec::new()),
            EditContext::Vocabulary => (
                graph.flag(subject, fs::FIXED_SHAPE),
                graph.iris(subject, fs::SYSTEM_PROPERTIES),
            ),
        };
        Self {
            context,
            can_edit,
            is_fixed,
            system_properties,
        }
    }

    /// Editing context
    #[inline]
    #[must_use]
    pub fn context(&self) -> EditContext {
        self.context
    }

    /// Check whether the edited subject is a fixed shape
    #[inline]
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    /// Check whether predicates without a descriptor may be added
    ///
    /// Read-only subjects and fixed shapes accept no new properties.
    #[inline]
    #[must_use]
    pub fn allows_new_properties(&self) -> bool {
        self.can_edit && !self.is_fixed
    }

    /// Reject an edit of `key` when it has no descriptor and new properties
    /// are not allowed
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotEditable`] for such keys.
    pub fn check_known(&self, properties: &[PropertyDescriptor], key: &Iri) -> Result<(), PropertyError> {
        if self.allows_new_properties() || properties.iter().any(|p| &p.key == key) {
            Ok(())
        } else {
            Err(PropertyError::NotEditable(key.clone()))
        }
    }

    /// Set `is_editable` (and protected values) on every descriptor
    pub fn apply(&self, properties: &mut [PropertyDescriptor]) {
        for property in properties {
            if self.is_fixed && property.key == sh::PROPERTY {
                property.is_editable = self.can_edit;
                property.system_properties.clone_from(&self.system_properties);
            } else {
                property.is_editable = self.can_edit && !self.is_fixed && !property.machine_only;
            }
        }
    }
}

/// Reject mutations of a non-editable descriptor
///
/// # Errors
///
/// [`PropertyError::NotEditable`] when the descriptor is read-only.
pub fn check_editable(property: &PropertyDescriptor) -> Result<(), PropertyError> {
    if property.is_editable {
        Ok(())
    } else {
        Err(PropertyError::NotEditable(property.key.clone()))
    }
}

/// Reject removal or replacement of a protected value
///
/// # Errors
///
/// [`PropertyError::ProtectedValue`] when `entry` references a system property.
pub fn check_removable(property: &PropertyDescriptor, entry: &ValueEntry) -> Result<(), PropertyError> {
    match entry.id() {
        Some(id) if property.system_properties.contains(id) => Err(PropertyError::ProtectedValue {
            key: property.key.clone(),
            value: id.clone(),
        }),
        _ => Ok(()),
    }
}
