//! Pending edit overlay
//!
//! Provides [`merge`], which layers buffered value lists over fetched
//! descriptors, and [`PendingEdits`], the buffer itself. Every mutator reads
//! the current effective list (base overridden by an earlier edit) and writes
//! the complete resulting list back. Writes equal to the fetched values
//! remove the key, so "has unsaved changes" is a non-emptiness check.

use crate::descriptor::PropertyDescriptor;
use crate::editing::{check_editable, check_removable};
use crate::error::PropertyError;
use indexmap::IndexMap;
use ldm_graph::{Iri, ValueEntry};
use serde::{Deserialize, Serialize};

/// Buffered value lists by property key
pub type Updates = IndexMap<Iri, Vec<ValueEntry>>;

/// Effective descriptors: base values replaced by buffered ones
///
/// Base order is kept so fields do not move while being edited. Updates for
/// keys missing from `base` are appended as unconstrained descriptors.
/// Errors are cleared on replaced descriptors only.
#[must_use]
pub fn merge(base: &[PropertyDescriptor], updates: &Updates) -> Vec<PropertyDescriptor> {
    let mut merged: Vec<PropertyDescriptor> = base
        .iter()
        .map(|property| match updates.get(&property.key) {
            Some(values) => {
                let mut property = property.clone();
                property.values.clone_from(values);
                property.errors.clear();
                property
            }
            None => property.clone(),
        })
        .collect();

    for (key, values) in updates {
        if !base.iter().any(|p| &p.key == key) {
            merged.push(PropertyDescriptor::new(key.clone(), key.local_name()).with_values(values.clone()));
        }
    }
    merged
}

/// Uncommitted value replacements of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdits {
    updates: Updates,
}

impl PendingEdits {
    /// Empty buffer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered lists
    #[inline]
    #[must_use]
    pub fn updates(&self) -> &Updates {
        &self.updates
    }

    /// Check for unsaved changes
    #[inline]
    #[must_use]
    pub fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }

    /// Buffered list for `key`
    #[must_use]
    pub fn get(&self, key: &Iri) -> Option<&[ValueEntry]> {
        self.updates.get(key).map(Vec::as_slice)
    }

    /// Drop every buffered list
    pub fn clear(&mut self) {
        self.updates.clear();
    }

    /// Key/value lists to submit, in edit order
    #[must_use]
    pub fn diff(&self) -> Vec<(Iri, Vec<ValueEntry>)> {
        self.updates
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Effective descriptors for `base`
    #[must_use]
    pub fn merge(&self, base: &[PropertyDescriptor]) -> Vec<PropertyDescriptor> {
        merge(base, &self.updates)
    }

    /// Current effective values of `key`
    #[must_use]
    pub fn effective_values(&self, base: &[PropertyDescriptor], key: &Iri) -> Vec<ValueEntry> {
        match self.updates.get(key) {
            Some(values) => values.clone(),
            None => base_values(base, key).to_vec(),
        }
    }

    /// Append `entry` to the values of `key`
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotEditable`] for read-only descriptors.
    pub fn add_value(
        &mut self,
        base: &[PropertyDescriptor],
        key: &Iri,
        entry: ValueEntry,
    ) -> Result<(), PropertyError> {
        if let Some(property) = find(base, key) {
            check_editable(property)?;
        }
        let mut values = self.effective_values(base, key);
        values.push(entry);
        self.write(base, key, values);
        Ok(())
    }

    /// Replace the value of `key` at `index`
    ///
    /// # Errors
    ///
    /// [`PropertyError::IndexOutOfRange`] for a bad index,
    /// [`PropertyError::NotEditable`] or [`PropertyError::ProtectedValue`]
    /// when the edit is not allowed.
    pub fn update_value(
        &mut self,
        base: &[PropertyDescriptor],
        key: &Iri,
        index: usize,
        entry: ValueEntry,
    ) -> Result<(), PropertyError> {
        let mut values = self.effective_values(base, key);
        let current = values.get(index).ok_or_else(|| PropertyError::IndexOutOfRange {
            key: key.clone(),
            index,
            len: values.len(),
        })?;
        if let Some(property) = find(base, key) {
            check_editable(property)?;
            if !current.same_value(&entry) {
                check_removable(property, current)?;
            }
        }
        values[index] = entry;
        self.write(base, key, values);
        Ok(())
    }

    /// Remove the value of `key` at `index`, returning it
    ///
    /// # Errors
    ///
    /// [`PropertyError::IndexOutOfRange`] for a bad index,
    /// [`PropertyError::NotEditable`] or [`PropertyError::ProtectedValue`]
    /// when the edit is not allowed.
    pub fn delete_value(
        &mut self,
        base: &[PropertyDescriptor],
        key: &Iri,
        index: usize,
    ) -> Result<ValueEntry, PropertyError> {
        let mut values = self.effective_values(base, key);
        let current = values.get(index).ok_or_else(|| PropertyError::IndexOutOfRange {
            key: key.clone(),
            index,
            len: values.len(),
        })?;
        if let Some(property) = find(base, key) {
            check_editable(property)?;
            check_removable(property, current)?;
        }
        let removed = values.remove(index);
        self.write(base, key, values);
        Ok(removed)
    }

    /// Store `values` for `key`, pruning no-op edits
    fn write(&mut self, base: &[PropertyDescriptor], key: &Iri, values: Vec<ValueEntry>) {
        if ValueEntry::same_values(&values, base_values(base, key)) {
            self.updates.shift_remove(key);
        } else {
            self.updates.insert(key.clone(), values);
        }
    }
}

fn find<'a>(base: &'a [PropertyDescriptor], key: &Iri) -> Option<&'a PropertyDescriptor> {
    base.iter().find(|p| &p.key == key)
}

fn base_values<'a>(base: &'a [PropertyDescriptor], key: &Iri) -> &'a [ValueEntry] {
    find(base, key)
        .map(|p| p.values.as_slice())
        .unwrap_or_default()
}
