//! Property to graph conversion
//!
//! Turns edited values back into statements for submission. Each edited
//! predicate becomes one [`PropertyPatch`]; an empty patch still travels to
//! the backend as a single `(subject, predicate, fs:nil)` deletion marker so
//! the removal is applied instead of read as "no change".

use crate::descriptor::PropertyDescriptor;
use ldm_graph::vocab::{fs, xsd};
use ldm_graph::{Graph, Iri, Statement, Value, ValueEntry};
use ldm_vocabulary::VocabularyIndex;
use serde::{Deserialize, Serialize};

/// New values of one predicate of one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPatch {
    /// Edited subject
    pub subject: Iri,
    /// Edited predicate
    pub predicate: Iri,
    /// Complete new value set, empty when every value was removed
    pub values: Vec<Value>,
}

impl PropertyPatch {
    /// Build a patch from edited entries
    ///
    /// Empty entries are dropped and reference labels discarded. Literals
    /// without datatype take `datatype` unless it is `xsd:string`. With
    /// `is_rdf_list` the values are wrapped in a single list.
    #[must_use]
    pub fn new(
        subject: Iri,
        predicate: Iri,
        entries: &[ValueEntry],
        datatype: Option<&Iri>,
        is_rdf_list: bool,
    ) -> Self {
        let datatype = datatype.filter(|d| *d != xsd::STRING);
        let values: Vec<Value> = entries.iter().filter_map(|e| e.to_value(datatype)).collect();
        let values = if is_rdf_list && !values.is_empty() {
            vec![Value::List(values)]
        } else {
            values
        };
        Self {
            subject,
            predicate,
            values,
        }
    }

    /// Patch for `entries` using the constraints carried by `property`
    #[must_use]
    pub fn from_descriptor(subject: &Iri, property: &PropertyDescriptor, entries: &[ValueEntry]) -> Self {
        Self::new(
            subject.clone(),
            property.key.clone(),
            entries,
            property.datatype.as_ref(),
            property.is_rdf_list,
        )
    }

    /// Check whether every value was removed
    #[inline]
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.values.is_empty()
    }

    /// Statements for this patch
    #[must_use]
    pub fn statements(&self) -> Vec<Statement> {
        if self.is_deletion() {
            return vec![Statement::new(
                self.subject.clone(),
                self.predicate.clone(),
                Iri::new(fs::NIL),
            )];
        }
        self.values
            .iter()
            .map(|v| Statement::new(self.subject.clone(), self.predicate.clone(), v.clone()))
            .collect()
    }
}

/// Patch for `entries` of `predicate`, typed through the vocabulary
///
/// `classes` are the subject's asserted types, used to resolve the shape.
#[must_use]
pub fn to_graph(
    subject: &Iri,
    predicate: &Iri,
    entries: &[ValueEntry],
    vocabulary: &VocabularyIndex,
    classes: &[Iri],
) -> PropertyPatch {
    let shape = vocabulary.shape_for(classes, predicate);
    PropertyPatch::new(
        subject.clone(),
        predicate.clone(),
        entries,
        shape.datatype.as_ref(),
        shape.is_rdf_list,
    )
}

/// All patches of one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPatch {
    patches: Vec<PropertyPatch>,
}

impl GraphPatch {
    /// Empty submission
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patch
    pub fn push(&mut self, patch: PropertyPatch) {
        self.patches.push(patch);
    }

    /// Patches in submission order
    #[inline]
    #[must_use]
    pub fn patches(&self) -> &[PropertyPatch] {
        &self.patches
    }

    /// Check whether there is nothing to submit
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Statements to submit, deletion markers included
    #[must_use]
    pub fn statements(&self) -> Graph {
        self.patches.iter().flat_map(PropertyPatch::statements).collect()
    }

    /// Statements as an expanded JSON-LD document
    #[must_use]
    pub fn to_json_ld(&self) -> serde_json::Value {
        ldm_graph::jsonld::to_json(&self.statements())
    }
}

impl FromIterator<PropertyPatch> for GraphPatch {
    fn from_iter<T: IntoIterator<Item = PropertyPatch>>(iter: T) -> Self {
        Self {
            patches: iter.into_iter().collect(),
        }
    }
}
