//! Graph to property conversion
//!
//! Turns the statements about one subject into an ordered list of
//! [`PropertyDescriptor`]s, merging each predicate with its resolved shape.

use crate::descriptor::PropertyDescriptor;
use crate::order::sort_properties;
use indexmap::IndexMap;
use ldm_graph::vocab::rdf;
use ldm_graph::{Graph, Iri, Value, ValueEntry};
use ldm_vocabulary::VocabularyIndex;

/// Label of the type descriptor when the vocabulary has no shape for it
pub const TYPE_LABEL: &str = "Type";

/// Descriptors for every property of `subject`
///
/// Every predicate asserted on the subject yields a descriptor, with or
/// without a matching shape. Properties declared by the subject's shapes but
/// absent from the graph yield empty descriptors. A subject without
/// statements yields an empty list.
#[must_use]
pub fn from_graph(graph: &Graph, subject: &Iri, vocabulary: &VocabularyIndex) -> Vec<PropertyDescriptor> {
    let mut grouped: IndexMap<&Iri, Vec<&Value>> = IndexMap::new();
    for statement in graph.about(subject) {
        grouped
            .entry(&statement.predicate)
            .or_default()
            .push(&statement.object);
    }

    if grouped.is_empty() {
        tracing::debug!(subject = %subject, "no statements for subject");
        return Vec::new();
    }

    let types = graph.types_of(subject);
    let mut properties = Vec::with_capacity(grouped.len());

    for (predicate, objects) in &grouped {
        if *predicate == rdf::TYPE {
            continue;
        }
        let shape = vocabulary.shape_for(&types, predicate);
        let mut values = Vec::with_capacity(objects.len());
        for object in objects {
            flatten(graph, vocabulary, object, &mut values);
        }
        if !shape.is_rdf_list {
            values.sort_by(ValueEntry::display_cmp);
        }
        properties.push(
            PropertyDescriptor::from_shape((*predicate).clone(), vocabulary.label_of(predicate), &shape)
                .with_values(values),
        );
    }

    for shape in vocabulary.property_shapes_for(&types) {
        let Some(path) = shape.path.clone() else {
            continue;
        };
        if path == rdf::TYPE || grouped.contains_key(&path) {
            continue;
        }
        let label = vocabulary.label_of(&path);
        properties.push(PropertyDescriptor::from_shape(path, label, &shape));
    }

    if !types.is_empty() || grouped.contains_key(&Iri::new(rdf::TYPE)) {
        properties.push(type_descriptor(&types, vocabulary));
    }

    sort_properties(&mut properties);
    tracing::debug!(
        subject = %subject,
        properties = properties.len(),
        "converted graph to properties"
    );
    properties
}

/// Editable descriptors for a new entity of the given types
///
/// All declared properties start empty; the type descriptor is pre-filled.
#[must_use]
pub fn empty_properties(vocabulary: &VocabularyIndex, classes: &[Iri]) -> Vec<PropertyDescriptor> {
    let mut properties: Vec<PropertyDescriptor> = vocabulary
        .property_shapes_for(classes)
        .into_iter()
        .filter_map(|shape| {
            let path = shape.path.clone()?;
            (path != rdf::TYPE).then(|| {
                let label = vocabulary.label_of(&path);
                PropertyDescriptor::from_shape(path, label, &shape)
            })
        })
        .collect();
    properties.push(type_descriptor(classes, vocabulary));
    sort_properties(&mut properties);
    properties
}

/// Descriptor for the `rdf:type` assertion
///
/// Machine-only with at most one value unless the vocabulary has a shape for
/// `rdf:type` itself.
#[must_use]
pub fn type_descriptor(types: &[Iri], vocabulary: &VocabularyIndex) -> PropertyDescriptor {
    let shape = vocabulary.shape_for(types, &Iri::new(rdf::TYPE));
    let descriptor = if shape.is_default() {
        let mut descriptor = PropertyDescriptor::new(rdf::TYPE, TYPE_LABEL).with_cardinality(0, Some(1));
        descriptor.machine_only = true;
        descriptor.is_editable = false;
        descriptor
    } else {
        PropertyDescriptor::from_shape(rdf::TYPE, TYPE_LABEL, &shape)
    };
    let values = types
        .iter()
        .map(|t| ValueEntry::labelled(t.clone(), vocabulary.label_of(t)))
        .collect();
    descriptor.with_values(values)
}

fn flatten(graph: &Graph, vocabulary: &VocabularyIndex, value: &Value, out: &mut Vec<ValueEntry>) {
    match value {
        Value::List(items) => items.iter().for_each(|v| flatten(graph, vocabulary, v, out)),
        Value::Reference(id) => {
            let label = graph
                .label_of(id)
                .or_else(|| vocabulary.explicit_label(id))
                .map(str::to_string);
            out.push(ValueEntry::Reference { id: id.clone(), label });
        }
        Value::Literal(literal) => out.push(ValueEntry::from(literal.clone())),
    }
}
