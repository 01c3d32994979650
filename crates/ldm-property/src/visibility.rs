//! Visibility filter
//!
//! Machine-only properties without values have nothing to show and cannot be
//! filled in, so forms leave them out, together with explicitly hidden keys.

use crate::descriptor::PropertyDescriptor;
use ldm_graph::Iri;

/// Check whether a form shows `property`
#[must_use]
pub fn is_visible(property: &PropertyDescriptor, hidden: &[Iri]) -> bool {
    !hidden.contains(&property.key) && (property.has_values() || !property.machine_only)
}

/// Descriptors a form shows, order kept
#[must_use]
pub fn visible_properties(properties: Vec<PropertyDescriptor>, hidden: &[Iri]) -> Vec<PropertyDescriptor> {
    properties.into_iter().filter(|p| is_visible(p, hidden)).collect()
}
