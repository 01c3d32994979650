//! Display ordering of property descriptors
//!
//! Precedence, each tier breaking ties of the previous one:
//! 1. descriptors with an `order` ascending, before any without one
//! 2. without `order`: descriptors with a non-empty value first
//! 3. label, case-sensitive
//! 4. key IRI

use crate::descriptor::PropertyDescriptor;
use std::cmp::Ordering;

/// Total order over descriptors for display
#[must_use]
pub fn compare(a: &PropertyDescriptor, b: &PropertyDescriptor) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.has_values().cmp(&a.has_values()),
    };
    by_order
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.key.cmp(&b.key))
}

/// Sort descriptors in place
pub fn sort_properties(properties: &mut [PropertyDescriptor]) {
    properties.sort_by(compare);
}
