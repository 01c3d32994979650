//! Property descriptors
//!
//! Provides [`PropertyDescriptor`], the shape-enriched view of one property of
//! a subject together with its current values.

use ldm_graph::vocab::rdf;
use ldm_graph::{Iri, ValueEntry};
use ldm_vocabulary::Shape;
use serde::{Deserialize, Serialize};

/// One property of a subject as shown in a form
///
/// `values` always holds either the fetched or the overlaid list for the
/// key, never a mix of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property IRI
    pub key: Iri,

    /// Display label
    pub label: String,

    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Current values
    #[serde(default)]
    pub values: Vec<ValueEntry>,

    /// Literal datatype; `None` for references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,

    /// Class of referenced entities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<Iri>,

    /// Minimum number of non-empty values
    #[serde(default)]
    pub min_values_count: u32,

    /// Maximum number of non-empty values, `None` when unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values_count: Option<u32>,

    /// Maximum literal length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Maintained by the system
    #[serde(default)]
    pub machine_only: bool,

    /// Accepts user edits
    #[serde(default)]
    pub is_editable: bool,

    /// Closed enumeration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<ValueEntry>>,

    /// Free-form IRI entry
    #[serde(default)]
    pub is_generic_iri_resource: bool,

    /// Values form one ordered list
    #[serde(default)]
    pub is_rdf_list: bool,

    /// Owning shape is fixed
    #[serde(default)]
    pub is_fixed_shape: bool,

    /// Values that may not be removed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system_properties: Vec<Iri>,

    /// Long text
    #[serde(default)]
    pub multi_line: bool,

    /// New referenced entities may be created from the form
    #[serde(default)]
    pub allow_addition_of_entities: bool,

    /// Validation messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl PropertyDescriptor {
    /// Unconstrained, editable descriptor without values
    #[must_use]
    pub fn new(key: impl Into<Iri>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
            order: None,
            values: Vec::new(),
            datatype: None,
            class_name: None,
            min_values_count: 0,
            max_values_count: None,
            max_length: None,
            machine_only: false,
            is_editable: true,
            allowed_values: None,
            is_generic_iri_resource: false,
            is_rdf_list: false,
            is_fixed_shape: false,
            system_properties: Vec::new(),
            multi_line: false,
            allow_addition_of_entities: false,
            errors: Vec::new(),
        }
    }

    /// Descriptor carrying the constraints of `shape`
    ///
    /// The shape's label wins over `fallback_label`.
    #[must_use]
    pub fn from_shape(key: impl Into<Iri>, fallback_label: impl Into<String>, shape: &Shape) -> Self {
        Self {
            label: shape.label.clone().unwrap_or_else(|| fallback_label.into()),
            description: shape.description.clone(),
            order: shape.order,
            datatype: shape.datatype.clone(),
            class_name: shape.class_name.clone(),
            min_values_count: shape.min_count,
            max_values_count: shape.max_count,
            max_length: shape.max_length,
            machine_only: shape.machine_only,
            is_editable: !shape.machine_only,
            allowed_values: shape.allowed_values.clone(),
            is_generic_iri_resource: shape.is_generic_iri_resource,
            is_rdf_list: shape.is_rdf_list,
            is_fixed_shape: shape.is_fixed_shape,
            system_properties: shape.system_properties.clone(),
            multi_line: shape.multi_line,
            allow_addition_of_entities: shape.allow_addition_of_entities,
            ..Self::new(key, String::new())
        }
    }

    /// Replace the values
    #[must_use]
    pub fn with_values(mut self, values: Vec<ValueEntry>) -> Self {
        self.values = values;
        self
    }

    /// Set the display priority
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the cardinality bounds
    #[must_use]
    pub fn with_cardinality(mut self, min: u32, max: Option<u32>) -> Self {
        self.min_values_count = min;
        self.max_values_count = max;
        self
    }

    /// Set the literal datatype
    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<Iri>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Values that carry real content
    pub fn non_empty_values(&self) -> impl Iterator<Item = &ValueEntry> {
        self.values.iter().filter(|v| !v.is_empty())
    }

    /// Check whether at least one value carries real content
    #[inline]
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_empty())
    }

    /// Check whether this describes the `rdf:type` assertion
    #[inline]
    #[must_use]
    pub fn is_type(&self) -> bool {
        self.key == rdf::TYPE
    }

    /// Check whether more values may be added
    #[must_use]
    pub fn can_add_value(&self) -> bool {
        self.is_editable
            && self
                .max_values_count
                .map_or(true, |max| self.non_empty_values().count() < max as usize)
    }
}
