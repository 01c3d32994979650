//! Shape validation
//!
//! Checks the values of one property against its descriptor and partitions
//! backend-reported errors into those about the edited subject and those
//! about other entities.

use crate::descriptor::PropertyDescriptor;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use ldm_graph::vocab::xsd;
use ldm_graph::{Iri, Literal, ValueEntry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constraint violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Fewer non-empty values than `minCount`
    TooFewValues {
        /// Required minimum
        min: u32,
    },
    /// More non-empty values than `maxCount`
    TooManyValues {
        /// Allowed maximum
        max: u32,
    },
    /// Value not parseable as the declared datatype
    InvalidType {
        /// Offending value
        value: String,
        /// Declared datatype
        datatype: Iri,
    },
    /// Value outside the closed enumeration
    NotAllowed {
        /// Offending value
        value: String,
    },
    /// Literal longer than `maxLength`
    TooLong {
        /// Allowed length
        max: u32,
        /// Actual length
        length: usize,
    },
    /// Generic IRI resource that is not an absolute IRI
    InvalidIri {
        /// Offending value
        value: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewValues { min } => write!(f, "too few values: at least {min} required"),
            Self::TooManyValues { max } => write!(f, "too many values: at most {max} allowed"),
            Self::InvalidType { value, datatype } => write!(
                f,
                "invalid value for type {}: {value}",
                datatype.local_name()
            ),
            Self::NotAllowed { value } => write!(f, "not an allowed value: {value}"),
            Self::TooLong { max, length } => {
                write!(f, "value too long: {length} characters, at most {max} allowed")
            }
            Self::InvalidIri { value } => write!(f, "invalid IRI: {value}"),
        }
    }
}

/// Check `values` against the constraints of `property`
///
/// Empty entries are ignored by every check.
#[must_use]
pub fn validate(property: &PropertyDescriptor, values: &[ValueEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let present: Vec<&ValueEntry> = values.iter().filter(|v| !v.is_empty()).collect();

    if (present.len() as u64) < u64::from(property.min_values_count) {
        violations.push(Violation::TooFewValues {
            min: property.min_values_count,
        });
    }
    if let Some(max) = property.max_values_count {
        if present.len() as u64 > u64::from(max) {
            violations.push(Violation::TooManyValues { max });
        }
    }

    for entry in present {
        if let Some(datatype) = &property.datatype {
            let valid = match entry {
                ValueEntry::Literal { value } => conforms(value, datatype),
                ValueEntry::Reference { .. } => false,
            };
            if !valid {
                violations.push(Violation::InvalidType {
                    value: entry.display_text().to_string(),
                    datatype: datatype.clone(),
                });
            }
        }

        if let Some(allowed) = &property.allowed_values {
            if !allowed.iter().any(|a| a.same_value(entry)) {
                violations.push(Violation::NotAllowed {
                    value: entry.display_text().to_string(),
                });
            }
        }

        if let (Some(max), Some(literal)) = (property.max_length, entry.as_literal()) {
            let length = literal.lexical.chars().count();
            if length > max as usize {
                violations.push(Violation::TooLong { max, length });
            }
        }

        if property.is_generic_iri_resource {
            if let Some(id) = entry.id() {
                if !id.is_absolute() {
                    violations.push(Violation::InvalidIri {
                        value: id.as_str().to_string(),
                    });
                }
            }
        }
    }

    violations
}

/// [`validate`] rendered to messages
#[must_use]
pub fn validate_messages(property: &PropertyDescriptor, values: &[ValueEntry]) -> Vec<String> {
    validate(property, values)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Check that a literal's lexical form fits `datatype`
///
/// Unknown datatypes accept any value.
#[must_use]
pub fn conforms(literal: &Literal, datatype: &Iri) -> bool {
    let text = literal.lexical.trim();
    match datatype.as_str() {
        xsd::INTEGER | xsd::LONG | xsd::INT | xsd::SHORT | xsd::BYTE => text.parse::<i128>().is_ok(),
        xsd::NON_NEGATIVE_INTEGER => text.parse::<u128>().is_ok(),
        xsd::POSITIVE_INTEGER => text.parse::<u128>().is_ok_and(|n| n > 0),
        xsd::DECIMAL | xsd::DOUBLE | xsd::FLOAT => text.parse::<f64>().is_ok(),
        xsd::BOOLEAN => matches!(text, "true" | "false" | "1" | "0"),
        xsd::DATE => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        xsd::DATE_TIME => {
            DateTime::parse_from_rfc3339(text).is_ok()
                || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
                || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").is_ok()
        }
        xsd::TIME => {
            NaiveTime::parse_from_str(text, "%H:%M:%S%.f").is_ok()
                || NaiveTime::parse_from_str(text, "%H:%M").is_ok()
        }
        _ => true,
    }
}

/// An error reported against one statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Subject the error is about
    pub subject: Iri,
    /// Offending property
    pub predicate: Iri,
    /// Human readable message
    pub message: String,
}

impl ValidationError {
    /// Create a validation error
    #[must_use]
    pub fn new(subject: impl Into<Iri>, predicate: impl Into<Iri>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}>: {}", self.subject, self.predicate, self.message)
    }
}

/// Errors about `subject` and errors about other entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionedErrors {
    /// Errors about the edited subject
    pub entity_errors: Vec<ValidationError>,
    /// Errors about other entities affected by the edit
    pub other_errors: Vec<ValidationError>,
}

/// Split `errors` by comparing their subject with `subject`
#[must_use]
pub fn partition_errors(errors: &[ValidationError], subject: &Iri) -> PartitionedErrors {
    let (entity_errors, other_errors): (Vec<_>, Vec<_>) = errors.iter().cloned().partition(|e| &e.subject == subject);
    PartitionedErrors {
        entity_errors,
        other_errors,
    }
}

/// Append the messages of `errors` to the descriptors they name
///
/// Errors for predicates without a descriptor are left out.
pub fn attach_errors(properties: &mut [PropertyDescriptor], errors: &[ValidationError]) {
    for error in errors {
        if let Some(property) = properties.iter_mut().find(|p| p.key == error.predicate) {
            if !property.errors.contains(&error.message) {
                property.errors.push(error.message.clone());
            }
        }
    }
}
