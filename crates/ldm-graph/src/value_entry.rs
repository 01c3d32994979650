//! Form-level value entries
//!
//! Provides [`ValueEntry`], the editable representation of one property value:
//! either a reference (`{id, label?}`) or a literal (`{value}`).

use crate::iri::Iri;
use crate::literal::{Literal, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One value of a property as shown in a form
///
/// A reference label is display data only; it never takes part in value
/// equality and is dropped when converting back to statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    /// Reference to another resource
    Reference {
        /// Referenced IRI
        id: Iri,
        /// Cached display label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Literal value
    Literal {
        /// The literal
        value: Literal,
    },
}

impl ValueEntry {
    /// Reference without label
    #[inline]
    #[must_use]
    pub fn reference(id: impl Into<Iri>) -> Self {
        Self::Reference {
            id: id.into(),
            label: None,
        }
    }

    /// Reference with display label
    #[inline]
    #[must_use]
    pub fn labelled(id: impl Into<Iri>, label: impl Into<String>) -> Self {
        Self::Reference {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    /// Plain literal
    #[inline]
    #[must_use]
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::plain(lexical),
        }
    }

    /// Typed literal
    #[inline]
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self::Literal {
            value: Literal::typed(lexical, datatype),
        }
    }

    /// Referenced IRI, if this is a reference
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&Iri> {
        match self {
            Self::Reference { id, .. } => Some(id),
            Self::Literal { .. } => None,
        }
    }

    /// Display label, if this is a labelled reference
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Reference { label, .. } => label.as_deref(),
            Self::Literal { .. } => None,
        }
    }

    /// The literal, if this is one
    #[inline]
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal { value } => Some(value),
            Self::Reference { .. } => None,
        }
    }

    /// Check for a reference entry
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    /// True when the entry carries no real value
    ///
    /// Blank literals and references with neither id nor label are empty;
    /// they count neither for ordering nor for cardinality.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal { value } => value.is_blank(),
            Self::Reference { id, label } => {
                id.is_empty() && label.as_deref().map_or(true, |l| l.trim().is_empty())
            }
        }
    }

    /// Value equality ignoring display labels
    ///
    /// Literal datatypes are compared only when both sides carry one, so an
    /// edited plain literal equals the typed literal it was read from.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Reference { id: a, .. }, Self::Reference { id: b, .. }) => a == b,
            (Self::Literal { value: a }, Self::Literal { value: b }) => {
                a.lexical == b.lexical
                    && a.language == b.language
                    && match (&a.datatype, &b.datatype) {
                        (Some(x), Some(y)) => x == y,
                        _ => true,
                    }
            }
            _ => false,
        }
    }

    /// Element-wise [`ValueEntry::same_value`] over two lists
    #[must_use]
    pub fn same_values(a: &[Self], b: &[Self]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value(y))
    }

    /// Entry for a statement object; lists are flattened by the caller
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Reference(id) => Some(Self::reference(id.clone())),
            Value::Literal(literal) => Some(Self::Literal {
                value: literal.clone(),
            }),
            Value::List(_) => None,
        }
    }

    /// Statement object for this entry, `None` when the entry is empty
    ///
    /// Labels are dropped. Literals without datatype or language take
    /// `default_datatype`.
    #[must_use]
    pub fn to_value(&self, default_datatype: Option<&Iri>) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        match self {
            Self::Reference { id, .. } if !id.is_empty() => Some(Value::Reference(id.clone())),
            Self::Reference { .. } => None,
            Self::Literal { value } => Some(Value::Literal(
                value.clone().with_default_datatype(default_datatype),
            )),
        }
    }

    /// Text used for display ordering: label, then id, then lexical form
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Reference { id, label } => label.as_deref().unwrap_or(id.as_str()),
            Self::Literal { value } => &value.lexical,
        }
    }

    /// Display order by (label, id, literal)
    #[must_use]
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        let key = |e: &Self| {
            (
                e.label().unwrap_or_default().to_string(),
                e.id().map(Iri::as_str).unwrap_or_default().to_string(),
                e.as_literal().map(|l| l.lexical.as_str()).unwrap_or_default().to_string(),
            )
        };
        key(self).cmp(&key(other))
    }
}

impl From<Literal> for ValueEntry {
    fn from(value: Literal) -> Self {
        Self::Literal { value }
    }
}

impl From<Iri> for ValueEntry {
    fn from(id: Iri) -> Self {
        Self::reference(id)
    }
}

impl fmt::Display for ValueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { id, label: Some(label) } => write!(f, "{label} <{id}>"),
            Self::Reference { id, label: None } => write!(f, "<{id}>"),
            Self::Literal { value } => value.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn emptiness() {
        assert!(ValueEntry::literal("").is_empty());
        assert!(ValueEntry::literal("   ").is_empty());
        assert!(!ValueEntry::literal("a").is_empty());
        assert!(ValueEntry::reference("").is_empty());
        assert!(!ValueEntry::labelled("", "John").is_empty());
        assert!(!ValueEntry::reference("x").is_empty());
    }

    #[test]
    fn same_value_ignores_labels() {
        let a = ValueEntry::labelled("http://x/1", "One");
        let b = ValueEntry::reference("http://x/1");
        assert!(a.same_value(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn same_value_tolerates_missing_datatype() {
        let typed = ValueEntry::typed("5", xsd::INTEGER);
        let plain = ValueEntry::literal("5");
        assert!(typed.same_value(&plain));
        assert!(!typed.same_value(&ValueEntry::typed("5", xsd::STRING)));
        assert!(!plain.same_value(&ValueEntry::reference("5")));
    }

    #[test]
    fn to_value_drops_labels_and_empties() {
        let entry = ValueEntry::labelled("http://x/1", "One");
        assert_eq!(entry.to_value(None), Some(Value::reference("http://x/1")));
        assert_eq!(ValueEntry::literal(" ").to_value(None), None);
        assert_eq!(ValueEntry::labelled("", "dangling").to_value(None), None);

        let int = Iri::new(xsd::INTEGER);
        assert_eq!(
            ValueEntry::literal("5").to_value(Some(&int)),
            Some(Value::Literal(Literal::typed("5", xsd::INTEGER)))
        );
    }

    #[test]
    fn untagged_json_shape() {
        let json = serde_json::to_value(ValueEntry::labelled("http://x/1", "One")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "http://x/1", "label": "One"}));

        let back: ValueEntry =
            serde_json::from_value(serde_json::json!({"value": {"lexical": "hello"}})).unwrap();
        assert_eq!(back, ValueEntry::literal("hello"));
    }

    #[test]
    fn display_order() {
        let mut entries = vec![
            ValueEntry::labelled("http://x/2", "Beta"),
            ValueEntry::labelled("http://x/1", "Alpha"),
            ValueEntry::literal("zzz"),
        ];
        entries.sort_by(ValueEntry::display_cmp);
        assert_eq!(entries[0], ValueEntry::literal("zzz"));
        assert_eq!(entries[1].label(), Some("Alpha"));
    }
}
