//! Literals and statement values
//!
//! Provides [`Literal`] (lexical form plus optional datatype or language) and
//! [`Value`], the object position of a statement.

use crate::iri::Iri;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RDF literal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form
    pub lexical: String,

    /// Datatype IRI, `None` for plain literals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,

    /// Language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal without datatype or language
    #[inline]
    #[must_use]
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// Literal with explicit datatype
    #[inline]
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Attach a language tag
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Attach a datatype unless one is already present
    #[must_use]
    pub fn with_default_datatype(mut self, datatype: Option<&Iri>) -> Self {
        if self.datatype.is_none() && self.language.is_none() {
            self.datatype = datatype.cloned();
        }
        self
    }

    /// True when the lexical form is empty or whitespace only
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.lexical.trim().is_empty()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^<{datatype}>")
        } else {
            Ok(())
        }
    }
}

/// Object of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Reference to another resource
    Reference(Iri),
    /// Literal value
    Literal(Literal),
    /// Ordered list (`rdf:List`), flattened
    List(Vec<Value>),
}

impl Value {
    /// Build a reference value
    #[inline]
    #[must_use]
    pub fn reference(iri: impl Into<Iri>) -> Self {
        Self::Reference(iri.into())
    }

    /// Build a plain literal value
    #[inline]
    #[must_use]
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal(Literal::plain(lexical))
    }

    /// Referenced IRI, if this is a reference
    #[inline]
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Reference(iri) => Some(iri),
            _ => None,
        }
    }

    /// Literal, if this is one
    #[inline]
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Check whether this is a list
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<Iri> for Value {
    fn from(value: Iri) -> Self {
        Self::Reference(value)
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(iri) => write!(f, "<{iri}>"),
            Self::Literal(literal) => literal.fmt(f),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}
