//! IRI identifiers
//!
//! Provides [`Iri`], the identifier used for subjects, predicates, classes and
//! shapes throughout the workspace.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Scheme followed by a non-empty, whitespace free remainder.
static ABSOLUTE_IRI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>{}|\\^`]+$").expect("absolute IRI pattern is valid")
});

/// An IRI identifying a resource in the graph
///
/// The wrapped string is kept exactly as received; no normalization is
/// applied, so two IRIs are equal only when their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap a string as IRI
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mint a fresh IRI below `base` using a random UUID
    ///
    /// `base` is used verbatim, so it should end with a separator
    /// (e.g. `http://example.com/iri/`).
    #[must_use]
    pub fn mint(base: &str) -> Self {
        Self(format!("{base}{}", uuid::Uuid::new_v4()))
    }

    /// Underlying string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Check for the empty IRI
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether this is an absolute IRI (`scheme:rest`)
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        ABSOLUTE_IRI.is_match(&self.0)
    }

    /// Part after the last `#`, or after the last `/` when there is no `#`
    ///
    /// `http://xmlns.com/foaf/0.1/name` → `name`,
    /// `http://www.w3.org/2000/01/rdf-schema#label` → `label`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.0[self.split_point()..]
    }

    /// Everything before [`Iri::local_name`], separator included
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.0[..self.split_point()]
    }

    fn split_point(&self) -> usize {
        self.0
            .rfind('#')
            .or_else(|| self.0.rfind('/'))
            .map_or(0, |i| i + 1)
    }

    /// Check if this IRI starts with the given namespace
    #[inline]
    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> bool {
        !namespace.is_empty() && self.0.starts_with(namespace)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Iri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Iri> for Iri {
    fn from(value: &Iri) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
