//! Core types for LDM forms

use ldm_graph::Iri;
use ldm_vocabulary::ShapeResolution;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use ldm_property::EditContext;

/// Caller-chosen identifier of one form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormKey(String);

impl FormKey {
    /// Create a form key
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FormKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Iri> for FormKey {
    fn from(value: &Iri) -> Self {
        Self::new(value.as_str())
    }
}

/// Lifecycle status of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Created, nothing fetched yet
    #[default]
    Idle,
    /// Waiting for subject and vocabulary
    Loading,
    /// Loaded and editable
    Ready,
    /// Submission running
    Submitting,
    /// Last fetch or submission failed
    Error,
}

impl FormStatus {
    /// Check whether edits are buffered instead of applied
    #[inline]
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Form behaviour settings
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Policy when several asserted types declare the same property
    pub resolution: ShapeResolution,
    /// Keep the type descriptor read-only even when the vocabulary shapes it
    pub type_machine_only: bool,
    /// Property IRIs never shown in forms
    pub hidden_properties: Vec<Iri>,
    /// Run shape validation before contacting the backend
    pub validate_before_submit: bool,
    /// Whether the current user may edit
    pub can_edit: bool,
    /// Per-request limit in seconds
    pub request_timeout_secs: Option<u64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            resolution: ShapeResolution::default(),
            type_machine_only: true,
            hidden_properties: Vec::new(),
            validate_before_submit: true,
            can_edit: true,
            request_timeout_secs: None,
        }
    }
}

impl FormConfig {
    /// Set the shape resolution policy
    #[must_use]
    pub fn with_resolution(mut self, resolution: ShapeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set whether the type descriptor stays read-only
    #[must_use]
    pub fn with_type_machine_only(mut self, machine_only: bool) -> Self {
        self.type_machine_only = machine_only;
        self
    }

    /// Hide one more property
    #[must_use]
    pub fn with_hidden_property(mut self, property: impl Into<Iri>) -> Self {
        self.hidden_properties.push(property.into());
        self
    }

    /// Set whether submit validates locally first
    #[must_use]
    pub fn with_validate_before_submit(mut self, validate: bool) -> Self {
        self.validate_before_submit = validate;
        self
    }

    /// Set the edit right
    #[must_use]
    pub fn with_can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }

    /// Limit each backend request
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(FormStatus::Submitting.to_string(), "submitting");
        assert_eq!(FormStatus::default(), FormStatus::Idle);
    }

    #[test]
    fn config_builder() {
        let config = FormConfig::default()
            .with_resolution(ShapeResolution::FirstAsserted)
            .with_hidden_property("http://x/p")
            .with_can_edit(false);
        assert_eq!(config.resolution, ShapeResolution::FirstAsserted);
        assert_eq!(config.hidden_properties, vec![Iri::new("http://x/p")]);
        assert!(!config.can_edit);
        assert!(config.type_machine_only);
        assert!(config.validate_before_submit);
    }

    #[test]
    fn config_from_partial_toml() {
        let config: FormConfig = toml::from_str(
            r#"
            resolution = "first_asserted"
            hidden_properties = ["http://x/secret"]
            request_timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.resolution, ShapeResolution::FirstAsserted);
        assert_eq!(config.hidden_properties, vec![Iri::new("http://x/secret")]);
        assert_eq!(config.request_timeout_secs, Some(10));
        assert!(config.can_edit);
    }
}
