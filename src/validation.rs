//! Client-side form validation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> message, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Editing a field clears its error
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record `message` against `field` when `value` is blank
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    /// Optional URL fields: blank passes, anything else must be http(s)
    pub fn optional_url(&mut self, field: &str, value: &str) {
        if !is_valid_optional_url(value) {
            self.insert(field, "URL must start with http:// or https://");
        }
    }
}

/// Per-entity form records implement this instead of ad hoc checks
pub trait Validate {
    fn validate(&self) -> FieldErrors;
}

pub fn is_valid_optional_url(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.starts_with("http://") || value.starts_with("https://")
}

/// Trimmed value, or `None` when blank
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
