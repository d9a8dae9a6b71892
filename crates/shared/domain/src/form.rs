//! Submitted form data and per-field error maps.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Read access to a string-keyed collection of submitted form values.
///
/// Missing fields read as the empty string.
pub trait FormFields {
    fn field(&self, name: &str) -> &str;
}

impl FormFields for HashMap<String, String> {
    fn field(&self, name: &str) -> &str {
        self.get(name).map(String::as_str).unwrap_or_default()
    }
}

impl FormFields for BTreeMap<String, String> {
    fn field(&self, name: &str) -> &str {
        self.get(name).map(String::as_str).unwrap_or_default()
    }
}

impl FormFields for [(&str, &str)] {
    fn field(&self, name: &str) -> &str {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }
}

impl<const N: usize> FormFields for [(&str, &str); N] {
    fn field(&self, name: &str) -> &str {
        self.as_slice().field(name)
    }
}

/// Per-field error messages keyed by field name.
///
/// An absent key means the field is valid; an empty map means the whole
/// form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry map, used for storage failures reported under `db`.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
