// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form state: field values plus per-field error messages.
//!
//! Errors come from two places, the local `validator` run before submit and
//! the `details` of a 400 response. Both are keyed by the same camelCase
//! field paths, so a form shows them identically. Submission replaces the
//! whole entity; there are no partial or optimistic updates.

use crate::error::FieldError;
use crate::schemas::field_errors;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    pub values: F,
    errors: BTreeMap<String, String>,
}

impl<F> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Change a value and drop the error shown for that field.
    pub fn set(&mut self, field: &str, update: impl FnOnce(&mut F)) {
        update(&mut self.values);
        self.clear_error(field);
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Show errors from a local validation run. The first message per
    /// field wins.
    pub fn apply_validation_errors(&mut self, errors: &ValidationErrors) {
        self.apply(field_errors(errors));
    }

    /// Show the field errors of a 400 response body.
    ///
    /// Returns false when the body carries no field details, so the caller
    /// can fall back to a form-level message.
    pub fn apply_server_details(&mut self, body: &serde_json::Value) -> bool {
        let details = body
            .get("details")
            .cloned()
            .and_then(|d| serde_json::from_value::<Vec<FieldError>>(d).ok())
            .unwrap_or_default();
        if details.is_empty() {
            return false;
        }
        self.apply(details);
        true
    }

    fn apply(&mut self, errors: Vec<FieldError>) {
        for FieldError { field, message } in errors {
            self.errors.entry(field).or_insert(message);
        }
    }
}

impl<F: Validate> FormState<F> {
    /// Re-run the schema, replacing any shown errors. True when clean.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if let Err(errors) = self.values.validate() {
            self.apply_validation_errors(&errors);
        }
        self.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyRegion;
    use crate::schemas::MuscleGroupInput;
    use serde_json::json;

    fn empty_form() -> FormState<MuscleGroupInput> {
        FormState::new(MuscleGroupInput {
            name: String::new(),
            description: String::new(),
            body: BodyRegion::Upper,
        })
    }

    #[test]
    fn test_local_validation() {
        let mut form = empty_form();
        assert!(!form.validate());
        assert_eq!(form.error("name"), Some("Name is required"));
        assert_eq!(form.error("description"), Some("Description is required"));

        form.set("name", |v| v.name = "Neck".to_string());
        assert_eq!(form.error("name"), None);
        assert!(!form.is_valid());

        form.set("description", |v| v.description = "Cervical".to_string());
        assert!(form.validate());
    }

    #[test]
    fn test_server_details() {
        let mut form = empty_form();
        let body = json!({
            "error": "validation_error",
            "details": [
                {"field": "name", "message": "Name is required"},
                {"field": "name", "message": "second message is ignored"}
            ]
        });
        assert!(form.apply_server_details(&body));
        assert_eq!(form.error("name"), Some("Name is required"));

        let mut form = empty_form();
        assert!(!form.apply_server_details(&json!({"error": "internal_error"})));
        assert!(!form.apply_server_details(&json!({"error": "not_found", "details": "gone"})));
        assert!(form.is_valid());
    }
}
