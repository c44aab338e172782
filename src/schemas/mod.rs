// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request schemas.
//!
//! Each write body is a `validator` derive struct. The same structs are used
//! by the UI form state to validate before submitting, so a payload accepted
//! locally is accepted by the server.

pub mod equipment;
pub mod exercise;
pub mod muscle_group;
pub mod personal_record;
pub mod workout;

pub use equipment::{EquipmentInput, EquipmentUpdateInput};
pub use exercise::{ExerciseInput, ExerciseUpdateInput};
pub use muscle_group::{MuscleGroupInput, MuscleGroupUpdateInput};
pub use personal_record::PersonalRecordInput;
pub use workout::{SetInput, WorkoutExerciseInput, WorkoutInput, WorkoutUpdateInput};

use crate::error::{AppError, FieldError};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Body of `PUT`/`DELETE` requests that carry the target id in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdInput {
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,
}

/// JSON body extractor that also runs the schema.
///
/// Values serde rejects (missing fields, unknown enum tags, bad `mm:ss`
/// text) are reported the same way as schema failures: 400 with the JSON
/// path of the offending value as the field.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(AppError::invalid_field(
                "body",
                "Expected request with `Content-Type: application/json`",
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_field("body", rejection.body_text()))?;

        let value: T = decode_json(&bytes).map_err(|err| AppError::Validation(vec![err]))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(field_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// Deserialize a JSON body, naming the failing value by its path.
pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let mut field = json_path(err.path());
        let text = err.inner().to_string();
        let message = strip_location(&text);

        if let Some(missing) = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.strip_suffix('`'))
        {
            let name = to_camel_case(missing);
            field = if field.is_empty() {
                name
            } else {
                format!("{field}.{name}")
            };
            return FieldError::new(field, "Required");
        }

        if field.is_empty() {
            field = "body".to_string();
        }
        FieldError::new(field, message)
    })?;
    de.end()
        .map_err(|err| FieldError::new("body", strip_location(&err.to_string())))?;
    Ok(value)
}

/// `exercises[0].sets[1].rest` from the segments serde walked through.
fn json_path(path: &serde_path_to_error::Path) -> String {
    use serde_path_to_error::Segment;

    let mut out = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => out.push_str(&format!("[{index}]")),
            Segment::Map { key } | Segment::Enum { variant: key } => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            _ => {}
        }
    }
    out
}

/// serde_json appends ` at line N column M`; field errors don't need it.
fn strip_location(message: &str) -> &str {
    message
        .rsplit_once(" at line ")
        .map_or(message, |(head, _)| head)
}

/// Flatten `validator` errors into `{field, message}` pairs keyed by the
/// camelCase JSON path. Sorted by path so responses are stable.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            to_camel_case(name)
        } else {
            format!("{prefix}.{}", to_camel_case(name))
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldError::new(path.clone(), message(e))));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn message(error: &ValidationError) -> String {
    match &error.message {
        Some(msg) => msg.to_string(),
        None => match error.code.as_ref() {
            "url" => "Invalid url".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => "Invalid value".to_string(),
        },
    }
}

/// `rest_after` -> `restAfter`. Already camelCase names pass through.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Custom `validator` check for a list of URLs.
pub(crate) fn validate_urls(urls: &[String]) -> Result<(), ValidationError> {
    use validator::ValidateUrl;

    if urls.iter().all(|url| url.validate_url()) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Invalid url".into()))
    }
}

/// Distinguish an absent field from an explicit `null` in update bodies.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Blank optional text counts as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
