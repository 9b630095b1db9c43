//! Validation layer - field-level error collection.
//!
//! Payload types derive [`validator::Validate`]; their failures are folded
//! into [`FieldErrors`], which keeps every failing field rather than stopping
//! at the first one. Rules the derive cannot express (explicit `null` on a
//! non-nullable field, for instance) are appended to the same collection.
//!
//! Every failure is recorded as a short reason code (`required`, `length`,
//! `slug_format`, `url`, `email`, `boolean`, ...), never as prose.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::error::DomainError;

/// Failing fields mapped to the reasons they failed, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the derived validation rules of `value`.
    pub fn of<T: Validate>(value: &T) -> Self {
        match value.validate() {
            Ok(()) => Self::new(),
            Err(errors) => errors.into(),
        }
    }

    /// Record a failure reason for `field`.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Fold `other` into this collection.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, reasons) in other.0 {
            self.0.entry(field).or_default().extend(reasons);
        }
    }

    /// `Ok(())` when nothing failed, otherwise a [`DomainError::Validation`].
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures.iter() {
                out.add(field.to_string(), failure.code.to_string());
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// JSON type a payload field must carry. `null` is accepted for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_null() || value.is_string(),
            FieldKind::Flag => value.is_null() || value.is_boolean(),
        }
    }

    fn code(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Flag => "boolean",
        }
    }
}

/// Decode a JSON object into `T` one field at a time.
///
/// Fields listed in `schema` that carry the wrong JSON type are dropped
/// from the object and reported, so the remaining fields still decode and
/// go through the regular rules. Fields outside `schema` are left to serde.
pub fn decode_lenient<T: DeserializeOwned>(
    body: Value,
    schema: &[(&str, FieldKind)],
) -> Result<(T, FieldErrors), DomainError> {
    let mut errors = FieldErrors::new();
    let Value::Object(mut object) = body else {
        errors.add("body", "object");
        return Err(DomainError::Validation(errors));
    };

    for (name, kind) in schema {
        if object.get(*name).is_some_and(|value| !kind.accepts(value)) {
            object.remove(*name);
            errors.add(*name, kind.code());
        }
    }

    match serde_json::from_value(Value::Object(object)) {
        Ok(decoded) => Ok((decoded, errors)),
        Err(err) => {
            tracing::debug!(error = %err, "Payload did not decode after type checks");
            errors.add("body", "malformed");
            Err(DomainError::Validation(errors))
        }
    }
}
