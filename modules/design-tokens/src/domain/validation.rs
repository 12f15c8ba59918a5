//! Field-level shape checks over raw JSON request bodies.
//!
//! Type names follow the JSON-in-JavaScript convention that clients of this
//! API expect: arrays report as `object` and an absent field as `undefined`.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::domain::models::Color;

/// Runtime type name of an optional JSON value.
#[must_use]
pub fn js_type_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_) | Value::Object(_)) => "object",
    }
}

/// One field whose value does not have the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub actual_type: &'static str,
    pub expected_type: &'static str,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, actual_type: &'static str, expected_type: &'static str) -> Self {
        Self {
            field: field.into(),
            actual_type,
            expected_type,
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is of type {} but should be {}",
            self.field, self.actual_type, self.expected_type
        )
    }
}

/// Whether an absent field is a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Collects violations while reading typed fields out of a JSON object.
///
/// Readers return `None` both for an absent optional field and for a field
/// that failed its check; [`finish`](Self::finish) tells the two apart.
#[derive(Debug, Default)]
pub struct ShapeValidator {
    violations: Vec<FieldViolation>,
}

impl ShapeValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The request body itself must be a JSON object.
    ///
    /// # Errors
    /// A single `body` violation when it is anything else.
    pub fn object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldViolation>> {
        body.as_object().ok_or_else(|| {
            let actual = if body.is_array() { "array" } else { js_type_of(Some(body)) };
            vec![FieldViolation::new("body", actual, "object")]
        })
    }

    pub fn string(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
        presence: Presence,
    ) -> Option<String> {
        match self.present(obj, field, presence, "string")? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.reject(field, Some(other), "string");
                None
            }
        }
    }

    pub fn number(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
        presence: Presence,
    ) -> Option<Number> {
        match self.present(obj, field, presence, "number")? {
            Value::Number(n) => Some(n.clone()),
            other => {
                self.reject(field, Some(other), "number");
                None
            }
        }
    }

    /// An ordered group of `{hexCode}` entries.
    pub fn colors(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
        presence: Presence,
    ) -> Option<Vec<Color>> {
        let items = match self.present(obj, field, presence, "object")? {
            Value::Array(items) => items,
            other @ Value::Object(_) => {
                self.violations
                    .push(FieldViolation::new(field, js_type_of(Some(other)), "array"));
                return None;
            }
            other => {
                self.reject(field, Some(other), "object");
                return None;
            }
        };

        let before = self.violations.len();
        let mut colors = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let path = format!("{field}.{idx}");
            let Some(entry) = item.as_object() else {
                self.reject(&path, Some(item), "object");
                continue;
            };
            if let Some(hex_code) = self.string(entry, "hexCode", Presence::Required) {
                colors.push(Color { hex_code });
            } else if let Some(last) = self.violations.last_mut() {
                // Nested readers report the bare key; qualify it with the path.
                last.field = format!("{path}.{}", last.field);
            }
        }
        (self.violations.len() == before).then_some(colors)
    }

    /// # Errors
    /// Every violation collected so far, in field order.
    pub fn finish(self) -> Result<(), Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }

    fn present<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        field: &str,
        presence: Presence,
        expected: &'static str,
    ) -> Option<&'v Value> {
        let value = obj.get(field);
        if value.is_none() && presence == Presence::Required {
            self.reject(field, None, expected);
        }
        value
    }

    fn reject(&mut self, field: &str, actual: Option<&Value>, expected: &'static str) {
        self.violations
            .push(FieldViolation::new(field, js_type_of(actual), expected));
    }
}
