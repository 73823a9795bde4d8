// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Values of `additional_annotations` and their annotation string form.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A settings value before it is coerced into an annotation string
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub enum AnnotationValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    /// null, arrays and objects
    Other(Value),
}

impl From<Value> for AnnotationValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => AnnotationValue::String(s),
            Value::Bool(b) => AnnotationValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AnnotationValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    AnnotationValue::Unsigned(u)
                } else {
                    AnnotationValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            other => AnnotationValue::Other(other),
        }
    }
}

impl From<AnnotationValue> for Value {
    fn from(value: AnnotationValue) -> Self {
        match value {
            AnnotationValue::String(s) => Value::String(s),
            AnnotationValue::Bool(b) => Value::Bool(b),
            AnnotationValue::Integer(i) => Value::from(i),
            AnnotationValue::Unsigned(u) => Value::from(u),
            AnnotationValue::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            AnnotationValue::Other(v) => v,
        }
    }
}

/// Canonical annotation string: floats are fixed-point with six fractional digits,
/// non-scalar values are rendered as compact JSON.
impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::String(s) => f.write_str(s),
            AnnotationValue::Bool(b) => write!(f, "{}", b),
            AnnotationValue::Integer(i) => write!(f, "{}", i),
            AnnotationValue::Unsigned(u) => write!(f, "{}", u),
            AnnotationValue::Float(v) => write!(f, "{:.6}", v),
            AnnotationValue::Other(v) => write!(f, "{}", v),
        }
    }
}
