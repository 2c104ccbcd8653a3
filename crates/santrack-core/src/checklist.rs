//! Checklist decoding.
//!
//! A checklist is a JSON object mapping factor names to booleans, e.g.
//! `{"handwashing": true, "pests": false}`. Unknown keys are ignored. A known
//! factor that is missing counts as not present.
//!
//! Factor values are read by truthiness so that legacy rows carrying `1`,
//! `0` or `"yes"` keep the scores they were always given: `false`, `null`,
//! zero, and empty strings, arrays or objects are absent; anything else is
//! present.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::weights::Factor;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("checklist is missing")]
    Missing,

    #[error("checklist is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checklist must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Decoded checklist: the set of known factors marked present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    present: BTreeSet<Factor>,
}

impl Checklist {
    /// Decode a raw checklist document.
    pub fn parse(raw: &str) -> Result<Self, ChecklistError> {
        let value: Value = serde_json::from_str(raw)?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(ChecklistError::NotAnObject(json_kind(&other))),
        }
    }

    /// Decode a possibly-NULL checklist column.
    pub fn parse_column(raw: Option<&str>) -> Result<Self, ChecklistError> {
        raw.ok_or(ChecklistError::Missing).and_then(Self::parse)
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let present = Factor::ALL
            .into_iter()
            .filter(|f| map.get(f.as_str()).is_some_and(is_truthy))
            .collect();
        Self { present }
    }

    pub fn with_present(factors: impl IntoIterator<Item = Factor>) -> Self {
        Self {
            present: factors.into_iter().collect(),
        }
    }

    pub fn is_present(&self, factor: Factor) -> bool {
        self.present.contains(&factor)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
