use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::registry::{FieldKind, Registry};

/// A single answer slot. Choices are carried as text, so the JSON shape is
/// plain strings, numbers, and booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The all-default value a fresh record carries for `kind`.
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::LongText | FieldKind::Choice => {
                FieldValue::Text(String::new())
            }
            FieldKind::Integer | FieldKind::Rating => FieldValue::Integer(0),
            FieldKind::Boolean | FieldKind::Declaration => FieldValue::Bool(false),
        }
    }

    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        match self {
            FieldValue::Text(_) => kind.is_textual(),
            FieldValue::Integer(_) => matches!(kind, FieldKind::Integer | FieldKind::Rating),
            FieldValue::Bool(_) => matches!(kind, FieldKind::Boolean | FieldKind::Declaration),
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Bool(flag) => flag.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Bool(flag)
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cbor encode error: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("record carries unknown field '{0}'")]
    UnknownField(String),
}

/// Flat record of every answer, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, FieldValue>,
}

impl AnswerRecord {
    /// Fresh record with one all-default entry per registry field.
    pub fn with_defaults(registry: &Registry) -> Self {
        let values = registry
            .fields()
            .map(|field| (field.name.clone(), FieldValue::default_for(field.kind)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text content of `name`; empty string when absent or non-textual.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Integer content of `name`; zero when absent or non-numeric.
    pub fn integer(&self, name: &str) -> i64 {
        self.get(name).and_then(FieldValue::as_integer).unwrap_or(0)
    }

    /// Boolean content of `name`; false when absent or non-boolean.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name)
            .and_then(FieldValue::as_bool)
            .unwrap_or(false)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Rejects entries for fields the registry does not declare.
    pub fn check_against(&self, registry: &Registry) -> Result<(), RecordError> {
        for name in self.values.keys() {
            if registry.field(name).is_none() {
                return Err(RecordError::UnknownField(name.clone()));
            }
        }
        Ok(())
    }

    pub fn to_value(&self) -> Result<Value, RecordError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, RecordError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}
