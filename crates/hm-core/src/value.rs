use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HmValue {
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<HmValue>),
    Map(BTreeMap<String, HmValue>),
}

impl HmValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[HmValue]> {
        match self {
            Self::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Text spliced into a prompt in place of a `{{name}}` placeholder.
    pub fn to_prompt_text(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Array(values) => values
                .iter()
                .map(HmValue::to_prompt_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_json_text(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(value) => JsonValue::Bool(*value),
            Self::Number(value) => number_to_json(*value),
            Self::String(value) => JsonValue::String(value.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(HmValue::to_json).collect()),
            Self::Map(values) => JsonValue::Object(
                values
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn to_json_text(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<JsonValue> for HmValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => HmValue::String("null".to_string()),
            JsonValue::Bool(value) => HmValue::Bool(value),
            JsonValue::Number(value) => HmValue::Number(value.as_f64().unwrap_or(0.0)),
            JsonValue::String(value) => HmValue::String(value),
            JsonValue::Array(values) => {
                HmValue::Array(values.into_iter().map(HmValue::from).collect())
            }
            JsonValue::Object(values) => HmValue::Map(
                values
                    .into_iter()
                    .map(|(key, value)| (key, HmValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for HmValue {
    fn from(value: &str) -> Self {
        HmValue::String(value.to_string())
    }
}

impl From<String> for HmValue {
    fn from(value: String) -> Self {
        HmValue::String(value)
    }
}

fn number_to_json(value: f64) -> JsonValue {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return JsonValue::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}
