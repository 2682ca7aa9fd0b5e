//! Runtime argument values passed to a prompt's backing function.
//!
//! Arguments arrive as a JSON object (MCP clients send them that way) and keep
//! their insertion order. Only the arguments the caller actually supplied are
//! present: omitted optional arguments are never filled in, so the backing
//! function applies its own defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::PromptError;

/// The argument values supplied to a single render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptArguments(Map<String, Value>);

impl PromptArguments {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, returning the updated set.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an argument value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Whether an argument with this name was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the raw value of an argument.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Get an argument as a string slice, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Get a string argument or fall back to `default`.
    ///
    /// Empty strings count as absent, matching how MCP clients send unset
    /// optional fields.
    pub fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.get_str(name) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Get a string argument that must be present.
    pub fn require_str(&self, name: &str) -> Result<&str, PromptError> {
        match self.0.get(name) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(PromptError::invalid_argument(
                name,
                format!("expected a string, got {other}"),
            )),
            None => Err(PromptError::missing_arguments([name])),
        }
    }

    /// Deserialize a single argument into `T`.
    pub fn parse<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, PromptError> {
        self.0
            .get(name)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| PromptError::invalid_argument(name, e.to_string()))
            })
            .transpose()
    }

    /// Deserialize the whole argument set into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, PromptError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| PromptError::invalid_argument("arguments", e.to_string()))
    }

    /// Iterate over the supplied arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consume the set, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PromptArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for PromptArguments {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for PromptArguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
