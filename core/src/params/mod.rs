//! Node parameters and their parsing.
//!
//! A node editor hands every parameter over as raw text. Operations pull what
//! they need out of [`Params`] and convert it with the lenient helpers below:
//! text that does not parse is replaced by a documented default and never
//! fails an evaluation. The strict parser underneath is exposed for tooling
//! that wants to explain a fallback.

mod error;
mod parser;

#[cfg(test)]
mod literal_test;


pub use error::{LiteralError, LiteralErrorKind, Span};
pub use parser::{
    Literal, LiteralParser, MAX_LITERAL_DEPTH, Rule, parse_literal, parse_shape, parse_value,
    parse_vector,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::values::{Shape, Value};

/// Fallback for an array literal that does not parse.
pub const FALLBACK_ARRAY: [f64; 3] = [1.0, 2.0, 3.0];

/// Fallback for a shape literal that does not parse.
pub const FALLBACK_SHAPE: usize = 3;

/// Raw parameter text of one node, keyed by parameter name.
///
/// Keys are kept sorted, which makes [`Params::cache_key`] canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The trimmed value of `key`. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// The value exactly as authored.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical JSON of the mapping, used to key the result cache.
    pub fn cache_key(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Accepts any JSON object, or `null` as the empty mapping. Strings are kept
/// verbatim, other scalars and arrays are stringified, null values are dropped.
impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect())
    }
}

/// Parse a flat array literal such as `"[1, 2, 3]"`, falling back to `[1, 2, 3]`.
pub fn parse_array_literal(text: &str) -> Vec<f64> {
    parse_vector(text).unwrap_or_else(|err| {
        tracing::debug!(input = text, error = %err, "array literal fell back to default");
        FALLBACK_ARRAY.to_vec()
    })
}

/// Parse an array literal of rank 0, 1 or 2, falling back to the vector `[1, 2, 3]`.
pub fn parse_array_value(text: &str) -> Value {
    parse_value(text).unwrap_or_else(|err| {
        tracing::debug!(input = text, error = %err, "array literal fell back to default");
        Value::Vector(FALLBACK_ARRAY.to_vec())
    })
}

/// Parse a shape literal such as `"(3, 3)"`, falling back to `[3]`.
pub fn parse_shape_literal(text: &str) -> Shape {
    parse_shape(text).unwrap_or_else(|err| {
        tracing::debug!(input = text, error = %err, "shape literal fell back to default");
        smallvec::smallvec![FALLBACK_SHAPE]
    })
}

/// Parse a finite float, or return `default`.
pub fn parse_float_or(text: Option<&str>, default: f64) -> f64 {
    match text.map(|t| t.trim().parse::<f64>()) {
        Some(Ok(value)) if value.is_finite() => value,
        None => default,
        Some(_) => {
            tracing::debug!(input = text, default, "float parameter fell back to default");
            default
        }
    }
}

/// Parse an integer count, truncating finite fractional input, or return `default`.
pub fn parse_count_or(text: Option<&str>, default: i64) -> i64 {
    let Some(text) = text.map(str::trim) else {
        return default;
    };
    if let Ok(count) = text.parse::<i64>() {
        return count;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => {
            tracing::debug!(input = text, default, "count parameter fell back to default");
            default
        }
    }
}
