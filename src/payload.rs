// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The shared payload mapping converters read from and write into.
//!
//! A [`Payload`] is a mutable string-keyed scratch buffer passed through a
//! chain of decode/encode calls. Multiple converters may write into the same
//! payload in sequence, so call order matters for converters that depend on
//! related attributes.

use serde_json::{Map, Value};

use crate::error::ValueError;

/// A mutable mapping from attribute name to an arbitrary JSON value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yeepro_lib::Payload;
///
/// let mut payload = Payload::new();
/// payload.insert("brightness", json!(191));
///
/// assert_eq!(payload.get("brightness"), Some(&json!(191)));
/// assert_eq!(payload.into_value(), json!({"brightness": 191}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Inserts a value under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if no converter has written anything yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Copies every entry of `other` into this payload, overwriting
    /// entries with the same key.
    pub fn merge(&mut self, other: &Map<String, Value>) {
        for (key, value) in other {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the attribute names currently present.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consumes the payload and returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Consumes the payload and returns it as a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Coerces a payload value into a number, accepting numeric strings the way
/// the gateway protocol emits them.
pub(crate) fn as_number(value: &Value) -> Result<f64, ValueError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| not_numeric(value)),
        Value::String(s) => s.trim().parse().map_err(|_| not_numeric(value)),
        _ => Err(not_numeric(value)),
    }
}

/// Coerces a payload value into an integer, truncating fractional numbers
/// toward zero.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn as_integer(value: &Value) -> Result<i64, ValueError> {
    as_number(value).map(|n| n.trunc() as i64)
}

/// Coerces a payload value into a boolean, treating any non-zero number as
/// `true`.
pub(crate) fn as_boolean(value: &Value) -> Result<bool, ValueError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        _ => Err(ValueError::NotBoolean(value.to_string())),
    }
}

fn not_numeric(value: &Value) -> ValueError {
    ValueError::NotNumeric(value.to_string())
}
