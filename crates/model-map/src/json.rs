//! Typed field extraction over `serde_json::Value`
//!
//! Decoders never index a `Value` directly. They go through [`Fields`], which
//! resolves a fixed key name, applies the absent/null/default rules and
//! reports failures with the dotted path of the offending field.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::error::{MapError, Result};
use crate::options::DecodeOptions;

/// Path reported for errors about the top-level value itself
pub(crate) const ROOT: &str = "$";

/// The six kinds a JSON value can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(name)
    }
}

pub(crate) fn mismatch(field: &str, expected: JsonKind, found: &Value) -> MapError {
    MapError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: JsonKind::of(found),
    }
}

/// Borrow the elements of a top-level JSON array
pub(crate) fn elements(value: &Value) -> Result<&[Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(ROOT, JsonKind::Array, other)),
    }
}

/// Read-only view over the keys of one JSON object.
///
/// A view may also stand for a nested key whose value is `null`; every
/// lookup on such a view is absent.
#[derive(Debug, Clone)]
pub(crate) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    path: String,
    options: DecodeOptions,
}

impl<'a> Fields<'a> {
    /// View a top-level value, which must be a JSON object
    pub fn of(value: &'a Value, options: DecodeOptions) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map: Some(map),
                path: String::new(),
                options,
            }),
            other => Err(mismatch(ROOT, JsonKind::Object, other)),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Present, non-null value at `key`.
    ///
    /// Missing and `null` both come back as `None`, except that a missing
    /// `required` key fails in strict mode. A view over a `null` parent has
    /// no keys to miss, so its lookups are always `None`.
    fn lookup(&self, key: &str, required: bool) -> Result<Option<&'a Value>> {
        let Some(map) = self.map else {
            return Ok(None);
        };
        match map.get(key) {
            Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(value)),
            None if required && self.options.is_strict() => Err(MapError::MissingField {
                field: self.path_of(key),
            }),
            None => Ok(None),
        }
    }

    pub fn string(&self, key: &str) -> Result<String> {
        match self.lookup(key, true)? {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(mismatch(&self.path_of(key), JsonKind::String, other)),
            None => Ok(String::new()),
        }
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>> {
        match self.lookup(key, false)? {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(&self.path_of(key), JsonKind::String, other)),
            None => Ok(None),
        }
    }

    pub fn long(&self, key: &str) -> Result<i64> {
        let Some(value) = self.lookup(key, true)? else {
            return Ok(0);
        };
        let field = self.path_of(key);
        let Value::Number(n) = value else {
            return Err(mismatch(&field, JsonKind::Number, value));
        };

        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        match n.as_f64() {
            // Fractional values are truncated toward zero
            Some(f) if n.is_f64() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(f.trunc() as i64)
            }
            _ => Err(MapError::OutOfRange {
                field,
                value: n.to_string(),
            }),
        }
    }

    pub fn int(&self, key: &str) -> Result<i32> {
        let value = self.long(key)?;
        i32::try_from(value).map_err(|_| MapError::OutOfRange {
            field: self.path_of(key),
            value: value.to_string(),
        })
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        match self.lookup(key, true)? {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(&self.path_of(key), JsonKind::Bool, other)),
            None => Ok(false),
        }
    }

    /// RFC 3339 timestamp. Timestamps are never optional: an absent or
    /// `null` value is a parse failure rather than a default.
    pub fn timestamp(&self, key: &str) -> Result<DateTime<FixedOffset>> {
        let field = self.path_of(key);
        match self.lookup(key, true)? {
            Some(Value::String(s)) => {
                DateTime::parse_from_rfc3339(s).map_err(|e| MapError::TimestampParse {
                    field,
                    value: s.clone(),
                    reason: e.to_string(),
                })
            }
            Some(other) => Err(mismatch(&field, JsonKind::String, other)),
            None => Err(MapError::TimestampParse {
                field,
                value: String::new(),
                reason: "no timestamp present".to_string(),
            }),
        }
    }

    /// Array of strings. `None` when the key is absent or `null`, so callers
    /// can tell a missing array from an empty one.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let field = self.path_of(key);
        match self.lookup(key, false)? {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(mismatch(
                        &format!("{}[{}]", field, i),
                        JsonKind::String,
                        other,
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(mismatch(&field, JsonKind::Array, other)),
            None => Ok(None),
        }
    }

    /// Nested object view, `None` iff the key is missing
    pub fn nested(&self, key: &str) -> Result<Option<Fields<'a>>> {
        let Some(map) = self.map else {
            return Ok(None);
        };
        let path = self.path_of(key);
        match map.get(key) {
            None => Ok(None),
            Some(Value::Object(inner)) => Ok(Some(Fields {
                map: Some(inner),
                path,
                options: self.options,
            })),
            Some(Value::Null) => Ok(Some(Fields {
                map: None,
                path,
                options: self.options,
            })),
            Some(other) => Err(mismatch(&path, JsonKind::Object, other)),
        }
    }
}

/// Builds a JSON object from optional values, skipping unset ones
#[derive(Debug, Default)]
pub(crate) struct ObjectBuilder {
    map: Map<String, Value>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(s) = value {
            self.map.insert(key.to_string(), Value::String(s.to_string()));
        }
        self
    }

    pub fn bool(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(b) = value {
            self.map.insert(key.to_string(), Value::Bool(b));
        }
        self
    }

    pub fn strings(mut self, key: &str, values: Option<&[String]>) -> Self {
        if let Some(items) = values {
            let array = items.iter().cloned().map(Value::String).collect();
            self.map.insert(key.to_string(), Value::Array(array));
        }
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}
