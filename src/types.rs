//! Core types for spark-form.
//!
//! These types define the foundation that everything builds on.
//! The state tree stores dynamically-typed [`Value`]s; the typed surface
//! ([`FromValue`]/[`IntoValue`]) lives only at the binding-construction
//! boundary.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by subscriptions and bridges.
///
/// Call this to release the resource. Calling it is optional; dropping it
/// unused leaves the subscription in place for the store's lifetime.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Value - Dynamically typed tree storage
// =============================================================================

/// A value stored in the state tree.
///
/// `Null` doubles as the absent value: reading a path that was never
/// written yields `Null`, and no distinction is made between "written as
/// null" and "never written".
///
/// Maps use `BTreeMap` so snapshots iterate deterministically.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Absent / null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Number (all numerics are f64, as form inputs produce).
    Number(f64),
    /// String.
    Str(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested mapping (a subtree).
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create an empty map value.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Check if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow as bool if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as f64 if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow as &str if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as map if this is a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow as list if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Coerce to a number, degrading instead of failing.
    ///
    /// Strings are parsed (unparseable -> 0.0), booleans map to 1.0/0.0,
    /// everything else is 0.0. This is the numeric-field policy: bad input
    /// never aborts a write.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Str(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Value::Bool(true) => 1.0,
            _ => 0.0,
        }
    }

    /// Render as the string a text control would display.
    ///
    /// `Null` renders empty; whole numbers drop the trailing `.0` so `3.0`
    /// displays as "3".
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Str(s) => s.clone(),
            Value::List(_) | Value::Map(_) => format!("{}", self),
        }
    }

    /// Truthiness: `Null` and empty strings are false, zero and NaN are
    /// false, aggregates are always true.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

// =============================================================================
// Typed Conversion Boundary
// =============================================================================

/// Convert a typed value into tree storage.
///
/// Implemented for the primitive shapes form controls produce. Total - no
/// failure path, matching the write surface (writes never error).
pub trait IntoValue {
    /// Consume self into a [`Value`].
    fn into_value(self) -> Value;
}

/// Extract a typed value out of tree storage.
///
/// Total: absent or mismatched values coerce to the type's natural default
/// (empty string, 0.0, falsy) instead of failing, so reads never error.
pub trait FromValue: Sized {
    /// Read a typed value from a stored [`Value`].
    fn from_value(value: &Value) -> Self;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Self {
        value.clone()
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Self {
        value.truthy()
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Number(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Self {
        value.coerce_number()
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Self {
        value.display_string()
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
