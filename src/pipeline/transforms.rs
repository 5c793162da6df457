//! Built-in Transforms - Write-time value shaping
//!
//! A transform is a pure `Value -> Value` function applied by the store on
//! write, before commit. Factories here return ready-made transforms; [`pipe`]
//! chains a list left-to-right.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::pipeline::{pipe, trim, uppercase};
//!
//! let shout = pipe(vec![trim(), uppercase()]);
//! ```

use std::rc::Rc;

use crate::types::Value;

/// A write-time transform: pure function from input value to stored value.
pub type Transform = Rc<dyn Fn(Value) -> Value>;

/// Trim leading/trailing whitespace from string values. Non-strings pass
/// through untouched.
pub fn trim() -> Transform {
    Rc::new(|value| match value {
        Value::Str(s) => Value::Str(s.trim().to_string()),
        other => other,
    })
}

/// Uppercase string values. Non-strings pass through untouched.
pub fn uppercase() -> Transform {
    Rc::new(|value| match value {
        Value::Str(s) => Value::Str(s.to_uppercase()),
        other => other,
    })
}

/// Lowercase string values. Non-strings pass through untouched.
pub fn lowercase() -> Transform {
    Rc::new(|value| match value {
        Value::Str(s) => Value::Str(s.to_lowercase()),
        other => other,
    })
}

/// Numeric coercion: parse the input as a number, storing `Number(0.0)`
/// when it does not parse. Never fails the write.
pub fn to_number() -> Transform {
    Rc::new(|value| Value::Number(value.coerce_number()))
}

/// Currency formatting: coerce to a number and store it as a string with
/// the given symbol prefix and two decimals ("$12.50").
pub fn currency(symbol: impl Into<String>) -> Transform {
    let symbol = symbol.into();
    Rc::new(move |value| Value::Str(format!("{}{:.2}", symbol, value.coerce_number())))
}

/// Chain transforms left-to-right: the output of each feeds the next.
pub fn pipe(transforms: Vec<Transform>) -> Transform {
    Rc::new(move |value| {
        transforms
            .iter()
            .fold(value, |current, transform| transform(current))
    })
}

// =============================================================================
// Tests
// =============================================================================
