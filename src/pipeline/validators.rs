//! Built-in Validators - Advisory validity rules
//!
//! A validator is a pure function from a stored value to [`Validity`]:
//! `Valid`, or `Invalid` carrying a human-readable message. Validity is
//! data, never an error path, and never blocks a write - the store commits
//! invalid values and the binding exposes the verdict on read.
//!
//! Emptiness is [`required`]'s concern alone: `email` passes empty values
//! so optional fields validate cleanly, while the length and range rules
//! measure whatever is there.

use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::Value;

// =============================================================================
// Validity
// =============================================================================

/// Outcome of validating a stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validity {
    /// The value passed.
    Valid,
    /// The value failed; the message is ready to show to a person.
    Invalid(String),
}

impl Validity {
    /// True when `Valid`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    /// The failure message, when invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid(message) => Some(message),
        }
    }

    /// Build a failure with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Validity::Invalid(message.into())
    }
}

/// A validation rule: pure function from stored value to verdict.
pub type Validator = Rc<dyn Fn(&Value) -> Validity>;

// =============================================================================
// Built-in Rules
// =============================================================================

/// Reject `Null` and empty strings.
pub fn required() -> Validator {
    Rc::new(|value| {
        let empty = match value {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            Validity::invalid("This field is required")
        } else {
            Validity::Valid
        }
    })
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Email shape check. Empty values pass; anything non-empty must match.
pub fn email() -> Validator {
    Rc::new(|value| {
        let text = value.display_string();
        if text.is_empty() || email_pattern().is_match(&text) {
            Validity::Valid
        } else {
            Validity::invalid("Please enter a valid email address")
        }
    })
}

/// Minimum length in characters of the value's display string.
pub fn min_length(min: usize) -> Validator {
    Rc::new(move |value| {
        if value.display_string().chars().count() < min {
            Validity::invalid(format!("Must be at least {} characters", min))
        } else {
            Validity::Valid
        }
    })
}

/// Maximum length in characters of the value's display string.
pub fn max_length(max: usize) -> Validator {
    Rc::new(move |value| {
        if value.display_string().chars().count() > max {
            Validity::invalid(format!("Must be at most {} characters", max))
        } else {
            Validity::Valid
        }
    })
}

/// Inclusive numeric range over the coerced number.
pub fn range(min: f64, max: f64) -> Validator {
    Rc::new(move |value| {
        let number = value.coerce_number();
        if number < min || number > max {
            Validity::invalid(format!("Must be between {} and {}", min, max))
        } else {
            Validity::Valid
        }
    })
}

/// Require every rule in the list to pass, short-circuiting on the first
/// failure.
pub fn all(validators: Vec<Validator>) -> Validator {
    Rc::new(move |value| {
        for validator in &validators {
            let verdict = validator(value);
            if !verdict.is_valid() {
                return verdict;
            }
        }
        Validity::Valid
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(!required()(&Value::Null).is_valid());
        assert!(!required()(&Value::from("")).is_valid());
        assert_eq!(
            required()(&Value::Null).message(),
            Some("This field is required")
        );
        assert!(required()(&Value::from("x")).is_valid());
        assert!(required()(&Value::Number(0.0)).is_valid());
        assert!(required()(&Value::Bool(false)).is_valid());
    }

    #[test]
    fn test_email_rejects_with_exact_message() {
        let verdict = email()(&Value::from("not-an-email"));
        assert_eq!(
            verdict,
            Validity::Invalid("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn test_email_accepts() {
        assert_eq!(email()(&Value::from("a@b.com")), Validity::Valid);
        assert_eq!(email()(&Value::from("first.last@sub.example.org")), Validity::Valid);
    }

    #[test]
    fn test_email_passes_empty() {
        assert!(email()(&Value::Null).is_valid());
        assert!(email()(&Value::from("")).is_valid());
    }

    #[test]
    fn test_email_rejects_spaces_and_missing_parts() {
        assert!(!email()(&Value::from("a b@c.com")).is_valid());
        assert!(!email()(&Value::from("a@b")).is_valid());
        assert!(!email()(&Value::from("@b.com")).is_valid());
    }

    #[test]
    fn test_length_bounds() {
        assert!(min_length(3)(&Value::from("abc")).is_valid());
        assert!(!min_length(3)(&Value::from("ab")).is_valid());
        assert_eq!(
            min_length(3)(&Value::from("ab")).message(),
            Some("Must be at least 3 characters")
        );
        assert!(max_length(3)(&Value::from("abc")).is_valid());
        assert!(!max_length(3)(&Value::from("abcd")).is_valid());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert!(min_length(3)(&Value::from("äöü")).is_valid());
        assert!(max_length(3)(&Value::from("äöü")).is_valid());
    }

    #[test]
    fn test_range_is_inclusive() {
        let rule = range(1.0, 10.0);
        assert!(rule(&Value::Number(1.0)).is_valid());
        assert!(rule(&Value::Number(10.0)).is_valid());
        assert!(!rule(&Value::Number(0.5)).is_valid());
        assert!(!rule(&Value::Number(10.5)).is_valid());
        assert_eq!(
            rule(&Value::Number(0.0)).message(),
            Some("Must be between 1 and 10")
        );
    }

    #[test]
    fn test_range_coerces_strings() {
        let rule = range(1.0, 10.0);
        assert!(rule(&Value::from("5")).is_valid());
        // "abc" coerces to 0.0, below the bound.
        assert!(!rule(&Value::from("abc")).is_valid());
    }

    #[test]
    fn test_all_short_circuits_on_first_failure() {
        let rule = all(vec![required(), min_length(5)]);
        assert_eq!(
            rule(&Value::Null).message(),
            Some("This field is required")
        );
        assert_eq!(
            rule(&Value::from("ab")).message(),
            Some("Must be at least 5 characters")
        );
        assert!(rule(&Value::from("hello")).is_valid());
    }

    #[test]
    fn test_all_empty_is_valid() {
        assert!(all(vec![])(&Value::Null).is_valid());
    }
}
