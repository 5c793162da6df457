//! Binding Configuration - Per-path pipeline settings
//!
//! [`BindingConfig`] is what the store keeps per path: the erased
//! transform/validator pair plus write/visibility policy. Callers build it
//! through [`BindingOptions`], the typed construction boundary - transforms
//! and validators are written against the binding's value type `T` and
//! erased here, while the tree itself stays dynamically typed.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{BindingOptions, Store, ValidationTiming};
//! use spark_form::pipeline::{required, trim, Validity};
//!
//! let store = Store::new();
//! let name = store.bind::<String>(
//!     "user.name",
//!     BindingOptions::new()
//!         .transform_value(trim())
//!         .validate_value(required())
//!         .timing(ValidationTiming::OnTouch),
//! );
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use crate::pipeline::{all, pipe, Transform, Validator, Validity};
use crate::types::{FromValue, IntoValue, Value};

// =============================================================================
// Validation Timing
// =============================================================================

/// When a field's error becomes visible to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ValidationTiming {
    /// Show once the user has interacted with the control (default).
    #[default]
    OnTouch,
    /// Always show.
    OnChange,
    /// Show once a submit has been attempted.
    OnSubmit,
}

// =============================================================================
// BindingConfig
// =============================================================================

/// Per-path configuration. One config is associated with at most one path;
/// re-binding the path replaces it.
#[derive(Clone)]
pub struct BindingConfig {
    /// Applied by the store on write, before commit.
    pub transform: Option<Transform>,
    /// Evaluated lazily when a binding's validity is read.
    pub validator: Option<Validator>,
    /// Hint for hosts that throttle write frequency. The store itself
    /// always applies writes synchronously.
    pub debounce_ms: Option<u64>,
    /// When false, per-keystroke `Input` events update adapter bookkeeping
    /// only; the write is deferred to the next committed `Change`.
    pub apply_immediately: bool,
    /// Error-visibility policy for this path's adapter.
    pub timing: ValidationTiming,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            transform: None,
            validator: None,
            debounce_ms: None,
            apply_immediately: true,
            timing: ValidationTiming::default(),
        }
    }
}

// =============================================================================
// BindingOptions - Typed construction boundary
// =============================================================================

/// Builder for a path's config, typed by the binding's value type.
///
/// Repeated `.transform(..)` calls compose left-to-right; repeated
/// `.validate(..)` calls require every rule, first failure wins.
pub struct BindingOptions<T: FromValue + IntoValue + 'static = Value> {
    transform: Option<Transform>,
    validator: Option<Validator>,
    debounce_ms: Option<u64>,
    apply_immediately: bool,
    timing: ValidationTiming,
    _value: PhantomData<T>,
}

impl<T: FromValue + IntoValue + 'static> Default for BindingOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromValue + IntoValue + 'static> BindingOptions<T> {
    /// Start from the default config.
    pub fn new() -> Self {
        Self {
            transform: None,
            validator: None,
            debounce_ms: None,
            apply_immediately: true,
            timing: ValidationTiming::default(),
            _value: PhantomData,
        }
    }

    /// Add a typed transform. Composes after any transform added earlier.
    pub fn transform(self, f: impl Fn(T) -> T + 'static) -> Self {
        let erased: Transform = Rc::new(move |value| f(T::from_value(&value)).into_value());
        self.transform_value(erased)
    }

    /// Add a pre-built `Value`-level transform (see [`crate::pipeline`]).
    pub fn transform_value(mut self, transform: Transform) -> Self {
        self.transform = Some(match self.transform.take() {
            Some(existing) => pipe(vec![existing, transform]),
            None => transform,
        });
        self
    }

    /// Add a typed validation rule. All added rules must pass.
    pub fn validate(self, f: impl Fn(&T) -> Validity + 'static) -> Self {
        let erased: Validator = Rc::new(move |value| f(&T::from_value(value)));
        self.validate_value(erased)
    }

    /// Add a pre-built `Value`-level validator (see [`crate::pipeline`]).
    pub fn validate_value(mut self, validator: Validator) -> Self {
        self.validator = Some(match self.validator.take() {
            Some(existing) => all(vec![existing, validator]),
            None => validator,
        });
        self
    }

    /// Set the write-throttling hint.
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = Some(ms);
        self
    }

    /// Control whether per-keystroke events write through (default: true).
    pub fn apply_immediately(mut self, yes: bool) -> Self {
        self.apply_immediately = yes;
        self
    }

    /// Set the error-visibility policy.
    pub fn timing(mut self, timing: ValidationTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Erase into the store-side config.
    pub(crate) fn into_config(self) -> BindingConfig {
        BindingConfig {
            transform: self.transform,
            validator: self.validator,
            debounce_ms: self.debounce_ms,
            apply_immediately: self.apply_immediately,
            timing: self.timing,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{min_length, required, trim, uppercase};

    #[test]
    fn test_default_config() {
        let config = BindingConfig::default();
        assert!(config.transform.is_none());
        assert!(config.validator.is_none());
        assert!(config.apply_immediately);
        assert_eq!(config.timing, ValidationTiming::OnTouch);
    }

    #[test]
    fn test_typed_transform_erases() {
        let config = BindingOptions::<String>::new()
            .transform(|s| format!("{}!", s))
            .into_config();
        let transform = config.transform.expect("transform set");
        assert_eq!(transform(Value::from("hi")), Value::from("hi!"));
    }

    #[test]
    fn test_transforms_compose_in_order() {
        let config = BindingOptions::<Value>::new()
            .transform_value(trim())
            .transform_value(uppercase())
            .into_config();
        let transform = config.transform.expect("transform set");
        assert_eq!(transform(Value::from(" ada ")), Value::from("ADA"));
    }

    #[test]
    fn test_typed_validator_erases() {
        let config = BindingOptions::<f64>::new()
            .validate(|n| {
                if *n >= 0.0 {
                    Validity::Valid
                } else {
                    Validity::invalid("Must not be negative")
                }
            })
            .into_config();
        let validator = config.validator.expect("validator set");
        assert!(validator(&Value::Number(1.0)).is_valid());
        assert_eq!(
            validator(&Value::Number(-1.0)).message(),
            Some("Must not be negative")
        );
    }

    #[test]
    fn test_validators_compose_first_failure_wins() {
        let config = BindingOptions::<Value>::new()
            .validate_value(required())
            .validate_value(min_length(3))
            .into_config();
        let validator = config.validator.expect("validator set");
        assert_eq!(
            validator(&Value::Null).message(),
            Some("This field is required")
        );
        assert_eq!(
            validator(&Value::from("ab")).message(),
            Some("Must be at least 3 characters")
        );
        assert!(validator(&Value::from("abc")).is_valid());
    }

    #[test]
    fn test_policy_setters() {
        let config = BindingOptions::<Value>::new()
            .debounce_ms(250)
            .apply_immediately(false)
            .timing(ValidationTiming::OnSubmit)
            .into_config();
        assert_eq!(config.debounce_ms, Some(250));
        assert!(!config.apply_immediately);
        assert_eq!(config.timing, ValidationTiming::OnSubmit);
    }
}
