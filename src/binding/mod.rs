//! Binding - Typed view over one addressable slot
//!
//! A binding is `(Store, path, config)`: it owns nothing and caches
//! nothing. `value`, `is_valid`, and `error` are recomputed from the store
//! on every access, so a binding can be created, cloned, and dropped
//! freely - the store is held as an explicit shared handle and outlives
//! every binding derived from it.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{BindingOptions, Store};
//! use spark_form::pipeline::{required, trim};
//!
//! let store = Store::new();
//! let name = store.bind::<String>(
//!     "user.name",
//!     BindingOptions::new()
//!         .transform_value(trim())
//!         .validate_value(required()),
//! );
//!
//! name.set("  Ada  ".to_string());
//! assert_eq!(name.get(), "Ada");
//! assert!(name.is_valid());
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use crate::pipeline::{pipe, Transform, Validity};
use crate::store::Store;
use crate::types::{Cleanup, FromValue, IntoValue, Value};

mod config;
mod reactive;

pub use config::{BindingConfig, BindingOptions, ValidationTiming};
pub use reactive::{validity_signal, value_signal};

/// Suffix appended to a path to name its derived sibling slot.
const DERIVED_SUFFIX: &str = "_transformed";

// =============================================================================
// Binding
// =============================================================================

/// Typed view over one path in a store. See the module docs.
pub struct Binding<T: FromValue + IntoValue + 'static = Value> {
    store: Store,
    path: String,
    config: BindingConfig,
    _value: PhantomData<T>,
}

impl<T: FromValue + IntoValue + 'static> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            path: self.path.clone(),
            config: self.config.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: FromValue + IntoValue + 'static> Binding<T> {
    pub(crate) fn new(store: Store, path: &str, config: BindingConfig) -> Self {
        Self {
            store,
            path: path.to_string(),
            config,
            _value: PhantomData,
        }
    }

    /// The path this binding addresses.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The owning store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// This binding's config.
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    // =========================================================================
    // Read / Write
    // =========================================================================

    /// The current stored value, untyped.
    pub fn raw(&self) -> Value {
        self.store.read(&self.path)
    }

    /// The current value, read through the typed boundary.
    pub fn get(&self) -> T {
        T::from_value(&self.raw())
    }

    /// Write a typed value through the store pipeline.
    pub fn set(&self, value: T) {
        self.store.write(&self.path, value.into_value());
    }

    /// Write an untyped value through the store pipeline.
    pub fn set_value(&self, value: Value) {
        self.store.write(&self.path, value);
    }

    // =========================================================================
    // Validity
    // =========================================================================

    /// Evaluate the configured validator against the current value.
    /// With no validator the binding is always valid.
    pub fn validity(&self) -> Validity {
        match &self.config.validator {
            Some(validator) => validator(&self.raw()),
            None => Validity::Valid,
        }
    }

    /// True when the current value passes validation.
    pub fn is_valid(&self) -> bool {
        self.validity().is_valid()
    }

    /// The current failure message, if any.
    pub fn error(&self) -> Option<String> {
        self.validity().message().map(str::to_string)
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Observe writes to this binding's path.
    pub fn subscribe(&self, callback: impl Fn(&Value, &str) + 'static) -> Cleanup {
        self.store.subscribe(&self.path, callback)
    }

    // =========================================================================
    // Derived Binding
    // =========================================================================

    /// Create a derived snapshot binding at the sibling slot
    /// `"{path}_transformed"`, whose transform runs this binding's
    /// transform first and then `f`.
    ///
    /// The derived slot is independently addressable storage, not a live
    /// projection: writes to it do not round-trip to the parent, and it
    /// only reflects the parent after its own writes.
    pub fn transform(&self, f: impl Fn(T) -> T + 'static) -> Binding<T> {
        let derived_path = format!("{}{}", self.path, DERIVED_SUFFIX);
        let erased: Transform = Rc::new(move |value| f(T::from_value(&value)).into_value());
        let composed = match &self.config.transform {
            Some(parent) => pipe(vec![parent.clone(), erased]),
            None => erased,
        };

        let mut config = self.config.clone();
        config.transform = Some(composed);
        self.store.bind_config(&derived_path, config.clone());
        Binding::new(self.store.clone(), &derived_path, config)
    }
}

// =============================================================================
// Tests
// =============================================================================
