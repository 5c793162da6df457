//! Reactive Bridge - Bindings as signals
//!
//! Mirrors a binding into spark-signals primitives so signal-driven
//! renderers re-run exactly when the bound path changes. The signal is the
//! reactive-read side only; writes still go through the binding.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{value_signal, Store};
//! use spark_signals::effect;
//!
//! let store = Store::new();
//! let name = store.binding("user.name");
//! let (sig, cleanup) = value_signal(&name);
//!
//! let _render = effect(move || {
//!     println!("name is now {}", sig.get());
//! });
//!
//! name.set_value("Ada".into()); // effect re-runs
//! cleanup();
//! ```

use spark_signals::{derived, signal, Derived, Signal};

use crate::pipeline::Validity;
use crate::types::{Cleanup, FromValue, IntoValue, Value};

use super::Binding;

/// A signal tracking the binding's stored value, kept in sync by
/// subscription. The cleanup tears the subscription down; the signal
/// simply stops updating afterwards.
pub fn value_signal<T>(binding: &Binding<T>) -> (Signal<Value>, Cleanup)
where
    T: FromValue + IntoValue + 'static,
{
    let sig = signal(binding.raw());
    let sig_clone = sig.clone();
    let cleanup = binding.subscribe(move |value, _path| {
        sig_clone.set(value.clone());
    });
    (sig, cleanup)
}

/// A derived validity verdict that recomputes when the bound value
/// changes.
pub fn validity_signal<T>(
    binding: &Binding<T>,
) -> (Derived<Validity>, Cleanup)
where
    T: FromValue + IntoValue + 'static,
{
    let (value_sig, cleanup) = value_signal(binding);
    let binding = binding.clone();
    let validity = derived(move || {
        let _ = value_sig.get(); // track the value dependency
        binding.validity()
    });
    (validity, cleanup)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingOptions;
    use crate::pipeline::required;
    use crate::store::Store;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_value_signal_tracks_writes() {
        let store = Store::new();
        let binding = store.binding("x");
        let (sig, _cleanup) = value_signal(&binding);

        assert_eq!(sig.get(), Value::Null);
        binding.set_value(Value::from("hi"));
        assert_eq!(sig.get(), Value::from("hi"));
    }

    #[test]
    fn test_value_signal_stops_after_cleanup() {
        let store = Store::new();
        let binding = store.binding("x");
        let (sig, cleanup) = value_signal(&binding);

        binding.set_value(Value::Number(1.0));
        cleanup();
        binding.set_value(Value::Number(2.0));
        assert_eq!(sig.get(), Value::Number(1.0));
    }

    #[test]
    fn test_value_signal_drives_effects() {
        let store = Store::new();
        let binding = store.binding("x");
        let (sig, _cleanup) = value_signal(&binding);

        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let _stop = effect(move || {
            let _ = sig.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        binding.set_value(Value::from("a"));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_validity_signal_follows_value() {
        let store = Store::new();
        let binding = store.bind::<String>(
            "name",
            BindingOptions::new().validate_value(required()),
        );
        let (validity, _cleanup) = validity_signal(&binding);

        assert!(!validity.get().is_valid());
        binding.set("Ada".to_string());
        assert!(validity.get().is_valid());
    }
}
