//! # spark-form
//!
//! Reactive form state for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity at the rendering boundary.
//!
//! ## Architecture
//!
//! One [`Store`] owns one tree of dynamically-typed values. Any
//! dot-addressed path into that tree can be bound: a [`Binding`] reads the
//! current value, writes through an optional transform/validate pipeline,
//! and notifies subscribers exactly when that path changes. An
//! [`InputAdapter`] per live control reconciles raw platform events
//! (composition start/end, change, input, focus/blur) into binding writes.
//!
//! ```text
//! Host events → InputAdapter → Binding.set → Store (transform → commit → notify)
//!                                               → subscribers / signals → re-render
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Value` union and the typed conversion boundary
//! - [`store`] - State tree, path resolution, subscriptions, batching
//! - [`pipeline`] - Built-in transforms and validators with combinators
//! - [`binding`] - Typed binding views and the signal bridge
//! - [`adapter`] - Input event state machine, attribute bundles, host glue

pub mod adapter;
pub mod binding;
pub mod pipeline;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use types::{Cleanup, FromValue, IntoValue, Value};

pub use store::{read_path, write_path, Store, Subscriber};

pub use binding::{
    validity_signal, value_signal, Binding, BindingConfig, BindingOptions, ValidationTiming,
};

pub use pipeline::{Transform, Validator, Validity};

pub use adapter::{
    convert_event, error_visible,
    AdapterFlags, CheckboxAttrs, CompositionState, ControlKind, CursorRange, EventData,
    InputAdapter, InputContext, Platform, RadioOptionAttrs, RawEvent, SelectAttrs,
    SelectionTarget, TextEditState, TextInputAttrs,
};

// No-op logging macro used when the `tracing` feature is disabled.
// Modules import `tracing::trace` or `crate::trace` depending on the
// feature, so call sites stay identical either way.
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
