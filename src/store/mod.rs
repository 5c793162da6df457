//! Store - The path-addressable state tree
//!
//! One `Store` owns one tree of [`Value`]s. All mutation goes through
//! [`Store::write`], which runs the path's registered transform (if any),
//! commits, and then notifies that path's subscribers - in that order,
//! always synchronously.
//!
//! `Store` is a cheap-clone handle over shared single-threaded state, the
//! same shape as a signal handle: clone it freely, hand it to bindings and
//! adapters, and the underlying tree lives until the last handle drops.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{Store, Value};
//!
//! let store = Store::new();
//! let cleanup = store.subscribe("user.name", |value, path| {
//!     println!("{} changed to {}", path, value);
//! });
//!
//! store.write("user.name", "Ada");
//! assert_eq!(store.read("user.name"), Value::from("Ada"));
//! cleanup();
//! ```
//!
//! # Reentrancy
//!
//! Writes and notifications are synchronous. A subscriber that writes to
//! the path it observes recurses synchronously; not doing so is a caller
//! obligation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::binding::{Binding, BindingConfig, BindingOptions};
use crate::types::{Cleanup, FromValue, IntoValue, Value};

mod path;
mod subscribers;

pub use path::{read_path, write_path};
pub use subscribers::Subscriber;

use subscribers::SubscriberRegistry;

#[cfg(feature = "tracing")]
use tracing::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

// =============================================================================
// Store Handle
// =============================================================================

/// Shared handle to a state tree and its pipeline configuration.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

struct StoreInner {
    state: RefCell<Value>,
    configs: RefCell<HashMap<String, BindingConfig>>,
    subscribers: RefCell<SubscriberRegistry>,
    batch: RefCell<BatchState>,
}

struct BatchState {
    depth: u32,
    /// Paths written during the current batch, in first-write order.
    dirty: Vec<String>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store with an empty root map.
    pub fn new() -> Self {
        Self::with_initial(Value::map())
    }

    /// Create a store seeded with an initial tree.
    ///
    /// The root must be a map; any other value is replaced by an empty map.
    pub fn with_initial(initial: Value) -> Self {
        let root = match initial {
            Value::Map(_) => initial,
            _ => Value::map(),
        };
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(root),
                configs: RefCell::new(HashMap::new()),
                subscribers: RefCell::new(SubscriberRegistry::new()),
                batch: RefCell::new(BatchState {
                    depth: 0,
                    dirty: Vec::new(),
                }),
            }),
        }
    }

    // =========================================================================
    // Read / Write
    // =========================================================================

    /// Read the value at a path. Absent paths yield `Value::Null`.
    pub fn read(&self, path: &str) -> Value {
        read_path(&self.inner.state.borrow(), path)
    }

    /// Write a value at a path.
    ///
    /// If the path has a registered transform, the stored value is the
    /// transform's output. The transform runs before any tree mutation, so
    /// a panicking transform aborts the write with no partial commit.
    ///
    /// Validation is not evaluated here - it is read lazily through a
    /// binding's `is_valid`/`error`. Subscribers of exactly this path are
    /// notified with the committed value, after commit (or once, at batch
    /// end, when inside [`Store::batch`]).
    pub fn write(&self, path: &str, value: impl IntoValue) {
        let mut value = value.into_value();

        let transform = self
            .inner
            .configs
            .borrow()
            .get(path)
            .and_then(|config| config.transform.clone());
        if let Some(transform) = transform {
            value = transform(value);
        }

        {
            let mut state = self.inner.state.borrow_mut();
            write_path(&mut state, path, value.clone());
        }
        trace!(path, "write committed");

        let deferred = {
            let mut batch = self.inner.batch.borrow_mut();
            if batch.depth > 0 {
                if !batch.dirty.iter().any(|dirty| dirty == path) {
                    batch.dirty.push(path.to_string());
                }
                true
            } else {
                false
            }
        };
        if !deferred {
            self.notify(path, &value);
        }
    }

    fn notify(&self, path: &str, value: &Value) {
        // Snapshot before calling out: no registry borrow is held while a
        // callback runs, so callbacks may subscribe/unsubscribe freely.
        let callbacks = self.inner.subscribers.borrow().snapshot(path);
        trace!(path, subscribers = callbacks.len(), "notify");
        for callback in callbacks {
            callback(value, path);
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Subscribe a callback to a path. Returns a call-once cleanup that
    /// removes it; removing the last subscriber for a path drops the
    /// path's entry entirely.
    pub fn subscribe(&self, path: &str, callback: impl Fn(&Value, &str) + 'static) -> Cleanup {
        self.subscribe_shared(path, Rc::new(callback))
    }

    /// Subscribe an explicitly shared callback.
    ///
    /// The same `Rc` registered twice on one path is a single entry; the
    /// returned cleanup removes that single entry.
    pub fn subscribe_shared(&self, path: &str, callback: Subscriber) -> Cleanup {
        let id = self.inner.subscribers.borrow_mut().add(path, callback);
        let inner = Rc::clone(&self.inner);
        let path = path.to_string();
        Box::new(move || {
            inner.subscribers.borrow_mut().remove(&path, id);
        })
    }

    /// Number of subscribers currently registered for a path.
    pub fn subscriber_count(&self, path: &str) -> usize {
        self.inner.subscribers.borrow().count(path)
    }

    // =========================================================================
    // Binding Configuration
    // =========================================================================

    /// Associate a config with a path. Last write wins; re-binding a path
    /// replaces its config.
    pub fn bind_config(&self, path: &str, config: BindingConfig) {
        self.inner
            .configs
            .borrow_mut()
            .insert(path.to_string(), config);
    }

    /// The config registered for a path, if any.
    pub fn config_for(&self, path: &str) -> Option<BindingConfig> {
        self.inner.configs.borrow().get(path).cloned()
    }

    /// Register a typed config and return the binding view over it.
    ///
    /// This is the typed construction boundary: `options` carries
    /// transforms/validators written against `T`, erased here into the
    /// dynamically-typed pipeline.
    pub fn bind<T>(&self, path: &str, options: BindingOptions<T>) -> Binding<T>
    where
        T: FromValue + IntoValue + 'static,
    {
        let config = options.into_config();
        self.bind_config(path, config.clone());
        Binding::new(self.clone(), path, config)
    }

    /// An untyped binding view over the path's registered config (or a
    /// default config if none is registered).
    pub fn binding(&self, path: &str) -> Binding<Value> {
        let config = self.config_for(path).unwrap_or_default();
        Binding::new(self.clone(), path, config)
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// A detached copy of the whole tree. Not reactive; later writes do
    /// not show through.
    pub fn snapshot(&self) -> Value {
        self.inner.state.borrow().clone()
    }

    // =========================================================================
    // Batching
    // =========================================================================

    /// Run a scope with notification deferral.
    ///
    /// Writes inside the scope commit immediately, but subscribers fire
    /// only when the outermost batch scope exits - at most once per
    /// affected path, with that path's final value. Scopes nest.
    pub fn batch<R>(&self, scope: impl FnOnce() -> R) -> R {
        self.inner.batch.borrow_mut().depth += 1;
        let guard = DepthGuard {
            inner: Rc::clone(&self.inner),
        };
        let result = scope();
        drop(guard);

        if self.inner.batch.borrow().depth == 0 {
            self.flush_dirty();
        }
        result
    }

    fn flush_dirty(&self) {
        let dirty = std::mem::take(&mut self.inner.batch.borrow_mut().dirty);
        for path in dirty {
            let value = self.read(&path);
            self.notify(&path, &value);
        }
    }
}

/// Decrements batch depth even if the scope unwinds. Flushing stays on the
/// normal path only.
struct DepthGuard {
    inner: Rc<StoreInner>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        let mut batch = self.inner.batch.borrow_mut();
        batch.depth = batch.depth.saturating_sub(1);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{to_number, uppercase};
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_write_then_read_no_config() {
        let store = Store::new();
        store.write("user.name", "Ada");
        assert_eq!(store.read("user.name"), Value::from("Ada"));
    }

    #[test]
    fn test_read_missing_is_null() {
        let store = Store::new();
        assert_eq!(store.read("nothing.here"), Value::Null);
    }

    #[test]
    fn test_write_creates_nested_maps() {
        let store = Store::new();
        store.write("a.b.c", 1.0);
        assert!(matches!(store.read("a"), Value::Map(_)));
        assert!(matches!(store.read("a.b"), Value::Map(_)));
        assert_eq!(store.read("a.b.c"), Value::Number(1.0));
    }

    #[test]
    fn test_transform_applied_exactly_once() {
        let store = Store::new();
        let mut config = BindingConfig::default();
        config.transform = Some(uppercase());
        store.bind_config("name", config);

        store.write("name", "ada");
        assert_eq!(store.read("name"), Value::from("ADA"));
    }

    #[test]
    fn test_subscriber_receives_committed_value() {
        let store = Store::new();
        let mut config = BindingConfig::default();
        config.transform = Some(to_number());
        store.bind_config("age", config);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = store.subscribe("age", move |value, path| {
            seen_clone.borrow_mut().push((value.clone(), path.to_string()));
        });

        store.write("age", "42");
        let calls = seen.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (Value::Number(42.0), "age".to_string()));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let cleanup = store.subscribe("x", move |_, _| calls_clone.set(calls_clone.get() + 1));

        store.write("x", 1.0);
        cleanup();
        store.write("x", 2.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count("x"), 0);
    }

    #[test]
    fn test_notification_only_for_written_path() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let _cleanup = store.subscribe("a.b", move |_, _| calls_clone.set(calls_clone.get() + 1));

        store.write("a.c", 1.0);
        store.write("a", Value::map());
        assert_eq!(calls.get(), 0);

        store.write("a.b", 1.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_shared_subscriber_dedupes() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let shared: Subscriber = Rc::new(move |_, _| calls_clone.set(calls_clone.get() + 1));

        let _first = store.subscribe_shared("x", shared.clone());
        let _second = store.subscribe_shared("x", shared);
        assert_eq!(store.subscriber_count("x"), 1);

        store.write("x", 1.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_bind_config_last_write_wins() {
        let store = Store::new();
        let mut first = BindingConfig::default();
        first.transform = Some(uppercase());
        store.bind_config("name", first);

        let second = BindingConfig::default();
        store.bind_config("name", second);

        store.write("name", "ada");
        assert_eq!(store.read("name"), Value::from("ada"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = Store::new();
        store.write("a", 1.0);
        let snapshot = store.snapshot();
        store.write("a", 2.0);
        assert_eq!(super::read_path(&snapshot, "a"), Value::Number(1.0));
        assert_eq!(store.read("a"), Value::Number(2.0));
    }

    #[test]
    fn test_with_initial_non_map_becomes_empty() {
        let store = Store::with_initial(Value::Number(3.0));
        assert_eq!(store.snapshot(), Value::map());
    }

    #[test]
    fn test_batch_coalesces_to_final_value() {
        let store = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = store.subscribe("count", move |value, _| {
            seen_clone.borrow_mut().push(value.clone());
        });

        store.batch(|| {
            store.write("count", 1.0);
            store.write("count", 2.0);
            store.write("count", 3.0);
        });

        let calls = seen.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], Value::Number(3.0));
    }

    #[test]
    fn test_batch_notifies_each_path_once() {
        let store = Store::new();
        let a_calls = Rc::new(Cell::new(0));
        let b_calls = Rc::new(Cell::new(0));
        let a_clone = a_calls.clone();
        let b_clone = b_calls.clone();
        let _a = store.subscribe("a", move |_, _| a_clone.set(a_clone.get() + 1));
        let _b = store.subscribe("b", move |_, _| b_clone.set(b_clone.get() + 1));

        store.batch(|| {
            store.write("a", 1.0);
            store.write("b", 1.0);
            store.write("a", 2.0);
        });

        assert_eq!(a_calls.get(), 1);
        assert_eq!(b_calls.get(), 1);
    }

    #[test]
    fn test_nested_batch_flushes_at_outermost_exit() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let _cleanup = store.subscribe("x", move |_, _| calls_clone.set(calls_clone.get() + 1));

        store.batch(|| {
            store.write("x", 1.0);
            store.batch(|| {
                store.write("x", 2.0);
            });
            // Inner scope exit must not have flushed.
            assert_eq!(calls.get(), 0);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_batch_reads_see_committed_values() {
        let store = Store::new();
        store.batch(|| {
            store.write("x", 1.0);
            assert_eq!(store.read("x"), Value::Number(1.0));
        });
    }

    #[test]
    fn test_panicking_transform_aborts_write() {
        let store = Store::new();
        store.write("n", 1.0);

        let mut config = BindingConfig::default();
        config.transform = Some(Rc::new(|_value| panic!("transform failure")));
        store.bind_config("n", config);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.write("n", 2.0);
        }));
        assert!(result.is_err());
        // No partial commit; the store is still usable.
        assert_eq!(store.read("n"), Value::Number(1.0));
        store.bind_config("n", BindingConfig::default());
        store.write("n", 3.0);
        assert_eq!(store.read("n"), Value::Number(3.0));
    }

    #[test]
    fn test_subscriber_may_unsubscribe_other_path_during_notify() {
        let store = Store::new();
        let other_cleanup: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
        let other_calls = Rc::new(Cell::new(0));
        let other_clone = other_calls.clone();
        *other_cleanup.borrow_mut() =
            Some(store.subscribe("b", move |_, _| other_clone.set(other_clone.get() + 1)));

        let cleanup_slot = other_cleanup.clone();
        let _trigger = store.subscribe("a", move |_, _| {
            if let Some(cleanup) = cleanup_slot.borrow_mut().take() {
                cleanup();
            }
        });

        store.write("a", 1.0);
        store.write("b", 1.0);
        assert_eq!(other_calls.get(), 0);
    }
}
