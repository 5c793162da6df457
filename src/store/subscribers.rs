//! Subscription Registry - Per-path observer callbacks
//!
//! Callbacks are keyed by path and identified by a registry id so cleanup
//! closures can remove exactly their own entry. The same `Rc` callback
//! registered twice on one path is a single entry (pointer identity), and
//! removing the last subscriber for a path drops the path's entry entirely.
//!
//! Dispatch order within a path is registration order, but callers get no
//! ordering guarantee.

use std::collections::HashMap;
use std::rc::Rc;

use crate::types::Value;

/// Observer callback: receives the committed value and the path it was
/// committed at.
pub type Subscriber = Rc<dyn Fn(&Value, &str)>;

pub(crate) struct SubscriberRegistry {
    by_path: HashMap<String, Vec<(usize, Subscriber)>>,
    next_id: usize,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self {
            by_path: HashMap::new(),
            next_id: 0,
        }
    }

    /// Add a callback for a path, returning its registry id.
    ///
    /// If the identical `Rc` is already registered for this path, the
    /// existing id is returned and no new entry is added.
    pub(crate) fn add(&mut self, path: &str, callback: Subscriber) -> usize {
        let entries = self.by_path.entry(path.to_string()).or_default();
        if let Some((existing_id, _)) = entries
            .iter()
            .find(|(_, registered)| Rc::ptr_eq(registered, &callback))
        {
            return *existing_id;
        }

        let id = self.next_id;
        self.next_id += 1;
        entries.push((id, callback));
        id
    }

    /// Remove a callback by path and id. No-op if either is gone already.
    pub(crate) fn remove(&mut self, path: &str, id: usize) {
        if let Some(entries) = self.by_path.get_mut(path) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                self.by_path.remove(path);
            }
        }
    }

    /// Snapshot the callbacks for a path.
    ///
    /// Returns clones of the `Rc`s so the registry borrow can be released
    /// before any callback runs.
    pub(crate) fn snapshot(&self, path: &str) -> Vec<Subscriber> {
        self.by_path
            .get(path)
            .map(|entries| entries.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of subscribers currently registered for a path.
    pub(crate) fn count(&self, path: &str) -> usize {
        self.by_path.get(path).map(Vec::len).unwrap_or(0)
    }

    /// Whether any path has subscribers (used by tests).
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
