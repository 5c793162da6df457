//! Adapter Module - Raw input events reconciled into binding writes
//!
//! One `InputAdapter` sits between a host control and one binding. It is a
//! two-state machine (`Idle`/`Composing`) that:
//!
//! - derives the semantic value from raw event payloads per control kind,
//! - applies the per-platform suppression rule while text composition is
//!   in progress, and always commits the final composed text,
//! - tracks the monotonic `touched`/`submit_attempted` flags,
//! - records cursor offsets and replays them after host re-renders,
//! - computes error visibility for the rendering layer.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{ControlKind, EventData, InputAdapter, Platform, RawEvent, Store};
//!
//! let store = Store::new();
//! let adapter = InputAdapter::new(
//!     store.binding("user.name"),
//!     ControlKind::Text,
//!     Platform::Desktop,
//! );
//!
//! adapter.handle(RawEvent::Input { data: EventData::text("A", 1) });
//! assert!(adapter.touched());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::binding::Binding;
use crate::types::Value;

mod attrs;
mod context;
mod events;
mod host;
mod platform;

pub use attrs::{
    CheckboxAttrs, CompositionCallback, ElementRefCallback, FocusCallback, InputCallback,
    RadioOptionAttrs, SelectAttrs, SelectCallback, TextInputAttrs, ToggleCallback,
};
pub use context::{error_visible, AdapterFlags, CompositionState, InputContext};
pub use events::{ControlKind, CursorRange, EventData, RawEvent, SelectionTarget};
pub use host::{convert_event, TextEditState};
pub use platform::Platform;

#[cfg(feature = "tracing")]
use tracing::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

// =============================================================================
// InputAdapter
// =============================================================================

/// State machine bridging one host control to one binding.
///
/// Cheap-clone handle over shared state so the attribute-bundle closures
/// in [`attrs`] all drive the same instance.
#[derive(Clone)]
pub struct InputAdapter {
    inner: Rc<RefCell<AdapterInner>>,
}

struct AdapterInner {
    binding: Binding<Value>,
    control: ControlKind,
    context: InputContext,
}

impl InputAdapter {
    /// Attach an adapter to a binding. The platform class is injected here
    /// and fixed for the adapter's lifetime.
    pub fn new(binding: Binding<Value>, control: ControlKind, platform: Platform) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AdapterInner {
                binding,
                control,
                context: InputContext::new(platform),
            })),
        }
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Feed one raw host event through the state machine.
    pub fn handle(&self, event: RawEvent) {
        // The pending write is computed under the borrow and applied after
        // releasing it: binding writes notify synchronously, and a
        // subscriber is allowed to read this adapter back.
        let pending = self.inner.borrow_mut().process(event);
        if let Some(value) = pending {
            let binding = self.inner.borrow().binding.clone();
            binding.set_value(value);
        }
    }

    /// Record that the owning form attempted a submit.
    pub fn mark_submit_attempted(&self) {
        self.inner.borrow_mut().context.mark_submit_attempted();
    }

    // =========================================================================
    // State Queries
    // =========================================================================

    /// Whether the user has interacted with the control.
    pub fn touched(&self) -> bool {
        self.inner.borrow().context.touched()
    }

    /// Whether a submit has been attempted.
    pub fn submit_attempted(&self) -> bool {
        self.inner.borrow().context.submit_attempted()
    }

    /// Whether a composition session is in progress.
    pub fn is_composing(&self) -> bool {
        self.inner.borrow().context.is_composing()
    }

    /// The injected platform class.
    pub fn platform(&self) -> Platform {
        self.inner.borrow().context.platform()
    }

    /// The last recorded cursor range.
    pub fn cursor(&self) -> Option<CursorRange> {
        self.inner.borrow().context.cursor()
    }

    /// The binding this adapter writes through.
    pub fn binding(&self) -> Binding<Value> {
        self.inner.borrow().binding.clone()
    }

    /// The control kind this adapter was attached for.
    pub fn control(&self) -> ControlKind {
        self.inner.borrow().control.clone()
    }

    // =========================================================================
    // Cursor Restoration
    // =========================================================================

    /// Replay the last recorded cursor range onto a re-rendered element.
    /// Targets that do not support selection are silently ignored.
    pub fn restore_cursor(&self, target: &mut dyn SelectionTarget) {
        if let Some(range) = self.cursor() {
            let _ = target.set_selection(range);
        }
    }

    // =========================================================================
    // Validation Visibility
    // =========================================================================

    /// The binding's error, gated by the configured visibility policy.
    pub fn visible_error(&self) -> Option<String> {
        let inner = self.inner.borrow();
        if !error_visible(inner.binding.config().timing, &inner.context) {
            return None;
        }
        inner.binding.error()
    }

    /// Accessibility flag: the control is invalid and the policy says so.
    pub fn invalid(&self) -> bool {
        self.visible_error().is_some()
    }

    /// Accessibility reference for the error description element, present
    /// exactly when an error is visible ("user.name" -> "user-name-error").
    pub fn error_id(&self) -> Option<String> {
        if self.visible_error().is_none() {
            return None;
        }
        let path = self.inner.borrow().binding.path().replace('.', "-");
        Some(format!("{}-error", path))
    }
}

impl AdapterInner {
    /// Run the state machine. Returns the value to write, if any; the
    /// caller applies it after releasing the borrow.
    fn process(&mut self, event: RawEvent) -> Option<Value> {
        match event {
            RawEvent::CompositionStart { text } => {
                self.context.set_composition(CompositionState::Composing);
                self.context.record_raw(&text);
                trace!("composition start");
                None
            }
            RawEvent::CompositionEnd { text } => {
                self.context.set_composition(CompositionState::Idle);
                self.context.record_raw(&text);
                trace!("composition end, committing");
                // The fully-composed text is never lost: one unconditional
                // commit regardless of what was suppressed above.
                self.text_value(&text)
            }
            RawEvent::Input { data } => self.process_edit(data, true),
            RawEvent::Change { data } => self.process_edit(data, false),
            RawEvent::Focus | RawEvent::Blur => {
                self.context.mark_touched();
                None
            }
        }
    }

    fn process_edit(&mut self, data: EventData, per_keystroke: bool) -> Option<Value> {
        self.context.mark_touched();

        match data {
            // Toggles do not compose; suppression never applies to them.
            EventData::Toggle { checked } => self.toggle_value(checked),
            EventData::Text { value, selection } => {
                self.context.record_cursor(selection);
                let unchanged = value == self.context.last_raw();
                self.context.record_raw(&value);

                if self.context.is_composing() {
                    let platform = self.context.platform();
                    if platform.suppress_during_composition(unchanged) {
                        trace!("suppressed during composition");
                        return None;
                    }
                } else if per_keystroke && !self.binding.config().apply_immediately {
                    // Bookkeeping only; the write waits for the commit.
                    return None;
                }
                self.text_value(&value)
            }
        }
    }

    fn toggle_value(&self, checked: bool) -> Option<Value> {
        match &self.control {
            ControlKind::Checkbox => Some(Value::Bool(checked)),
            ControlKind::Radio { value } => {
                if checked {
                    Some(value.clone())
                } else {
                    // An unchecked radio leaves the group's value alone.
                    None
                }
            }
            // Mismatched payload for a text control: nothing to write.
            _ => None,
        }
    }

    fn text_value(&self, text: &str) -> Option<Value> {
        match &self.control {
            ControlKind::Number => {
                Some(Value::Number(Value::Str(text.to_string()).coerce_number()))
            }
            ControlKind::Text | ControlKind::TextArea | ControlKind::Select => {
                Some(Value::Str(text.to_string()))
            }
            // Mismatched payload for a toggle control: nothing to write.
            ControlKind::Checkbox | ControlKind::Radio { .. } => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
