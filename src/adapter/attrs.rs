//! Attribute Bundles - Plain attribute/handler sets per control shape
//!
//! The boundary with the rendering layer: each bundle carries everything a
//! host element of that shape needs - current value or checked state, the
//! raw event handlers, composition handlers for text-like controls, an
//! element-reference callback for cursor restoration, and the
//! accessibility pair (`invalid`, `error_id`) computed per the visibility
//! policy. The rendering layer spreads these onto elements and calls
//! `mark_submit_attempted` at submit time; it decides nothing else.
//!
//! Callbacks are `Rc<dyn Fn>` so bundles can be cloned into host closures
//! freely; every handler drives the same shared adapter instance.

use std::rc::Rc;

use crate::types::Value;

use super::events::{EventData, RawEvent, SelectionTarget};
use super::InputAdapter;

// =============================================================================
// Callback Types
// =============================================================================

/// Raw text-event callback (input/change on text-like controls).
pub type InputCallback = Rc<dyn Fn(EventData)>;

/// Composition boundary callback, carrying the control's current text.
pub type CompositionCallback = Rc<dyn Fn(String)>;

/// Toggle callback (checkbox/radio checked state).
pub type ToggleCallback = Rc<dyn Fn(bool)>;

/// Select-pick callback, carrying the selected option's text.
pub type SelectCallback = Rc<dyn Fn(String)>;

/// Focus/blur callback.
pub type FocusCallback = Rc<dyn Fn()>;

/// Element-reference callback: hand the (re-rendered) element in for
/// cursor restoration.
pub type ElementRefCallback = Rc<dyn Fn(&mut dyn SelectionTarget)>;

// =============================================================================
// Bundles
// =============================================================================

/// Attributes for text and number inputs, and textareas.
pub struct TextInputAttrs {
    /// Current display text.
    pub value: String,
    /// Accessibility: whether to flag the control invalid.
    pub invalid: bool,
    /// Accessibility: id of the error description element, when visible.
    pub error_id: Option<String>,
    pub on_input: InputCallback,
    pub on_change: InputCallback,
    pub on_focus: FocusCallback,
    pub on_blur: FocusCallback,
    pub on_composition_start: CompositionCallback,
    pub on_composition_end: CompositionCallback,
    pub element_ref: ElementRefCallback,
}

/// Attributes for a checkbox.
pub struct CheckboxAttrs {
    /// Current checked state.
    pub checked: bool,
    pub invalid: bool,
    pub error_id: Option<String>,
    pub on_change: ToggleCallback,
    pub on_focus: FocusCallback,
    pub on_blur: FocusCallback,
}

/// Attributes for a select control.
pub struct SelectAttrs {
    /// Currently selected option text.
    pub value: String,
    pub invalid: bool,
    pub error_id: Option<String>,
    pub on_change: SelectCallback,
    pub on_focus: FocusCallback,
    pub on_blur: FocusCallback,
}

/// Attributes for one option of a radio group.
pub struct RadioOptionAttrs {
    /// The value this option represents.
    pub value: Value,
    /// Whether the group's current value is this option.
    pub checked: bool,
    pub invalid: bool,
    pub error_id: Option<String>,
    pub on_change: ToggleCallback,
    pub on_focus: FocusCallback,
    pub on_blur: FocusCallback,
}

// =============================================================================
// Bundle Construction
// =============================================================================

fn focus_handler(adapter: &InputAdapter) -> FocusCallback {
    let adapter = adapter.clone();
    Rc::new(move || adapter.handle(RawEvent::Focus))
}

fn blur_handler(adapter: &InputAdapter) -> FocusCallback {
    let adapter = adapter.clone();
    Rc::new(move || adapter.handle(RawEvent::Blur))
}

impl InputAdapter {
    /// Bundle for a text or number input. Also used for textareas.
    pub fn text_attrs(&self) -> TextInputAttrs {
        let on_input = {
            let adapter = self.clone();
            Rc::new(move |data| adapter.handle(RawEvent::Input { data }))
        };
        let on_change = {
            let adapter = self.clone();
            Rc::new(move |data| adapter.handle(RawEvent::Change { data }))
        };
        let on_composition_start = {
            let adapter = self.clone();
            Rc::new(move |text| adapter.handle(RawEvent::CompositionStart { text }))
        };
        let on_composition_end = {
            let adapter = self.clone();
            Rc::new(move |text| adapter.handle(RawEvent::CompositionEnd { text }))
        };
        let element_ref = {
            let adapter = self.clone();
            Rc::new(move |target: &mut dyn SelectionTarget| adapter.restore_cursor(target))
        };

        TextInputAttrs {
            value: self.binding().raw().display_string(),
            invalid: self.invalid(),
            error_id: self.error_id(),
            on_input,
            on_change,
            on_focus: focus_handler(self),
            on_blur: blur_handler(self),
            on_composition_start,
            on_composition_end,
            element_ref,
        }
    }

    /// Bundle for a textarea (same shape as text inputs).
    pub fn textarea_attrs(&self) -> TextInputAttrs {
        self.text_attrs()
    }

    /// Bundle for a checkbox.
    pub fn checkbox_attrs(&self) -> CheckboxAttrs {
        let on_change = {
            let adapter = self.clone();
            Rc::new(move |checked| {
                adapter.handle(RawEvent::Change {
                    data: EventData::Toggle { checked },
                })
            })
        };

        CheckboxAttrs {
            checked: self.binding().raw().truthy(),
            invalid: self.invalid(),
            error_id: self.error_id(),
            on_change,
            on_focus: focus_handler(self),
            on_blur: blur_handler(self),
        }
    }

    /// Bundle for a select control.
    pub fn select_attrs(&self) -> SelectAttrs {
        let on_change = {
            let adapter = self.clone();
            Rc::new(move |value: String| {
                adapter.handle(RawEvent::Change {
                    data: EventData::text_only(value),
                })
            })
        };

        SelectAttrs {
            value: self.binding().raw().display_string(),
            invalid: self.invalid(),
            error_id: self.error_id(),
            on_change,
            on_focus: focus_handler(self),
            on_blur: blur_handler(self),
        }
    }

    /// Bundle for the radio option this adapter was attached for.
    ///
    /// The adapter's control must be `ControlKind::Radio`; other kinds
    /// yield an unchecked option bound to `Value::Null`.
    pub fn radio_attrs(&self) -> RadioOptionAttrs {
        let option_value = match self.control() {
            super::ControlKind::Radio { value } => value,
            _ => Value::Null,
        };
        let on_change = {
            let adapter = self.clone();
            Rc::new(move |checked| {
                adapter.handle(RawEvent::Change {
                    data: EventData::Toggle { checked },
                })
            })
        };

        RadioOptionAttrs {
            checked: self.binding().raw() == option_value,
            value: option_value,
            invalid: self.invalid(),
            error_id: self.error_id(),
            on_change,
            on_focus: focus_handler(self),
            on_blur: blur_handler(self),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
