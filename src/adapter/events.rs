//! Adapter Events - Raw input events and the control vocabulary
//!
//! The host feeds the adapter raw, platform-shaped events; the adapter
//! turns them into binding writes. `Input` is the per-keystroke stream,
//! `Change` a committed edit, and the composition pair brackets
//! multi-keystroke text sessions (IME input).

use crate::types::Value;

// =============================================================================
// Cursor
// =============================================================================

/// A selection range in a text control, in character offsets.
/// A collapsed caret has `start == end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorRange {
    pub start: u32,
    pub end: u32,
}

impl CursorRange {
    /// A collapsed caret at one offset.
    pub fn caret(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// A selection spanning two offsets.
    pub fn span(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Host element that can receive a restored selection.
///
/// `set_selection` returns false when the element does not support
/// selection ranges; the adapter discards that failure silently.
pub trait SelectionTarget {
    fn set_selection(&mut self, range: CursorRange) -> bool;
}

// =============================================================================
// Control Kinds
// =============================================================================

/// The shape of the host control behind an adapter, which decides how raw
/// event payloads become semantic values.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    /// Single-line text input. Semantic value: the raw text.
    Text,
    /// Multi-line text area. Semantic value: the raw text.
    TextArea,
    /// Numeric field. Semantic value: parsed float, 0.0 on parse failure.
    Number,
    /// Checkbox. Semantic value: the checked state.
    Checkbox,
    /// One option of a radio group. Semantic value: the bound option value
    /// when checked; an unchecked event writes nothing.
    Radio {
        /// The value this option represents.
        value: Value,
    },
    /// Select/dropdown. Semantic value: the selected option's text.
    Select,
}

impl ControlKind {
    /// Whether this control carries free text (and therefore composes).
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            ControlKind::Text | ControlKind::TextArea | ControlKind::Number | ControlKind::Select
        )
    }
}

// =============================================================================
// Event Payloads
// =============================================================================

/// Payload of a raw input/change event.
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// A text-ish control reported its full current text.
    Text {
        value: String,
        selection: Option<CursorRange>,
    },
    /// A toggle control reported its checked state.
    Toggle { checked: bool },
}

impl EventData {
    /// Convenience constructor for a text payload with a collapsed caret.
    pub fn text(value: impl Into<String>, caret: u32) -> Self {
        EventData::Text {
            value: value.into(),
            selection: Some(CursorRange::caret(caret)),
        }
    }

    /// Convenience constructor for a text payload without cursor info.
    pub fn text_only(value: impl Into<String>) -> Self {
        EventData::Text {
            value: value.into(),
            selection: None,
        }
    }
}

/// A raw event from the host, in the order the platform produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// A composition session opened. Carries the control's current text.
    CompositionStart { text: String },
    /// The composition session closed with its final text.
    CompositionEnd { text: String },
    /// Per-keystroke value report.
    Input { data: EventData },
    /// Committed edit (blur-commit, paste, enter, select pick).
    Change { data: EventData },
    /// The control gained focus.
    Focus,
    /// The control lost focus.
    Blur,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_is_collapsed() {
        let caret = CursorRange::caret(4);
        assert_eq!(caret.start, 4);
        assert_eq!(caret.end, 4);
    }

    #[test]
    fn test_text_like_controls() {
        assert!(ControlKind::Text.is_text_like());
        assert!(ControlKind::TextArea.is_text_like());
        assert!(ControlKind::Number.is_text_like());
        assert!(ControlKind::Select.is_text_like());
        assert!(!ControlKind::Checkbox.is_text_like());
        assert!(!ControlKind::Radio { value: Value::Null }.is_text_like());
    }

    #[test]
    fn test_event_data_constructors() {
        assert_eq!(
            EventData::text("hi", 2),
            EventData::Text {
                value: "hi".to_string(),
                selection: Some(CursorRange::caret(2)),
            }
        );
        assert_eq!(
            EventData::text_only("hi"),
            EventData::Text {
                value: "hi".to_string(),
                selection: None,
            }
        );
    }
}
