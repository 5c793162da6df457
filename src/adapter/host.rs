//! Host Integration - Terminal events as raw adapter events
//!
//! Bridges crossterm's event system with the adapter's raw event stream.
//! A terminal has no DOM to report a control's full text, so the host
//! keeps a [`TextEditState`] per focused control: key events edit it and
//! the resulting full text + cursor flows to the adapter as `Input`
//! events. Paste commits as a `Change`; focus events map directly.
//!
//! Editing is grapheme-aware: the cursor counts grapheme clusters, so a
//! single backspace removes one user-perceived character.
//!
//! # Example
//!
//! ```ignore
//! use spark_form::{convert_event, TextEditState};
//! use crossterm::event::read;
//!
//! let mut edit = TextEditState::new("");
//! loop {
//!     if let Some(raw) = convert_event(&read()?, &mut edit) {
//!         adapter.handle(raw);
//!     }
//! }
//! ```

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use super::events::{CursorRange, EventData, RawEvent};

// =============================================================================
// Grapheme Helpers
// =============================================================================

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of the grapheme at `index` (text length when past the end).
fn byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

// =============================================================================
// TextEditState
// =============================================================================

/// Host-side editing model for one text control.
///
/// Holds the full text and a collapsed cursor in grapheme offsets. Editing
/// operations return the [`EventData`] to feed the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEditState {
    text: String,
    cursor: usize,
}

impl TextEditState {
    /// Start editing with the given text, cursor at the end.
    pub fn new(initial: impl Into<String>) -> Self {
        let text = initial.into();
        let cursor = grapheme_count(&text);
        Self { text, cursor }
    }

    /// The current full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cursor position in grapheme offsets.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text wholesale (e.g. after an external write), clamping
    /// the cursor to the new length.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.cursor.min(grapheme_count(&self.text));
    }

    fn data(&self) -> EventData {
        EventData::Text {
            value: self.text.clone(),
            selection: Some(CursorRange::caret(self.cursor as u32)),
        }
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, inserted: &str) -> EventData {
        let at = byte_offset(&self.text, self.cursor);
        self.text.insert_str(at, inserted);
        self.cursor += grapheme_count(inserted);
        self.data()
    }

    fn delete_backward(&mut self) -> Option<EventData> {
        if self.cursor == 0 {
            return None;
        }
        let start = byte_offset(&self.text, self.cursor - 1);
        let end = byte_offset(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        Some(self.data())
    }

    fn delete_forward(&mut self) -> Option<EventData> {
        if self.cursor >= grapheme_count(&self.text) {
            return None;
        }
        let start = byte_offset(&self.text, self.cursor);
        let end = byte_offset(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        Some(self.data())
    }

    /// Apply a key event. Returns the event data when the text changed;
    /// cursor-only moves are handled silently. Ctrl/alt-modified
    /// characters and Enter/Escape are left for the host to route.
    pub fn apply_key(&mut self, key: &KeyEvent) -> Option<EventData> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }

        match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    return None;
                }
                let mut buffer = [0u8; 4];
                Some(self.insert_str(ch.encode_utf8(&mut buffer)))
            }
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(grapheme_count(&self.text));
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = grapheme_count(&self.text);
                None
            }
            _ => None,
        }
    }
}

// =============================================================================
// Event Conversion
// =============================================================================

/// Convert a crossterm event into a raw adapter event, editing `edit`
/// along the way. Returns `None` for events the form layer does not own.
pub fn convert_event(event: &Event, edit: &mut TextEditState) -> Option<RawEvent> {
    match event {
        Event::FocusGained => Some(RawEvent::Focus),
        Event::FocusLost => Some(RawEvent::Blur),
        Event::Paste(text) => Some(RawEvent::Change {
            data: edit.insert_str(text),
        }),
        Event::Key(key) => edit.apply_key(key).map(|data| RawEvent::Input { data }),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
