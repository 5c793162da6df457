//! Input Context - Per-adapter interaction state
//!
//! One `InputContext` lives inside each adapter instance: composition
//! state, the last observed raw text, the last recorded cursor range, the
//! injected platform class, and the monotonic interaction flags. The flag
//! API is insert-only; `touched` and `submit_attempted` can never be
//! cleared for the life of the adapter.

use crate::binding::ValidationTiming;

use super::events::CursorRange;
use super::platform::Platform;

// =============================================================================
// Flags
// =============================================================================

bitflags::bitflags! {
    /// Monotonic per-adapter interaction flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct AdapterFlags: u8 {
        /// The user has interacted with the control at least once.
        const TOUCHED = 1;
        /// The owning form has signalled a submission attempt.
        const SUBMIT_ATTEMPTED = 1 << 1;
    }
}

// =============================================================================
// Composition State
// =============================================================================

/// The adapter state machine's two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompositionState {
    /// No composition session in progress.
    #[default]
    Idle,
    /// Inside a composition session (between start and end events).
    Composing,
}

// =============================================================================
// InputContext
// =============================================================================

/// Per-adapter interaction state. Created on attach, discarded on detach,
/// never shared across bindings.
#[derive(Clone, Debug)]
pub struct InputContext {
    platform: Platform,
    composition: CompositionState,
    last_raw: String,
    cursor: Option<CursorRange>,
    flags: AdapterFlags,
}

impl InputContext {
    /// Fresh context for the given platform class.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            composition: CompositionState::Idle,
            last_raw: String::new(),
            cursor: None,
            flags: AdapterFlags::empty(),
        }
    }

    /// The injected platform class.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether a composition session is in progress.
    pub fn is_composing(&self) -> bool {
        self.composition == CompositionState::Composing
    }

    pub(crate) fn set_composition(&mut self, state: CompositionState) {
        self.composition = state;
    }

    /// The last raw text observed from any text event.
    pub fn last_raw(&self) -> &str {
        &self.last_raw
    }

    pub(crate) fn record_raw(&mut self, text: &str) {
        if self.last_raw != text {
            self.last_raw.clear();
            self.last_raw.push_str(text);
        }
    }

    /// The last recorded cursor range, if any text event carried one.
    pub fn cursor(&self) -> Option<CursorRange> {
        self.cursor
    }

    pub(crate) fn record_cursor(&mut self, range: Option<CursorRange>) {
        if range.is_some() {
            self.cursor = range;
        }
    }

    /// Whether the user has interacted with the control.
    pub fn touched(&self) -> bool {
        self.flags.contains(AdapterFlags::TOUCHED)
    }

    /// Whether a submit has been attempted.
    pub fn submit_attempted(&self) -> bool {
        self.flags.contains(AdapterFlags::SUBMIT_ATTEMPTED)
    }

    // Flag transitions are insert-only.

    pub(crate) fn mark_touched(&mut self) {
        self.flags.insert(AdapterFlags::TOUCHED);
    }

    pub(crate) fn mark_submit_attempted(&mut self) {
        self.flags.insert(AdapterFlags::SUBMIT_ATTEMPTED);
    }
}

// =============================================================================
// Validation Visibility
// =============================================================================

/// Whether an error should be visible, as a pure function of the
/// configured timing and the interaction state. The rendering layer must
/// use this verdict rather than re-deriving it.
pub fn error_visible(timing: ValidationTiming, context: &InputContext) -> bool {
    match timing {
        ValidationTiming::OnChange => true,
        ValidationTiming::OnSubmit => context.submit_attempted(),
        ValidationTiming::OnTouch => context.touched(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context() {
        let context = InputContext::new(Platform::Desktop);
        assert!(!context.is_composing());
        assert!(!context.touched());
        assert!(!context.submit_attempted());
        assert_eq!(context.last_raw(), "");
        assert_eq!(context.cursor(), None);
    }

    #[test]
    fn test_flags_are_monotonic() {
        let mut context = InputContext::new(Platform::Desktop);
        context.mark_touched();
        context.mark_touched();
        assert!(context.touched());
        context.mark_submit_attempted();
        assert!(context.submit_attempted());
        // Both flags coexist.
        assert!(context.touched());
    }

    #[test]
    fn test_record_cursor_keeps_last_known() {
        let mut context = InputContext::new(Platform::Desktop);
        context.record_cursor(Some(CursorRange::caret(3)));
        // An event without cursor info does not erase the last range.
        context.record_cursor(None);
        assert_eq!(context.cursor(), Some(CursorRange::caret(3)));
    }

    #[test]
    fn test_visibility_on_change_always() {
        let context = InputContext::new(Platform::Desktop);
        assert!(error_visible(ValidationTiming::OnChange, &context));
    }

    #[test]
    fn test_visibility_on_touch() {
        let mut context = InputContext::new(Platform::Desktop);
        assert!(!error_visible(ValidationTiming::OnTouch, &context));
        context.mark_touched();
        assert!(error_visible(ValidationTiming::OnTouch, &context));
    }

    #[test]
    fn test_visibility_on_submit() {
        let mut context = InputContext::new(Platform::Desktop);
        context.mark_touched();
        assert!(!error_visible(ValidationTiming::OnSubmit, &context));
        context.mark_submit_attempted();
        assert!(error_visible(ValidationTiming::OnSubmit, &context));
    }
}
