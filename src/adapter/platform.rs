//! Platform Classification - Composition-suppression parameterization
//!
//! The only platform-dependent behavior in the crate is how raw text
//! events are treated during an in-progress composition session. The
//! platform is classified once, from a descriptor string the host injects
//! at adapter construction, so suppression is a pure function of
//! configuration - never of ambient runtime globals.

// =============================================================================
// Platform
// =============================================================================

/// Runtime environment class, used only to pick the composition
/// suppression rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Platform {
    /// Desktop-class environments: composition events are reliable.
    Desktop,
    /// Android-class: change events during composition may be committed
    /// edits.
    Android,
    /// iOS-class: composition events are unreliable signals.
    Ios,
    /// Anything unrecognized. Treated like iOS (write everything through).
    #[default]
    Unknown,
}

impl Platform {
    /// Classify a host-provided descriptor (user-agent style string).
    ///
    /// Case-insensitive substring match. iOS tokens are checked before
    /// desktop tokens because iOS descriptors contain "like Mac OS X";
    /// Android before Linux for the same containment reason.
    pub fn classify(descriptor: &str) -> Self {
        let lower = descriptor.to_lowercase();
        if lower.contains("android") {
            Platform::Android
        } else if ["iphone", "ipad", "ipod", "ios"]
            .iter()
            .any(|token| lower.contains(token))
        {
            Platform::Ios
        } else if ["windows", "macintosh", "mac os", "x11", "linux", "cros"]
            .iter()
            .any(|token| lower.contains(token))
        {
            Platform::Desktop
        } else {
            Platform::Unknown
        }
    }

    /// Whether a raw text event observed during composition should be
    /// suppressed (not written through).
    ///
    /// - Desktop: always suppress while composing.
    /// - Android: suppress only when the text is unchanged from the
    ///   last-seen value; a changed text is a committed edit.
    /// - iOS / Unknown: never suppress.
    pub fn suppress_during_composition(self, text_unchanged: bool) -> bool {
        match self {
            Platform::Desktop => true,
            Platform::Android => text_unchanged,
            Platform::Ios | Platform::Unknown => false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
