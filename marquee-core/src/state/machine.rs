//! Line mode transitions
//!
//! A line starts in `Editing`. Commit freezes it in `Displayed`; only a
//! clear brings it back.

use marquee_protocol::EditPayload;

/// Line modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    /// Accepting characters and backspace
    #[default]
    Editing,
    /// Showing the encoded message; content frozen
    Displayed,
}

impl LineMode {
    /// Check if this mode accepts content edits
    pub fn accepts_edits(&self) -> bool {
        matches!(self, LineMode::Editing)
    }

    /// Check if the line is showing its bitmap
    pub fn is_displayed(&self) -> bool {
        matches!(self, LineMode::Displayed)
    }

    /// Check whether a payload is dropped without effect in this mode
    pub fn ignores(&self, payload: &EditPayload) -> bool {
        match payload {
            EditPayload::ModifierOnly => true,
            _ if payload.is_edit() => !self.accepts_edits(),
            _ => false,
        }
    }

    /// Process a payload and return the next mode
    pub fn transition(self, payload: &EditPayload) -> Self {
        use LineMode::*;

        match (self, payload) {
            (_, EditPayload::Commit) => Displayed,
            (_, EditPayload::Clear) => Editing,

            // Edits and bare modifiers never change mode
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        assert_eq!(LineMode::default(), LineMode::Editing);
    }

    #[test]
    fn test_commit_displays() {
        assert_eq!(
            LineMode::Editing.transition(&EditPayload::Commit),
            LineMode::Displayed
        );
        // Idempotent
        assert_eq!(
            LineMode::Displayed.transition(&EditPayload::Commit),
            LineMode::Displayed
        );
    }

    #[test]
    fn test_clear_returns_to_editing() {
        for mode in [LineMode::Editing, LineMode::Displayed] {
            assert_eq!(mode.transition(&EditPayload::Clear), LineMode::Editing);
        }
    }

    #[test]
    fn test_edits_keep_mode() {
        let payloads = [
            EditPayload::Character('A'),
            EditPayload::Backspace,
            EditPayload::ModifierOnly,
        ];

        for mode in [LineMode::Editing, LineMode::Displayed] {
            for payload in &payloads {
                assert_eq!(mode.transition(payload), mode);
            }
        }
    }

    #[test]
    fn test_displayed_ignores_edits() {
        let displayed = LineMode::Displayed;
        assert!(displayed.ignores(&EditPayload::Character('X')));
        assert!(displayed.ignores(&EditPayload::Backspace));
        assert!(displayed.ignores(&EditPayload::ModifierOnly));
        assert!(!displayed.ignores(&EditPayload::Commit));
        assert!(!displayed.ignores(&EditPayload::Clear));
    }

    #[test]
    fn test_editing_ignores_only_modifiers() {
        let editing = LineMode::Editing;
        assert!(!editing.ignores(&EditPayload::Character('X')));
        assert!(!editing.ignores(&EditPayload::Backspace));
        assert!(editing.ignores(&EditPayload::ModifierOnly));
    }
}
