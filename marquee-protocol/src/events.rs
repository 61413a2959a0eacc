//! Edit events delivered by the host

/// What happened on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditPayload {
    /// A character key (may or may not be in the sign's alphabet)
    Character(char),
    /// Delete the last character
    Backspace,
    /// Freeze the line and show it on the sign (Enter)
    Commit,
    /// Wipe the line and return it to editing (Escape)
    Clear,
    /// A modifier held with no character payload
    ModifierOnly,
}

impl EditPayload {
    /// Returns true if this payload edits line content while in edit mode
    pub fn is_edit(&self) -> bool {
        matches!(self, EditPayload::Character(_) | EditPayload::Backspace)
    }
}

/// An edit payload addressed to one sign line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditEvent {
    /// Target line (0-based)
    pub line: u8,
    /// Event payload
    pub payload: EditPayload,
}

impl EditEvent {
    /// Create an event for the given line
    pub const fn new(line: u8, payload: EditPayload) -> Self {
        Self { line, payload }
    }

    /// Shorthand for a character event
    pub const fn character(line: u8, c: char) -> Self {
        Self::new(line, EditPayload::Character(c))
    }

    /// Shorthand for a commit event
    pub const fn commit(line: u8) -> Self {
        Self::new(line, EditPayload::Commit)
    }

    /// Shorthand for a clear event
    pub const fn clear(line: u8) -> Self {
        Self::new(line, EditPayload::Clear)
    }
}
