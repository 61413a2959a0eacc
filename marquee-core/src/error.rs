//! Errors reported by sign operations
//!
//! Every error rejects a single operation and leaves all state unchanged.

use core::fmt;

/// Sign operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignError {
    /// Character has no glyph in the alphabet
    UnsupportedCharacter(char),
    /// Line already holds the maximum number of characters
    LineFull,
    /// Line is displayed and must be cleared before editing
    NotEditable,
    /// Line index outside the sign
    InvalidLine(u8),
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignError::UnsupportedCharacter(c) => {
                write!(f, "character {:?} cannot be shown on the sign", c)
            }
            SignError::LineFull => f.write_str("line is full"),
            SignError::NotEditable => f.write_str("line is displayed; clear it first"),
            SignError::InvalidLine(line) => write!(f, "no sign line {}", line),
        }
    }
}
