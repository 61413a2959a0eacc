//! Sign line buffer
//!
//! One buffer backs one physical line of the sign. Characters are validated
//! against the alphabet as they are typed, so a line being edited only ever
//! holds text the sign can show.

use core::fmt;

use heapless::String;
use marquee_protocol::EditPayload;

use crate::alphabet::Alphabet;
use crate::config::MAX_LEN;
use crate::encoder::{encode, Bitmap};
use crate::error::SignError;
use crate::state::LineMode;

/// Editable content of one sign line
#[derive(Debug, Clone)]
pub struct LineBuffer<'a> {
    /// Typed characters (ASCII only, so bytes are characters)
    content: String<MAX_LEN>,
    /// Editing or displayed
    mode: LineMode,
    /// Alphabet used for validation and encoding
    alphabet: &'a Alphabet,
}

impl<'a> LineBuffer<'a> {
    /// Create an empty line in edit mode
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            content: String::new(),
            mode: LineMode::Editing,
            alphabet,
        }
    }

    /// Current text
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check whether the line has no characters
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check whether the line holds `MAX_LEN` characters
    pub fn is_full(&self) -> bool {
        self.content.len() >= MAX_LEN
    }

    /// Current mode
    pub fn mode(&self) -> LineMode {
        self.mode
    }

    /// Alphabet this line validates against
    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// Append a character at the end of the line
    ///
    /// Rejected without effect if the line is displayed, full, or the
    /// character has no glyph.
    pub fn append(&mut self, c: char) -> Result<(), SignError> {
        if !self.mode.accepts_edits() {
            return Err(SignError::NotEditable);
        }
        if self.is_full() {
            return Err(SignError::LineFull);
        }
        self.alphabet.lookup(c)?;

        self.content.push(c).map_err(|_| SignError::LineFull)
    }

    /// Remove the last character
    ///
    /// Does nothing on an empty or displayed line. Returns true if a
    /// character was removed.
    pub fn delete_last(&mut self) -> bool {
        if !self.mode.accepts_edits() {
            return false;
        }
        self.content.pop().is_some()
    }

    /// Freeze the line and encode it for display
    ///
    /// Committing a displayed line re-encodes the same content. If encoding
    /// fails the mode is left unchanged.
    pub fn commit(&mut self) -> Result<Bitmap, SignError> {
        let bitmap = self.encode()?;
        self.mode = self.mode.transition(&EditPayload::Commit);
        Ok(bitmap)
    }

    /// Empty the line and return it to edit mode
    pub fn clear(&mut self) {
        self.content.clear();
        self.mode = self.mode.transition(&EditPayload::Clear);
    }

    /// Encode the current content without changing state
    pub fn encode(&self) -> Result<Bitmap, SignError> {
        encode(self.content.chars(), self.alphabet)
    }
}

impl fmt::Display for LineBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;

    fn line() -> LineBuffer<'static> {
        LineBuffer::new(&ALPHABET)
    }

    #[test]
    fn test_new_line() {
        let line = line();
        assert!(line.is_empty());
        assert_eq!(line.mode(), LineMode::Editing);
    }

    #[test]
    fn test_append() {
        let mut line = line();
        line.append('A').unwrap();
        line.append('1').unwrap();
        line.append('&').unwrap();
        assert_eq!(line.content(), "A1&");
        assert_eq!(line.len(), 3);
        assert_eq!(line.mode(), LineMode::Editing);
    }

    #[test]
    fn test_append_unsupported() {
        let mut line = line();
        line.append('A').unwrap();
        assert_eq!(line.append('a'), Err(SignError::UnsupportedCharacter('a')));
        assert_eq!(line.append('€'), Err(SignError::UnsupportedCharacter('€')));
        assert_eq!(line.content(), "A");
    }

    #[test]
    fn test_append_full() {
        let mut line = line();
        for _ in 0..MAX_LEN {
            line.append('Z').unwrap();
        }
        assert!(line.is_full());
        assert_eq!(line.append('Z'), Err(SignError::LineFull));
        assert_eq!(line.len(), MAX_LEN);
    }

    #[test]
    fn test_append_displayed() {
        let mut line = line();
        line.append('A').unwrap();
        line.commit().unwrap();
        assert_eq!(line.append('X'), Err(SignError::NotEditable));
        assert_eq!(line.content(), "A");
    }

    #[test]
    fn test_displayed_check_precedes_full() {
        let mut line = line();
        for _ in 0..MAX_LEN {
            line.append('Z').unwrap();
        }
        line.commit().unwrap();
        assert_eq!(line.append('Z'), Err(SignError::NotEditable));
    }

    #[test]
    fn test_delete_last() {
        let mut line = line();
        line.append('A').unwrap();
        line.append('B').unwrap();
        assert!(line.delete_last());
        assert_eq!(line.content(), "A");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut line = line();
        assert!(!line.delete_last());
        assert!(line.is_empty());
        assert_eq!(line.mode(), LineMode::Editing);
    }

    #[test]
    fn test_delete_on_displayed_is_noop() {
        let mut line = line();
        line.append('A').unwrap();
        line.commit().unwrap();
        assert!(!line.delete_last());
        assert_eq!(line.content(), "A");
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut line = line();
        for c in "HELLO".chars() {
            line.append(c).unwrap();
        }
        let first = line.commit().unwrap();
        let second = line.commit().unwrap();
        assert_eq!(first, second);
        assert_eq!(line.mode(), LineMode::Displayed);
        assert_eq!(line.content(), "HELLO");
    }

    #[test]
    fn test_commit_empty_line() {
        let mut line = line();
        let bitmap = line.commit().unwrap();
        assert_eq!(bitmap.width(), 1);
        assert_eq!(line.mode(), LineMode::Displayed);
    }

    #[test]
    fn test_clear() {
        let mut line = line();
        line.append('A').unwrap();
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.mode(), LineMode::Editing);

        line.append('B').unwrap();
        line.commit().unwrap();
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.mode(), LineMode::Editing);
        line.append('C').unwrap();
        assert_eq!(line.content(), "C");
    }

    #[test]
    fn test_display() {
        let mut line = line();
        line.append('O').unwrap();
        line.append('K').unwrap();
        let mut out: String<8> = String::new();
        core::fmt::write(&mut out, format_args!("{}", line)).unwrap();
        assert_eq!(out.as_str(), "OK");
    }
}
