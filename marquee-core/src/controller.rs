//! Edit controller
//!
//! Routes input events to the sign's lines and enforces the per-line state
//! machine:
//!
//! | Event          | Editing                   | Displayed                  |
//! |----------------|---------------------------|----------------------------|
//! | character      | append (may be rejected)  | ignored                    |
//! | backspace      | delete last               | ignored                    |
//! | commit         | encode, go Displayed      | re-encode, stay Displayed  |
//! | clear          | empty, stay Editing       | empty, go Editing          |
//! | modifier only  | ignored                   | ignored                    |
//!
//! The controller also tracks which line has keyboard focus. Committing a
//! line moves focus to the next one so a message can be typed top to bottom.

use marquee_protocol::{EditEvent, EditPayload, RawKey};

use crate::alphabet::{Alphabet, ALPHABET};
use crate::config::{ARROW_LINE, ARROW_MESSAGE, LINE_COUNT, SIGN_LINES};
use crate::encoder::Bitmap;
use crate::error::SignError;
use crate::line::LineBuffer;

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Event had no effect
    Ignored,
    /// Line content changed
    Edited,
    /// Line is shown with this bitmap
    Displayed(Bitmap),
    /// Line was wiped and is back in edit mode
    Cleared,
}

/// Owner of the sign's lines
#[derive(Debug, Clone)]
pub struct EditController<'a> {
    lines: [LineBuffer<'a>; LINE_COUNT],
    focused: u8,
}

impl EditController<'static> {
    /// Create a controller using the sign's alphabet
    pub fn new() -> Self {
        Self::with_alphabet(&ALPHABET)
    }
}

impl Default for EditController<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EditController<'a> {
    /// Create a controller whose lines validate against `alphabet`
    pub fn with_alphabet(alphabet: &'a Alphabet) -> Self {
        Self {
            lines: core::array::from_fn(|_| LineBuffer::new(alphabet)),
            focused: 0,
        }
    }

    /// All lines, top to bottom
    pub fn lines(&self) -> &[LineBuffer<'a>; LINE_COUNT] {
        &self.lines
    }

    /// One line
    pub fn line(&self, line: u8) -> Result<&LineBuffer<'a>, SignError> {
        self.lines
            .get(usize::from(line))
            .ok_or(SignError::InvalidLine(line))
    }

    fn line_mut(&mut self, line: u8) -> Result<&mut LineBuffer<'a>, SignError> {
        self.lines
            .get_mut(usize::from(line))
            .ok_or(SignError::InvalidLine(line))
    }

    /// Line that receives raw keys
    pub fn focused(&self) -> u8 {
        self.focused
    }

    /// Move keyboard focus to a line
    pub fn focus(&mut self, line: u8) -> Result<(), SignError> {
        if line >= SIGN_LINES {
            return Err(SignError::InvalidLine(line));
        }
        self.focused = line;
        Ok(())
    }

    /// Move focus down, wrapping to the top
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % SIGN_LINES;
    }

    /// Move focus up, wrapping to the bottom
    pub fn focus_previous(&mut self) {
        self.focused = (self.focused + SIGN_LINES - 1) % SIGN_LINES;
    }

    /// Handle one event
    ///
    /// Errors reject the event and leave every line unchanged.
    pub fn handle(&mut self, event: EditEvent) -> Result<Outcome, SignError> {
        let buffer = self.line_mut(event.line)?;

        if buffer.mode().ignores(&event.payload) {
            return Ok(Outcome::Ignored);
        }

        let outcome = match event.payload {
            EditPayload::Character(c) => {
                buffer.append(c)?;
                Outcome::Edited
            }
            EditPayload::Backspace => {
                if buffer.delete_last() {
                    Outcome::Edited
                } else {
                    Outcome::Ignored
                }
            }
            EditPayload::Commit => {
                let bitmap = buffer.commit()?;
                self.focused = (event.line + 1) % SIGN_LINES;
                Outcome::Displayed(bitmap)
            }
            EditPayload::Clear => {
                buffer.clear();
                Outcome::Cleared
            }
            EditPayload::ModifierOnly => Outcome::Ignored,
        };

        Ok(outcome)
    }

    /// Translate a raw key and deliver it to the focused line
    pub fn handle_key(&mut self, key: RawKey) -> Result<Outcome, SignError> {
        self.handle(key.to_event(self.focused))
    }

    /// Clear every line
    pub fn clear_all(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Replace a line's content with `text` and display it
    ///
    /// If a character is rejected the line is left empty in edit mode.
    pub fn show(&mut self, line: u8, text: &str) -> Result<Bitmap, SignError> {
        let buffer = self.line_mut(line)?;
        buffer.clear();

        for c in text.chars() {
            if let Err(e) = buffer.append(c) {
                buffer.clear();
                return Err(e);
            }
        }

        buffer.commit()
    }

    /// Clear the sign and show the arrow banner on the middle line
    pub fn show_arrow(&mut self) -> Result<Bitmap, SignError> {
        self.clear_all();
        self.show(ARROW_LINE, ARROW_MESSAGE)
    }
}
