//! Raw key translation
//!
//! Hosts report key presses as a key code plus the modifiers held at the
//! time. Translation runs in a fixed order:
//!
//! 1. Enter, Escape and Backspace map to `Commit`, `Clear` and `Backspace`
//!    regardless of modifiers
//! 2. An entry in [`SPECIAL_COMBOS`] yields its symbol
//! 3. Any other key with a modifier held is `ModifierOnly`
//! 4. Everything else is the key code read as a character

use crate::events::{EditEvent, EditPayload};

// Control key codes
pub const KEY_BACKSPACE: u32 = 8;
pub const KEY_ENTER: u32 = 13;
pub const KEY_ESCAPE: u32 = 27;

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    /// Command / super key
    pub const COMMAND: Self = Self(1 << 3);

    /// Combine two modifier sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether every modifier in `other` is held
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no modifier is held
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A modifier + key combination that produces a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Combo {
    /// Exact modifier set that must be held
    pub modifiers: Modifiers,
    /// Key code
    pub code: u32,
    /// Symbol produced
    pub symbol: char,
}

/// Modifier combinations that produce otherwise unreachable symbols
///
/// Shift + 7 is `&` on the keyboards the sign ships with.
pub const SPECIAL_COMBOS: &[Combo] = &[Combo {
    modifiers: Modifiers::SHIFT,
    code: b'7' as u32,
    symbol: '&',
}];

/// A key press as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawKey {
    /// Key code: a Unicode scalar for printable keys, letters uppercase
    pub code: u32,
    /// Modifiers held
    pub modifiers: Modifiers,
}

impl RawKey {
    /// A key pressed with no modifiers
    pub const fn plain(code: u32) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key pressed with modifiers
    pub const fn with(code: u32, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Look up this key in the special combo table
    pub fn combo(&self) -> Option<&'static Combo> {
        SPECIAL_COMBOS
            .iter()
            .find(|combo| combo.code == self.code && combo.modifiers == self.modifiers)
    }

    /// Translate this key press into an edit payload
    pub fn to_payload(self) -> EditPayload {
        match self.code {
            KEY_ENTER => return EditPayload::Commit,
            KEY_ESCAPE => return EditPayload::Clear,
            KEY_BACKSPACE => return EditPayload::Backspace,
            _ => {}
        }

        if let Some(combo) = self.combo() {
            return EditPayload::Character(combo.symbol);
        }

        if !self.modifiers.is_empty() {
            return EditPayload::ModifierOnly;
        }

        // Codes that are not characters carry nothing to type
        char::from_u32(self.code)
            .map_or(EditPayload::ModifierOnly, EditPayload::Character)
    }

    /// Translate this key press into an event for the given line
    pub fn to_event(self, line: u8) -> EditEvent {
        EditEvent::new(line, self.to_payload())
    }
}
