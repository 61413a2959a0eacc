//! The sign's fixed alphabet
//!
//! Every character the sign can show, with its exact pixel pattern. The table
//! is compiled in and never changes; lookups for anything else fail.

use crate::error::SignError;
use crate::glyph::Glyph;

/// A fixed mapping from character to glyph
///
/// Entries are sorted by character so lookups can binary search.
#[derive(Debug)]
pub struct Alphabet {
    entries: &'static [(char, Glyph)],
}

impl Alphabet {
    /// Wrap a table of entries sorted by character
    pub const fn new(entries: &'static [(char, Glyph)]) -> Self {
        Self { entries }
    }

    /// Look up the glyph for a character
    pub fn lookup(&self, c: char) -> Result<Glyph, SignError> {
        self.entries
            .binary_search_by_key(&c, |&(ch, _)| ch)
            .map(|index| self.entries[index].1)
            .map_err(|_| SignError::UnsupportedCharacter(c))
    }

    /// Check whether a character can be shown
    pub fn contains(&self, c: char) -> bool {
        self.lookup(c).is_ok()
    }

    /// Supported characters in table order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|&(c, _)| c)
    }

    /// All entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (char, Glyph)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of supported characters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the alphabet is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The sign's alphabet
pub static ALPHABET: Alphabet = Alphabet::new(&GLYPHS);

const fn g(rows: [u8; 7]) -> Glyph {
    Glyph::from_rows(rows)
}

#[rustfmt::skip]
static GLYPHS: [(char, Glyph); 41] = [
    (' ', g([0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000])),
    ('&', g([0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101])),
    ('-', g([0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000])),
    ('/', g([0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000])),
    ('0', g([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110])),
    ('1', g([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110])),
    ('2', g([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111])),
    ('3', g([0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110])),
    ('4', g([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010])),
    ('5', g([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110])),
    ('6', g([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110])),
    ('7', g([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000])),
    ('8', g([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110])),
    ('9', g([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100])),
    ('>', g([0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000])),
    ('A', g([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001])),
    ('B', g([0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110])),
    ('C', g([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110])),
    ('D', g([0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100])),
    ('E', g([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111])),
    ('F', g([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000])),
    ('G', g([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111])),
    ('H', g([0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001])),
    ('I', g([0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110])),
    ('J', g([0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100])),
    ('K', g([0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001])),
    ('L', g([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111])),
    ('M', g([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001])),
    ('N', g([0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001])),
    ('O', g([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110])),
    ('P', g([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000])),
    ('Q', g([0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101])),
    ('R', g([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001])),
    ('S', g([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110])),
    ('T', g([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100])),
    ('U', g([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110])),
    ('V', g([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100])),
    ('W', g([0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010])),
    ('X', g([0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001])),
    ('Y', g([0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100])),
    ('Z', g([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111])),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPH_COLS;

    #[test]
    fn test_table_sorted_and_unique() {
        for pair in GLYPHS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} before {:?}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_required_characters() {
        for c in ('A'..='Z').chain('0'..='9').chain(['-', '/', '&']) {
            assert!(ALPHABET.contains(c), "missing {:?}", c);
        }
    }

    #[test]
    fn test_all_ascii() {
        // Line buffers count bytes as characters
        assert!(ALPHABET.chars().all(|c| c.is_ascii()));
    }

    #[test]
    fn test_unsupported_lookup() {
        assert_eq!(
            ALPHABET.lookup('a'),
            Err(SignError::UnsupportedCharacter('a'))
        );
        assert_eq!(
            ALPHABET.lookup('é'),
            Err(SignError::UnsupportedCharacter('é'))
        );
        assert!(!ALPHABET.contains('?'));
    }

    #[test]
    fn test_rows_fit_five_columns() {
        for (c, glyph) in ALPHABET.iter() {
            for &row in glyph.rows() {
                assert!(row < (1 << GLYPH_COLS), "{:?} row {:#b}", c, row);
            }
        }
    }

    #[test]
    fn test_only_space_is_blank() {
        for (c, glyph) in ALPHABET.iter() {
            assert_eq!(glyph.is_blank(), c == ' ', "{:?}", c);
        }
    }

    #[test]
    fn test_known_patterns() {
        let a = ALPHABET.lookup('A').unwrap();
        assert_eq!(
            a.rows(),
            &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]
        );

        let dash = ALPHABET.lookup('-').unwrap();
        assert_eq!(dash.lit_count(), 5);
        assert_eq!(dash.row(3), 0b11111);
    }

    #[test]
    fn test_len() {
        assert_eq!(ALPHABET.len(), 41);
        assert!(!ALPHABET.is_empty());
        assert_eq!(ALPHABET.chars().next(), Some(' '));
    }
}
