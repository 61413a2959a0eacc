//! Line-to-bitmap composition
//!
//! A line of `n` characters becomes a 7-row bitmap `1 + 6n` cells wide:
//!
//! ```text
//! │sep│ glyph 0 (5) │sep│ glyph 1 (5) │sep│ ... │ glyph n-1 (5) │sep│
//! ```
//!
//! Separator columns are always unlit.

use core::fmt;

use crate::alphabet::Alphabet;
use crate::config::MAX_LEN;
use crate::error::SignError;
use crate::glyph::{GLYPH_COLS, GLYPH_ROWS};
use crate::render::{self, TEXT_PALETTE};

/// Width of the unlit column around each glyph
pub const SEPARATOR_WIDTH: usize = 1;

/// Columns consumed per character (glyph plus trailing separator)
pub const CELL_PITCH: usize = GLYPH_COLS + SEPARATOR_WIDTH;

/// Widest bitmap a full line produces
pub const MAX_BITMAP_WIDTH: usize = SEPARATOR_WIDTH + CELL_PITCH * MAX_LEN;

// Each bitmap row is one u128 mask
const _: () = assert!(MAX_BITMAP_WIDTH <= u128::BITS as usize);

/// A single bitmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    /// Pixel on
    Lit,
    /// Pixel off (background or separator)
    Unlit,
}

impl Cell {
    /// Check if this cell is lit
    pub fn is_lit(&self) -> bool {
        matches!(self, Cell::Lit)
    }
}

/// Composite bitmap of one encoded line
///
/// Column `c` of a row is bit `c` of that row's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap {
    rows: [u128; GLYPH_ROWS],
    width: u8,
}

impl Bitmap {
    /// Width of the bitmap for a line of `len` characters
    pub const fn width_for(len: usize) -> usize {
        SEPARATOR_WIDTH + CELL_PITCH * len
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Height in cells (always the glyph height)
    pub const fn height(&self) -> usize {
        GLYPH_ROWS
    }

    /// Number of characters this bitmap was composed from
    pub fn char_count(&self) -> usize {
        (self.width() - SEPARATOR_WIDTH) / CELL_PITCH
    }

    /// Cell at (row, col); cells outside the bitmap are unlit
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if self.is_lit(row, col) {
            Cell::Lit
        } else {
            Cell::Unlit
        }
    }

    /// Check whether the cell at (row, col) is lit
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        if col >= self.width() {
            return false;
        }
        self.rows.get(row).is_some_and(|mask| mask & (1u128 << col) != 0)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width()).map(move |col| self.cell(row, col))
    }

    /// Total lit cells
    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|mask| mask.count_ones()).sum()
    }
}

impl fmt::Display for Bitmap {
    /// Rows of block characters, each terminated by a newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_text(self, &TEXT_PALETTE, f)
    }
}

/// Encode a character sequence into a bitmap
///
/// Every character is checked against the alphabet, even when it came from a
/// line buffer that already validated it. Content longer than a sign line is
/// rejected with `LineFull`.
pub fn encode<I>(content: I, alphabet: &Alphabet) -> Result<Bitmap, SignError>
where
    I: IntoIterator<Item = char>,
{
    let mut rows = [0u128; GLYPH_ROWS];
    let mut len = 0;

    for c in content {
        if len == MAX_LEN {
            return Err(SignError::LineFull);
        }

        let glyph = alphabet.lookup(c)?;
        let origin = Bitmap::width_for(len);

        for (row, mask) in rows.iter_mut().enumerate() {
            for col in 0..GLYPH_COLS {
                if glyph.is_lit(row, col) {
                    *mask |= 1u128 << (origin + col);
                }
            }
        }

        len += 1;
    }

    Ok(Bitmap {
        rows,
        // Bounded by MAX_BITMAP_WIDTH
        width: Bitmap::width_for(len) as u8,
    })
}
