//! Bitmap rendering
//!
//! Maps every cell of a bitmap to one of two host styles. The renderer owns
//! no colors: a host supplies a [`Palette`] of whatever style type it draws
//! with (a terminal color, a character, an LED brightness) and consumes the
//! resulting stroke stream row by row.

use core::fmt;

use crate::encoder::{Bitmap, Cell};
use crate::glyph::GLYPH_ROWS;

/// Lit and unlit styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette<S> {
    /// Style for lit cells
    pub lit: S,
    /// Style for unlit cells
    pub unlit: S,
}

impl<S: Copy> Palette<S> {
    /// Create a palette
    pub const fn new(lit: S, unlit: S) -> Self {
        Self { lit, unlit }
    }

    /// Style for a cell
    pub fn style(&self, cell: Cell) -> S {
        match cell {
            Cell::Lit => self.lit,
            Cell::Unlit => self.unlit,
        }
    }
}

/// Block characters for a plain-text sign
pub const TEXT_PALETTE: Palette<char> = Palette::new('▇', '█');

/// One element of the rendered stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stroke<S> {
    /// A styled cell, left to right within the current row
    Cell(S),
    /// End of the current row
    RowEnd,
}

/// Iterator over the styled cells of a bitmap
///
/// Yields each row's cells followed by `RowEnd`, top row first.
#[derive(Debug, Clone)]
pub struct Render<'a, S> {
    bitmap: &'a Bitmap,
    palette: Palette<S>,
    row: usize,
    col: usize,
}

impl<S: Copy> Iterator for Render<'_, S> {
    type Item = Stroke<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= GLYPH_ROWS {
            return None;
        }

        if self.col < self.bitmap.width() {
            let cell = self.bitmap.cell(self.row, self.col);
            self.col += 1;
            return Some(Stroke::Cell(self.palette.style(cell)));
        }

        self.row += 1;
        self.col = 0;
        Some(Stroke::RowEnd)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let per_row = self.bitmap.width() + 1;
        let remaining = if self.row >= GLYPH_ROWS {
            0
        } else {
            (GLYPH_ROWS - self.row) * per_row - self.col
        };
        (remaining, Some(remaining))
    }
}

impl<S: Copy> ExactSizeIterator for Render<'_, S> {}

/// Render a bitmap with a palette
pub fn render<S: Copy>(bitmap: &Bitmap, palette: Palette<S>) -> Render<'_, S> {
    Render {
        bitmap,
        palette,
        row: 0,
        col: 0,
    }
}

/// Write a bitmap as text, one line per row
pub fn write_text<W: fmt::Write + ?Sized>(
    bitmap: &Bitmap,
    palette: &Palette<char>,
    out: &mut W,
) -> fmt::Result {
    for stroke in render(bitmap, *palette) {
        match stroke {
            Stroke::Cell(c) => out.write_char(c)?,
            Stroke::RowEnd => out.write_char('\n')?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::encoder::encode;

    const PLAIN: Palette<char> = Palette::new('#', '.');

    #[test]
    fn test_stroke_count() {
        let bitmap = encode("AB".chars(), &ALPHABET).unwrap();
        let strokes = render(&bitmap, PLAIN);
        // 13 cells plus a row end, seven times
        assert_eq!(strokes.len(), 7 * 14);
        assert_eq!(strokes.count(), 7 * 14);
    }

    #[test]
    fn test_row_ends() {
        let bitmap = encode("A".chars(), &ALPHABET).unwrap();
        let row_ends = render(&bitmap, PLAIN)
            .filter(|stroke| *stroke == Stroke::RowEnd)
            .count();
        assert_eq!(row_ends, 7);
    }

    #[test]
    fn test_styles_follow_cells() {
        let bitmap = encode("-".chars(), &ALPHABET).unwrap();
        let lit = render(&bitmap, Palette::new(1u8, 0u8))
            .filter(|stroke| *stroke == Stroke::Cell(1))
            .count();
        assert_eq!(lit as u32, bitmap.lit_count());
    }

    #[test]
    fn test_write_text() {
        let bitmap = encode("-".chars(), &ALPHABET).unwrap();
        let mut out: heapless::String<128> = heapless::String::new();
        write_text(&bitmap, &PLAIN, &mut out).unwrap();

        let expected = ".......\n\
                        .......\n\
                        .......\n\
                        .#####.\n\
                        .......\n\
                        .......\n\
                        .......\n";
        assert_eq!(out.as_str(), expected);
    }

    #[test]
    fn test_text_palette_matches_display() {
        let bitmap = encode("I".chars(), &ALPHABET).unwrap();
        let mut shown: heapless::String<256> = heapless::String::new();
        let mut written: heapless::String<256> = heapless::String::new();
        core::fmt::write(&mut shown, format_args!("{}", bitmap)).unwrap();
        write_text(&bitmap, &TEXT_PALETTE, &mut written).unwrap();
        assert_eq!(shown, written);
        assert!(shown.starts_with('█'));
    }

    #[test]
    fn test_empty_bitmap_renders_separator_column() {
        let bitmap = encode("".chars(), &ALPHABET).unwrap();
        let mut out: heapless::String<32> = heapless::String::new();
        write_text(&bitmap, &PLAIN, &mut out).unwrap();
        assert_eq!(out.as_str(), ".\n.\n.\n.\n.\n.\n.\n");
    }
}
