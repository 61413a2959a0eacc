//! 7x5 dot-matrix glyphs

/// Glyph height in pixels
pub const GLYPH_ROWS: usize = 7;

/// Glyph width in pixels
pub const GLYPH_COLS: usize = 5;

/// Mask of the pixel bits a glyph row may use
const ROW_MASK: u8 = (1 << GLYPH_COLS) - 1;

/// A single character's pixel pattern
///
/// Each row is a 5-bit mask with the leftmost pixel in bit 4, so a row reads
/// the same way it is drawn: `0b01110` lights the middle three pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    rows: [u8; GLYPH_ROWS],
}

impl Glyph {
    /// Build a glyph from row masks
    ///
    /// Bits above the fifth column are discarded.
    pub const fn from_rows(rows: [u8; GLYPH_ROWS]) -> Self {
        let mut masked = [0u8; GLYPH_ROWS];
        let mut i = 0;
        while i < GLYPH_ROWS {
            masked[i] = rows[i] & ROW_MASK;
            i += 1;
        }
        Self { rows: masked }
    }

    /// Row mask for a row (0 = top)
    pub fn row(&self, row: usize) -> u8 {
        self.rows.get(row).copied().unwrap_or(0)
    }

    /// All row masks, top to bottom
    pub fn rows(&self) -> &[u8; GLYPH_ROWS] {
        &self.rows
    }

    /// Check whether the pixel at (row, col) is lit
    ///
    /// Coordinates outside the glyph are unlit.
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        if col >= GLYPH_COLS {
            return false;
        }
        self.row(row) & (1 << (GLYPH_COLS - 1 - col)) != 0
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Check whether no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Glyph = Glyph::from_rows([0, 0, 0, 0b11111, 0, 0, 0]);

    #[test]
    fn test_leftmost_pixel_is_high_bit() {
        let glyph = Glyph::from_rows([0b10000, 0, 0, 0, 0, 0, 0b00001]);
        assert!(glyph.is_lit(0, 0));
        assert!(!glyph.is_lit(0, 4));
        assert!(glyph.is_lit(6, 4));
        assert!(!glyph.is_lit(6, 0));
    }

    #[test]
    fn test_out_of_range_is_unlit() {
        assert!(!BAR.is_lit(3, 5));
        assert!(!BAR.is_lit(7, 0));
        assert_eq!(BAR.row(9), 0);
    }

    #[test]
    fn test_extra_bits_discarded() {
        let glyph = Glyph::from_rows([0xFF; GLYPH_ROWS]);
        assert_eq!(glyph.row(0), 0b11111);
        assert_eq!(glyph.lit_count(), (GLYPH_ROWS * GLYPH_COLS) as u32);
    }

    #[test]
    fn test_blank() {
        assert!(Glyph::from_rows([0; GLYPH_ROWS]).is_blank());
        assert!(!BAR.is_blank());
        assert_eq!(BAR.lit_count(), 5);
    }
}
