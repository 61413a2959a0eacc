//! Terminal display backend
//!
//! Paints the sign with crossterm onto any writer. Interactive mode uses a
//! fixed layout where every sign line owns a block of terminal rows; script
//! mode streams each changed line to the output as it is drawn.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use marquee_core::encoder::MAX_BITMAP_WIDTH;
use marquee_core::glyph::GLYPH_ROWS;
use marquee_core::render::{Palette, Render, Stroke};
use marquee_display::{DisplayBackend, DisplayError};
use marquee_protocol::SIGN_LINES;

use crate::config::ColorScheme;

/// Terminal rows per sign line: a label row, the glyph rows, a gap
pub const BLOCK_HEIGHT: u16 = GLYPH_ROWS as u16 + 2;

/// Terminal columns a full sign line needs
pub const SIGN_COLUMNS: u16 = MAX_BITMAP_WIDTH as u16;

/// Style of one painted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub symbol: char,
    /// `None` paints in the terminal's default color
    pub color: Option<Color>,
}

/// Placement of sign lines on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Each line redraws in place
    Fixed,
    /// Each drawn line is appended to the output
    Stream,
}

/// crossterm-backed sign surface
pub struct TerminalBackend<W: Write> {
    out: W,
    palette: Palette<Paint>,
    text_color: Option<Color>,
    layout: Layout,
    /// Fixed layout draws only after the surface was cleared once
    ready: bool,
}

impl<W: Write> TerminalBackend<W> {
    /// Backend painting one symbol in the lit and unlit colors
    pub fn colored(out: W, colors: &ColorScheme, layout: Layout) -> Self {
        let paint = |color| Paint {
            symbol: colors.symbol,
            color: Some(color),
        };
        Self {
            out,
            palette: Palette::new(paint(colors.lit), paint(colors.unlit)),
            text_color: Some(colors.text),
            layout,
            ready: layout == Layout::Stream,
        }
    }

    /// Backend painting lit and unlit cells as different characters
    pub fn plain(out: W, chars: Palette<char>, layout: Layout) -> Self {
        let paint = |symbol| Paint {
            symbol,
            color: None,
        };
        Self {
            out,
            palette: Palette::new(paint(chars.lit), paint(chars.unlit)),
            text_color: None,
            layout,
            ready: layout == Layout::Stream,
        }
    }

    /// Release the writer
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write directly below the sign (fixed layout only)
    pub fn draw_footer(&mut self, text: &str) -> Result<(), DisplayError> {
        self.below_sign(0, text)
    }

    /// Write the status row under the footer (fixed layout only)
    ///
    /// An empty text clears the row.
    pub fn draw_status(&mut self, text: &str) -> Result<(), DisplayError> {
        self.below_sign(1, text)
    }

    fn below_sign(&mut self, offset: u16, text: &str) -> Result<(), DisplayError> {
        if self.layout == Layout::Stream {
            return Ok(());
        }
        let top = BLOCK_HEIGHT * u16::from(SIGN_LINES) + offset;
        queue!(
            self.out,
            MoveTo(0, top),
            Clear(ClearType::UntilNewLine),
            Print(text)
        )
        .map_err(io_error)
    }

    fn check_row(&self, row: u8) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if row >= SIGN_LINES {
            return Err(DisplayError::InvalidRow);
        }
        Ok(())
    }

    /// Position at one terminal row of a sign line's block
    fn start_row(&mut self, row: u8, offset: u16) -> io::Result<()> {
        match self.layout {
            Layout::Fixed => queue!(
                self.out,
                MoveTo(0, BLOCK_HEIGHT * u16::from(row) + offset),
                Clear(ClearType::UntilNewLine)
            ),
            Layout::Stream => Ok(()),
        }
    }

    fn end_row(&mut self) -> io::Result<()> {
        match self.layout {
            Layout::Fixed => Ok(()),
            Layout::Stream => self.out.write_all(b"\n"),
        }
    }

    fn label(&mut self, row: u8, marker: char, text: &str) -> io::Result<()> {
        self.start_row(row, 0)?;
        match self.text_color {
            Some(color) => queue!(
                self.out,
                SetForegroundColor(color),
                Print(format!("{}{} {}", marker, row, text)),
                ResetColor
            )?,
            None => write!(self.out, "{}{} {}", marker, row, text)?,
        }
        self.end_row()
    }

    fn write_text(&mut self, row: u8, text: &str, focused: bool) -> io::Result<()> {
        let marker = if focused { '>' } else { ' ' };
        self.label(row, marker, text)?;

        // Blank the glyph rows an earlier bitmap may have used
        if self.layout == Layout::Fixed {
            for offset in 1..=GLYPH_ROWS as u16 {
                self.start_row(row, offset)?;
            }
        }
        Ok(())
    }

    fn write_bitmap(&mut self, row: u8, strokes: Render<'_, Paint>) -> io::Result<()> {
        self.label(row, ' ', "")?;

        let mut offset = 1;
        let mut current = None;
        self.start_row(row, offset)?;

        for stroke in strokes {
            match stroke {
                Stroke::Cell(paint) => {
                    if paint.color != current {
                        if let Some(color) = paint.color {
                            queue!(self.out, SetForegroundColor(color))?;
                        }
                        current = paint.color;
                    }
                    queue!(self.out, Print(paint.symbol))?;
                }
                Stroke::RowEnd => {
                    if current.take().is_some() {
                        queue!(self.out, ResetColor)?;
                    }
                    self.end_row()?;
                    offset += 1;
                    if usize::from(offset) <= GLYPH_ROWS {
                        self.start_row(row, offset)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    type Style = Paint;

    fn palette(&self) -> Palette<Paint> {
        self.palette
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.layout == Layout::Fixed {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).map_err(io_error)?;
        }
        self.ready = true;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str, focused: bool) -> Result<(), DisplayError> {
        self.check_row(row)?;
        self.write_text(row, text, focused).map_err(io_error)
    }

    fn draw_bitmap(&mut self, row: u8, strokes: Render<'_, Paint>) -> Result<(), DisplayError> {
        self.check_row(row)?;
        self.write_bitmap(row, strokes).map_err(io_error)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.out.flush().map_err(io_error)
    }
}

fn io_error(e: io::Error) -> DisplayError {
    log::error!("Terminal write failed: {}", e);
    DisplayError::Io
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{encode, render, ALPHABET};

    fn plain(layout: Layout) -> TerminalBackend<Vec<u8>> {
        TerminalBackend::plain(Vec::new(), Palette::new('#', '.'), layout)
    }

    fn output(backend: TerminalBackend<Vec<u8>>) -> String {
        String::from_utf8(backend.into_inner()).unwrap()
    }

    #[test]
    fn test_stream_text() {
        let mut backend = plain(Layout::Stream);
        backend.draw_text(2, "HI", true).unwrap();
        backend.draw_text(0, "", false).unwrap();
        backend.flush().unwrap();
        assert_eq!(output(backend), ">2 HI\n 0 \n");
    }

    #[test]
    fn test_stream_bitmap() {
        let bitmap = encode("-".chars(), &ALPHABET).unwrap();
        let mut backend = plain(Layout::Stream);
        let palette = backend.palette();
        backend.draw_bitmap(1, render(&bitmap, palette)).unwrap();

        let expected = " 1 \n\
                        .......\n\
                        .......\n\
                        .......\n\
                        .#####.\n\
                        .......\n\
                        .......\n\
                        .......\n";
        assert_eq!(output(backend), expected);
    }

    #[test]
    fn test_invalid_row() {
        let mut backend = plain(Layout::Stream);
        assert_eq!(
            backend.draw_text(SIGN_LINES, "A", false),
            Err(DisplayError::InvalidRow)
        );
        assert!(output(backend).is_empty());
    }

    #[test]
    fn test_colored_palette() {
        let colors = ColorScheme {
            lit: Color::Yellow,
            unlit: Color::Black,
            text: Color::White,
            symbol: '▇',
        };
        let backend = TerminalBackend::colored(Vec::new(), &colors, Layout::Fixed);
        let palette = backend.palette();
        assert_eq!(palette.lit.color, Some(Color::Yellow));
        assert_eq!(palette.unlit.color, Some(Color::Black));
        assert_eq!(palette.lit.symbol, '▇');
    }

    #[test]
    fn test_fixed_layout_needs_clear() {
        let mut backend = plain(Layout::Fixed);
        assert_eq!(
            backend.draw_text(0, "A", false),
            Err(DisplayError::NotReady)
        );
        backend.clear().unwrap();
        assert!(backend.draw_text(0, "A", false).is_ok());
    }

    #[test]
    fn test_fixed_layout_positions_rows() {
        let mut backend = plain(Layout::Fixed);
        backend.clear().unwrap();
        backend.draw_text(1, "OK", false).unwrap();
        let out = output(backend);
        // Cursor moves are 1-based in ANSI: block 1 starts at terminal row 10
        assert!(out.contains("\x1b[10;1H"));
        assert!(out.contains(" 1 OK"));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_footer_only_in_fixed_layout() {
        let mut backend = plain(Layout::Stream);
        backend.draw_footer("F2 clear").unwrap();
        assert!(output(backend).is_empty());

        let mut backend = plain(Layout::Fixed);
        backend.draw_footer("F2 clear").unwrap();
        assert!(output(backend).contains("F2 clear"));
    }

    #[test]
    fn test_status_below_footer() {
        let mut backend = plain(Layout::Fixed);
        backend.draw_status("line is full").unwrap();
        let out = output(backend);
        // Footer is terminal row 28, status row 29 (1-based)
        assert!(out.contains("\x1b[29;1H"));
        assert!(out.contains("line is full"));

        let mut backend = plain(Layout::Stream);
        backend.draw_status("line is full").unwrap();
        assert!(output(backend).is_empty());
    }

    #[test]
    fn test_sign_columns() {
        assert_eq!(SIGN_COLUMNS, 121);
    }
}
