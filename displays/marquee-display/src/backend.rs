//! Display backend trait
//!
//! Defines the interface for surfaces that show the sign.

use core::fmt;

use marquee_core::render::{Palette, Render};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Writing to the surface failed
    Io,
    /// Row outside the surface
    InvalidRow,
    /// Surface not set up
    NotReady,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Io => f.write_str("display write failed"),
            DisplayError::InvalidRow => f.write_str("row outside the display"),
            DisplayError::NotReady => f.write_str("display not ready"),
        }
    }
}

/// Display backend trait
///
/// A row here is one sign line. A line being edited is drawn as plain text;
/// a displayed line is drawn from the rendered cell stream.
pub trait DisplayBackend {
    /// Style the backend paints cells with
    type Style: Copy;

    /// Lit and unlit styles for this surface
    fn palette(&self) -> Palette<Self::Style>;

    /// Clear the entire surface
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw a line that is being edited
    ///
    /// `focused` is true when the line receives keyboard input.
    fn draw_text(&mut self, row: u8, text: &str, focused: bool) -> Result<(), DisplayError>;

    /// Draw a displayed line from its rendered strokes
    fn draw_bitmap(&mut self, row: u8, strokes: Render<'_, Self::Style>)
        -> Result<(), DisplayError>;

    /// Flush buffered output to the surface
    fn flush(&mut self) -> Result<(), DisplayError>;
}
