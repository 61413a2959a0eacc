//! Screen mirror
//!
//! Holds what each sign line currently shows so a backend only redraws the
//! lines that changed.

use heapless::String;
use marquee_core::config::{LINE_COUNT, MAX_LEN};
use marquee_core::render::render;
use marquee_core::{Bitmap, EditController, SignError};

use crate::backend::{DisplayBackend, DisplayError};

/// What one sign line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    /// Line being edited, shown as typed
    Text(String<MAX_LEN>),
    /// Line committed, shown as dots
    Bitmap(Bitmap),
}

impl Default for RowView {
    fn default() -> Self {
        RowView::Text(String::new())
    }
}

/// Mirror of the sign's lines
///
/// Starts fully dirty so the first render draws every line.
#[derive(Debug, Clone)]
pub struct Screen {
    /// Current view of each line
    rows: [RowView; LINE_COUNT],
    /// Lines that need redrawing
    dirty: [bool; LINE_COUNT],
    /// Line with keyboard focus
    focused: u8,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create an empty screen
    pub fn new() -> Self {
        Self {
            rows: core::array::from_fn(|_| RowView::default()),
            dirty: [true; LINE_COUNT],
            focused: 0,
        }
    }

    /// Re-derive every line from the controller
    ///
    /// Displayed lines are encoded again from their content. Lines whose view
    /// or focus changed are marked dirty.
    pub fn refresh(&mut self, controller: &EditController<'_>) -> Result<(), SignError> {
        for (index, line) in controller.lines().iter().enumerate() {
            let view = if line.mode().is_displayed() {
                RowView::Bitmap(line.encode()?)
            } else {
                let mut text = String::new();
                text.push_str(line.content())
                    .map_err(|_| SignError::LineFull)?;
                RowView::Text(text)
            };

            if self.rows[index] != view {
                self.rows[index] = view;
                self.dirty[index] = true;
            }
        }

        let focused = controller.focused();
        if focused != self.focused {
            self.mark_row_dirty(self.focused);
            self.mark_row_dirty(focused);
            self.focused = focused;
        }

        Ok(())
    }

    /// Draw dirty lines to a backend, then flush
    pub fn render_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !self.is_dirty() {
            return Ok(());
        }

        let palette = backend.palette();
        for (index, row) in self.rows.iter().enumerate() {
            if !self.dirty[index] {
                continue;
            }
            // Bounded by LINE_COUNT
            let line = index as u8;
            match row {
                RowView::Text(text) => backend.draw_text(line, text, line == self.focused)?,
                RowView::Bitmap(bitmap) => backend.draw_bitmap(line, render(bitmap, palette))?,
            }
        }

        backend.flush()?;
        self.mark_clean();
        Ok(())
    }

    /// View of one line
    pub fn row(&self, line: u8) -> Option<&RowView> {
        self.rows.get(usize::from(line))
    }

    /// Line with keyboard focus
    pub fn focused(&self) -> u8 {
        self.focused
    }

    /// Check if any line needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&dirty| dirty)
    }

    /// Check if one line needs redrawing
    pub fn is_row_dirty(&self, line: u8) -> bool {
        self.dirty.get(usize::from(line)).copied().unwrap_or(false)
    }

    /// Mark every line as needing a redraw (after the surface was cleared)
    pub fn mark_dirty(&mut self) {
        self.dirty = [true; LINE_COUNT];
    }

    /// Mark all lines clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = [false; LINE_COUNT];
    }

    fn mark_row_dirty(&mut self, line: u8) {
        if let Some(dirty) = self.dirty.get_mut(usize::from(line)) {
            *dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::render::{Palette, Render, Stroke};
    use marquee_core::Outcome;
    use marquee_protocol::{EditEvent, RawKey};

    /// Records draw calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        texts: heapless::Vec<(u8, String<MAX_LEN>, bool), 16>,
        bitmaps: heapless::Vec<(u8, usize), 16>,
        flushes: usize,
    }

    impl DisplayBackend for Recorder {
        type Style = bool;

        fn palette(&self) -> Palette<bool> {
            Palette::new(true, false)
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn draw_text(&mut self, row: u8, text: &str, focused: bool) -> Result<(), DisplayError> {
            let mut owned = String::new();
            owned.push_str(text).map_err(|_| DisplayError::Io)?;
            self.texts
                .push((row, owned, focused))
                .map_err(|_| DisplayError::Io)
        }

        fn draw_bitmap(
            &mut self,
            row: u8,
            strokes: Render<'_, bool>,
        ) -> Result<(), DisplayError> {
            let lit = strokes.filter(|s| *s == Stroke::Cell(true)).count();
            self.bitmaps.push((row, lit)).map_err(|_| DisplayError::Io)
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn type_text(controller: &mut EditController<'_>, text: &str) {
        for c in text.chars() {
            let outcome = controller.handle_key(RawKey::plain(c as u32)).unwrap();
            assert_eq!(outcome, Outcome::Edited);
        }
    }

    fn drawn(controller: &EditController<'_>, screen: &mut Screen) -> Recorder {
        let mut recorder = Recorder::default();
        screen.refresh(controller).unwrap();
        screen.render_to(&mut recorder).unwrap();
        recorder
    }

    #[test]
    fn test_first_render_draws_everything() {
        let controller = EditController::new();
        let mut screen = Screen::new();
        let recorder = drawn(&controller, &mut screen);

        assert_eq!(recorder.texts.len(), LINE_COUNT);
        assert_eq!(recorder.flushes, 1);
        assert!(!screen.is_dirty());
        // Line 0 has focus
        assert!(recorder.texts[0].2);
        assert!(!recorder.texts[1].2);
    }

    #[test]
    fn test_clean_screen_skips_render() {
        let controller = EditController::new();
        let mut screen = Screen::new();
        drawn(&controller, &mut screen);

        let recorder = drawn(&controller, &mut screen);
        assert!(recorder.texts.is_empty());
        assert_eq!(recorder.flushes, 0);
    }

    #[test]
    fn test_only_edited_line_redraws() {
        let mut controller = EditController::new();
        let mut screen = Screen::new();
        drawn(&controller, &mut screen);

        type_text(&mut controller, "HI");
        let recorder = drawn(&controller, &mut screen);

        assert_eq!(recorder.texts.len(), 1);
        assert_eq!(recorder.texts[0].0, 0);
        assert_eq!(recorder.texts[0].1.as_str(), "HI");
        assert!(recorder.bitmaps.is_empty());
    }

    #[test]
    fn test_commit_draws_bitmap_and_moves_focus() {
        let mut controller = EditController::new();
        let mut screen = Screen::new();
        drawn(&controller, &mut screen);

        type_text(&mut controller, "-");
        controller.handle(EditEvent::commit(0)).unwrap();
        let recorder = drawn(&controller, &mut screen);

        // Line 0 becomes dots, line 1 gains focus
        assert_eq!(recorder.bitmaps.len(), 1);
        assert_eq!(recorder.bitmaps[0], (0, 5));
        assert_eq!(recorder.texts.len(), 1);
        assert_eq!(recorder.texts[0].0, 1);
        assert!(recorder.texts[0].2);
        assert_eq!(screen.focused(), 1);
        assert!(matches!(screen.row(0), Some(RowView::Bitmap(_))));
    }

    #[test]
    fn test_clear_all_returns_rows_to_text() {
        let mut controller = EditController::new();
        let mut screen = Screen::new();
        controller.show_arrow().unwrap();
        drawn(&controller, &mut screen);
        assert!(matches!(screen.row(1), Some(RowView::Bitmap(_))));

        controller.clear_all();
        let recorder = drawn(&controller, &mut screen);
        assert_eq!(recorder.texts.len(), 1);
        assert_eq!(recorder.texts[0].0, 1);
        assert_eq!(screen.row(1), Some(&RowView::default()));
    }

    #[test]
    fn test_mark_dirty_forces_full_redraw() {
        let controller = EditController::new();
        let mut screen = Screen::new();
        drawn(&controller, &mut screen);

        screen.mark_dirty();
        assert!(screen.is_row_dirty(2));
        let recorder = drawn(&controller, &mut screen);
        assert_eq!(recorder.texts.len(), LINE_COUNT);
    }

    #[test]
    fn test_row_out_of_range() {
        let screen = Screen::new();
        assert!(screen.row(3).is_none());
        assert!(!screen.is_row_dirty(3));
    }
}
