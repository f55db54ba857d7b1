//! [`Surface`] implementation on top of a ratatui buffer
//!
//! Coordinates passed in by the views are relative to `area`; anything
//! outside of it is clipped. The cursor is only recorded here because ratatui
//! places it per frame (`Frame::set_cursor_position`).

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

use crate::primitives::shell_highlighter::TokenKind;
use crate::view::surface::{display_char, Surface};
use crate::view::theme::Theme;

/// A view's area inside a ratatui buffer
#[derive(Debug)]
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    theme: &'a Theme,
    cursor: Option<Position>,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, theme: &'a Theme) -> Self {
        // Never write outside the buffer even if the caller's area is larger
        let area = area.intersection(buf.area);
        Self {
            buf,
            area,
            theme,
            cursor: None,
        }
    }

    /// Absolute terminal position of the cursor, if a view placed one
    pub fn cursor_position(&self) -> Option<Position> {
        self.cursor
    }

    fn absolute(&self, row: usize, col: usize) -> Option<Position> {
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        if row >= self.area.height || col >= self.area.width {
            return None;
        }
        Some(Position::new(self.area.x + col, self.area.y + row))
    }
}

impl Surface for BufferSurface<'_> {
    fn size(&self) -> (usize, usize) {
        (usize::from(self.area.width), usize::from(self.area.height))
    }

    fn clear_region(&mut self, row: usize, col: usize, width: usize, height: usize) {
        let style = self.theme.style(TokenKind::Plain);
        let (max_width, max_height) = self.size();
        let row_end = row.saturating_add(height).min(max_height);
        let col_end = col.saturating_add(width).min(max_width);
        for r in row..row_end {
            for c in col..col_end {
                if let Some(pos) = self.absolute(r, c) {
                    if let Some(cell) = self.buf.cell_mut(pos) {
                        cell.reset();
                        cell.set_style(style);
                    }
                }
            }
        }
    }

    fn draw_styled_run(&mut self, row: usize, col: usize, text: &str, tag: TokenKind) {
        let style = self.theme.style(tag);
        for (offset, ch) in text.chars().enumerate() {
            let Some(pos) = self.absolute(row, col + offset) else {
                break;
            };
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(display_char(ch));
                cell.set_style(style);
            }
        }
    }

    fn move_cursor_to(&mut self, row: usize, col: usize) {
        self.cursor = self.absolute(row, col);
    }
}
