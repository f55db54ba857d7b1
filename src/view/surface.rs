//! Drawing capability used by the text views
//!
//! The viewer and the text area never talk to a terminal directly. They draw
//! through [`Surface`], whose coordinates are relative to the view's own
//! area. [`CellGrid`] is the in-memory implementation used by tests and by
//! hosts that want the raw `(char, tag)` grid.

use crate::primitives::shell_highlighter::TokenKind;

/// Minimal set of drawing operations a text view needs
pub trait Surface {
    /// Size of the drawable area as `(width, height)` in cells
    fn size(&self) -> (usize, usize);

    /// Blank a rectangular region
    fn clear_region(&mut self, row: usize, col: usize, width: usize, height: usize);

    /// Draw `text` starting at `(row, col)`, one cell per character, all with `tag`
    fn draw_styled_run(&mut self, row: usize, col: usize, text: &str, tag: TokenKind);

    /// Place the terminal cursor
    fn move_cursor_to(&mut self, row: usize, col: usize);
}

/// Replace characters that would not occupy exactly one cell
#[inline]
pub(crate) fn display_char(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}

/// A single rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tag: TokenKind,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            tag: TokenKind::Plain,
        }
    }
}

/// In-memory grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    cursor: Option<(usize, usize)>,
}

impl CellGrid {
    /// Create a blank grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            cursor: None,
        }
    }

    /// Cell at `(row, col)`, if inside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Text of one row, including trailing blanks
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|cell| cell.ch)
            .collect()
    }

    /// Tags of one row
    pub fn row_tags(&self, row: usize) -> Vec<TokenKind> {
        if row >= self.height {
            return Vec::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|cell| cell.tag)
            .collect()
    }

    /// Last position passed to [`Surface::move_cursor_to`]
    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    /// Every row framed by `|`, one per line. Handy for snapshots.
    pub fn to_framed_string(&self) -> String {
        (0..self.height)
            .map(|row| format!("|{}|", self.row_text(row)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for CellGrid {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear_region(&mut self, row: usize, col: usize, width: usize, height: usize) {
        let row_end = row.saturating_add(height).min(self.height);
        let col_end = col.saturating_add(width).min(self.width);
        for r in row..row_end {
            for c in col..col_end {
                self.cells[r * self.width + c] = Cell::default();
            }
        }
    }

    fn draw_styled_run(&mut self, row: usize, col: usize, text: &str, tag: TokenKind) {
        if row >= self.height {
            return;
        }
        for (offset, ch) in text.chars().enumerate() {
            let c = col + offset;
            if c >= self.width {
                break;
            }
            self.cells[row * self.width + c] = Cell {
                ch: display_char(ch),
                tag,
            };
        }
    }

    fn move_cursor_to(&mut self, row: usize, col: usize) {
        self.cursor = Some((row, col));
    }
}
