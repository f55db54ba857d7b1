//! Multi-line, soft-wrapped text entry used for commit messages
//!
//! The buffer is a flat sequence of characters that may contain hard breaks
//! (`'\n'`). Rows on screen come from splitting on hard breaks and then
//! wrapping each piece at `width` with the same greedy rule as the file
//! viewer. The cursor is a single offset into the buffer; its screen
//! position is recomputed from scratch whenever it is needed.
//!
//! Vertical movement only knows about hard breaks: moving up from the middle
//! of a long wrapped line jumps to the previous hard line, not to the
//! previous visual row.

use crate::primitives::line_wrapping::wrap_text;
use crate::primitives::shell_highlighter::TokenKind;
use crate::view::surface::Surface;

use super::FocusState;

const HARD_BREAK: char = '\n';

/// Row and column of the cursor relative to the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPosition {
    pub row: usize,
    pub column: usize,
}

/// Discrete input commands understood by the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Insert(char),
    HardBreak,
    DeleteBefore,
    DeleteAt,
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    ToggleFocus,
    Submit,
    Cancel,
}

/// Result of applying an [`EditCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Continue,
    Submitted(String),
    Cancelled,
}

/// State for a text area control
#[derive(Debug, Clone)]
pub struct TextAreaState {
    buffer: Vec<char>,
    /// Cursor position (character index, `0..=buffer.len()`)
    cursor: usize,
    width: usize,
    height: usize,
    /// Focused: keys edit the text. Normal: the submit button owns the keys.
    pub focus: FocusState,
}

impl TextAreaState {
    /// Create an empty, focused text area
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            width,
            height,
            focus: FocusState::Focused,
        }
    }

    /// Set the initial value; the cursor goes to the end
    pub fn with_value(mut self, value: &str) -> Self {
        self.buffer = value.chars().collect();
        self.cursor = self.buffer.len();
        self
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn value(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Place the cursor, clamped to the buffer
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.buffer.len());
    }

    /// Empty the buffer and focus the input again
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.focus = FocusState::Focused;
    }

    /// Apply one command. Editing commands only act while focused; the
    /// submit button (unfocused state) only reacts to submit, focus and cancel.
    pub fn apply(&mut self, command: EditCommand) -> EditOutcome {
        match command {
            EditCommand::ToggleFocus => {
                self.focus = match self.focus {
                    FocusState::Focused => FocusState::Normal,
                    FocusState::Normal => FocusState::Focused,
                };
            }
            EditCommand::Cancel => return EditOutcome::Cancelled,
            EditCommand::Submit => {
                if let Some(message) = self.submit() {
                    return EditOutcome::Submitted(message);
                }
            }
            _ if self.focus != FocusState::Focused => {}
            EditCommand::Insert(c) => self.insert(c),
            EditCommand::HardBreak => self.insert(HARD_BREAK),
            EditCommand::DeleteBefore => self.backspace(),
            EditCommand::DeleteAt => self.delete(),
            EditCommand::Left => self.move_left(),
            EditCommand::Right => self.move_right(),
            EditCommand::Up => self.move_up(),
            EditCommand::Down => self.move_down(),
            EditCommand::LineStart => self.move_line_start(),
            EditCommand::LineEnd => self.move_line_end(),
        }
        EditOutcome::Continue
    }

    /// The finished text, unless it is empty
    pub fn submit(&self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            tracing::debug!(chars = self.buffer.len(), "text area: submitted");
            Some(self.value())
        }
    }

    /// Insert a character at the cursor position
    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace)
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
    }

    /// Delete the character at the cursor (delete)
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    /// Start offset of the hard line containing `offset`
    fn line_start(&self, offset: usize) -> usize {
        self.buffer[..offset]
            .iter()
            .rposition(|&c| c == HARD_BREAK)
            .map_or(0, |pos| pos + 1)
    }

    /// End offset (position of the break, or buffer end) of the hard line containing `offset`
    fn line_end(&self, offset: usize) -> usize {
        self.buffer[offset..]
            .iter()
            .position(|&c| c == HARD_BREAK)
            .map_or(self.buffer.len(), |pos| offset + pos)
    }

    /// Offset in the hard line starting at `start` for `column`, clamped to
    /// the line length and to the last display column
    fn column_in_line(&self, start: usize, column: usize) -> usize {
        let len = self.line_end(start) - start;
        start + column.min(len).min(self.width.saturating_sub(1))
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let column = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        self.cursor = self.column_in_line(prev_start, column);
    }

    pub fn move_down(&mut self) {
        let start = self.line_start(self.cursor);
        let end = self.line_end(self.cursor);
        if end >= self.buffer.len() {
            return;
        }
        let column = self.cursor - start;
        self.cursor = self.column_in_line(end + 1, column);
    }

    pub fn move_line_start(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_line_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Screen position of the cursor.
    ///
    /// Scans from offset 0: a hard break starts a new row, and a character
    /// arriving at column `width - 1` or later starts a new row first and
    /// lands at column 1. Rows therefore hold `width - 1` characters here
    /// while [`Self::rows`] wraps at `width`.
    pub fn screen_position(&self) -> ScreenPosition {
        let last_column = self.width.max(1) - 1;
        let mut row = 0;
        let mut column = 0;

        for &c in &self.buffer[..self.cursor] {
            if c == HARD_BREAK {
                row += 1;
                column = 0;
            } else if column >= last_column {
                row += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        ScreenPosition { row, column }
    }

    /// Display rows: hard lines wrapped at `width`
    pub fn rows(&self) -> Vec<String> {
        self.value()
            .split(HARD_BREAK)
            .flat_map(|line| wrap_text(line, self.width))
            .collect()
    }

    /// Draw the text area onto `surface`, scrolled so the cursor row is visible
    pub fn render(&self, surface: &mut impl Surface) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let rows = self.rows();
        let position = self.screen_position();
        // Follow the cursor, but never scroll past the last page of text
        let first_row = (position.row + 1)
            .saturating_sub(self.height)
            .min(rows.len().saturating_sub(self.height));

        for screen_row in 0..self.height {
            match rows.get(first_row + screen_row) {
                Some(text) => {
                    surface.draw_styled_run(screen_row, 0, text, TokenKind::Plain);
                    let used = text.chars().count();
                    if used < self.width {
                        surface.clear_region(screen_row, used, self.width - used, 1);
                    }
                }
                None => surface.clear_region(screen_row, 0, self.width, 1),
            }
        }

        if self.focus == FocusState::Focused {
            let row = position.row.saturating_sub(first_row).min(self.height - 1);
            let column = position.column.min(self.width - 1);
            surface.move_cursor_to(row, column);
        }
    }
}
