//! Fixed-width line wrapping
//!
//! Wrapping is greedy and character-based: every chunk takes exactly
//! `min(width, remaining)` characters, with no word-boundary awareness. This
//! matches a monospaced terminal cell model and keeps the mapping from a
//! logical offset to a display position plain arithmetic
//! (see [`char_position_to_segment`]).

use crate::primitives::shell_highlighter::TokenKind;

/// One display row worth of a logical line, with its matching token slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedChunk {
    /// Text of this chunk (at most `width` characters)
    pub text: String,
    /// One token kind per character of `text`
    pub kinds: Vec<TokenKind>,
    /// Index of the logical line this chunk was cut from
    pub line_index: usize,
    /// Character offset of the chunk start within its logical line
    pub start_char: usize,
}

impl WrappedChunk {
    /// Number of characters (display cells) in this chunk
    pub fn char_len(&self) -> usize {
        self.kinds.len()
    }

    /// Iterate over `(char, kind)` pairs
    pub fn cells(&self) -> impl Iterator<Item = (char, TokenKind)> + '_ {
        self.text.chars().zip(self.kinds.iter().copied())
    }
}

/// Map a character offset within an unbroken line to `(segment, column)`
#[inline]
pub fn char_position_to_segment(offset: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    (offset / width, offset % width)
}

/// Wrap one annotated line into chunks of at most `width` characters.
///
/// An empty line produces a single empty chunk so blank lines keep their
/// vertical space. A `width` of 0 is treated as 1. If `kinds` is shorter than
/// the line, the missing tags are [`TokenKind::Plain`].
pub fn wrap_line(
    line: &str,
    kinds: &[TokenKind],
    width: usize,
    line_index: usize,
) -> Vec<WrappedChunk> {
    let width = width.max(1);
    let mut chunks: Vec<WrappedChunk> = Vec::new();

    for (offset, ch) in line.chars().enumerate() {
        let (segment, column) = char_position_to_segment(offset, width);
        if column == 0 {
            chunks.push(WrappedChunk {
                line_index,
                start_char: segment * width,
                ..WrappedChunk::default()
            });
        }
        if let Some(chunk) = chunks.last_mut() {
            chunk.text.push(ch);
            chunk.kinds.push(kinds.get(offset).copied().unwrap_or_default());
        }
    }

    if chunks.is_empty() {
        chunks.push(WrappedChunk {
            line_index,
            ..WrappedChunk::default()
        });
    }
    chunks
}

/// Wrap every line of a file, in order
pub fn wrap_lines<S: AsRef<str>>(
    lines: &[S],
    annotations: &[Vec<TokenKind>],
    width: usize,
) -> Vec<WrappedChunk> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            let kinds = annotations.get(index).map(Vec::as_slice).unwrap_or(&[]);
            wrap_line(line.as_ref(), kinds, width, index)
        })
        .collect()
}

/// Wrap unannotated text into row strings using the same chunking rule
pub fn wrap_text(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|row| row.iter().collect()).collect()
}
