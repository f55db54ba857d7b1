// Property-based tests using proptest
// These tests generate random inputs and operation sequences and verify invariants

use labterm::primitives::line_wrapping::{char_position_to_segment, wrap_line};
use labterm::primitives::shell_highlighter::annotate_line;
use labterm::view::controls::{EditCommand, TextAreaState};
use labterm::view::file_viewer::{FileViewer, ScrollDirection};
use proptest::prelude::*;

/// Lines that look a bit like shell: words, quotes, comments, variables
fn shell_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[ -~]{0,120}",
        2 => r#"(if|then|fi|echo|\$[A-Z_]{1,6}|"[a-z #]{0,8}"|# ?[a-z ]{0,10}|[0-9]{1,3}|[|;&<>=]| ){0,12}"#,
        1 => "[a-zé→ \t]{0,40}",
    ]
}

fn scroll_strategy() -> impl Strategy<Value = ScrollDirection> {
    prop_oneof![
        Just(ScrollDirection::Up),
        Just(ScrollDirection::Down),
        Just(ScrollDirection::PageUp),
        Just(ScrollDirection::PageDown),
    ]
}

/// Strategy for generating random edit operations
fn edit_command_strategy() -> impl Strategy<Value = EditCommand> {
    prop_oneof![
        // Typing operations (more common)
        4 => "[a-z ]".prop_map(|s| EditCommand::Insert(s.chars().next().unwrap_or(' '))),
        1 => Just(EditCommand::HardBreak),
        // Navigation operations
        1 => Just(EditCommand::Left),
        1 => Just(EditCommand::Right),
        1 => Just(EditCommand::Up),
        1 => Just(EditCommand::Down),
        1 => Just(EditCommand::LineStart),
        1 => Just(EditCommand::LineEnd),
        // Editing operations
        2 => Just(EditCommand::DeleteBefore),
        2 => Just(EditCommand::DeleteAt),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    /// Concatenating the chunks of a line gives back the line and its annotation
    #[test]
    fn prop_wrap_round_trip(line in shell_line_strategy(), width in 1usize..50) {
        let kinds = annotate_line(&line);
        let chunks = wrap_line(&line, &kinds, width, 0);

        let text: String = chunks.iter().map(|c| c.text.as_str()).collect();
        prop_assert_eq!(&text, &line);
        let rejoined: Vec<_> = chunks.iter().flat_map(|c| c.kinds.iter().copied()).collect();
        prop_assert_eq!(rejoined, kinds);

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert!(chunk.char_len() <= width);
            if i + 1 < chunks.len() {
                prop_assert_eq!(chunk.char_len(), width, "only the last chunk may be short");
            }
            prop_assert_eq!(chunk.start_char, i * width);
        }
    }

    /// Every character offset maps into the chunk that holds it
    #[test]
    fn prop_offset_maps_to_chunk(line in "[a-z]{1,80}", width in 1usize..20) {
        let chunks = wrap_line(&line, &[], width, 0);
        for (offset, ch) in line.chars().enumerate() {
            let (segment, column) = char_position_to_segment(offset, width);
            prop_assert_eq!(chunks[segment].text.chars().nth(column), Some(ch));
        }
    }

    /// One classification per character, whatever the input
    #[test]
    fn prop_annotation_length(line in any::<String>()) {
        prop_assert_eq!(annotate_line(&line).len(), line.chars().count());
    }

    /// Re-wrapping after a resize matches wrapping at that width from scratch
    #[test]
    fn prop_rewrap_is_idempotent(
        lines in prop::collection::vec(shell_line_strategy(), 0..20),
        first_width in 1usize..60,
        second_width in 1usize..60,
    ) {
        let mut resized = FileViewer::new(first_width, 10);
        resized.set_lines(lines.clone());
        resized.resize(second_width, 10);
        resized.resize(first_width, 10);
        resized.resize(second_width, 10);

        let mut fresh = FileViewer::new(second_width, 10);
        fresh.set_lines(lines);

        prop_assert_eq!(resized.chunks(), fresh.chunks());
    }

    /// top_line never leaves [0, max(0, chunks - height)]
    #[test]
    fn prop_scroll_stays_in_range(
        line_count in 0usize..60,
        height in 1usize..20,
        ops in prop::collection::vec(scroll_strategy(), 0..40),
    ) {
        let mut viewer = FileViewer::new(20, height);
        viewer.set_lines((0..line_count).map(|i| format!("line {i}")).collect());
        let max = viewer.chunk_count().saturating_sub(height);

        for op in ops {
            let before = viewer.top_line();
            viewer.scroll(op);
            prop_assert!(viewer.top_line() <= max);
            match op {
                ScrollDirection::Up | ScrollDirection::PageUp => prop_assert!(viewer.top_line() <= before),
                ScrollDirection::Down | ScrollDirection::PageDown => prop_assert!(viewer.top_line() >= before),
            }
        }
    }

    /// The cursor stays within the buffer and on screen under any command sequence
    #[test]
    fn prop_text_area_cursor_in_bounds(
        width in 2usize..12,
        ops in prop::collection::vec(edit_command_strategy(), 0..60),
    ) {
        let mut area = TextAreaState::new(width, 5);
        for op in ops {
            let len_before = area.len();
            let cursor_before = area.cursor();
            area.apply(op);

            prop_assert!(area.cursor() <= area.len());
            prop_assert!(area.screen_position().column < width);
            if op == EditCommand::DeleteBefore && cursor_before == 0 {
                prop_assert_eq!(area.len(), len_before);
            }
            if op == EditCommand::DeleteAt && cursor_before == len_before {
                prop_assert_eq!(area.len(), len_before);
            }
        }
    }

    /// Each hard line fills rows of `width - 1` characters before the cursor wraps
    #[test]
    fn prop_screen_position_counts_rows(
        lines in prop::collection::vec("[a-c]{0,20}", 1..5),
        width in 2usize..8,
    ) {
        let per_row = width - 1;
        let extra_rows = |n: usize| if n == 0 { 0 } else { (n - 1) / per_row };

        let area = TextAreaState::new(width, 5).with_value(&lines.join("\n"));
        let (last, earlier) = lines.split_last().unwrap();
        let row: usize = earlier.iter().map(|l| extra_rows(l.len()) + 1).sum::<usize>()
            + extra_rows(last.len());
        let column = if last.is_empty() { 0 } else { (last.len() - 1) % per_row + 1 };

        let position = area.screen_position();
        prop_assert_eq!(position.row, row);
        prop_assert_eq!(position.column, column);
    }
}
