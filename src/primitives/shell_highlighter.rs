//! Lexical annotation of shell script lines
//!
//! # Design
//! - **Per-character tags**: every character of a line gets exactly one
//!   [`TokenKind`], so the annotation can be sliced alongside the text when a
//!   line is wrapped.
//! - **Line-local state**: strings and comments never carry over to the next
//!   line; each line is annotated from a clean state.
//! - **Three passes**: a character-class pass (strings, comments, numbers,
//!   variables), then a word pass for keywords, then a symbol pass. Each pass
//!   only upgrades characters that are still [`TokenKind::Plain`].
//!
//! Annotation is recomputed wholesale whenever a file is loaded or reloaded,
//! never per keystroke.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shell reserved words recognized by the keyword pass (case-sensitive)
pub const SHELL_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "case", "esac", "for", "while", "until", "do", "done",
    "in", "function", "select",
];

/// Operator and punctuation characters recognized by the symbol pass
pub const SHELL_SYMBOLS: &[char] = &[
    '=', '+', '-', '*', '/', '|', '&', '<', '>', '(', ')', '[', ']', '{', '}', ';', ':',
];

/// Lexical class of a single character, used purely for styling
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    #[default]
    Plain,
    Keyword,
    String,
    Comment,
    Number,
    Variable,
    Symbol,
}

impl TokenKind {
    /// All token kinds, in display order
    pub const ALL: [TokenKind; 7] = [
        Self::Plain,
        Self::Keyword,
        Self::String,
        Self::Comment,
        Self::Number,
        Self::Variable,
        Self::Symbol,
    ];
}

/// Annotate a single line. The result always has one entry per `char`.
pub fn annotate_line(line: &str) -> Vec<TokenKind> {
    let chars: Vec<char> = line.chars().collect();
    let mut kinds = classify_chars(&chars);
    mark_keywords(&chars, &mut kinds);
    mark_symbols(&chars, &mut kinds);
    kinds
}

/// Annotate every line of a file
pub fn annotate_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<TokenKind>> {
    lines.iter().map(|line| annotate_line(line.as_ref())).collect()
}

fn classify_chars(chars: &[char]) -> Vec<TokenKind> {
    let mut kinds = vec![TokenKind::Plain; chars.len()];
    let mut in_string = false;
    let mut in_comment = false;
    let mut escaped = false;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        if in_comment {
            kinds[i] = TokenKind::Comment;
        } else if escaped {
            // The escaped character keeps its plain tag, even inside a string
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' || ch == '\'' {
            in_string = !in_string;
            kinds[i] = TokenKind::String;
        } else if !in_string && ch == '#' {
            in_comment = true;
            kinds[i] = TokenKind::Comment;
        } else if in_string {
            kinds[i] = TokenKind::String;
        } else if ch.is_ascii_digit() {
            kinds[i] = TokenKind::Number;
        } else if ch == '$' {
            kinds[i] = TokenKind::Variable;
            while i + 1 < chars.len() && is_name_char(chars[i + 1]) {
                i += 1;
                kinds[i] = TokenKind::Variable;
            }
        }

        i += 1;
    }

    kinds
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Upgrade whitespace-delimited runs of plain characters that spell a keyword.
///
/// A character already tagged by the first pass ends the run, so `x$y` is
/// split into `x` and the variable.
fn mark_keywords(chars: &[char], kinds: &mut [TokenKind]) {
    let mut pos = 0;
    while pos < chars.len() {
        while pos < chars.len() && (chars[pos].is_ascii_whitespace() || kinds[pos] != TokenKind::Plain)
        {
            pos += 1;
        }
        if pos >= chars.len() {
            break;
        }

        let start = pos;
        while pos < chars.len() && !chars[pos].is_ascii_whitespace() && kinds[pos] == TokenKind::Plain {
            pos += 1;
        }

        let word: String = chars[start..pos].iter().collect();
        if SHELL_KEYWORDS.contains(&word.as_str()) {
            kinds[start..pos].fill(TokenKind::Keyword);
        }
    }
}

fn mark_symbols(chars: &[char], kinds: &mut [TokenKind]) {
    for (ch, kind) in chars.iter().zip(kinds.iter_mut()) {
        if *kind == TokenKind::Plain && SHELL_SYMBOLS.contains(ch) {
            *kind = TokenKind::Symbol;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use TokenKind::{Comment, Keyword, Number, Plain, String as Str, Symbol, Variable};

    fn kinds_of(line: &str) -> Vec<TokenKind> {
        annotate_line(line)
    }

    #[test]
    fn test_keyword_boundary() {
        let kinds = kinds_of("if x then");
        assert_eq!(
            kinds,
            vec![Keyword, Keyword, Plain, Plain, Plain, Keyword, Keyword, Keyword, Keyword]
        );
    }

    #[test]
    fn test_keyword_inside_identifier_is_not_reclassified() {
        let kinds = kinds_of("fifo done_x");
        assert!(kinds.iter().all(|k| *k == Plain), "{kinds:?}");
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        assert!(kinds_of("IF").iter().all(|k| *k == Plain));
    }

    #[test]
    fn test_string_suppresses_comment() {
        let line = "echo \"a#b\"";
        let kinds = kinds_of(line);
        let hash = line.find('#').unwrap();
        assert_eq!(kinds[hash], Str);
        assert!(!kinds.contains(&Comment));
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let line = "echo hi # done";
        let kinds = kinds_of(line);
        let hash = line.find('#').unwrap();
        assert!(kinds[..hash].iter().all(|k| *k != Comment));
        assert!(kinds[hash..].iter().all(|k| *k == Comment));
    }

    #[test]
    fn test_variable_run() {
        let kinds = kinds_of("$FOO_1 bar");
        assert_eq!(&kinds[..6], &[Variable; 6]);
        assert_eq!(kinds[6], Plain);
        assert_eq!(&kinds[7..], &[Plain; 3]);
    }

    #[test]
    fn test_variable_breaks_keyword_run() {
        // `do` is followed by a variable with no space; the run ends at `$`
        let kinds = kinds_of("do$x");
        assert_eq!(kinds, vec![Keyword, Keyword, Variable, Variable]);
    }

    #[test]
    fn test_numbers_and_symbols() {
        let kinds = kinds_of("x=42;");
        assert_eq!(kinds, vec![Plain, Symbol, Number, Number, Symbol]);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let kinds = kinds_of("echo 'abc # x");
        assert!(kinds[5..].iter().all(|k| *k == Str), "{kinds:?}");
    }

    #[test]
    fn test_mixed_quotes_toggle_the_same_state() {
        // The single quote closes the string opened by the double quote
        let kinds = kinds_of("\"a' b");
        assert_eq!(kinds, vec![Str, Str, Str, Plain, Plain]);
    }

    #[test]
    fn test_escape_keeps_next_char_plain() {
        let kinds = kinds_of("\\\"x");
        // Backslash and the escaped quote stay plain; no string is opened
        assert_eq!(kinds, vec![Plain, Plain, Plain]);
    }

    #[test]
    fn test_escaped_symbol_still_gets_symbol_pass() {
        let kinds = kinds_of("\\;");
        assert_eq!(kinds, vec![Plain, Symbol]);
    }

    #[test]
    fn test_escaped_char_inside_string_is_plain() {
        let kinds = kinds_of("\"a\\\"b\"");
        assert_eq!(kinds, vec![Str, Str, Plain, Plain, Str, Str]);
    }

    #[test]
    fn test_length_matches_for_multibyte_text() {
        let line = "echo \"héllo\" # ünïcode";
        assert_eq!(annotate_line(line).len(), line.chars().count());
    }

    #[test]
    fn test_state_resets_per_line() {
        let lines = ["echo \"open", "fi"];
        let annotations = annotate_lines(&lines);
        assert_eq!(annotations[1], vec![Keyword, Keyword]);
    }

    #[test]
    fn test_empty_line() {
        assert!(annotate_line("").is_empty());
    }

    #[test]
    fn test_only_ascii_whitespace_separates_words() {
        // A no-break space is part of the word, so "if\u{a0}x" is no keyword
        assert_eq!(annotate_line("if\u{a0}x"), vec![Plain, Plain, Plain, Plain]);
        assert_eq!(annotate_line("if\tx"), vec![Keyword, Keyword, Plain, Plain]);
    }
}
