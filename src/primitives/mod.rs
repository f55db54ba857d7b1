//! Low-level text primitives
//!
//! This module contains the shell lexical annotator and the fixed-width
//! line wrapper shared by the file viewer and the commit message editor.

pub mod line_wrapping;
pub mod shell_highlighter;
