//! Reusable input controls
//!
//! ## Available Controls
//! - `TextArea` - Multi-line, soft-wrapped text entry with a submit button
//!
//! ## Pattern
//! Each control follows a consistent pattern:
//! - `*State` struct containing the control's data
//! - a `render` method drawing through [`crate::view::surface::Surface`]

pub mod text_area;

pub use text_area::{EditCommand, EditOutcome, ScreenPosition, TextAreaState};

/// Focus state for controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
}
