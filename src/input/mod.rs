//! Keyboard input resolution

pub mod keybindings;

pub use keybindings::{Action, KeyContext, KeybindingResolver};
