//! # Views Module
//!
//! Rendering of view model state to the terminal.

pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
