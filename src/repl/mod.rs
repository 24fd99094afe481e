//! Interactive query editor
//!
//! This module wires the completion engine into a reedline editor:
//! - Tab opens a columnar menu fed by [`crate::completion::CompletionEngine`]
//! - Syntax highlighting from the grammar lexer
//! - Multi-line input while delimiters or strings are open
//! - File-backed history

mod completer;
mod engine;
mod highlighter;
mod prompt;
mod validator;

pub use completer::LoupeCompleter;
pub use engine::{ReplEngine, ReplInput, parse_input};
pub use highlighter::SyntaxHighlighter;
pub use prompt::LoupePrompt;
pub use validator::QueryValidator;
