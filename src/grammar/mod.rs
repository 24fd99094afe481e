//! Lexical structure of the query language
//!
//! Used for syntax highlighting and the `tokens` subcommand. Completion does
//! not depend on it: completion works on raw text because the text around the
//! cursor is usually not a valid query.

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};
