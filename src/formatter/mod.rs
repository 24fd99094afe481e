//! Output formatting for completion results and token listings
//!
//! This module renders what the `complete` and `tokens` subcommands print:
//! - JSON formatting (plain and pretty-printed, optionally colored)
//! - Table formatting, one row per option or token

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

use serde::Serialize;

use crate::completion::CompletionResult;
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::grammar::{Token, TokenKind};

/// One lexer token as printed by the `tokens` subcommand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRow {
    pub kind: &'static str,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl TokenRow {
    /// Build printable rows from lexer output, dropping the end marker
    pub fn from_tokens(source: &str, tokens: &[Token]) -> Vec<Self> {
        tokens
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Eof))
            .map(|t| Self {
                kind: t.kind.category(),
                text: t.text(source).to_string(),
                start: t.span.start,
                end: t.span.end,
            })
            .collect()
    }
}

/// Main formatter for command output
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            use_colors,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format a completion result; `None` means nothing applies at the cursor
    ///
    /// # Arguments
    /// * `result` - Completion result to format
    ///
    /// # Returns
    /// * `Result<String>` - Formatted output or error
    pub fn format_completion(&self, result: Option<&CompletionResult>) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => JsonFormatter::new(false, self.use_colors).format(&result),
            OutputFormat::JsonPretty => JsonFormatter::new(true, self.use_colors).format(&result),
            OutputFormat::Table => {
                Ok(TableFormatter::with_colors(self.use_colors).format_completion(result))
            }
        }
    }

    /// Format lexer output for `source`
    pub fn format_tokens(&self, source: &str, tokens: &[Token]) -> Result<String> {
        let rows = TokenRow::from_tokens(source, tokens);
        match self.format_type {
            OutputFormat::Json => JsonFormatter::new(false, self.use_colors).format(&rows),
            OutputFormat::JsonPretty => JsonFormatter::new(true, self.use_colors).format(&rows),
            OutputFormat::Table => Ok(TableFormatter::with_colors(self.use_colors).format_tokens(&rows)),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}
