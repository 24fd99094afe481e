//! Table formatting using tabled
//!
//! Completion results become one row per option (label, type, detail,
//! info); token listings become one row per token.

use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
        width::Width,
    },
};

use super::TokenRow;
use crate::completion::CompletionResult;

/// Maximum width for free-text columns (characters)
const DEFAULT_MAX_COLUMN_WIDTH: usize = 48;

/// Table formatter
pub struct TableFormatter {
    /// Maximum width of the last column
    max_column_width: usize,

    /// Enable colored output
    use_colors: bool,
}

impl TableFormatter {
    /// Create a new table formatter with default settings
    pub fn new() -> Self {
        Self::with_colors(false)
    }

    /// Create a new table formatter with color support
    ///
    /// # Arguments
    /// * `use_colors` - Enable colored header row
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            use_colors,
        }
    }

    /// Format a completion result, one row per option
    pub fn format_completion(&self, result: Option<&CompletionResult>) -> String {
        let Some(result) = result else {
            return "(no completions)".to_string();
        };

        let mut builder = Builder::default();
        builder.push_record(header(&["label", "type", "detail", "info"]));
        for option in &result.options {
            builder.push_record(vec![
                option.label.clone(),
                option.kind.as_str().to_string(),
                option.detail.clone().unwrap_or_default(),
                option.info.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);

        format!(
            "{}\nfrom {} ({:?}, valid while {})",
            table,
            result.from,
            result.position,
            result.valid_for.pattern()
        )
    }

    /// Format lexer tokens, one row per token
    pub fn format_tokens(&self, rows: &[TokenRow]) -> String {
        if rows.is_empty() {
            return "(no tokens)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(header(&["kind", "text", "span"]));
        for row in rows {
            builder.push_record(vec![
                row.kind.to_string(),
                row.text.clone(),
                format!("{}..{}", row.start, row.end),
            ]);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);
        table.to_string()
    }

    fn apply_style(&self, table: &mut Table) {
        table.with(Style::modern());
        table.modify(Columns::last(), Width::wrap(self.max_column_width));
        table.modify(Rows::first(), Alignment::center());

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }
    }
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}
