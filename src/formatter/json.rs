//! JSON formatting with optional color highlighting

use colored_json::prelude::*;
use serde::Serialize;

use crate::error::{LoupeError, Result};

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Indentation width for pretty output
    indent: usize,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `pretty` - Enable pretty printing
    /// * `use_colors` - Enable colored output
    pub fn new(pretty: bool, use_colors: bool) -> Self {
        Self {
            pretty,
            indent: 2,
            use_colors,
        }
    }

    /// Override the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Serialize any value as JSON
    ///
    /// # Arguments
    /// * `value` - Value to format
    ///
    /// # Returns
    /// * `Result<String>` - JSON string or error
    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json_str = if self.pretty {
            self.to_pretty_string(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| LoupeError::Generic(format!("JSON serialization failed: {}", e)))?;

        // Compact JSON stays uncolored for piping
        if self.use_colors && self.pretty {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Pretty-print with the configured indentation
    fn to_pretty_string<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> std::result::Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionOption, OptionKind};

    #[test]
    fn test_compact_is_single_line() {
        let option = CompletionOption::new("where", OptionKind::Keyword).with_info("Filter");
        let output = JsonFormatter::new(false, false).format(&option).unwrap();
        assert!(!output.contains('\n'));
        assert_eq!(
            output,
            r#"{"label":"where","type":"keyword","info":"Filter"}"#
        );
    }

    #[test]
    fn test_pretty_indent() {
        let output = JsonFormatter::new(true, false)
            .with_indent(4)
            .format(&vec![1, 2])
            .unwrap();
        assert_eq!(output, "[\n    1,\n    2\n]");
    }
}
