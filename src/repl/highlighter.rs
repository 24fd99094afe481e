//! Syntax highlighter for the query language
//!
//! Colors follow the lexer's classification, so the command and schema of a
//! query stand out from fields and keywords in the filter.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::grammar::{Lexer, TokenKind};

/// Lexer-driven highlighter
pub struct SyntaxHighlighter {
    enabled: bool,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn style_for(kind: &TokenKind) -> Style {
        match kind {
            TokenKind::Command(_) => Color::Blue.bold(),
            TokenKind::Schema(_) => Color::Cyan.bold(),
            TokenKind::Keyword(_) => Color::Magenta.bold(),
            TokenKind::ComparisonOp(_) => Color::Yellow.into(),
            TokenKind::String(_) => Color::Green.into(),
            TokenKind::Number(_)
            | TokenKind::Boolean(_)
            | TokenKind::Multiplier(_)
            | TokenKind::Range => Color::LightPurple.into(),
            TokenKind::Comment(_) => Color::DarkGray.dimmed(),
            TokenKind::Unknown(_) => Color::Red.into(),
            _ => Style::default(),
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut last = 0;
        for token in Lexer::tokenize(line) {
            if token.span.start > last {
                styled.push((Style::default(), line[last..token.span.start].to_string()));
            }
            if token.span.end > token.span.start {
                styled.push((Self::style_for(&token.kind), token.text(line).to_string()));
            }
            last = last.max(token.span.end);
        }

        if last < line.len() {
            styled.push((Style::default(), line[last..].to_string()));
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, s)| s.as_str()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let highlighter = SyntaxHighlighter::new(true);
        let line = "get 10 User  where role.name = \"admin\" # admins";
        let result = highlighter.highlight(line, 0);
        assert_eq!(plain_text(&result), line);
        assert!(result.render_simple().contains('\u{1b}'));
    }

    #[test]
    fn test_command_and_schema_styled() {
        let highlighter = SyntaxHighlighter::new(true);
        let result = highlighter.highlight("get User", 0);

        assert_eq!(result.buffer[0], (Color::Blue.bold(), "get".to_string()));
        assert_eq!(result.buffer[1], (Style::default(), " ".to_string()));
        assert_eq!(result.buffer[2], (Color::Cyan.bold(), "User".to_string()));
    }

    #[test]
    fn test_keyword_styled() {
        let highlighter = SyntaxHighlighter::new(true);
        let result = highlighter.highlight("get User where", 0);
        let last = result.buffer.last().unwrap();
        assert_eq!(last, &(Color::Magenta.bold(), "where".to_string()));
    }

    #[test]
    fn test_disabled_highlighting() {
        let highlighter = SyntaxHighlighter::new(false);
        let result = highlighter.highlight("get User", 0);
        assert_eq!(result.buffer.len(), 1);
        assert_eq!(plain_text(&result), "get User");
    }

    #[test]
    fn test_multiline_input() {
        let highlighter = SyntaxHighlighter::new(true);
        let line = "get User\n  where id = 1";
        let result = highlighter.highlight(line, 0);
        assert_eq!(plain_text(&result), line);
        assert!(result.buffer.iter().any(|(_, s)| s.contains('\n')));
    }
}
