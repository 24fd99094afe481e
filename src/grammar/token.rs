//! Token vocabulary of the query language

use std::fmt;
use std::ops::Range;

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Where,
    All,
    In,
    Like,
    Empty,
    And,
    Or,
    Not,
}

impl Keyword {
    /// Parse a keyword, case-sensitively
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "where" => Some(Self::Where),
            "all" => Some(Self::All),
            "in" => Some(Self::In),
            "like" => Some(Self::Like),
            "empty" => Some(Self::Empty),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    /// Source text of the keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Where => "where",
            Self::All => "all",
            Self::In => "in",
            Self::Like => "like",
            Self::Empty => "empty",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// First word of a query
    Command(String),
    /// Record type after the command and quantifier
    Schema(String),
    /// Field name or other bare word
    Identifier(String),
    /// Reserved word
    Keyword(Keyword),
    /// `=`, `!=`, `>`, `<`, `>=`, `<=`
    ComparisonOp(String),
    /// Quoted string, quotes excluded
    String(String),
    /// Integer or decimal literal
    Number(String),
    /// `true` / `false`
    Boolean(bool),
    /// `k` / `m` magnitude suffix directly after a number
    Multiplier(char),
    /// `..` in a quantifier range
    Range,
    /// `#` comment up to the end of the line
    Comment(String),
    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Pipe,
    Ampersand,
    /// End of input
    Eof,
    /// Unknown character
    Unknown(char),
}

impl TokenKind {
    /// Short category name, used when listing tokens
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Command(_) => "command",
            TokenKind::Schema(_) => "schema",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::ComparisonOp(_) => "operator",
            TokenKind::String(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Multiplier(_) => "multiplier",
            TokenKind::Range => "range",
            TokenKind::Comment(_) => "comment",
            TokenKind::Dot => "dot",
            TokenKind::LParen | TokenKind::RParen => "paren",
            TokenKind::LBracket | TokenKind::RBracket => "bracket",
            TokenKind::LBrace | TokenKind::RBrace => "brace",
            TokenKind::Colon | TokenKind::Comma | TokenKind::Pipe | TokenKind::Ampersand => {
                "punctuation"
            }
            TokenKind::Eof => "eof",
            TokenKind::Unknown(_) => "unknown",
        }
    }
}

/// Token with its byte span in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Source text covered by the token
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.clone()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip_names() {
        for word in ["where", "all", "in", "like", "empty", "and", "or", "not"] {
            let kw = Keyword::from_word(word).unwrap();
            assert_eq!(kw.as_str(), word);
        }
        assert!(Keyword::from_word("WHERE").is_none());
    }

    #[test]
    fn test_token_text() {
        let source = "get User";
        let token = Token::new(TokenKind::Schema("User".into()), 4..8);
        assert_eq!(token.text(source), "User");
        assert_eq!(token.kind.category(), "schema");
    }
}
