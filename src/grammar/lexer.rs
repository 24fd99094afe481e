//! Error-tolerant lexer for the query language
//!
//! This lexer classifies query text for highlighting. It never fails: unknown
//! characters become `Unknown` tokens and unterminated strings run to the end
//! of the line.
//!
//! Beyond plain token types it tracks where a query starts, so the first
//! word of a query becomes a `Command` and the word after the command (and an
//! optional quantifier) becomes a `Schema`. A query starts at a line whose
//! first word sits in column 0 and is not a keyword; indented or
//! keyword-led lines continue the previous query.

use super::token::{Keyword, Token, TokenKind};

/// Position within the head of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing seen yet on a new line
    LineStart,
    /// Command seen, quantifier or schema next
    AfterCommand,
    /// Quantifier seen, schema next
    AfterQuantifier,
    /// Inside the parameters or filter
    Body,
}

/// Query lexer
pub struct Lexer {
    source: String,
    /// Characters with their byte offsets
    input: Vec<(usize, char)>,
    pos: usize,
    phase: Phase,
    /// Whether the current token starts in column 0
    at_column_zero: bool,
}

impl Lexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        Self {
            source: input.to_string(),
            input: input.char_indices().collect(),
            pos: 0,
            phase: Phase::LineStart,
            at_column_zero: true,
        }
    }

    /// Tokenize the entire input, ending with an `Eof` token
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Self::new(input);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.offset();
        let Some(ch) = self.current_char() else {
            return Token::new(TokenKind::Eof, start..start);
        };

        let kind = match ch {
            '#' => return self.read_comment(),
            '"' | '\'' => return self.read_string(ch),
            c if c.is_ascii_digit() => return self.read_number(),
            c if c.is_alphabetic() || c == '_' => return self.read_word(),
            '.' if self.peek_char() == Some('.') => {
                self.advance();
                TokenKind::Range
            }
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '|' => TokenKind::Pipe,
            '&' => TokenKind::Ampersand,
            '=' => TokenKind::ComparisonOp("=".into()),
            '!' | '<' | '>' => {
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::ComparisonOp(format!("{ch}="))
                } else if ch == '!' {
                    TokenKind::Unknown('!')
                } else {
                    TokenKind::ComparisonOp(ch.to_string())
                }
            }
            other => TokenKind::Unknown(other),
        };

        self.advance();
        self.leave_head_for(&kind);
        Token::new(kind, start..self.offset())
    }

    /// Punctuation other than a quantifier `..` ends the query head
    fn leave_head_for(&mut self, kind: &TokenKind) {
        let in_range = matches!(kind, TokenKind::Range) && self.phase == Phase::AfterCommand;
        if !in_range {
            self.phase = Phase::Body;
        }
    }

    fn read_comment(&mut self) -> Token {
        let start = self.offset();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        let end = self.offset();
        let text = self.slice(start + 1, end);
        Token::new(TokenKind::Comment(text.trim().to_string()), start..end)
    }

    fn read_string(&mut self, quote: char) -> Token {
        let start = self.offset();
        self.advance();

        let mut value = String::new();
        let mut escaped = false;
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                break;
            } else {
                value.push(ch);
            }
        }

        self.phase = Phase::Body;
        Token::new(TokenKind::String(value), start..self.offset())
    }

    fn read_number(&mut self) -> Token {
        let start = self.offset();
        self.consume_digits();

        // Decimal part, but not a `..` range
        if self.current_char() == Some('.')
            && self.peek_char().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.consume_digits();
        }

        let end = self.offset();
        let text = self.slice(start, end).to_string();

        match self.phase {
            Phase::AfterCommand if self.at_magnitude_suffix() => {
                // Leave the suffix for the next call
                Token::new(TokenKind::Number(text), start..end)
            }
            Phase::AfterCommand if self.current_char() == Some('.') => {
                // Range start; the range end is read as another number
                Token::new(TokenKind::Number(text), start..end)
            }
            Phase::AfterCommand => {
                self.phase = Phase::AfterQuantifier;
                Token::new(TokenKind::Number(text), start..end)
            }
            Phase::AfterQuantifier => Token::new(TokenKind::Number(text), start..end),
            _ => {
                self.phase = Phase::Body;
                Token::new(TokenKind::Number(text), start..end)
            }
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.offset();
        let column_zero = self.at_column_zero;

        // A `k`/`m` directly after a quantifier number
        if self.phase == Phase::AfterCommand
            && self.previous_char().is_some_and(|c| c.is_ascii_digit())
        {
            if let Some(ch @ ('k' | 'm')) = self.current_char() {
                self.advance();
                self.phase = Phase::AfterQuantifier;
                return Token::new(TokenKind::Multiplier(ch), start..self.offset());
            }
        }

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let end = self.offset();
        let word = self.slice(start, end).to_string();
        let keyword = Keyword::from_word(&word);

        let kind = match (self.phase, keyword) {
            (Phase::LineStart, None) if column_zero => {
                self.phase = Phase::AfterCommand;
                TokenKind::Command(word)
            }
            (Phase::AfterCommand, Some(Keyword::All)) => {
                self.phase = Phase::AfterQuantifier;
                TokenKind::Keyword(Keyword::All)
            }
            (Phase::AfterCommand | Phase::AfterQuantifier, None) => {
                self.phase = Phase::Body;
                TokenKind::Schema(word)
            }
            (_, Some(kw)) => {
                self.phase = Phase::Body;
                TokenKind::Keyword(kw)
            }
            (_, None) => {
                self.phase = Phase::Body;
                match word.as_str() {
                    "true" => TokenKind::Boolean(true),
                    "false" => TokenKind::Boolean(false),
                    _ => TokenKind::Identifier(word),
                }
            }
        };

        Token::new(kind, start..end)
    }

    fn consume_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// `k`/`m` followed by a non-word character
    fn at_magnitude_suffix(&self) -> bool {
        matches!(self.current_char(), Some('k' | 'm'))
            && !self
                .peek_char()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn skip_whitespace(&mut self) {
        let mut column_zero = self.pos == 0;
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.phase = Phase::LineStart;
                column_zero = true;
            } else if ch.is_whitespace() {
                column_zero = false;
            } else {
                break;
            }
            self.advance();
        }
        self.at_column_zero = column_zero;
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos + 1).map(|&(_, c)| c)
    }

    fn previous_char(&self) -> Option<char> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.input.get(i))
            .map(|&(_, c)| c)
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Byte offset of the current character
    fn offset(&self) -> usize {
        self.input.get(self.pos).map_or(self.source.len(), |&(i, _)| i)
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        self.source.get(start..end).unwrap_or("")
    }
}
