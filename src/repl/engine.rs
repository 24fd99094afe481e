//! Line editor setup and the read loop primitives

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::completion::CompletionEngine;
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::grammar::{Lexer, Token};

use super::completer::LoupeCompleter;
use super::highlighter::SyntaxHighlighter;
use super::prompt::LoupePrompt;
use super::validator::QueryValidator;

/// Name of the Tab-triggered completion menu
const COMPLETION_MENU: &str = "completion_menu";

/// What the loop should do with a submitted buffer
#[derive(Debug, Clone, PartialEq)]
pub enum ReplInput {
    /// Blank input
    Empty,
    /// `exit` or `quit`
    Exit,
    /// A query, classified by the lexer
    Query(Vec<Token>),
}

/// REPL engine for interactive query editing
pub struct ReplEngine {
    /// Line editor
    editor: Reedline,

    /// Prompt rendered before each line
    prompt: LoupePrompt,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `engine` - Completion engine feeding the Tab menu
    /// * `history_config` - History configuration
    /// * `highlighting_enabled` - Enable syntax highlighting
    /// * `catalog_label` - Catalog name shown in the prompt
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        engine: CompletionEngine,
        history_config: &HistoryConfig,
        highlighting_enabled: bool,
        catalog_label: &str,
    ) -> Result<Self> {
        let completion_menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let history = if history_config.persist {
            FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())?
        } else {
            FileBackedHistory::new(history_config.max_size)?
        };
        debug!(
            "History: max {} entries, persist={}",
            history_config.max_size, history_config.persist
        );

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(Box::new(LoupeCompleter::new(engine)))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(SyntaxHighlighter::new(highlighting_enabled)))
            .with_validator(Box::new(QueryValidator::new()));

        Ok(Self {
            editor,
            prompt: LoupePrompt::new(catalog_label),
            running: true,
        })
    }

    /// Read a single (possibly multi-line) input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input text, empty on Ctrl-C, `None` on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlD => {
                self.running = false;
                Ok(None)
            }
            // Ctrl-C discards the current buffer
            _ => Ok(Some(String::new())),
        }
    }

    /// Classify a submitted buffer
    pub fn process_input(&mut self, input: &str) -> ReplInput {
        let input = parse_input(input);
        if input == ReplInput::Exit {
            self.running = false;
        }
        input
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Classify a submitted buffer without an editor
pub fn parse_input(input: &str) -> ReplInput {
    match input.trim() {
        "" => ReplInput::Empty,
        "exit" | "quit" => ReplInput::Exit,
        query => ReplInput::Query(Lexer::tokenize(query)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::TokenKind;

    #[test]
    fn test_blank_input() {
        assert_eq!(parse_input("   \n"), ReplInput::Empty);
    }

    #[test]
    fn test_exit_commands() {
        assert_eq!(parse_input("exit"), ReplInput::Exit);
        assert_eq!(parse_input("  quit "), ReplInput::Exit);
    }

    #[test]
    fn test_query_is_tokenized() {
        let ReplInput::Query(tokens) = parse_input("get User where id = 1") else {
            panic!("expected a query");
        };
        assert_eq!(tokens[0].kind, TokenKind::Command("get".into()));
        assert_eq!(tokens[1].kind, TokenKind::Schema("User".into()));
    }

    #[test]
    fn test_exit_prefix_is_a_query() {
        assert!(matches!(parse_input("exit User"), ReplInput::Query(_)));
    }
}
