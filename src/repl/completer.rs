//! Completer for reedline - bridges the completion engine to the editor menu

use reedline::{Completer, Span, Suggestion};
use tracing::warn;

use crate::completion::{CompletionEngine, CompletionOption, CompletionResult};

/// Query completer for reedline
///
/// The engine returns every candidate for the span; narrowing them to the
/// text typed so far is the editor's job, so this completer does it before
/// handing suggestions to the menu.
pub struct LoupeCompleter {
    /// Completion engine for context-aware suggestions
    engine: CompletionEngine,
}

impl LoupeCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `engine` - Completion engine backed by a provider
    pub fn new(engine: CompletionEngine) -> Self {
        Self { engine }
    }

    /// Turn a completion result into menu suggestions for `line`
    fn suggestions(line: &str, pos: usize, result: CompletionResult) -> Vec<Suggestion> {
        let end = pos.min(line.len()).max(result.from);
        let typed = line.get(result.from..end).unwrap_or("");
        let narrow = !typed.is_empty() && result.valid_for.is_valid(typed);

        result
            .options
            .into_iter()
            .filter(|option| !narrow || starts_with_ignore_case(&option.label, typed))
            .map(|option| Suggestion {
                description: describe(&option),
                value: option.label,
                span: Span::new(result.from, end),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}

impl Completer for LoupeCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The whole editor buffer
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        match futures::executor::block_on(self.engine.complete_text(line, pos)) {
            Ok(Some(result)) => Self::suggestions(line, pos, result),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Completion failed: {}", e);
                Vec::new()
            }
        }
    }
}

fn starts_with_ignore_case(label: &str, prefix: &str) -> bool {
    label
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn describe(option: &CompletionOption) -> Option<String> {
    match (&option.detail, &option.info) {
        (Some(detail), Some(info)) => Some(format!("{}: {}", detail, info)),
        (Some(text), None) | (None, Some(text)) => Some(text.clone()),
        (None, None) => None,
    }
}
