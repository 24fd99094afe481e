//! Custom prompt implementation for the loupe REPL

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the catalog in use
pub struct LoupePrompt {
    /// Short catalog label, e.g. `demo` or a file stem
    catalog: String,
}

impl LoupePrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `catalog` - Label of the active catalog
    pub fn new(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }
}

impl Prompt for LoupePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("loupe ({})> ", self.catalog).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
