//! Completion engine - orchestrates the completion flow
//!
//! This module ties the completion components together: it builds the
//! per-request [`MatchState`], runs the ordered rules, awaits the one
//! provider call the matching rule asks for, and assembles the
//! [`CompletionResult`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::option::CompletionOption;
use super::provider::CompletionProvider;
use super::result::CompletionResult;
use super::rules::{self, Request};
use super::state::{LineLookup, MatchState, TextLines};
use crate::error::Result;

/// Veto predicate over the raw document text
pub type EnabledFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Engine settings supplied by the host
#[derive(Clone, Default)]
pub struct CompletionConfig {
    /// Offset before which the document is ignored
    pub start_at: usize,

    /// When set and returning false, no completion is offered at all
    pub enabled: Option<EnabledFn>,
}

impl CompletionConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore everything before `start_at`
    pub fn with_start_at(mut self, start_at: usize) -> Self {
        self.start_at = start_at;
        self
    }

    /// Veto requests for which `enabled` returns false
    pub fn with_enabled<F>(mut self, enabled: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.enabled = Some(Arc::new(enabled));
        self
    }

    /// Only complete documents that start with `sentinel`
    pub fn with_sentinel(self, sentinel: impl Into<String>) -> Self {
        let sentinel = sentinel.into();
        self.with_enabled(move |raw| raw.starts_with(&sentinel))
    }

    fn is_enabled(&self, raw: &str) -> bool {
        self.enabled.as_ref().is_none_or(|enabled| enabled(raw))
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("start_at", &self.start_at)
            .field("enabled", &self.enabled.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Main completion engine
///
/// The engine keeps no state between requests; cloning it is cheap and
/// clones share the provider.
#[derive(Clone)]
pub struct CompletionEngine {
    /// Candidate provider for fetching suggestions
    provider: Arc<dyn CompletionProvider>,

    /// Host settings
    config: CompletionConfig,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `provider` - Candidate provider for fetching suggestions
    /// * `config` - Host settings
    pub fn new(provider: Arc<dyn CompletionProvider>, config: CompletionConfig) -> Self {
        Self { provider, config }
    }

    /// Host settings this engine was built with
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Complete the document at the given cursor position
    ///
    /// # Arguments
    /// * `text` - Whole document
    /// * `cursor` - Cursor position (byte index)
    /// * `lines` - Line lookup for the document
    ///
    /// # Returns
    /// * `Result<Option<CompletionResult>>` - `Ok(None)` when nothing applies,
    ///   `Err` only when the provider fails
    pub async fn complete(
        &self,
        text: &str,
        cursor: usize,
        lines: &dyn LineLookup,
    ) -> Result<Option<CompletionResult>> {
        if !self.config.is_enabled(text) {
            trace!("completion vetoed by enabled predicate");
            return Ok(None);
        }

        // 1. Capture the text windows around the cursor
        let state = MatchState::new(text, cursor, lines, self.config.start_at);

        // 2. Find the first matching rule
        let Some(trigger) = rules::evaluate(&state) else {
            trace!(cursor = state.cursor(), "no completion rule applies");
            return Ok(None);
        };

        // 3. Fetch candidates for it
        let options = self.fetch(trigger.request).await?;

        let from = state.cursor() - trigger.partial_len;
        debug!(
            position = ?trigger.position,
            from,
            count = options.len(),
            "completion ready"
        );

        Ok(Some(CompletionResult {
            from,
            options,
            valid_for: trigger.valid_for,
            position: trigger.position,
        }))
    }

    /// Complete a plain string, splitting lines on `\n`
    ///
    /// # Arguments
    /// * `text` - Whole document
    /// * `cursor` - Cursor position (byte index)
    pub async fn complete_text(&self, text: &str, cursor: usize) -> Result<Option<CompletionResult>> {
        self.complete(text, cursor, &TextLines::new(text)).await
    }

    /// Fetch candidates for a matched rule
    async fn fetch(&self, request: Request) -> Result<Vec<CompletionOption>> {
        match request {
            Request::Commands => self.provider.commands().await,
            Request::Schemas { command } => self.provider.schemas(&command).await,
            Request::Fields { context, extra } => {
                let mut fields = self.provider.fields(&context).await?;
                fields.extend(extra);
                Ok(fields)
            }
            Request::Fixed(options) => Ok(options),
        }
    }
}
