//! Completion context definitions
//!
//! This module defines the context handed to field providers: which command
//! and schema the query targets, and which association path the user has
//! walked so far.

use serde::{Deserialize, Serialize};

/// What kind of token a provider is being asked to complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// Schema names
    Schema,
    /// Field names (top-level or nested)
    Field,
    /// Comparison operators
    Operator,
    /// Language keywords
    Keyword,
    /// Query commands
    Command,
}

/// Input to field providers
///
/// `schema` is never empty when a provider receives the context, and the
/// `field_path` segments never contain a `.`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionContext {
    /// Leading verb of the query
    pub command: String,

    /// Schema the query is run against
    pub schema: String,

    /// Association path typed so far, outermost first
    #[serde(rename = "fieldPath")]
    pub field_path: Vec<String>,

    /// Kind of completion requested
    #[serde(rename = "type")]
    pub kind: CompletionKind,
}

impl CompletionContext {
    /// Create a field completion context
    ///
    /// # Arguments
    /// * `command` - Resolved command
    /// * `schema` - Resolved schema
    /// * `field_path` - Association path, outermost first
    pub fn field(
        command: impl Into<String>,
        schema: impl Into<String>,
        field_path: Vec<String>,
    ) -> Self {
        Self {
            command: command.into(),
            schema: schema.into(),
            field_path,
            kind: CompletionKind::Field,
        }
    }
}
