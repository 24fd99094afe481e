//! Completion candidates
//!
//! A [`CompletionOption`] is owned by the host: the engine only forwards
//! provider lists, appends its own keyword/operator entries, and compares
//! labels against the fixed keyword set.

use serde::{Deserialize, Serialize};

/// Category tag attached to a candidate, used by hosts for icons and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Query command (get, find, ...)
    Command,
    /// Schema / record type name
    Type,
    /// Field of a schema
    Property,
    /// Language keyword
    Keyword,
    /// Comparison operator
    Operator,
}

impl OptionKind {
    /// Short lowercase name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Type => "type",
            Self::Property => "property",
            Self::Keyword => "keyword",
            Self::Operator => "operator",
        }
    }
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOption {
    /// Text inserted when the candidate is accepted
    pub label: String,

    /// Category tag
    #[serde(rename = "type")]
    pub kind: OptionKind,

    /// Short detail shown next to the label (e.g. a field type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Longer documentation string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl CompletionOption {
    /// Create a candidate with only a label and a category
    pub fn new(label: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            info: None,
        }
    }

    /// Attach a detail string
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a documentation string
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}
