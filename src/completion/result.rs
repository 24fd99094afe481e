//! Completion result returned to the host editor

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use super::option::CompletionOption;

static WORD_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w*$").unwrap());
static OPERATOR_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[=!<>]*$").unwrap());

/// The syntactic situation a completion was produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Start of a query line
    Command,
    /// After the command and optional quantifier
    Schema,
    /// After `path.` inside a filter
    NestedField,
    /// First field after `where`
    Field,
    /// After `and`, `or` or `(`
    AfterLogical,
    /// After a field, before the comparison
    Operator,
    /// Anywhere else once a `where` clause exists
    Keyword,
}

/// Which characters the host may keep filtering on before asking again
///
/// While the text typed since `from` still satisfies the predicate, the
/// host filters the current list itself instead of re-running the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidFor {
    /// Word characters only
    Word,
    /// Comparison-operator characters only
    Operator,
}

impl ValidFor {
    /// Regular expression source of the predicate
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Word => r"^\w*$",
            Self::Operator => r"^[=!<>]*$",
        }
    }

    /// Check whether `typed` still satisfies the predicate
    pub fn is_valid(&self, typed: &str) -> bool {
        match self {
            Self::Word => WORD_CHARS.is_match(typed),
            Self::Operator => OPERATOR_CHARS.is_match(typed),
        }
    }
}

impl Serialize for ValidFor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.pattern())
    }
}

/// Replacement span plus the candidates for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    /// Start of the replaced span; the span always ends at the cursor
    pub from: usize,

    /// Candidates, in provider order followed by any engine-added entries
    pub options: Vec<CompletionOption>,

    /// Predicate telling the host when to recompute
    pub valid_for: ValidFor,

    /// Which rule produced the result
    pub position: Position,
}

impl CompletionResult {
    /// Labels of all candidates, in order
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Check whether a candidate with this label is offered
    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|o| o.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::option::OptionKind;

    #[test]
    fn test_word_predicate() {
        assert!(ValidFor::Word.is_valid(""));
        assert!(ValidFor::Word.is_valid("user_id2"));
        assert!(!ValidFor::Word.is_valid("user id"));
        assert!(!ValidFor::Word.is_valid("role."));
    }

    #[test]
    fn test_operator_predicate() {
        assert!(ValidFor::Operator.is_valid(""));
        assert!(ValidFor::Operator.is_valid(">="));
        assert!(ValidFor::Operator.is_valid("!"));
        assert!(!ValidFor::Operator.is_valid("in"));
    }

    #[test]
    fn test_result_serialization() {
        let result = CompletionResult {
            from: 4,
            options: vec![CompletionOption::new("User", OptionKind::Type)],
            valid_for: ValidFor::Word,
            position: Position::Schema,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["from"], 4);
        assert_eq!(json["validFor"], r"^\w*$");
        assert_eq!(json["position"], "schema");
        assert_eq!(json["options"][0]["label"], "User");
    }

    #[test]
    fn test_labels_and_contains() {
        let result = CompletionResult {
            from: 0,
            options: vec![
                CompletionOption::new("get", OptionKind::Command),
                CompletionOption::new("find", OptionKind::Command),
            ],
            valid_for: ValidFor::Word,
            position: Position::Command,
        };

        assert_eq!(result.labels(), vec!["get", "find"]);
        assert!(result.contains("find"));
        assert!(!result.contains("list"));
    }
}
