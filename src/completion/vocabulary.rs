//! Fixed keyword and operator tables of the query language

use super::option::{CompletionOption, OptionKind};

/// Keywords with their documentation, in presentation order
pub const KEYWORDS: &[(&str, &str)] = &[
    ("where", "Filter condition"),
    ("and", "Logical AND"),
    ("or", "Logical OR"),
    ("not", "Logical NOT"),
    ("in", "Check if value is in list"),
    ("like", "Pattern matching"),
    ("empty", "Check if field is empty"),
    ("all", "Get all records"),
];

/// Comparison operators with their documentation
pub const OPERATORS: &[(&str, &str)] = &[
    ("=", "Equal"),
    ("!=", "Not equal"),
    (">", "Greater than"),
    ("<", "Less than"),
    (">=", "Greater than or equal"),
    ("<=", "Less than or equal"),
];

/// Keywords that can also appear in operator position
pub const PATTERN_KEYWORDS: &[&str] = &["in", "like"];

/// Words that never start a comparison
pub const RESERVED: &[&str] = &["where", "and", "or", "not", "in", "like", "all"];

/// Check whether a word is reserved
pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Build the keyword candidate for `label`, if it is a keyword
pub fn keyword(label: &str) -> Option<CompletionOption> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == label)
        .map(|(kw, info)| CompletionOption::new(*kw, OptionKind::Keyword).with_info(*info))
}

/// Keyword candidates, excluding the given labels
pub fn keywords_except(excluded: &[&str]) -> Vec<CompletionOption> {
    KEYWORDS
        .iter()
        .filter(|(label, _)| !excluded.contains(label))
        .map(|(label, info)| CompletionOption::new(*label, OptionKind::Keyword).with_info(*info))
        .collect()
}

/// Candidates offered in operator position: comparisons, then `in` and `like`
pub fn operator_options() -> Vec<CompletionOption> {
    OPERATORS
        .iter()
        .map(|(label, info)| CompletionOption::new(*label, OptionKind::Operator).with_info(*info))
        .chain(PATTERN_KEYWORDS.iter().filter_map(|kw| keyword(kw)))
        .collect()
}
