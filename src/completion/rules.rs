//! Ordered context rules
//!
//! Each rule is a pure predicate over the text before the cursor. It either
//! declines or returns a [`Trigger`] describing which candidates to fetch and
//! which span they replace. Rules run in a fixed order and the first match
//! wins:
//!
//! 1. command position
//! 2. schema position
//! 3. nested field path (`author.`)
//! 4. first field after `where`
//! 5. field after `and` / `or` / `(`
//! 6. comparison operator after a field
//! 7. any keyword once a `where` clause exists
//!
//! Rules 3 to 7 need the query's command and schema. They are resolved once,
//! after rules 1 and 2 decline. If either is missing the evaluation stops
//! with no completion.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::context::CompletionContext;
use super::option::CompletionOption;
use super::result::{Position, ValidFor};
use super::state::MatchState;
use super::vocabulary;

/// Quantifier between command and schema: `N..M`, `N`, `Nk`, `Nm` or `all`
macro_rules! quantifier {
    () => {
        r"(?:\d+\.\.\d+|\d+[km]?|all)?"
    };
}

static COMMAND_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\w*$").unwrap());
static TRAILING_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+$").unwrap());
static SCHEMA_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(concat!(r"^(\w+)\s+", quantifier!(), r"\s*(\w*)$")).unwrap());
static SCHEMA_BEFORE_WHERE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(\w+)\s+",
        quantifier!(),
        r"\s*(\w+)(?:\s+\{.*?\})?\s+where\b"
    ))
    .unwrap()
});
static SCHEMA_AT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(concat!(r"\b(\w+)\s+", quantifier!(), r"\s*(\w+)\s*$")).unwrap());
static LEADING_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s+").unwrap());
static NESTED_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\w.]+)\.(\w*)$").unwrap());
static AFTER_WHERE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bwhere\s+(\w*)$").unwrap());
static AFTER_LOGICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:and|or|\()\s+([\w.]*)$").unwrap());
static AFTER_OPERAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([\w.]+)\s+(\S*)$").unwrap());
static HAS_WHERE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bwhere\b").unwrap());

/// Something the text does not yet tell us
///
/// These are expected while the user is still typing and always end the
/// request with no completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// No leading command word yet
    Command,
    /// No schema after the command yet
    Schema,
}

/// Command and schema the query under the cursor targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub command: String,
    pub schema: String,
}

/// Candidates a matched rule asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// The provider's command list
    Commands,
    /// The provider's schemas for a command
    Schemas { command: String },
    /// The provider's fields, followed by `extra`
    Fields {
        context: CompletionContext,
        extra: Vec<CompletionOption>,
    },
    /// A fixed list that needs no provider
    Fixed(Vec<CompletionOption>),
}

/// Outcome of a matching rule
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub position: Position,
    /// Length in bytes of the partial token right before the cursor
    pub partial_len: usize,
    pub request: Request,
    pub valid_for: ValidFor,
}

impl Trigger {
    fn new(position: Position, partial: &str, request: Request, valid_for: ValidFor) -> Self {
        Self {
            position,
            partial_len: partial.len(),
            request,
            valid_for,
        }
    }
}

/// A rule that only needs the text
struct LeadingRule {
    name: &'static str,
    apply: fn(&MatchState<'_>) -> Option<Trigger>,
}

/// A rule that needs the resolved command and schema
struct ScopedRule {
    name: &'static str,
    apply: fn(&MatchState<'_>, &Scope) -> Option<Trigger>,
}

const LEADING_RULES: [LeadingRule; 2] = [
    LeadingRule {
        name: "command",
        apply: list_commands,
    },
    LeadingRule {
        name: "schema",
        apply: list_schemas,
    },
];

const SCOPED_RULES: [ScopedRule; 5] = [
    ScopedRule {
        name: "nested-field",
        apply: list_nested_fields,
    },
    ScopedRule {
        name: "field",
        apply: list_fields,
    },
    ScopedRule {
        name: "after-logical",
        apply: list_after_logical,
    },
    ScopedRule {
        name: "operator",
        apply: list_operators,
    },
    ScopedRule {
        name: "keyword",
        apply: list_keywords,
    },
];

/// Run the rules in order and return the first match
pub fn evaluate(state: &MatchState<'_>) -> Option<Trigger> {
    for rule in &LEADING_RULES {
        if let Some(trigger) = (rule.apply)(state) {
            debug!(rule = rule.name, partial_len = trigger.partial_len, "completion rule matched");
            return Some(trigger);
        }
        trace!(rule = rule.name, "completion rule declined");
    }

    let scope = match resolve_scope(state) {
        Ok(scope) => scope,
        Err(missing) => {
            debug!(?missing, "query scope not resolvable yet");
            return None;
        }
    };

    for rule in &SCOPED_RULES {
        if let Some(trigger) = (rule.apply)(state, &scope) {
            debug!(
                rule = rule.name,
                command = %scope.command,
                schema = %scope.schema,
                partial_len = trigger.partial_len,
                "completion rule matched"
            );
            return Some(trigger);
        }
        trace!(rule = rule.name, "completion rule declined");
    }

    None
}

/// Resolve command and schema, schema first
pub fn resolve_scope(state: &MatchState<'_>) -> Result<Scope, Unresolved> {
    let schema = extract_schema(state.text_before()).ok_or(Unresolved::Schema)?;
    let command = extract_command(state.text_before()).ok_or(Unresolved::Command)?;
    Ok(Scope { command, schema })
}

/// Find the schema of the query being typed
///
/// Prefixes of the text are tried from the longest (all lines) to the
/// shortest (first line only). A prefix resolves when it contains
/// `<command> <quantifier>? <schema> {...}? where`. The full text also
/// resolves when it ends in `<command> <quantifier>? <schema>`, so the schema
/// is known before `where` has been typed.
pub fn extract_schema(text: &str) -> Option<String> {
    let mut line_ends: Vec<usize> = text.match_indices('\n').map(|(i, _)| i).collect();
    line_ends.push(text.len());

    let last = line_ends.len() - 1;
    for (i, &end) in line_ends.iter().enumerate().rev() {
        let prefix = &text[..end];

        if let Some(caps) = SCHEMA_BEFORE_WHERE.captures(prefix) {
            return Some(caps[2].to_string());
        }

        if i == last {
            if let Some(caps) = SCHEMA_AT_END.captures(prefix) {
                return Some(caps[2].to_string());
            }
        }
    }

    None
}

/// First word of the text, when followed by whitespace
pub fn extract_command(text: &str) -> Option<String> {
    LEADING_COMMAND
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn list_commands(state: &MatchState<'_>) -> Option<Trigger> {
    let line = state.line_before();
    if !COMMAND_LINE.is_match(line) {
        return None;
    }

    let partial = TRAILING_WORD.find(line).map_or("", |m| m.as_str());
    Some(Trigger::new(
        Position::Command,
        partial,
        Request::Commands,
        ValidFor::Word,
    ))
}

fn list_schemas(state: &MatchState<'_>) -> Option<Trigger> {
    let caps = SCHEMA_POSITION.captures(state.line_before())?;
    let partial = caps.get(2).map_or("", |m| m.as_str());

    Some(Trigger::new(
        Position::Schema,
        partial,
        Request::Schemas {
            command: caps[1].to_string(),
        },
        ValidFor::Word,
    ))
}

fn list_nested_fields(state: &MatchState<'_>, scope: &Scope) -> Option<Trigger> {
    let caps = NESTED_PATH.captures(state.line_before())?;
    let field_path = caps[1].split('.').map(str::to_string).collect();
    let partial = caps.get(2).map_or("", |m| m.as_str());

    Some(Trigger::new(
        Position::NestedField,
        partial,
        Request::Fields {
            context: CompletionContext::field(&scope.command, &scope.schema, field_path),
            extra: Vec::new(),
        },
        ValidFor::Word,
    ))
}

fn list_fields(state: &MatchState<'_>, scope: &Scope) -> Option<Trigger> {
    let caps = AFTER_WHERE.captures(state.line_before())?;
    let partial = caps.get(1).map_or("", |m| m.as_str());

    Some(Trigger::new(
        Position::Field,
        partial,
        Request::Fields {
            context: CompletionContext::field(&scope.command, &scope.schema, Vec::new()),
            extra: Vec::new(),
        },
        ValidFor::Word,
    ))
}

fn list_after_logical(state: &MatchState<'_>, scope: &Scope) -> Option<Trigger> {
    let caps = AFTER_LOGICAL.captures(state.line_before())?;
    let path_text = caps.get(1).map_or("", |m| m.as_str());

    // `split` always yields at least one segment: the partial token
    let mut segments: Vec<&str> = path_text.split('.').collect();
    let partial = segments.pop().unwrap_or_default();
    let field_path = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Some(Trigger::new(
        Position::AfterLogical,
        partial,
        Request::Fields {
            context: CompletionContext::field(&scope.command, &scope.schema, field_path),
            extra: vocabulary::keyword("not").into_iter().collect(),
        },
        ValidFor::Word,
    ))
}

fn list_operators(state: &MatchState<'_>, _scope: &Scope) -> Option<Trigger> {
    let caps = AFTER_OPERAND.captures(state.line_before())?;
    if vocabulary::is_reserved(&caps[1]) {
        return None;
    }
    let partial = caps.get(2).map_or("", |m| m.as_str());

    Some(Trigger::new(
        Position::Operator,
        partial,
        Request::Fixed(vocabulary::operator_options()),
        ValidFor::Operator,
    ))
}

fn list_keywords(state: &MatchState<'_>, _scope: &Scope) -> Option<Trigger> {
    if !HAS_WHERE.is_match(state.text_before()) {
        return None;
    }
    let partial = TRAILING_WORD
        .find(state.line_before())
        .map_or("", |m| m.as_str());

    Some(Trigger::new(
        Position::Keyword,
        partial,
        Request::Fixed(vocabulary::keywords_except(&["all"])),
        ValidFor::Word,
    ))
}
