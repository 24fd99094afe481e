//! Validator for reedline - keeps the editor open for unfinished queries

use reedline::{ValidationResult, Validator};

/// Query validator for reedline
///
/// A query is incomplete while a bracket, brace or paren is open or a
/// string is unterminated. Comments are ignored.
pub struct QueryValidator;

impl QueryValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check if input has balanced delimiters and closed strings
    fn is_balanced(&self, input: &str) -> bool {
        let mut depth: i32 = 0;
        let mut in_string = false;
        let mut in_comment = false;
        let mut escape_next = false;
        let mut string_char = ' ';

        for ch in input.chars() {
            if in_comment {
                in_comment = ch != '\n';
                continue;
            }

            if in_string {
                if escape_next {
                    escape_next = false;
                } else if ch == '\\' {
                    escape_next = true;
                } else if ch == string_char {
                    in_string = false;
                }
                continue;
            }

            match ch {
                '"' | '\'' => {
                    in_string = true;
                    string_char = ch;
                }
                '#' => in_comment = true,
                '{' | '(' | '[' => depth += 1,
                '}' | ')' | ']' => depth -= 1,
                _ => {}
            }
        }

        // Too many closers is an error the user has to fix, not a reason to wait
        !in_string && depth <= 0
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for QueryValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        if trimmed.is_empty() || self.is_balanced(trimmed) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let validator = QueryValidator::new();
        assert!(matches!(validator.validate(""), ValidationResult::Complete));
        assert!(matches!(validator.validate("   "), ValidationResult::Complete));
    }

    #[test]
    fn test_simple_query() {
        let validator = QueryValidator::new();
        assert!(matches!(
            validator.validate("get User where id = 1"),
            ValidationResult::Complete
        ));
    }

    #[test]
    fn test_open_delimiters() {
        let validator = QueryValidator::new();
        assert!(matches!(
            validator.validate("get User {name,"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            validator.validate("get User where (id = 1 or"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            validator.validate("get User where id in [1, 2"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            validator.validate("get User {name}\n  where (id = 1)"),
            ValidationResult::Complete
        ));
    }

    #[test]
    fn test_unterminated_string() {
        let validator = QueryValidator::new();
        assert!(matches!(
            validator.validate("get User where name = \"ali"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            validator.validate(r#"get User where name = "a \"quoted\" (name""#),
            ValidationResult::Complete
        ));
    }

    #[test]
    fn test_delimiters_in_comments_ignored() {
        let validator = QueryValidator::new();
        assert!(matches!(
            validator.validate("get User # open ( here\nwhere id = 1"),
            ValidationResult::Complete
        ));
    }
}
