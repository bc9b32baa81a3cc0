use std::sync::OnceLock;

use regex::Regex;

use crate::error::app_error::UniqueTarget;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Regex patterns are compiled once and cached.
pub struct ConstraintParser;

struct RegexPatterns {
    /// `Key (col1, col2)=(` as written in the DETAIL line
    key_columns: Regex,
    /// `constraint "name"` in the primary message
    constraint_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            key_columns: Regex::new(r"Key \(([^)]+)\)=\(").expect("valid key column regex"),
            constraint_name: Regex::new(r#"constraint "([^"]+)""#)
                .expect("valid constraint name regex"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Works out which model fields a unique violation refers to.
    ///
    /// Postgres reports the offending columns as `Key (email)=(a@x.com)` in
    /// the detail text (or inline in the message for some drivers). Column
    /// names are reported as model field names, so `author_id` becomes
    /// `authorId`. Without a column list the constraint name is returned,
    /// either the one supplied by the driver or the one quoted in `message`.
    ///
    /// # Examples
    /// ```
    /// use median::error::{ConstraintParser, UniqueTarget};
    ///
    /// let target = ConstraintParser::parse_unique_violation(
    ///     Some("Key (email)=(a@x.com) already exists."),
    ///     "duplicate key value violates unique constraint \"users_email_key\"",
    ///     Some("users_email_key"),
    /// );
    /// assert_eq!(target, Some(UniqueTarget::Fields(vec!["email".to_string()])));
    /// ```
    pub fn parse_unique_violation(
        details: Option<&str>,
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<UniqueTarget> {
        let columns = details
            .and_then(Self::extract_key_columns)
            .or_else(|| Self::extract_key_columns(message));

        if let Some(columns) = columns {
            let fields = columns.iter().map(|c| Self::to_camel_case(c)).collect();
            return Some(UniqueTarget::Fields(fields));
        }

        constraint_name
            .map(str::to_string)
            .or_else(|| Self::extract_constraint_from_message(message))
            .filter(|name| !name.is_empty())
            .map(UniqueTarget::Constraint)
    }

    /// Column list from a `Key (a, "B")=(...)` fragment, unquoted.
    pub fn extract_key_columns(text: &str) -> Option<Vec<String>> {
        let captured = Self::patterns().key_columns.captures(text)?.get(1)?;

        let columns: Vec<String> = captured
            .as_str()
            .split(',')
            .map(|column| column.trim().trim_matches('"').to_string())
            .filter(|column| !column.is_empty())
            .collect();

        if columns.is_empty() {
            None
        } else {
            Some(columns)
        }
    }

    pub fn extract_constraint_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .constraint_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `author_id` -> `authorId`; names without underscores pass through.
    pub fn to_camel_case(name: &str) -> String {
        let mut result = String::with_capacity(name.len());
        let mut upper_next = false;

        for ch in name.chars() {
            if ch == '_' {
                upper_next = !result.is_empty();
            } else if upper_next {
                result.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                result.push(ch);
            }
        }

        result
    }
}
