//! Path pattern matching.
//!
//! # Responsibilities
//! - Expand the `{id}` placeholder into a word wildcard
//! - Match request paths against the expanded pattern
//!
//! # Design Decisions
//! - Patterns compile once when the table is built, never per request
//! - The regex is anchored at the END of the path only: `/users/{id}`
//!   matches `/users/42` and also `/api/v2/users/42`. Arbitrary prefix
//!   content is accepted; this suffix rule is load-bearing for deployments
//!   that mount services under version prefixes.
//! - Pattern text other than `{id}` is passed to the regex engine verbatim

use regex::Regex;

/// Literal placeholder expanded to "one or more word characters".
const ID_PLACEHOLDER: &str = "{id}";

/// A compiled route path pattern, matched as a suffix of the request path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
}

impl PathPattern {
    /// Compile a pattern, expanding every literal `{id}`.
    ///
    /// Fails if the expanded pattern is not a valid regular expression.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let expanded = pattern.replace(ID_PLACEHOLDER, r"\w+");
        let regex = Regex::new(&format!("{}$", expanded))?;
        Ok(Self { regex })
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}
