//! Query builder for the Anki search syntax used by the analysis workflows.
//!
//! # Example
//!
//! ```
//! use ankibridge::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .deck("Japanese Verbs")
//!     .rated_within_days(30)
//!     .build();
//!
//! assert_eq!(query, "deck:\"Japanese Verbs\" rated:30");
//! ```

/// A builder for Anki search queries.
#[derive(Debug, Clone, Default)]
#[must_use = "QueryBuilder does nothing until .build() is called"]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Filter by deck name (subdecks included, as Anki does).
    pub fn deck(mut self, name: &str) -> Self {
        self.parts.push(format!("deck:{}", quote_if_needed(name)));
        self
    }

    /// Filter for new cards.
    pub fn is_new(mut self) -> Self {
        self.parts.push("is:new".to_string());
        self
    }

    /// Exclude new cards.
    pub fn not_new(mut self) -> Self {
        self.parts.push("-is:new".to_string());
        self
    }

    /// Filter for review cards.
    pub fn is_review(mut self) -> Self {
        self.parts.push("is:review".to_string());
        self
    }

    /// Exclude suspended cards.
    pub fn not_suspended(mut self) -> Self {
        self.parts.push("-is:suspended".to_string());
        self
    }

    /// Cards answered within the last `days` days.
    pub fn rated_within_days(mut self, days: u32) -> Self {
        self.parts.push(format!("rated:{}", days));
        self
    }

    /// Build the query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

/// Quote a value when it contains characters Anki would split on.
fn quote_if_needed(s: &str) -> String {
    if s.contains(' ') || s.contains('"') || s.contains('(') || s.contains(')') {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}
