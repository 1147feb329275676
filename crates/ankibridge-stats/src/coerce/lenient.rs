//! Lenient JSON parsing for values that arrive as text.
//!
//! LLM callers frequently send structured parameters as JSON strings,
//! sometimes encoded twice or typed with typographic quotes. This parser
//! tries the text as given, then with smart quotes replaced, and unwraps
//! string-encoded JSON up to a bounded depth.
//!
//! Parsed objects are [`serde_json::Map`] values: plain dictionaries with
//! no inherited members, so keys such as `__proto__` or `constructor` are
//! ordinary data. Nesting depth is not limited; deep documents grow the
//! stack on demand instead of failing.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Knobs for [`parse_json_leniently`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientOptions {
    /// Maximum number of JSON decodes applied to one candidate. Values below
    /// 1 behave as 1.
    pub max_depth: usize,
    /// Whether to retry with typographic quotes replaced by ASCII quotes.
    pub normalize_smart_quotes: bool,
}

impl Default for LenientOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            normalize_smart_quotes: true,
        }
    }
}

/// Every candidate failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .diagnostics.join("; "))]
pub struct ParseFailure {
    diagnostics: Vec<String>,
}

impl ParseFailure {
    fn single(message: impl Into<String>) -> Self {
        Self {
            diagnostics: vec![message.into()],
        }
    }

    /// One diagnostic per attempted candidate.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

/// Either the parsed value tree or the combined diagnostics.
pub type ParseOutcome = Result<Value, ParseFailure>;

/// Parse `text` as JSON, recovering from smart quotes and nested encoding.
///
/// # Example
///
/// ```
/// use ankibridge_stats::coerce::{LenientOptions, parse_json_leniently};
/// use serde_json::json;
///
/// let options = LenientOptions::default();
///
/// let value = parse_json_leniently("{“front”: “hello”}", &options).unwrap();
/// assert_eq!(value, json!({"front": "hello"}));
///
/// let value = parse_json_leniently(r#""[1, 2, 3]""#, &options).unwrap();
/// assert_eq!(value, json!([1, 2, 3]));
///
/// assert!(parse_json_leniently("hello", &options).is_err());
/// ```
pub fn parse_json_leniently(text: &str, options: &LenientOptions) -> ParseOutcome {
    let original = text.trim();
    if original.is_empty() {
        return Err(ParseFailure::single("input is empty"));
    }

    let mut candidates = vec![("as given", original.to_string())];
    if options.normalize_smart_quotes {
        let normalized = normalize_smart_quotes(original);
        if normalized != original {
            candidates.push(("with smart quotes normalized", normalized));
        }
    }

    let mut diagnostics = Vec::with_capacity(candidates.len());
    for (name, candidate) in &candidates {
        match parse_candidate(candidate, options.max_depth) {
            Ok(value) => return Ok(value),
            Err(reason) => diagnostics.push(format!("{}: {}", name, reason)),
        }
    }

    Err(ParseFailure { diagnostics })
}

/// Cheap check that text could be a JSON object, array or string.
pub fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{' | '[' | '"'))
}

fn parse_candidate(candidate: &str, max_depth: usize) -> Result<Value, String> {
    if !looks_like_json(candidate) {
        return Err("does not look like JSON (expected '{', '[' or '\"' first)".to_string());
    }

    let mut value = from_json_text(candidate).map_err(|e| e.to_string())?;
    let mut depth = 1;

    while depth < max_depth {
        let Value::String(inner) = &value else {
            break;
        };
        if !looks_like_json(inner) {
            break;
        }
        value = from_json_text(inner.trim())
            .map_err(|e| format!("nested JSON at depth {}: {}", depth + 1, e))?;
        depth += 1;
    }

    Ok(value)
}

/// Parse one JSON document without serde_json's nesting limit.
fn from_json_text(text: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

/// Replace typographic double and single quotes with their ASCII forms.
pub fn normalize_smart_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
            other => other,
        })
        .collect()
}
