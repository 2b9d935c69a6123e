//! Structured result recovery from raw model output.
//!
//! Strategies run in order, most confident first, and the first success
//! wins:
//! 1. fenced ```json block
//! 2. whole trimmed text as JSON (object, or bare array)
//! 3. first `[` to last `]` anywhere in the text
//!
//! Nothing is ever partially recovered: either a strategy yields a full
//! result or the whole extraction fails with `MalformedResponse`.

use crate::error::SorcererError;
use crate::types::{GenerationResult, SubjectLine};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Why a single strategy did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The strategy's marker (fence, brackets) is not in the text.
    NotFound,
    /// Marker found, content did not fit the schema.
    Invalid(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NotFound => write!(f, "not found"),
            ParseError::Invalid(msg) => write!(f, "invalid: {}", msg),
        }
    }
}

type Strategy = fn(&str) -> Result<GenerationResult, ParseError>;

const STRATEGIES: [(&str, Strategy); 3] = [
    ("fenced_json", parse_fenced_json),
    ("direct_json", parse_direct_json),
    ("embedded_array", parse_embedded_array),
];

pub fn extract_result(raw: &str) -> Result<GenerationResult, SorcererError> {
    let mut failures = Vec::with_capacity(STRATEGIES.len());

    for (name, strategy) in STRATEGIES {
        match strategy(raw) {
            Ok(result) => {
                debug!(
                    "Extracted {} subject lines via {}",
                    result.subject_lines.len(),
                    name
                );
                let missing = result.missing_tones();
                if !missing.is_empty() {
                    warn!("Extracted result is missing tones: {:?}", missing);
                }
                return Ok(result);
            }
            Err(e) => {
                debug!("Strategy {} failed: {}", name, e);
                failures.push(format!("{}: {}", name, e));
            }
        }
    }

    Err(SorcererError::malformed(
        format!("no parse strategy succeeded ({})", failures.join("; ")),
        raw,
    ))
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```json(.*?)```").expect("fence pattern is a valid regex")
    })
}

/// Strategy 1: content of the first ```json fence.
pub fn parse_fenced_json(raw: &str) -> Result<GenerationResult, ParseError> {
    let captures = fence_regex().captures(raw).ok_or(ParseError::NotFound)?;
    let body = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    parse_payload(body)
}

/// Strategy 2: the whole trimmed text is JSON.
pub fn parse_direct_json(raw: &str) -> Result<GenerationResult, ParseError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Err(ParseError::NotFound);
    }
    parse_payload(trimmed)
}

/// Strategy 3: greedy `[ ... ]` span anywhere in the text.
pub fn parse_embedded_array(raw: &str) -> Result<GenerationResult, ParseError> {
    let start = raw.find('[').ok_or(ParseError::NotFound)?;
    let end = raw.rfind(']').ok_or(ParseError::NotFound)?;
    if end <= start {
        return Err(ParseError::NotFound);
    }
    lines_from_str(&raw[start..=end]).map(GenerationResult::from_lines)
}

/// Object -> full result; array -> legacy line list with no prediction.
fn parse_payload(text: &str) -> Result<GenerationResult, ParseError> {
    let value: Value =
        serde_json::from_str(text.trim()).map_err(|e| ParseError::Invalid(e.to_string()))?;

    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ParseError::Invalid(e.to_string()))
        }
        Value::Array(_) => lines_from_value(value).map(GenerationResult::from_lines),
        other => Err(ParseError::Invalid(format!(
            "expected object or array, got {}",
            json_kind(&other)
        ))),
    }
}

fn lines_from_str(text: &str) -> Result<Vec<SubjectLine>, ParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseError::Invalid(e.to_string()))?;
    lines_from_value(value)
}

fn lines_from_value(value: Value) -> Result<Vec<SubjectLine>, ParseError> {
    serde_json::from_value(value).map_err(|e| ParseError::Invalid(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
