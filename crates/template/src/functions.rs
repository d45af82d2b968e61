//! Custom template functions and filters
//!
//! These are registered on every [`TemplateEngine`](crate::TemplateEngine)
//! and are available to all templates and partials.

use minijinja::{Error as MjError, ErrorKind, Value};

/// Look up an environment variable (empty string if unset)
pub fn env(key: String) -> String {
    std::env::var(&key).unwrap_or_default()
}

/// Current UTC time, optionally with a strftime format string
///
/// `{{ now() }}` yields RFC 3339; `{{ now("%Y-%m-%d") }}` yields `2026-08-24`.
pub fn now(format: Option<String>) -> String {
    let utc = chrono::Utc::now();
    match format {
        Some(fmt) => utc.format(&fmt).to_string(),
        None => utc.to_rfc3339(),
    }
}

/// Test a string against a regular expression
pub fn regex_match(value: String, pattern: String) -> Result<bool, MjError> {
    let re = compile_regex(&pattern)?;
    Ok(re.is_match(&value))
}

/// Replace all matches of a regular expression
pub fn regex_replace_all(
    value: String,
    pattern: String,
    replacement: String,
) -> Result<String, MjError> {
    let re = compile_regex(&pattern)?;
    Ok(re.replace_all(&value, replacement.as_str()).into_owned())
}

/// Split a string on a separator
pub fn split(value: String, separator: String) -> Vec<String> {
    value.split(&separator).map(str::to_string).collect()
}

/// Join a list of strings with a separator
pub fn join(values: Vec<String>, separator: String) -> String {
    values.join(&separator)
}

/// Serialize a value to a JSON string (filter)
pub fn to_json(value: Value) -> Result<String, MjError> {
    serde_json::to_string(&value).map_err(|e| {
        MjError::new(
            ErrorKind::InvalidOperation,
            format!("Cannot serialize value to JSON: {e}"),
        )
    })
}

/// Parse a JSON string into a template value (filter)
pub fn from_json(value: String) -> Result<Value, MjError> {
    let parsed: serde_json::Value = serde_json::from_str(&value).map_err(|e| {
        MjError::new(ErrorKind::InvalidOperation, format!("Invalid JSON: {e}"))
    })?;
    Ok(Value::from_serialize(&parsed))
}

/// Trim surrounding whitespace (filter)
pub fn trim(value: String) -> String {
    value.trim().to_string()
}

/// Trim leading whitespace (filter)
pub fn trim_start(value: String) -> String {
    value.trim_start().to_string()
}

/// Trim trailing whitespace (filter)
pub fn trim_end(value: String) -> String {
    value.trim_end().to_string()
}

fn compile_regex(pattern: &str) -> Result<regex::Regex, MjError> {
    regex::Regex::new(pattern).map_err(|e| {
        MjError::new(
            ErrorKind::InvalidOperation,
            format!("Invalid regex '{pattern}': {e}"),
        )
    })
}
