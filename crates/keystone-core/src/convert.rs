//! Name conversions and reusable answer transforms

use crate::answers::{value_to_text, Answers};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn dash_format() -> &'static Regex {
    static DASH: OnceLock<Regex> = OnceLock::new();
    DASH.get_or_init(|| {
        Regex::new(r"(?i)^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("dash-case pattern is valid")
    })
}

fn yes_no_format() -> &'static Regex {
    static YES_NO: OnceLock<Regex> = OnceLock::new();
    YES_NO.get_or_init(|| Regex::new(r"(?i)^(y(es)?|no?)$").expect("yes/no pattern is valid"))
}

/// `my-lib2` style names: a letter first, dash-separated alphanumeric words
pub fn is_dash_format(value: &str) -> bool {
    dash_format().is_match(value)
}

/// Transform that keeps dash-case strings and rejects everything else
pub fn dash_format_or_null(value: Value, _answers: &Answers) -> Value {
    match value.as_str() {
        Some(s) if is_dash_format(s) => value,
        _ => Value::Null,
    }
}

fn dash_join(value: &str, separator: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut parts = value.split('-');
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str(separator);
        out.push_str(&capitalize(part));
    }
    out
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `my-lib` -> `myLib`
pub fn dash_to_camel(value: &str) -> String {
    dash_join(value, "")
}

/// `my-lib` -> `MyLib`
pub fn dash_to_pascal(value: &str) -> String {
    capitalize(&dash_to_camel(value))
}

/// Same as [`dash_to_pascal`]; used for class names
pub fn dash_to_cap(value: &str) -> String {
    dash_to_pascal(value)
}

/// `my-lib` -> `My Lib`
pub fn dash_to_words(value: &str) -> String {
    capitalize(&dash_join(value, " "))
}

/// Parse a yes/no response
///
/// Blank input falls back to `default`. Unrecognized input gives `None`.
pub fn parse_yes_no(value: &Value, default: Option<bool>) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if yes_no_format().is_match(s) => Some(s.to_ascii_lowercase().starts_with('y')),
        Value::String(s) if s.is_empty() => default,
        Value::Null => default,
        _ => None,
    }
}

/// Transform for `(y/N)` questions; invalid input becomes null so it is asked again
pub fn yes_no(default: Option<bool>) -> impl Fn(Value, &Answers) -> Value + Send + Sync + 'static {
    move |value, _answers| match parse_yes_no(&value, default) {
        Some(answer) => Value::Bool(answer),
        None => Value::Null,
    }
}

/// Like [`yes_no`], then maps the boolean with `followup`
///
/// `followup` sees the answers so far followed by `known`.
pub fn yes_no_then<F>(
    default: Option<bool>,
    known: Answers,
    followup: F,
) -> impl Fn(Value, &Answers) -> Value + Send + Sync + 'static
where
    F: Fn(bool, &Answers) -> Value + Send + Sync + 'static,
{
    move |value, answers| match parse_yes_no(&value, default) {
        Some(answer) => followup(answer, &answers.chain(&known)),
        None => Value::Null,
    }
}

/// Format a stored yes/no answer as the letter a prompt expects
pub fn yes_no_label(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Y".to_string(),
        Value::Bool(false) | Value::Null => "N".to_string(),
        Value::String(s) if s.is_empty() => "N".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => "N".to_string(),
        other => value_to_text(other),
    }
}
