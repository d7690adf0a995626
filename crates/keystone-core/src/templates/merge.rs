//! Merge strategies for files that already exist when a project is upgraded

use serde_json::Value;
use std::collections::HashSet;

/// Recursively merge `replacement` over `existing`
///
/// Objects merge key by key and the replacement wins everywhere else,
/// arrays included. Afterwards every `protected` top-level field present in
/// `existing` is restored verbatim.
pub fn merge_json(existing: &str, replacement: &str, protected: &[String]) -> serde_json::Result<String> {
    let original: Value = serde_json::from_str(existing)?;
    let incoming: Value = serde_json::from_str(replacement)?;

    let mut merged = original.clone();
    merge_values(&mut merged, incoming);

    if let (Value::Object(merged_map), Value::Object(original_map)) = (&mut merged, &original) {
        for field in protected {
            if let Some(value) = original_map.get(field) {
                merged_map.insert(field.clone(), value.clone());
            }
        }
    }

    let mut output = serde_json::to_string_pretty(&merged)?;
    if replacement.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn merge_values(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Lines of `text` without the empty piece a final newline leaves behind
fn body_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines = split_lines(text);
    if text.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Keep every line of `replacement`, then append the lines of `existing` it lacks
///
/// Existing lines are compared against the full split of `replacement`, so a
/// blank line is dropped when the replacement ends with a newline. Uses the
/// newline convention of `existing`. A trailing newline on `replacement` is
/// kept at the end of the output.
pub fn merge_lines(existing: &str, replacement: &str) -> String {
    let newline = if existing.contains("\r\n") { "\r\n" } else { "\n" };

    let known: HashSet<&str> = split_lines(replacement).into_iter().collect();
    let missing = body_lines(existing)
        .into_iter()
        .filter(|line| !known.contains(line));

    let mut output = body_lines(replacement)
        .into_iter()
        .chain(missing)
        .collect::<Vec<_>>()
        .join(newline);
    if replacement.ends_with('\n') {
        output.push_str(newline);
    }
    output
}
