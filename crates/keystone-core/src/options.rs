//! Command-line option tokenizer
//!
//! Turns the arguments that follow a generator command into a map of
//! option name to values:
//!
//! - `--name` opens a long option, `--name=a,b` carries inline values
//! - `-abc` opens the single-character options `a`, `b` and `c`
//! - bare tokens attach to the most recently opened long option
//!
//! Parsing never fails. Anything that cannot attach to an option is dropped.

use std::collections::HashMap;
use std::fmt;

/// A coerced option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    /// Coerce a raw value through a closed set of literal forms
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        if let Ok(int) = raw.parse::<i64>() {
            return Self::Int(int);
        }

        // Rust accepts "inf" and "NaN" as floats; those stay strings
        let numeric_chars = raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        if numeric_chars && raw.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(float) = raw.parse::<f64>() {
                return Self::Float(float);
            }
        }

        Self::Str(raw.to_string())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Parsed options keyed by name
///
/// Key order is not preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionMap {
    options: HashMap<String, Vec<OptionValue>>,
}

impl OptionMap {
    pub fn get(&self, name: &str) -> Option<&[OptionValue]> {
        self.options.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// True when any of `names` was passed, with or without values
    pub fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    /// Values of the first of `names` that was passed with at least one value
    pub fn values_of_any(&self, names: &[&str]) -> Option<&[OptionValue]> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|values| !values.is_empty())
    }

    /// True when output should go to the examples tree instead of the library sources
    pub fn is_for_examples(&self) -> bool {
        self.has_any(&["example", "examples", "x"])
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// An option as it appeared on the command line, before filtering
#[derive(Debug)]
struct RawOption {
    name: String,
    values: Vec<String>,
}

fn split_values(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn tokenize<S: AsRef<str>>(argv: &[S]) -> Vec<RawOption> {
    let mut parsed: Vec<RawOption> = Vec::new();
    // Index into `parsed` of the long option that bare tokens attach to
    let mut open_long: Option<usize> = None;

    for token in argv {
        let token = token.as_ref().trim();

        if let Some(long) = token.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, values)) => (name, Some(values)),
                None => (long, None),
            };
            if name.is_empty() {
                open_long = None;
                continue;
            }
            parsed.push(RawOption {
                name: name.to_string(),
                values: inline.map(|v| split_values(v).collect()).unwrap_or_default(),
            });
            open_long = Some(parsed.len() - 1);
        } else if let Some(cluster) = token.strip_prefix('-') {
            parsed.extend(cluster.chars().map(|c| RawOption {
                name: c.to_string(),
                values: Vec::new(),
            }));
            open_long = None;
        } else if let Some(idx) = open_long {
            parsed[idx].values.extend(split_values(token));
        }
    }

    parsed
}

/// Parse `argv` (without the command name) into an [`OptionMap`]
///
/// When `allowed` is given, options outside it are dropped. The first
/// occurrence of an option wins.
pub fn parse_options<S: AsRef<str>>(argv: &[S], allowed: Option<&[&str]>) -> OptionMap {
    let mut options: HashMap<String, Vec<OptionValue>> = HashMap::new();

    for raw in tokenize(argv) {
        if let Some(allowed) = allowed {
            if !allowed.contains(&raw.name.as_str()) {
                tracing::trace!(option = %raw.name, "dropping option outside allow-list");
                continue;
            }
        }
        if options.contains_key(&raw.name) {
            continue;
        }
        let values = raw.values.iter().map(|v| OptionValue::coerce(v)).collect();
        options.insert(raw.name, values);
    }

    OptionMap { options }
}
