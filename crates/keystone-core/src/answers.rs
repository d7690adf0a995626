//! Ordered answer list
//!
//! Answers stay in the order they were produced. Names may repeat, and a
//! lookup by name returns the first match.

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub name: String,
    pub answer: Value,
}

impl Answer {
    pub fn new(name: impl Into<String>, answer: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            answer: answer.into(),
        }
    }

    /// The answer as it appears when substituted into a template
    pub fn display_value(&self) -> String {
        value_to_text(&self.answer)
    }
}

/// Render a value the way it is substituted into text
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Ordered sequence of answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(Vec<Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, answer: Answer) {
        self.0.push(answer);
    }

    /// Append `name` only if no answer with that name exists yet
    pub fn push_missing(&mut self, name: &str, answer: impl Into<Value>) {
        if self.find(name).is_none() {
            self.push(Answer::new(name, answer));
        }
    }

    /// Replace the first answer named `name`, or append it
    pub fn set(&mut self, name: &str, answer: impl Into<Value>) {
        match self.0.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.answer = answer.into(),
            None => self.push(Answer::new(name, answer)),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Answer> {
        self.0.iter().find(|a| a.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.find(name).map(|a| &a.answer)
    }

    /// String answer for `name`, failing when it was never collected
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.value(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ScaffoldError::MissingAnswer(name.to_string()))
    }

    /// Boolean answer for `name`; anything other than `true` reads as false
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.value(name), Some(Value::Bool(true)))
    }

    /// This list followed by every answer in `other`
    pub fn chain(&self, other: &Answers) -> Answers {
        let mut joined = self.clone();
        joined.0.extend(other.0.iter().cloned());
        joined
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

impl From<Vec<Answer>> for Answers {
    fn from(answers: Vec<Answer>) -> Self {
        Self(answers)
    }
}

impl FromIterator<Answer> for Answers {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Answer> for Answers {
    fn extend<I: IntoIterator<Item = Answer>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Answers {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_takes_first_match() {
        let answers: Answers = vec![
            Answer::new("name", "first"),
            Answer::new("name", "second"),
        ]
        .into();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.require_str("name").unwrap(), "first");
    }

    #[test]
    fn test_missing_answer_is_an_error() {
        let answers = Answers::new();
        let err = answers.require_str("selector").unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingAnswer(name) if name == "selector"));
    }

    #[test]
    fn test_display_value_of_non_strings() {
        assert_eq!(Answer::new("git", true).display_value(), "true");
        assert_eq!(Answer::new("count", 3).display_value(), "3");
        assert_eq!(Answer::new("none", Value::Null).display_value(), "");
    }

    #[test]
    fn test_push_missing_does_not_shadow() {
        let mut answers: Answers = vec![Answer::new("packageName", "kept")].into();
        answers.push_missing("packageName", "ignored");
        answers.push_missing("version", "1.0.0");

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.require_str("packageName").unwrap(), "kept");
    }

    #[test]
    fn test_set_replaces_first_match() {
        let mut answers: Answers = vec![Answer::new("v", "1"), Answer::new("v", "2")].into();
        answers.set("v", "3");
        answers.set("w", "4");

        let values: Vec<_> = answers.iter().map(Answer::display_value).collect();
        assert_eq!(values, vec!["3", "2", "4"]);
    }

    #[test]
    fn test_json_record_shape() {
        let answers: Answers = vec![Answer::new("name", "my-lib"), Answer::new("git", false)].into();
        let json = answers.to_json().unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed,
            json!([
                { "name": "name", "answer": "my-lib" },
                { "name": "git", "answer": false }
            ])
        );
        assert_eq!(Answers::from_json(&json).unwrap(), answers);
    }
}
