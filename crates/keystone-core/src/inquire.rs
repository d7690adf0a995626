//! Answer resolution
//!
//! A list of [`Question`]s is resolved strictly in order. Each question is
//! either asked (suspending for one line of operator input), derived from an
//! earlier answer, or skipped. Asked questions repeat until their
//! transformed answer is valid.

use crate::answers::{value_to_text, Answer, Answers};
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

/// Maps a raw or derived value to the stored answer, with access to the answers so far
pub type Transform = Arc<dyn Fn(Value, &Answers) -> Value + Send + Sync>;

/// Formats a previously recorded answer as a pre-filled response
pub type DefaultFormatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Pre-filled response for an asked question
#[derive(Clone)]
pub enum DefaultAnswer {
    Static(Value),
    Computed(Arc<dyn Fn(&Answers) -> Value + Send + Sync>),
}

impl DefaultAnswer {
    fn resolve(&self, answers: &Answers) -> Value {
        match self {
            Self::Static(value) => value.clone(),
            Self::Computed(compute) => compute(answers),
        }
    }
}

impl fmt::Debug for DefaultAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A question or derivation producing one named answer
#[derive(Clone)]
pub struct Question {
    name: String,
    question: Option<String>,
    use_answer: Option<String>,
    transform: Option<Transform>,
    allow_blank: bool,
    default_answer: Option<DefaultAnswer>,
}

/// What the resolver does with a question
enum Step<'a> {
    Prompt(&'a str),
    Derive(&'a str),
    Skip,
}

impl Question {
    /// A question that contributes no answer until `ask` or `derive` is set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            question: None,
            use_answer: None,
            transform: None,
            allow_blank: false,
            default_answer: None,
        }
    }

    /// Ask the operator `text`
    pub fn ask(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question: Some(text.into()),
            ..Self::named(name)
        }
    }

    /// Derive the answer from the earlier answer named `source`
    pub fn derive(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            use_answer: Some(source.into()),
            ..Self::named(name)
        }
    }

    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value, &Answers) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Accept an empty string as a valid answer
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn default_answer(mut self, value: impl Into<Value>) -> Self {
        self.default_answer = Some(DefaultAnswer::Static(value.into()));
        self
    }

    pub fn default_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&Answers) -> Value + Send + Sync + 'static,
    {
        self.default_answer = Some(DefaultAnswer::Computed(Arc::new(compute)));
        self
    }

    /// True when this question adds an entry to the answer list
    pub fn produces_answer(&self) -> bool {
        !matches!(self.step(), Step::Skip)
    }

    fn step(&self) -> Step<'_> {
        if let Some(text) = &self.question {
            Step::Prompt(text.trim())
        } else if let Some(source) = &self.use_answer {
            Step::Derive(source)
        } else {
            Step::Skip
        }
    }

    fn apply(&self, value: Value, answers: &Answers) -> Value {
        match &self.transform {
            Some(transform) => transform(value, answers),
            None => value,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => !s.is_empty() || self.allow_blank,
            Value::Null => false,
            _ => true,
        }
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("question", &self.question)
            .field("use_answer", &self.use_answer)
            .field("transform", &self.transform.as_ref().map(|_| ".."))
            .field("allow_blank", &self.allow_blank)
            .field("default_answer", &self.default_answer)
            .finish()
    }
}

/// Line-based source of operator input
#[async_trait]
pub trait Prompter: Send {
    /// Show `prompt` and wait for one line. `initial` is offered as the
    /// pre-filled response.
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String>;
}

#[async_trait]
impl<'a, P: Prompter + ?Sized> Prompter for &'a mut P {
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String> {
        (**self).ask(prompt, initial).await
    }
}

/// Prompter fed from a fixed list of lines
///
/// Runs out like a closed input stream.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    inputs: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Every prompt shown so far, including repeats
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, prompt: &str, _initial: Option<&str>) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.inputs.pop_front().ok_or(ScaffoldError::PromptClosed)
    }
}

/// Prompter reading lines from an async reader, echoing prompts to a writer
pub struct LinePrompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl LinePrompter<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

#[async_trait]
impl<R, W> Prompter for LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String> {
        let shown = match initial {
            Some(initial) if !initial.is_empty() => format!("{} ({}) ", prompt, initial),
            _ => format!("{} ", prompt),
        };
        let to_prompt_error = |e: std::io::Error| ScaffoldError::Prompt(e.to_string());
        self.out
            .write_all(shown.as_bytes())
            .await
            .map_err(to_prompt_error)?;
        self.out.flush().await.map_err(to_prompt_error)?;

        match self.lines.next_line().await.map_err(to_prompt_error)? {
            Some(line) => Ok(line.trim_end_matches('\r').to_string()),
            None => Err(ScaffoldError::PromptClosed),
        }
    }
}

/// Resolves questions into an ordered answer list
pub struct Resolver<P> {
    prompter: P,
    use_defaults: bool,
    known: Answers,
    formatters: HashMap<String, DefaultFormatter>,
}

impl<P: Prompter> Resolver<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            use_defaults: false,
            known: Answers::new(),
            formatters: HashMap::new(),
        }
    }

    /// Offer default answers as pre-filled responses
    pub fn with_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }

    /// Answers from an earlier run, offered as defaults for questions of the same name
    pub fn with_known_answers(mut self, known: Answers) -> Self {
        self.known = known;
        self
    }

    /// Format the known answer for `name` before it is offered as a default
    pub fn default_formatter<F>(mut self, name: impl Into<String>, format: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(format));
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Resolve every question in order
    ///
    /// A closed input channel fails the whole resolution; no partial
    /// answers are returned.
    pub async fn resolve(&mut self, questions: &[Question]) -> Result<Answers> {
        let mut answers = Answers::new();

        for question in questions {
            let value = match question.step() {
                Step::Skip => {
                    tracing::trace!(name = %question.name, "question has nothing to ask or derive");
                    continue;
                }
                Step::Derive(source) => {
                    let base = answers
                        .value(source)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()));
                    question.apply(base, &answers)
                }
                Step::Prompt(text) => self.prompt(question, text, &answers).await?,
            };

            tracing::trace!(name = %question.name, answer = %value, "resolved answer");
            answers.push(Answer {
                name: question.name.clone(),
                answer: value,
            });
        }

        Ok(answers)
    }

    async fn prompt(&mut self, question: &Question, text: &str, answers: &Answers) -> Result<Value> {
        let initial = self.initial_for(question, answers);

        loop {
            let raw = self.prompter.ask(text, initial.as_deref()).await?;
            let raw = match (&initial, raw.is_empty()) {
                (Some(initial), true) => initial.clone(),
                _ => raw,
            };

            let value = question.apply(Value::String(raw), answers);
            if question.accepts(&value) {
                return Ok(value);
            }
            tracing::debug!(name = %question.name, "invalid answer, asking again");
        }
    }

    fn initial_for(&self, question: &Question, answers: &Answers) -> Option<String> {
        if !self.use_defaults {
            return None;
        }

        if let Some(known) = self.known.value(&question.name) {
            let text = match self.formatters.get(&question.name) {
                Some(format) => format(known),
                None => value_to_text(known),
            };
            return Some(text);
        }

        question
            .default_answer
            .as_ref()
            .map(|default| value_to_text(&default.resolve(answers)))
    }
}
