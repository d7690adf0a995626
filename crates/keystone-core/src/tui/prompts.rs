//! Charm-style prompter using cliclack

use crate::error::{Result, ScaffoldError};
use crate::inquire::Prompter;
use async_trait::async_trait;
use std::io;

/// Interactive prompter for terminals
///
/// Ctrl+C or a closed terminal ends resolution with [`ScaffoldError::PromptClosed`].
#[derive(Debug, Default)]
pub struct CliclackPrompter {
    started: bool,
    title: Option<String>,
}

impl CliclackPrompter {
    /// Show `title` as the intro banner before the first question
    pub fn with_intro(title: impl Into<String>) -> Self {
        Self {
            started: false,
            title: Some(title.into()),
        }
    }

    fn intro(&mut self) -> io::Result<()> {
        if !self.started {
            self.started = true;
            if let Some(title) = &self.title {
                cliclack::intro(title)?;
            }
        }
        Ok(())
    }
}

fn prompt_error(e: io::Error) -> ScaffoldError {
    match e.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => ScaffoldError::PromptClosed,
        _ => ScaffoldError::Prompt(e.to_string()),
    }
}

#[async_trait]
impl Prompter for CliclackPrompter {
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String> {
        self.intro().map_err(prompt_error)?;

        let mut input = cliclack::input(prompt).required(false);
        if let Some(initial) = initial {
            input = input.placeholder(initial).default_input(initial);
        }

        input.interact::<String>().map_err(prompt_error)
    }
}

/// Make the terminal cursor visible again after an interrupted prompt
pub fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}
