//! Error types shared by the scaffolding engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by answer resolution and template materialization
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The prompting channel closed while waiting for operator input
    #[error("input closed before all questions were answered")]
    PromptClosed,

    /// The prompt backend failed for a reason other than end of input
    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing or rendered content could not be parsed as JSON during a merge
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// A generator needed an answer that was never collected
    #[error("no answer named '{0}'")]
    MissingAnswer(String),

    #[error("'{0}' is not a dash-case name")]
    InvalidName(String),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
