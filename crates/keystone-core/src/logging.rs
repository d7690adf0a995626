//! Console logging
//!
//! Two layers:
//! - [`Logger`]: operator-facing messages tagged with the command that emits them
//! - [`init`]: `tracing` subscriber for engine diagnostics, filtered by `KEYSTONE_LOG`

use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the diagnostic filter
pub const LOG_ENV: &str = "KEYSTONE_LOG";

/// Install the diagnostic subscriber, writing to stderr
///
/// `verbosity` is the number of `-v` flags. Safe to call more than once.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("keystone={0},keystone_core={0}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prefix-scoped console logger
///
/// Created per command and passed to whatever needs to talk to the operator.
#[derive(Debug, Clone)]
pub struct Logger {
    prefix: String,
}

impl Logger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn tag(&self) -> String {
        format!("[{}]:", self.prefix)
    }

    /// The line as printed by [`Logger::info`], without colors
    pub fn format(&self, message: &str) -> String {
        format!("{} {}", self.tag(), message)
    }

    pub fn info(&self, message: impl AsRef<str>) {
        println!("{} {}", self.tag().dimmed(), message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        println!("{} {}", self.tag().dimmed(), message.as_ref().green());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("{} {}", self.tag().yellow(), message.as_ref().yellow());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{} {}", self.tag().red(), message.as_ref().red());
    }
}
