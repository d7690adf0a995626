//! Keystone Core - Scaffolding engine shared by the keystone CLI
//!
//! This library turns operator answers and declarative template specs into files.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - option tokenizing, answer resolution,
//!   placeholder rendering, file merges
//! - **Layer 2: Materialization** - `Materializer` deciding per template whether to
//!   create, skip, overwrite or merge, behind the `FileSystem` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompter (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use keystone_core::{Question, Resolver, ScriptedPrompter, TemplateSpec, Materializer, LocalFs};
//!
//! let questions = [
//!     Question::ask("name", "Service name (in dash-case):"),
//!     Question::derive("serviceName", "name")
//!         .transform(|v, _| format!("{}Service", dash_to_cap(v.as_str().unwrap())).into()),
//! ];
//! let answers = Resolver::new(ScriptedPrompter::new(["audit-log"]))
//!     .resolve(&questions)
//!     .await?;
//!
//! let templates = [TemplateSpec::new("src/services/{{ name }}.service.ts").inline(SERVICE_TS)];
//! Materializer::new(&LocalFs, ".").materialize(&answers, &templates)?;
//! ```

pub mod answers;
pub mod convert;
pub mod error;
pub mod fs;
pub mod inquire;
pub mod logging;
pub mod options;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{Answer, Answers};
pub use error::{Result, ScaffoldError};
pub use fs::{FileSystem, LocalFs, MemoryFs};
pub use inquire::{LinePrompter, Prompter, Question, Resolver, ScriptedPrompter};
pub use logging::Logger;
pub use options::{parse_options, OptionMap, OptionValue};
pub use templates::{
    render, Materializer, TemplateCatalog, TemplateLocator, TemplateSpec, Updater, Write,
};

#[cfg(feature = "tui")]
pub use tui::CliclackPrompter;

/// Name of the project record written by `init` and read by `upgrade`
pub const RECORD_FILE: &str = ".keystone";
