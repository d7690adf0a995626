//! Generators behind each subcommand

pub mod artifact;
pub mod component;
pub mod init;
pub mod upgrade;

use keystone_core::{Logger, Write};
use std::path::Path;

/// Option names that route output to the examples tree
pub const EXAMPLE_OPTIONS: &[&str] = &["example", "examples", "x"];

/// Split a leading positional name from the options after it
pub fn split_name(args: &[String]) -> (Option<&str>, &[String]) {
    match args.split_first() {
        Some((first, rest)) if !first.starts_with('-') => (Some(first.as_str()), rest),
        _ => (None, args),
    }
}

/// Source directory generated code goes to
pub fn code_dir(for_examples: bool) -> &'static str {
    if for_examples {
        "examples"
    } else {
        "src"
    }
}

/// Module file the operator registers new code in
pub fn module_location(for_examples: bool) -> &'static str {
    if for_examples {
        "examples/example"
    } else {
        "src/*"
    }
}

/// List the files written, relative to `root`
pub fn report_writes(logger: &Logger, root: &Path, writes: &[Write]) {
    if writes.is_empty() {
        logger.warn("No files were written");
        return;
    }
    for write in writes {
        let shown = write.destination.strip_prefix(root).unwrap_or(&write.destination);
        logger.info(format!("Wrote {}", shown.display()));
    }
}
