//! Per-invocation state shared by the generators

use crate::bundled;
use crate::Args;
use anyhow::{Context as _, Result};
use keystone_core::{
    CliclackPrompter, LinePrompter, LocalFs, Materializer, Prompter, Resolver, TemplateCatalog,
    TemplateLocator,
};
use std::io::IsTerminal;
use std::path::PathBuf;

pub struct Context {
    /// Directory every destination is relative to
    pub root: PathBuf,
    pub catalog: TemplateCatalog,
    /// Shared by every resolution in this run so buffered input is not lost
    pub prompter: Box<dyn Prompter>,
}

impl Context {
    pub fn from_args(args: &Args) -> Result<Self> {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };
        let catalog = bundled::catalog(args.template_dir.as_deref())?;

        Ok(Self {
            root,
            catalog,
            prompter: default_prompter(),
        })
    }

    pub fn resolver(&mut self) -> Resolver<&mut dyn Prompter> {
        Resolver::new(self.prompter.as_mut())
    }

    pub fn template(&self, name: &str) -> Result<TemplateLocator> {
        Ok(self.catalog.get(name)?)
    }

    pub fn materializer(&self) -> Materializer<'static, LocalFs> {
        Materializer::new(&LocalFs, &self.root)
    }
}

/// cliclack prompts on a terminal, plain line reads when input is piped
fn default_prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        Box::new(CliclackPrompter::with_intro(format!("keystone {}", crate::CLI_VERSION)))
    } else {
        Box::new(LinePrompter::stdio())
    }
}
