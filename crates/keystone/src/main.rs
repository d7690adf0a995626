//! Keystone CLI - Scaffolding for Angular component libraries

mod bundled;
mod commands;
mod context;
mod project;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use context::Context;
use keystone_core::Logger;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shown when a project was generated by a newer keystone
pub const UPGRADE_COMMAND: &str = "cargo install keystone --force";

#[derive(Parser, Debug)]
#[command(name = "keystone")]
#[command(about = "Scaffold Angular libraries and the components, services, pipes and directives inside them")]
#[command(version)]
pub struct Args {
    /// Project root to generate into (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Local directory of templates overriding the bundled ones (for development use)
    #[arg(long = "template-dir", global = true)]
    pub template_dir: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a new library project in the root directory
    #[command(visible_aliases = ["i", "initial"], disable_help_flag = true)]
    Init(GeneratorArgs),
    /// Generate a component
    #[command(visible_alias = "c", disable_help_flag = true)]
    Component(GeneratorArgs),
    /// Generate a directive
    #[command(visible_alias = "d", disable_help_flag = true)]
    Directive(GeneratorArgs),
    /// Generate a pipe
    #[command(visible_alias = "p", disable_help_flag = true)]
    Pipe(GeneratorArgs),
    /// Generate a service
    #[command(visible_alias = "s", disable_help_flag = true)]
    Service(GeneratorArgs),
    /// Refresh the managed project files from the current templates
    #[command(visible_aliases = ["u", "up"], disable_help_flag = true)]
    Upgrade(GeneratorArgs),
}

/// Raw generator arguments, tokenized by the generator itself
#[derive(clap::Args, Debug, Default)]
pub struct GeneratorArgs {
    /// Optional dash-case name followed by options, e.g. `my-widget --inline-styles --hooks=init,destroy`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        keystone_core::tui::restore_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        keystone_core::tui::restore_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    keystone_core::logging::init(args.verbose);

    let result = match Context::from_args(&args) {
        Ok(mut ctx) => run(&mut ctx, args.command).await,
        Err(e) => Err(e),
    };

    // Ensure cursor is visible on normal exit
    keystone_core::tui::restore_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Logger::new("Keystone").error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &mut Context, command: Option<Command>) -> Result<()> {
    let command = match command {
        Some(command) => command,
        None => ask_for_command(ctx).await?,
    };
    tracing::debug!(?command, root = %ctx.root.display(), "dispatching");

    match command {
        Command::Init(args) => commands::init::run(ctx, &args.args).await,
        Command::Component(args) => commands::component::run(ctx, &args.args).await,
        Command::Directive(args) => {
            commands::artifact::run(ctx, &commands::artifact::DIRECTIVE, &args.args).await
        }
        Command::Pipe(args) => commands::artifact::run(ctx, &commands::artifact::PIPE, &args.args).await,
        Command::Service(args) => {
            commands::artifact::run(ctx, &commands::artifact::SERVICE, &args.args).await
        }
        Command::Upgrade(args) => commands::upgrade::run(ctx, &args.args).await,
    }
}

/// Ask for a command line when none was given, e.g. `component my-widget --is`
async fn ask_for_command(ctx: &mut Context) -> Result<Command> {
    let answer = ctx
        .prompter
        .ask("What would you like to generate?", None)
        .await
        .context("No command given")?;

    let words = answer.split_whitespace();
    let args = Args::try_parse_from(std::iter::once("keystone").chain(words))
        .with_context(|| format!("Unrecognized command: {}", answer.trim()))?;

    args.command.context(
        "No command given. Choose one of: init, component, directive, pipe, service, upgrade",
    )
}
