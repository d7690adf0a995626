//! Refresh the managed files of an existing project

use super::init::managed_templates;
use super::report_writes;
use crate::context::Context;
use crate::{project, CLI_VERSION, UPGRADE_COMMAND};
use anyhow::{bail, Result};
use keystone_core::convert::yes_no;
use keystone_core::templates::check_compatibility;
use keystone_core::{parse_options, LocalFs, Logger, Question, RECORD_FILE};

const OPTIONS: &[&str] = &["yes", "y"];

pub async fn run(ctx: &mut Context, args: &[String]) -> Result<()> {
    let logger = Logger::new("Upgrade");
    let options = parse_options(args, Some(OPTIONS));

    let Some(mut answers) = project::load_record(&LocalFs, &ctx.root)? else {
        bail!(
            "No {} record found in {}. Run `keystone init` first",
            RECORD_FILE,
            ctx.root.display()
        );
    };

    if let Some(recorded) = answers.value("keystoneVersion").and_then(|v| v.as_str()) {
        if let Some(warning) = check_compatibility(CLI_VERSION, recorded, UPGRADE_COMMAND) {
            logger.warn(warning);
        }
    }

    if !options.has_any(&["yes", "y"]) && !confirm(ctx).await? {
        logger.warn("Upgrade cancelled");
        return Ok(());
    }

    let name = project::package_name(&LocalFs, &ctx.root)
        .or_else(|| answers.require_str("name").ok().map(str::to_string));
    if let Some(name) = name {
        answers.push_missing("packageName", name);
    }
    answers.set("keystoneVersion", CLI_VERSION);

    let templates = managed_templates(ctx)?;
    let writes = ctx.materializer().materialize(&answers, &templates)?;
    project::save_record(&LocalFs, &ctx.root, &answers)?;

    report_writes(&logger, &ctx.root, &writes);
    logger.success("Project files upgraded");
    Ok(())
}

async fn confirm(ctx: &mut Context) -> Result<bool> {
    let question = Question::ask(
        "proceed",
        "The following will overwrite some of the files in your project. Would you like to continue (y/N)?",
    )
    .transform(yes_no(Some(false)));

    let answers = ctx.resolver().resolve(&[question]).await?;
    Ok(answers.flag("proceed"))
}
