//! Library project setup

use super::report_writes;
use crate::context::Context;
use crate::{project, CLI_VERSION};
use anyhow::Result;
use keystone_core::answers::value_to_text;
use keystone_core::convert::{dash_format_or_null, dash_to_pascal, dash_to_words};
use keystone_core::{parse_options, Answers, LocalFs, Logger, Question, TemplateSpec, Updater};
use serde_json::Value;

/// `package.json` fields a merge never takes from the template
pub const PROTECTED_PACKAGE_FIELDS: &[&str] = &[
    "author",
    "description",
    "keywords",
    "license",
    "main",
    "module",
    "name",
    "repository",
    "typings",
    "version",
];

const OPTIONS: &[&str] = &["force", "f"];

pub async fn run(ctx: &mut Context, args: &[String]) -> Result<()> {
    let logger = Logger::new("Initial");
    let options = parse_options(args, Some(OPTIONS));
    let force = options.has_any(&["force", "f"]);

    let previous = project::load_record(&LocalFs, &ctx.root)?.unwrap_or_default();
    let default_name = project::package_name(&LocalFs, &ctx.root);
    let questions = questions(default_name);

    let mut answers = ctx
        .resolver()
        .with_defaults(true)
        .with_known_answers(previous)
        .resolve(&questions)
        .await?;
    answers.set("keystoneVersion", CLI_VERSION);

    let mut templates = managed_templates(ctx)?;
    templates.extend(source_templates(ctx)?);

    let writes = ctx
        .materializer()
        .overwrite_all(force)
        .materialize(&answers, &templates)?;
    project::save_record(&LocalFs, &ctx.root, &answers)?;

    report_writes(&logger, &ctx.root, &writes);
    logger.success(format!(
        "Library {} is ready",
        answers.require_str("packageName")?
    ));
    logger.info("Next steps:");
    logger.info("    npm install");
    logger.info("    keystone component my-widget");
    Ok(())
}

fn questions(default_name: Option<String>) -> Vec<Question> {
    let mut name = Question::ask("name", "Library name:").transform(dash_format_or_null);
    if let Some(default_name) = default_name {
        name = name.default_answer(default_name);
    }

    vec![
        name,
        Question::ask("readmeTitle", "README Title:").default_with(|answers| {
            let name = answers.value("name").map(value_to_text).unwrap_or_default();
            Value::from(dash_to_words(&name))
        }),
        Question::ask("repoUrl", "Repository URL:").allow_blank(),
        Question::ask("version", "Version:").default_answer("1.0.0"),
        Question::derive("moduleName", "name")
            .transform(|value, _| Value::from(format!("{}Module", dash_to_pascal(&value_to_text(&value))))),
        Question::derive("packageName", "name"),
    ]
}

/// Project files that `upgrade` keeps current
pub fn managed_templates(ctx: &Context) -> Result<Vec<TemplateSpec>> {
    Ok(vec![
        TemplateSpec::new(".gitignore")
            .template(ctx.template("init/gitignore")?)
            .update(Updater::Lines),
        TemplateSpec::new(".npmignore")
            .template(ctx.template("init/npmignore")?)
            .update(Updater::Lines),
        TemplateSpec::new("package.json")
            .template(ctx.template("init/package.json")?)
            .update(Updater::json(PROTECTED_PACKAGE_FIELDS.iter().copied())),
        TemplateSpec::new("tsconfig.json")
            .template(ctx.template("init/tsconfig.json")?)
            .overwrite(),
        TemplateSpec::new("README.md").template(ctx.template("init/README.md")?),
    ])
}

/// Starting sources, written once
fn source_templates(ctx: &Context) -> Result<Vec<TemplateSpec>> {
    Ok(vec![
        TemplateSpec::new("src/index.ts").template(ctx.template("init/index.ts")?),
        TemplateSpec::new("src/{{ name }}.module.ts").template(ctx.template("init/module.ts")?),
        TemplateSpec::new("src/demo/app.component.html").blank(),
        TemplateSpec::new("src/demo/styles.scss").blank(),
    ])
}
