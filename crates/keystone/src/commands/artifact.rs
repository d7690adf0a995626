//! Service, pipe and directive generators
//!
//! All three follow the same shape: a dash-case name, a couple of names
//! derived from it, an implementation file and a spec file.

use super::{code_dir, module_location, report_writes, split_name, EXAMPLE_OPTIONS};
use crate::context::Context;
use anyhow::Result;
use keystone_core::answers::value_to_text;
use keystone_core::convert::{dash_format_or_null, dash_to_camel, dash_to_cap, is_dash_format};
use keystone_core::{parse_options, Answer, Answers, Logger, Question, TemplateSpec};
use serde_json::Value;

/// A single-file artifact registered in an NgModule
#[derive(Debug)]
pub struct Artifact {
    /// Display name and logger prefix
    pub kind: &'static str,
    /// File suffix, `audit-log.service.ts`
    pub suffix: &'static str,
    /// Directory below the code directory
    pub dir: &'static str,
    /// Answer holding the dash-case name
    pub name_key: &'static str,
    /// Answer holding the camelCase name, if the artifact has one
    pub camel_key: Option<&'static str>,
    /// Answer holding the class name
    pub class_key: &'static str,
    /// NgModule list the class goes in
    pub registry: &'static str,
}

pub const SERVICE: Artifact = Artifact {
    kind: "Service",
    suffix: "service",
    dir: "services",
    name_key: "filename",
    camel_key: None,
    class_key: "serviceName",
    registry: "providers",
};

pub const PIPE: Artifact = Artifact {
    kind: "Pipe",
    suffix: "pipe",
    dir: "pipes",
    name_key: "filename",
    camel_key: Some("pipeName"),
    class_key: "className",
    registry: "declarations",
};

pub const DIRECTIVE: Artifact = Artifact {
    kind: "Directive",
    suffix: "directive",
    dir: "directives",
    name_key: "name",
    camel_key: Some("selector"),
    class_key: "className",
    registry: "declarations",
};

impl Artifact {
    fn class_name(&self, name: &str) -> String {
        format!("{}{}", dash_to_cap(name), self.kind)
    }

    /// Answers for a name given on the command line
    pub fn known_answers(&self, name: &str) -> Answers {
        let mut answers = Answers::new();
        answers.push(Answer::new(self.name_key, name));
        if let Some(camel_key) = self.camel_key {
            answers.push(Answer::new(camel_key, dash_to_camel(name)));
        }
        answers.push(Answer::new(self.class_key, self.class_name(name)));
        answers
    }

    pub fn questions(&self) -> Vec<Question> {
        let mut questions = vec![Question::ask(
            self.name_key,
            format!("{} name (in dash-case):", self.kind),
        )
        .transform(dash_format_or_null)];

        if let Some(camel_key) = self.camel_key {
            questions.push(
                Question::derive(camel_key, self.name_key)
                    .transform(|value, _| Value::from(dash_to_camel(&value_to_text(&value)))),
            );
        }

        let kind = self.kind;
        questions.push(
            Question::derive(self.class_key, self.name_key).transform(move |value, _| {
                Value::from(format!("{}{}", dash_to_cap(&value_to_text(&value)), kind))
            }),
        );
        questions
    }

    pub fn templates(&self, ctx: &Context, for_examples: bool) -> Result<Vec<TemplateSpec>> {
        let base = format!("{}/{}/{{{{ {} }}}}.{}", code_dir(for_examples), self.dir, self.name_key, self.suffix);
        let lower = self.kind.to_lowercase();

        Ok(vec![
            TemplateSpec::new(format!("{}.ts", base)).template(ctx.template(&format!("{}/app.ts", lower))?),
            TemplateSpec::new(format!("{}.spec.ts", base))
                .template(ctx.template(&format!("{}/spec.ts", lower))?),
        ])
    }

    fn notify(&self, logger: &Logger, answers: &Answers, for_examples: bool) -> Result<()> {
        let class_name = answers.require_str(self.class_key)?;
        let name = answers.require_str(self.name_key)?;

        logger.info(format!(
            "Don't forget to add the following to the {}.module.ts file:",
            module_location(for_examples)
        ));
        logger.info(format!(
            "    import {{ {} }} from './{}/{}.{}';",
            class_name, self.dir, name, self.suffix
        ));
        logger.info(format!(
            "And to add {} to the NgModule {} list",
            class_name, self.registry
        ));
        Ok(())
    }
}

pub async fn run(ctx: &mut Context, artifact: &Artifact, args: &[String]) -> Result<()> {
    let logger = Logger::new(artifact.kind);
    let (name, rest) = split_name(args);
    let options = parse_options(rest, Some(EXAMPLE_OPTIONS));
    let for_examples = options.is_for_examples();

    let answers = match name.filter(|name| is_dash_format(name)) {
        Some(name) => artifact.known_answers(name),
        None => {
            if let Some(name) = name {
                logger.warn(format!("'{}' is not in dash-case", name));
            }
            ctx.resolver().resolve(&artifact.questions()).await?
        }
    };

    let templates = artifact.templates(ctx, for_examples)?;
    let writes = ctx.materializer().materialize(&answers, &templates)?;
    report_writes(&logger, &ctx.root, &writes);
    artifact.notify(&logger, &answers, for_examples)
}
