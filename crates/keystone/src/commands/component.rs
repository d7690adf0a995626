//! Component generator

use super::{code_dir, module_location, report_writes, split_name};
use crate::context::Context;
use anyhow::{bail, Result};
use keystone_core::answers::value_to_text;
use keystone_core::convert::{dash_format_or_null, dash_to_cap, is_dash_format, yes_no_then};
use keystone_core::{
    parse_options, Answer, Answers, Logger, OptionValue, Question, ScaffoldError, TemplateSpec,
};
use serde_json::Value;

const OPTIONS: &[&str] = &[
    "default",
    "defaults",
    "d",
    "example",
    "examples",
    "x",
    "hooks",
    "h",
    "inline-styles",
    "is",
    "inline-template",
    "it",
];

const INLINE: &str = "``";

pub async fn run(ctx: &mut Context, args: &[String]) -> Result<()> {
    let logger = Logger::new("Component");
    let (name, rest) = split_name(args);
    let options = parse_options(rest, Some(OPTIONS));
    let for_examples = options.is_for_examples();

    let selector = name.filter(|s| is_dash_format(s));
    let inline_styles = options.has_any(&["inline-styles", "is"]);
    let inline_template = options.has_any(&["inline-template", "it"]);
    let hooks = options.values_of_any(&["hooks", "h"]).map(join_values);

    let answers = if options.has_any(&["default", "defaults", "d"]) {
        let Some(selector) = selector else {
            if let Some(name) = name {
                return Err(ScaffoldError::InvalidName(name.to_string()).into());
            }
            bail!("A dash-case selector is required when using --defaults");
        };
        let mut answers = known_answers(Some(selector), inline_styles, inline_template, hooks.as_deref());
        answers.extend(known_answers(None, false, false, Some("")));
        answers.extend(default_files(selector));
        answers
    } else {
        let known = known_answers(selector, inline_styles, inline_template, hooks.as_deref());
        let resolved = ctx.resolver().resolve(&questions(&known)).await?;
        known.chain(&resolved)
    };

    let templates = templates(ctx, for_examples)?;
    let writes = ctx.materializer().materialize(&answers, &templates)?;
    report_writes(&logger, &ctx.root, &writes);
    notify(&logger, &answers, for_examples)
}

/// Hook names given as `--hooks=init,destroy` or `--hooks init destroy`
fn join_values(values: &[OptionValue]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Answers implied by the command line
fn known_answers(
    selector: Option<&str>,
    inline_styles: bool,
    inline_template: bool,
    hooks: Option<&str>,
) -> Answers {
    let mut answers = Answers::new();

    if let Some(selector) = selector {
        answers.push(Answer::new("selector", selector));
        answers.push(Answer::new("componentName", component_name(selector)));
    }
    if inline_styles {
        answers.push(Answer::new("styles", INLINE));
        answers.push(Answer::new("styleAttribute", "styles"));
    }
    if inline_template {
        answers.push(Answer::new("template", INLINE));
        answers.push(Answer::new("templateAttribute", "template"));
    }
    if let Some(hooks) = hooks {
        answers.extend(hook_answers(&lifecycle_hooks(hooks)));
    }

    answers
}

/// External style and template files for `--defaults`; shadowed by inline flags
fn default_files(selector: &str) -> Answers {
    vec![
        Answer::new("styles", format!("'./{}.component.scss'", selector)),
        Answer::new("styleAttribute", "styleUrls"),
        Answer::new("template", format!("'./{}.component.html'", selector)),
        Answer::new("templateAttribute", "templateUrl"),
    ]
    .into()
}

fn component_name(selector: &str) -> String {
    format!("{}Component", dash_to_cap(selector))
}

fn questions(known: &Answers) -> Vec<Question> {
    let mut questions = Vec::new();

    if known.find("selector").is_none() {
        questions.push(
            Question::ask("selector", "Component selector (in dash-case):").transform(dash_format_or_null),
        );
        questions.push(
            Question::derive("componentName", "selector")
                .transform(|value, _| Value::from(component_name(&value_to_text(&value)))),
        );
    }

    if known.find("styles").is_none() {
        questions.push(
            Question::ask("styles", "Use inline styles (y/N)?").transform(yes_no_then(
                Some(false),
                known.clone(),
                |inline, answers| external_or_inline(inline, answers, "scss"),
            )),
        );
        questions.push(Question::derive("styleAttribute", "styles").transform(|value, _| {
            Value::from(if is_inline(&value) { "styles" } else { "styleUrls" })
        }));
    }

    if known.find("template").is_none() {
        questions.push(
            Question::ask("template", "Use inline template (y/N)?").transform(yes_no_then(
                Some(false),
                known.clone(),
                |inline, answers| external_or_inline(inline, answers, "html"),
            )),
        );
        questions.push(Question::derive("templateAttribute", "template").transform(|value, _| {
            Value::from(if is_inline(&value) { "template" } else { "templateUrl" })
        }));
    }

    if known.find("hooks").is_none() {
        questions.push(
            Question::ask("hooks", "Lifecycle hooks (comma-separated; i.e. \"init, changes, ...\"):")
                .allow_blank()
                .transform(|value, _| Value::from(lifecycle_hooks(&value_to_text(&value)))),
        );
        questions.push(
            Question::derive("implements", "hooks")
                .transform(|value, _| Value::from(implements(&value_to_text(&value)))),
        );
        questions.push(
            Question::derive("lifecycleNg", "hooks")
                .transform(|value, _| Value::from(lifecycle_methods(&value_to_text(&value)))),
        );
    }

    questions
}

fn external_or_inline(inline: bool, answers: &Answers, extension: &str) -> Value {
    if inline {
        return Value::from(INLINE);
    }
    match answers.value("selector") {
        Some(selector) => Value::from(format!(
            "'./{}.component.{}'",
            value_to_text(selector),
            extension
        )),
        None => Value::Null,
    }
}

fn is_inline(value: &Value) -> bool {
    value.as_str() == Some(INLINE)
}

fn hook_name(raw: &str) -> Option<&'static str> {
    match raw.trim().to_lowercase().as_str() {
        "changes" | "onchanges" => Some("OnChanges"),
        "check" | "docheck" => Some("DoCheck"),
        "destroy" | "ondestroy" => Some("OnDestroy"),
        "init" | "oninit" => Some("OnInit"),
        _ => None,
    }
}

/// `"init, destroy"` -> `", OnInit, OnDestroy"`, the tail of the core import list
fn lifecycle_hooks(raw: &str) -> String {
    let mut hooks: Vec<&str> = Vec::new();
    for hook in raw.split(',').filter_map(hook_name) {
        if !hooks.contains(&hook) {
            hooks.push(hook);
        }
    }

    if hooks.is_empty() {
        String::new()
    } else {
        format!(", {}", hooks.join(", "))
    }
}

fn hook_list(hooks: &str) -> impl Iterator<Item = &str> {
    hooks.split(',').map(str::trim).filter(|h| !h.is_empty())
}

fn implements(hooks: &str) -> String {
    let hooks: Vec<_> = hook_list(hooks).collect();
    if hooks.is_empty() {
        String::new()
    } else {
        format!(" implements {}", hooks.join(", "))
    }
}

fn lifecycle_methods(hooks: &str) -> String {
    let mut methods = String::from("\n");
    for hook in hook_list(hooks) {
        methods.push_str(&format!("\n    ng{}() {{\n    }}\n", hook));
    }
    methods
}

fn hook_answers(hooks: &str) -> Answers {
    vec![
        Answer::new("hooks", hooks),
        Answer::new("implements", implements(hooks)),
        Answer::new("lifecycleNg", lifecycle_methods(hooks)),
    ]
    .into()
}

fn templates(ctx: &Context, for_examples: bool) -> Result<Vec<TemplateSpec>> {
    let base = format!("{}/{{{{ selector }}}}/{{{{ selector }}}}.component", code_dir(for_examples));

    Ok(vec![
        TemplateSpec::new(format!("{}.ts", base)).template(ctx.template("component/app.ts")?),
        TemplateSpec::new(format!("{}.spec.ts", base)).template(ctx.template("component/spec.ts")?),
        TemplateSpec::new(format!("{}.html", base))
            .blank()
            .check(|answers| !answers.value("template").is_some_and(is_inline)),
        TemplateSpec::new(format!("{}.scss", base))
            .blank()
            .check(|answers| !answers.value("styles").is_some_and(is_inline)),
    ])
}

fn notify(logger: &Logger, answers: &Answers, for_examples: bool) -> Result<()> {
    let component_name = answers.require_str("componentName")?;
    let selector = answers.require_str("selector")?;

    logger.info(format!(
        "Don't forget to add the following to the {}.module.ts file:",
        module_location(for_examples)
    ));
    logger.info(format!(
        "    import {{ {} }} from './{}/{}.component';",
        component_name, selector, selector
    ));
    logger.info(format!(
        "And to add {} to the NgModule declarations list",
        component_name
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::{Resolver, ScriptedPrompter};

    #[test]
    fn test_lifecycle_hooks() {
        assert_eq!(lifecycle_hooks("init, Destroy"), ", OnInit, OnDestroy");
        assert_eq!(lifecycle_hooks("oninit,init,bogus"), ", OnInit");
        assert_eq!(lifecycle_hooks(""), "");
    }

    #[test]
    fn test_hook_derivations() {
        assert_eq!(implements(", OnInit, OnDestroy"), " implements OnInit, OnDestroy");
        assert_eq!(implements(""), "");
        assert_eq!(
            lifecycle_methods(", OnInit"),
            "\n\n    ngOnInit() {\n    }\n"
        );
        assert_eq!(lifecycle_methods(""), "\n");
        assert!(lifecycle_methods(", DoCheck").contains("ngDoCheck()"));
    }

    #[test]
    fn test_known_answers_from_flags() {
        let known = known_answers(Some("my-widget"), true, false, Some("check"));

        assert_eq!(known.require_str("componentName").unwrap(), "MyWidgetComponent");
        assert_eq!(known.require_str("styles").unwrap(), "``");
        assert_eq!(known.require_str("styleAttribute").unwrap(), "styles");
        assert!(known.find("template").is_none());
        assert_eq!(known.require_str("hooks").unwrap(), ", DoCheck");
    }

    #[tokio::test]
    async fn test_questions_skip_what_is_known() {
        let known = known_answers(Some("my-widget"), false, true, None);
        let questions = questions(&known);
        let mut resolver = Resolver::new(ScriptedPrompter::new(["", "init"]));

        let answers = known.chain(&resolver.resolve(&questions).await.unwrap());

        assert_eq!(
            resolver.prompter().asked(),
            [
                "Use inline styles (y/N)?",
                "Lifecycle hooks (comma-separated; i.e. \"init, changes, ...\"):"
            ]
        );
        assert_eq!(answers.require_str("styles").unwrap(), "'./my-widget.component.scss'");
        assert_eq!(answers.require_str("styleAttribute").unwrap(), "styleUrls");
        assert_eq!(answers.require_str("template").unwrap(), "``");
        assert_eq!(answers.require_str("implements").unwrap(), " implements OnInit");
    }

    #[tokio::test]
    async fn test_selector_answer_feeds_style_path() {
        let known = Answers::new();
        let mut resolver = Resolver::new(ScriptedPrompter::new(["bad name", "nav-bar", "maybe", "n", "y", ""]));

        let answers = resolver.resolve(&questions(&known)).await.unwrap();

        assert_eq!(answers.require_str("componentName").unwrap(), "NavBarComponent");
        assert_eq!(answers.require_str("styles").unwrap(), "'./nav-bar.component.scss'");
        assert_eq!(answers.require_str("template").unwrap(), "``");
        assert_eq!(answers.require_str("hooks").unwrap(), "");
        assert_eq!(answers.require_str("lifecycleNg").unwrap(), "\n");
    }

    #[test]
    fn test_defaults_answers_shadow_correctly() {
        let mut answers = known_answers(Some("my-widget"), true, false, None);
        answers.extend(known_answers(None, false, false, Some("")));
        answers.extend(default_files("my-widget"));

        assert_eq!(answers.require_str("styles").unwrap(), "``");
        assert_eq!(answers.require_str("template").unwrap(), "'./my-widget.component.html'");
        assert_eq!(answers.require_str("implements").unwrap(), "");
    }
}
