//! Template specs, placeholder rendering and materialization
//!
//! This module provides:
//! - Template specs describing one destination file each
//! - `{{ name }}` placeholder substitution from an answer list
//! - The materializer deciding whether to create, skip, overwrite or merge
//! - Template catalogs (bundled or local directory)
//! - Version compatibility checking for project records

pub mod catalog;
pub mod merge;
pub mod version;

use crate::answers::Answers;
use crate::error::{Result, ScaffoldError};
use crate::fs::FileSystem;
use regex::{Captures, Regex};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use catalog::TemplateCatalog;
pub use merge::{merge_json, merge_lines};
pub use version::check_compatibility;

/// Decides whether a template is materialized at all
pub type Check = Arc<dyn Fn(&Answers) -> bool + Send + Sync>;

/// Custom merge of `(existing, rendered)` into the content to write
pub type MergeFn = Arc<dyn Fn(&str, &str) -> Result<String> + Send + Sync>;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Replace every `{{ name }}` with the first answer of that name
///
/// Placeholders without an answer are left as they are.
pub fn render(template: &str, answers: &Answers) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| match answers.find(&caps[1]) {
            Some(answer) => answer.display_value(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Where a template body comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocator {
    /// Template text held in memory (bundled templates)
    Inline(String),
    /// Template file read through the materializer's filesystem
    File(PathBuf),
}

/// How an existing destination is combined with the rendered template
#[derive(Clone)]
pub enum Updater {
    /// Structured merge, restoring the listed top-level fields from the existing file
    Json { protected: Vec<String> },
    /// Line-set merge keeping lines only the existing file has
    Lines,
    Custom(MergeFn),
}

impl Updater {
    pub fn json<I, S>(protected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Json {
            protected: protected.into_iter().map(Into::into).collect(),
        }
    }

    fn apply(&self, path: &Path, existing: &str, rendered: &str) -> Result<String> {
        match self {
            Self::Json { protected } => {
                merge_json(existing, rendered, protected).map_err(|source| {
                    ScaffoldError::InvalidJson {
                        path: path.to_path_buf(),
                        source,
                    }
                })
            }
            Self::Lines => Ok(merge_lines(existing, rendered)),
            Self::Custom(merge) => merge(existing, rendered),
        }
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { protected } => f.debug_struct("Json").field("protected", protected).finish(),
            Self::Lines => f.write_str("Lines"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One destination file and how to produce it
#[derive(Clone)]
pub struct TemplateSpec {
    destination: String,
    template: Option<TemplateLocator>,
    blank: bool,
    check: Option<Check>,
    overwrite: bool,
    update: Option<Updater>,
}

impl TemplateSpec {
    /// A spec writing to `destination`, which may contain placeholders
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            template: None,
            blank: false,
            check: None,
            overwrite: false,
            update: None,
        }
    }

    pub fn template(mut self, locator: TemplateLocator) -> Self {
        self.template = Some(locator);
        self
    }

    pub fn inline(self, body: impl Into<String>) -> Self {
        self.template(TemplateLocator::Inline(body.into()))
    }

    /// Write an empty file whatever the locator says
    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Answers) -> bool + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn update(mut self, updater: Updater) -> Self {
        self.update = Some(updater);
        self
    }
}

impl fmt::Debug for TemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSpec")
            .field("destination", &self.destination)
            .field("template", &self.template)
            .field("blank", &self.blank)
            .field("check", &self.check.as_ref().map(|_| ".."))
            .field("overwrite", &self.overwrite)
            .field("update", &self.update)
            .finish()
    }
}

/// A file the materializer wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub destination: PathBuf,
    pub output: String,
}

/// Turns answers and template specs into files below `root`
pub struct Materializer<'a, F: FileSystem> {
    fs: &'a F,
    root: PathBuf,
    overwrite_all: bool,
}

impl<'a, F: FileSystem> Materializer<'a, F> {
    pub fn new(fs: &'a F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            overwrite_all: false,
        }
    }

    /// Replace existing files even when a spec does not ask for it
    pub fn overwrite_all(mut self, overwrite_all: bool) -> Self {
        self.overwrite_all = overwrite_all;
        self
    }

    /// Materialize `templates` in order, returning the writes performed
    ///
    /// Stops at the first failing template. Files written before the
    /// failure stay on disk.
    pub fn materialize(&self, answers: &Answers, templates: &[TemplateSpec]) -> Result<Vec<Write>> {
        let mut writes = Vec::new();

        for spec in templates {
            if let Some(write) = self.materialize_one(answers, spec)? {
                writes.push(write);
            }
        }

        Ok(writes)
    }

    fn materialize_one(&self, answers: &Answers, spec: &TemplateSpec) -> Result<Option<Write>> {
        if let Some(check) = &spec.check {
            if !check(answers) {
                tracing::debug!(destination = %spec.destination, "check declined template");
                return Ok(None);
            }
        }

        let destination = self.root.join(render(&spec.destination, answers));
        self.ensure_directories(&destination)?;

        let rendered = self.render_body(answers, spec)?;
        let exists = self.fs.exists(&destination);

        let output = match (&spec.update, exists) {
            (Some(updater), true) => {
                let existing = self.fs.read_to_string(&destination)?;
                tracing::debug!(destination = %destination.display(), ?updater, "merging into existing file");
                updater.apply(&destination, &existing, &rendered)?
            }
            _ if !exists || self.overwrite_all || spec.overwrite => rendered,
            _ => {
                tracing::debug!(destination = %destination.display(), "leaving existing file untouched");
                return Ok(None);
            }
        };

        self.fs.write(&destination, &output)?;
        tracing::debug!(destination = %destination.display(), bytes = output.len(), "wrote file");

        Ok(Some(Write {
            destination,
            output,
        }))
    }

    fn render_body(&self, answers: &Answers, spec: &TemplateSpec) -> Result<String> {
        if spec.blank {
            return Ok(String::new());
        }

        let body = match &spec.template {
            None => return Ok(String::new()),
            Some(TemplateLocator::Inline(body)) => body.clone(),
            Some(TemplateLocator::File(path)) => {
                if !self.fs.exists(path) {
                    return Err(ScaffoldError::TemplateNotFound(path.clone()));
                }
                self.fs.read_to_string(path)?
            }
        };

        Ok(render(&body, answers))
    }

    /// Create each missing directory between the root and `destination`, parent first
    fn ensure_directories(&self, destination: &Path) -> Result<()> {
        let Some(parent) = destination.parent() else {
            return Ok(());
        };

        let (mut current, relative) = match parent.strip_prefix(&self.root) {
            Ok(relative) => (self.root.clone(), relative.to_path_buf()),
            Err(_) => (PathBuf::new(), parent.to_path_buf()),
        };

        for component in relative.components() {
            current.push(component);
            if matches!(component, Component::Normal(_)) && !self.fs.exists(&current) {
                self.fs.create_dir(&current)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answer;
    use crate::fs::{LocalFs, MemoryFs};

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs.iter().map(|(n, a)| Answer::new(*n, *a)).collect()
    }

    #[test]
    fn test_render_substitutes_known_names() {
        let answers = answers(&[("name", "World")]);
        assert_eq!(render("Hello {{ name }}!", &answers), "Hello World!");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let answers = answers(&[("name", "World")]);
        assert_eq!(
            render("{{missing}} and {{  name}}", &answers),
            "{{missing}} and World"
        );
    }

    #[test]
    fn test_render_is_global_and_case_sensitive() {
        let answers = answers(&[("x", "1"), ("X", "2")]);
        assert_eq!(render("{{x}}{{ X }}{{x }}", &answers), "121");
    }

    #[test]
    fn test_render_uses_first_duplicate() {
        let answers = answers(&[("v", "first"), ("v", "second")]);
        assert_eq!(render("{{ v }}", &answers), "first");
    }

    #[test]
    fn test_materialize_creates_directories_parent_first() {
        let fs = MemoryFs::new().with_dir("/proj");
        let specs = [TemplateSpec::new("src/{{ name }}/index.ts").inline("export * from './{{ name }}';")];

        let writes = Materializer::new(&fs, "/proj")
            .materialize(&answers(&[("name", "lib")]), &specs)
            .unwrap();

        assert_eq!(
            fs.created_dirs(),
            vec![PathBuf::from("/proj/src"), PathBuf::from("/proj/src/lib")]
        );
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].destination, PathBuf::from("/proj/src/lib/index.ts"));
        assert_eq!(writes[0].output, "export * from './lib';");
    }

    #[test]
    fn test_materialize_twice_is_idempotent() {
        let fs = MemoryFs::new().with_dir("/proj");
        let specs = [
            TemplateSpec::new("README.md").inline("# {{ title }}"),
            TemplateSpec::new("src/styles.scss").blank(),
        ];
        let answers = answers(&[("title", "Lib")]);
        let materializer = Materializer::new(&fs, "/proj");

        let first = materializer.materialize(&answers, &specs).unwrap();
        let snapshot: Vec<_> = first.iter().map(|w| fs.contents(&w.destination)).collect();
        fs.clear_log();

        let second = materializer.materialize(&answers, &specs).unwrap();
        let again: Vec<_> = first.iter().map(|w| fs.contents(&w.destination)).collect();

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert!(fs.writes().is_empty());
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_check_skips_write_and_directories() {
        let fs = MemoryFs::new().with_dir("/proj");
        let specs = [TemplateSpec::new("styles/{{ name }}.scss")
            .inline("x")
            .check(|answers| !answers.flag("inline"))];
        let mut answers = answers(&[("name", "w")]);
        answers.push(Answer::new("inline", true));

        let writes = Materializer::new(&fs, "/proj").materialize(&answers, &specs).unwrap();
        assert!(writes.is_empty());
        assert!(fs.created_dirs().is_empty());
    }

    #[test]
    fn test_blank_ignores_template() {
        let fs = MemoryFs::new().with_dir("/p");
        let specs = [TemplateSpec::new("a.html").inline("not used").blank()];
        let writes = Materializer::new(&fs, "/p").materialize(&Answers::new(), &specs).unwrap();
        assert_eq!(writes[0].output, "");
    }

    #[test]
    fn test_existing_file_kept_without_overwrite() {
        let fs = MemoryFs::new().with_dir("/p").with_file("/p/a.txt", "mine");
        let specs = [TemplateSpec::new("a.txt").inline("theirs")];

        let writes = Materializer::new(&fs, "/p").materialize(&Answers::new(), &specs).unwrap();
        assert!(writes.is_empty());
        assert_eq!(fs.contents("/p/a.txt").as_deref(), Some("mine"));
    }

    #[test]
    fn test_spec_overwrite_and_overwrite_all() {
        let fs = MemoryFs::new()
            .with_dir("/p")
            .with_file("/p/a.txt", "old a")
            .with_file("/p/b.txt", "old b");
        let specs = [
            TemplateSpec::new("a.txt").inline("new a").overwrite(),
            TemplateSpec::new("b.txt").inline("new b"),
        ];

        Materializer::new(&fs, "/p").materialize(&Answers::new(), &specs).unwrap();
        assert_eq!(fs.contents("/p/a.txt").as_deref(), Some("new a"));
        assert_eq!(fs.contents("/p/b.txt").as_deref(), Some("old b"));

        Materializer::new(&fs, "/p")
            .overwrite_all(true)
            .materialize(&Answers::new(), &specs)
            .unwrap();
        assert_eq!(fs.contents("/p/b.txt").as_deref(), Some("new b"));
    }

    #[test]
    fn test_update_merges_existing_file() {
        let fs = MemoryFs::new()
            .with_dir("/p")
            .with_file("/p/.gitignore", "node_modules\n.idea\n");
        let specs = [TemplateSpec::new(".gitignore")
            .inline("node_modules\ndist\n")
            .update(Updater::Lines)];

        let writes = Materializer::new(&fs, "/p").materialize(&Answers::new(), &specs).unwrap();
        assert_eq!(writes[0].output, "node_modules\ndist\n.idea\n");
    }

    #[test]
    fn test_update_without_existing_file_writes_rendered() {
        let fs = MemoryFs::new().with_dir("/p");
        let specs = [TemplateSpec::new("package.json")
            .inline(r#"{"name":"{{ name }}"}"#)
            .update(Updater::json(["name"]))];

        let writes = Materializer::new(&fs, "/p")
            .materialize(&answers(&[("name", "lib")]), &specs)
            .unwrap();
        assert_eq!(writes[0].output, r#"{"name":"lib"}"#);
    }

    #[test]
    fn test_update_applies_even_with_overwrite_all() {
        let fs = MemoryFs::new()
            .with_dir("/p")
            .with_file("/p/package.json", r#"{"name":"kept","version":"2.0.0"}"#);
        let specs = [TemplateSpec::new("package.json")
            .inline(r#"{"name":"x","version":"0.0.0","license":"MIT"}"#)
            .update(Updater::json(["name", "version"]))];

        let writes = Materializer::new(&fs, "/p")
            .overwrite_all(true)
            .materialize(&Answers::new(), &specs)
            .unwrap();
        let merged: serde_json::Value = serde_json::from_str(&writes[0].output).unwrap();
        assert_eq!(
            merged,
            serde_json::json!({"name": "kept", "version": "2.0.0", "license": "MIT"})
        );
    }

    #[test]
    fn test_malformed_existing_json_stops_materialization() {
        let fs = MemoryFs::new()
            .with_dir("/p")
            .with_file("/p/package.json", "{ broken");
        let specs = [
            TemplateSpec::new("first.txt").inline("1"),
            TemplateSpec::new("package.json").inline("{}").update(Updater::json(Vec::<String>::new())),
            TemplateSpec::new("last.txt").inline("3"),
        ];

        let err = Materializer::new(&fs, "/p")
            .materialize(&Answers::new(), &specs)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidJson { .. }));
        assert_eq!(fs.contents("/p/first.txt").as_deref(), Some("1"));
        assert!(fs.contents("/p/last.txt").is_none());
    }

    #[test]
    fn test_custom_updater() {
        let fs = MemoryFs::new().with_dir("/p").with_file("/p/log", "old");
        let specs = [TemplateSpec::new("log")
            .inline("new")
            .update(Updater::Custom(Arc::new(|existing, rendered| {
                Ok(format!("{}+{}", existing, rendered))
            })))];

        let writes = Materializer::new(&fs, "/p").materialize(&Answers::new(), &specs).unwrap();
        assert_eq!(writes[0].output, "old+new");
    }

    #[test]
    fn test_file_locator_reads_and_renders() {
        let fs = MemoryFs::new()
            .with_dir("/p")
            .with_file("/tpl/spec.ts", "describe('{{ name }}')");
        let specs = [TemplateSpec::new("x.spec.ts").template(TemplateLocator::File("/tpl/spec.ts".into()))];

        let writes = Materializer::new(&fs, "/p")
            .materialize(&answers(&[("name", "X")]), &specs)
            .unwrap();
        assert_eq!(writes[0].output, "describe('X')");
    }

    #[test]
    fn test_missing_template_file_is_an_error() {
        let fs = MemoryFs::new().with_dir("/p");
        let specs = [TemplateSpec::new("x").template(TemplateLocator::File("/tpl/gone".into()))];
        let err = Materializer::new(&fs, "/p")
            .materialize(&Answers::new(), &specs)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
    }

    #[test]
    fn test_materialize_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let specs = [
            TemplateSpec::new("src/{{ name }}/{{ name }}.module.ts").inline("export class {{ moduleName }} {}"),
        ];
        let answers = answers(&[("name", "my-lib"), ("moduleName", "MyLibModule")]);

        let writes = Materializer::new(&LocalFs, tmp.path())
            .materialize(&answers, &specs)
            .unwrap();

        let written = tmp.path().join("src/my-lib/my-lib.module.ts");
        assert_eq!(writes[0].destination, written);
        assert_eq!(
            std::fs::read_to_string(written).unwrap(),
            "export class MyLibModule {}"
        );
    }
}
