//! Templates compiled into the binary

use anyhow::{Context as _, Result};
use keystone_core::TemplateCatalog;
use std::path::Path;

const TEMPLATES: &[(&str, &str)] = &[
    ("init/gitignore", include_str!("../templates/init/gitignore")),
    ("init/npmignore", include_str!("../templates/init/npmignore")),
    ("init/README.md", include_str!("../templates/init/README.md")),
    ("init/package.json", include_str!("../templates/init/package.json")),
    ("init/tsconfig.json", include_str!("../templates/init/tsconfig.json")),
    ("init/index.ts", include_str!("../templates/init/index.ts")),
    ("init/module.ts", include_str!("../templates/init/module.ts")),
    ("component/app.ts", include_str!("../templates/component/app.ts")),
    ("component/spec.ts", include_str!("../templates/component/spec.ts")),
    ("directive/app.ts", include_str!("../templates/directive/app.ts")),
    ("directive/spec.ts", include_str!("../templates/directive/spec.ts")),
    ("pipe/app.ts", include_str!("../templates/pipe/app.ts")),
    ("pipe/spec.ts", include_str!("../templates/pipe/spec.ts")),
    ("service/app.ts", include_str!("../templates/service/app.ts")),
    ("service/spec.ts", include_str!("../templates/service/spec.ts")),
];

/// Bundled templates, with files from `template_dir` taking precedence
pub fn catalog(template_dir: Option<&Path>) -> Result<TemplateCatalog> {
    let mut catalog = TemplateCatalog::bundled(TEMPLATES);

    if let Some(dir) = template_dir {
        let local = TemplateCatalog::from_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
        catalog.merge(local);
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_bundled_catalog_has_every_generator() {
        let catalog = catalog(None).unwrap();
        for name in ["init/package.json", "component/app.ts", "service/spec.ts", "pipe/app.ts"] {
            assert!(catalog.contains(name), "missing {}", name);
        }
        assert_eq!(catalog.len(), TEMPLATES.len());
    }

    #[test]
    fn test_template_dir_overrides_bundled() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("service")).unwrap();
        fs::write(dir.path().join("service/app.ts"), "custom").unwrap();

        let catalog = catalog(Some(dir.path())).unwrap();
        assert_eq!(
            catalog.get("service/app.ts").unwrap(),
            keystone_core::TemplateLocator::File(dir.path().join("service/app.ts"))
        );
        assert!(matches!(
            catalog.get("service/spec.ts").unwrap(),
            keystone_core::TemplateLocator::Inline(_)
        ));
    }

    #[test]
    fn test_missing_template_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(catalog(Some(&dir.path().join("nope"))).is_err());
    }
}
