//! Named template lookup from bundled text or a local directory

use super::TemplateLocator;
use crate::error::{Result, ScaffoldError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Template names mapped to where their bodies live
///
/// Names are `/`-separated paths such as `component/app.ts`.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: BTreeMap<String, TemplateLocator>,
}

impl TemplateCatalog {
    /// Catalog of templates compiled into the binary
    pub fn bundled(templates: &[(&str, &str)]) -> Self {
        let entries = templates
            .iter()
            .map(|(name, body)| (name.to_string(), TemplateLocator::Inline(body.to_string())))
            .collect();
        Self { entries }
    }

    /// Catalog of every file below `dir`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(dir.to_path_buf()));
        }

        let mut entries = BTreeMap::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                ScaffoldError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            entries.insert(name, TemplateLocator::File(entry.path().to_path_buf()));
        }

        tracing::debug!(dir = %dir.display(), templates = entries.len(), "loaded local templates");
        Ok(Self { entries })
    }

    /// Overlay `other` on this catalog; its entries win
    pub fn merge(&mut self, other: TemplateCatalog) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Result<TemplateLocator> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ScaffoldError::TemplateNotFound(PathBuf::from(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
