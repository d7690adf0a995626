//! The `.keystone` answer record and `package.json` lookups

use anyhow::{Context as _, Result};
use keystone_core::{Answers, FileSystem, RECORD_FILE};
use serde_json::Value;
use std::path::Path;

/// Answers saved by the last `init`, if the project has a record
pub fn load_record(fs: &impl FileSystem, root: &Path) -> Result<Option<Answers>> {
    let path = root.join(RECORD_FILE);
    if !fs.exists(&path) {
        return Ok(None);
    }

    let content = fs.read_to_string(&path)?;
    let answers = Answers::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(answers))
}

pub fn save_record(fs: &impl FileSystem, root: &Path, answers: &Answers) -> Result<()> {
    let path = root.join(RECORD_FILE);
    let mut content = answers
        .to_json()
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    content.push('\n');
    fs.write(&path, &content)?;
    Ok(())
}

/// `name` from the project's `package.json`; unreadable files count as absent
pub fn package_name(fs: &impl FileSystem, root: &Path) -> Option<String> {
    let path = root.join("package.json");
    if !fs.exists(&path) {
        return None;
    }

    let content = fs.read_to_string(&path).ok()?;
    match serde_json::from_str::<Value>(&content) {
        Ok(package) => package.get("name").and_then(Value::as_str).map(str::to_string),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "ignoring unparsable package.json");
            None
        }
    }
}
