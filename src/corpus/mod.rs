pub mod hasher;
pub mod ident;
pub mod import;
pub mod seed;

use anyhow::{Context, Result, bail};
use std::path::Path;

/// One template source file: a plain-text document with embedded
/// placeholder markers.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub filename: String,
    pub content: String,
}

/// List the `.txt` templates directly under `dir`, sorted by filename so
/// indexing order is deterministic. Errors when the directory is missing.
pub fn read_templates(dir: &Path) -> Result<Vec<TemplateFile>> {
    if !dir.is_dir() {
        bail!("template directory '{}' not found", dir.display());
    }

    let mut templates = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading template directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading template {}", path.display()))?;
        templates.push(TemplateFile { filename, content });
    }

    templates.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(templates)
}

/// Filesystem-safe file stem: lowercase, spaces to underscores, anything
/// else non-alphanumeric to underscores.
pub(crate) fn sanitize_stem(stem: &str) -> String {
    stem.to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect()
}
