use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::info;

use super::sanitize_stem;

/// Import external `.txt` documents (e.g. a contract dataset dump) into the
/// template directory. Filenames are rewritten to `ext_{i:05}_{stem}.txt`
/// with a sanitized stem; existing files are never overwritten. Returns the
/// number of files copied.
pub fn import_tree(src_root: &Path, dest_dir: &Path, limit: Option<usize>) -> Result<usize> {
    let files = find_text_files(src_root)?;
    if files.is_empty() {
        bail!("no .txt files found under {}", src_root.display());
    }

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("creating template directory {}", dest_dir.display()))?;

    let mut copied = 0;
    for (i, src) in files.iter().enumerate() {
        if let Some(max) = limit {
            if copied >= max {
                break;
            }
        }
        let stem = src
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        let dest = dest_dir.join(format!("ext_{i:05}_{}.txt", sanitize_stem(stem)));
        if dest.exists() {
            continue;
        }
        std::fs::copy(src, &dest)
            .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
        copied += 1;
    }

    info!(copied, dest = %dest_dir.display(), "imported external templates");
    Ok(copied)
}

fn find_text_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        bail!("import path '{}' does not exist", root.display());
    }
    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).standard_filters(true).build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
