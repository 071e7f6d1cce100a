use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

const EXTENSION: &str = ".md";

#[derive(Debug, Clone)]
pub struct Document {
    /// File name without the `.md` extension.
    pub title: String,
    pub raw_text: String,
}

/// List `.md` files directly under `input`, sorted by file name.
///
/// A file is skipped when `input` joined with its name matches an `ignore`
/// entry verbatim. A `.md` file whose name is not UTF-8 is an error.
pub fn list_documents(input: &Path, ignore: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input)
        .with_context(|| format!("Failed to list input directory {}", input.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", input.display()))?;
        let name = entry.file_name();
        if !name.as_encoded_bytes().ends_with(EXTENSION.as_bytes()) {
            continue;
        }
        let Some(name) = name.to_str() else {
            bail!(
                "Markdown file name is not valid UTF-8: {}",
                entry.path().display()
            );
        };
        names.push(name.to_string());
    }
    names.sort();

    let mut paths = Vec::with_capacity(names.len());
    for name in names {
        let path = input.join(&name);
        if is_ignored(&path, ignore) {
            debug!(path = %path.display(), "ignored");
            continue;
        }
        paths.push(path);
    }
    Ok(paths)
}

fn is_ignored(path: &Path, ignore: &[String]) -> bool {
    let Some(path) = path.to_str() else {
        return false;
    };
    ignore.iter().any(|i| i == path)
}

pub fn read_document(path: &Path) -> Result<Document> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Document {
        title: title_from_path(path),
        raw_text,
    })
}

fn title_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(EXTENSION) {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

// ── Tests ──
