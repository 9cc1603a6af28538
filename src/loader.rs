use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::Document;

/// Read a plain-text document from disk, named after its file.
///
/// Rejects files over `max_bytes` and content that is not UTF-8.
pub fn load_document(path: &Path, max_bytes: u64) -> Result<Document> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot open document {}", path.display()))?;

    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes, over the {} byte limit",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("{} is not a UTF-8 text document", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    Ok(Document::new(name, text))
}
