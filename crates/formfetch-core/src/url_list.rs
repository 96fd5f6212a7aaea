//! Plain-text URL list files: one URL per line, `#` starts a comment line.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a URL list. Order and duplicates are kept; nothing is validated.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read and parse a URL list file.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;
    let urls = parse_url_list(&text);
    tracing::debug!(path = %path.display(), count = urls.len(), "read URL list");
    Ok(urls)
}
