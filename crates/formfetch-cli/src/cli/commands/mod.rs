//! CLI command handlers, one per file.

mod completions;
mod config_path;
mod fetch;
mod urls;

pub use completions::run_completions;
pub use config_path::run_config_path;
pub use fetch::run_fetch;
pub use urls::run_urls;

use anyhow::Result;
use formfetch_core::config::FormfetchConfig;
use formfetch_core::url_list;

use crate::cli::UrlSource;

/// Resolve the URL list: command-line URLs, else `--list` file, else config `urls`.
pub(crate) fn resolve_urls(source: &UrlSource, cfg: &FormfetchConfig) -> Result<Vec<String>> {
    if !source.urls.is_empty() {
        return Ok(source.urls.clone());
    }
    if let Some(path) = &source.list {
        return url_list::read_url_list(path);
    }
    Ok(cfg.urls.clone())
}
