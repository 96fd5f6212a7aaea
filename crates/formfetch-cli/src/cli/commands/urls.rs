//! `formfetch urls` – show the resolved URL list without touching the network.

use anyhow::Result;
use formfetch_core::config::FormfetchConfig;
use formfetch_core::url_model;

use super::resolve_urls;
use crate::cli::UrlSource;

pub fn run_urls(cfg: &FormfetchConfig, source: &UrlSource, sanitize: bool) -> Result<()> {
    let urls = resolve_urls(source, cfg)?;
    for url in &urls {
        println!("{}", describe(url, sanitize || cfg.sanitize_filenames));
    }
    Ok(())
}

fn describe(url: &str, sanitize: bool) -> String {
    match url_model::derive_filename(url, sanitize) {
        Some(name) => format!("{} -> {}", url, name),
        None => format!("{} -> (no filename)", url),
    }
}
