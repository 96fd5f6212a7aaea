//! `formfetch config-path` – print where configuration is read from.

use anyhow::Result;
use formfetch_core::config;
use std::path::PathBuf;

pub fn run_config_path(explicit: Option<&PathBuf>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.clone(),
        None => config::config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
