use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transport::HttpOptions;

/// Form guides fetched when neither the command line nor a list file names any URLs.
pub const DEFAULT_FORM_URLS: &[&str] = &[
    "https://files.racingandsports.com/racing/raceinfo/newformpdf/RICHG3108form.pdf",
    "https://files.racingandsports.com/racing/raceinfo/newformpdf/SANDG3108form.pdf",
    "https://files.racingandsports.com/racing/raceinfo/newformpdf/WENTG3108form.pdf",
];

/// HTTP request settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-request timeout; an expired request fails that URL only.
    pub timeout_secs: u64,
    /// Overrides the default `formfetch/<version>` user agent.
    pub user_agent: Option<String>,
    /// Extra request headers, e.g. `Referer = "https://www.racingandsports.com.au/"`.
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

impl HttpConfig {
    pub fn to_options(&self) -> HttpOptions {
        let defaults = HttpOptions::default();
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            headers: self.headers.clone(),
            max_redirects: defaults.max_redirects,
        }
    }
}

/// Global configuration loaded from `~/.config/formfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormfetchConfig {
    /// URLs to fetch, in order.
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
    /// Where files are saved; the current directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Only save 200 responses served as `application/pdf`.
    #[serde(default)]
    pub require_pdf: bool,
    /// Only save 200 responses whose body starts with `%PDF`.
    #[serde(default)]
    pub require_pdf_magic: bool,
    /// Clean derived filenames for Linux instead of using the raw final segment.
    #[serde(default)]
    pub sanitize_filenames: bool,
    /// Pause between consecutive requests, in milliseconds.
    #[serde(default)]
    pub delay_between_ms: u64,
    /// Write `download_summary.csv` into the output directory after each run.
    #[serde(default)]
    pub write_summary: bool,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_urls() -> Vec<String> {
    DEFAULT_FORM_URLS.iter().map(|s| s.to_string()).collect()
}

impl Default for FormfetchConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            output_dir: None,
            require_pdf: false,
            require_pdf_magic: false,
            sanitize_filenames: false,
            delay_between_ms: 0,
            write_summary: false,
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("formfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FormfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FormfetchConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from a specific file.
pub fn load_from_path(path: &Path) -> Result<FormfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FormfetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &FormfetchConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
