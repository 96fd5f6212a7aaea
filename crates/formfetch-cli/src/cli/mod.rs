//! CLI for formfetch.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use formfetch_core::config::{self, FormfetchConfig};
use std::path::PathBuf;

use commands::{run_completions, run_config_path, run_fetch, run_urls};

/// Top-level CLI for formfetch.
#[derive(Debug, Parser)]
#[command(name = "formfetch")]
#[command(about = "formfetch: download PDF form guides one URL at a time", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config path.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the URL list comes from. Without either, the config's `urls` are used.
#[derive(Debug, Args)]
pub struct UrlSource {
    /// URLs to fetch, in order.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Read URLs from a file (one per line, `#` comments).
    #[arg(long, value_name = "FILE", conflicts_with = "urls")]
    pub list: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: UrlSource,

    /// Directory to save files into (default: config `output_dir`, else the current directory).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only save responses served as application/pdf.
    #[arg(long)]
    pub require_pdf: bool,

    /// Only save responses whose body starts with `%PDF`.
    #[arg(long)]
    pub require_pdf_magic: bool,

    /// Sanitize filenames for Linux instead of using the raw final path segment.
    #[arg(long)]
    pub sanitize: bool,

    /// Pause between consecutive requests, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Exit with status 2 if any URL failed.
    #[arg(long)]
    pub strict: bool,

    /// Write download_summary.csv (url, saved_as, status, bytes) into the output directory.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download each URL in order, saving it under its final path segment.
    Fetch(FetchArgs),

    /// List the URLs a fetch would process and the filename each maps to.
    Urls {
        #[command(flatten)]
        source: UrlSource,

        /// Show sanitized filenames.
        #[arg(long)]
        sanitize: bool,
    },

    /// Print the config file location.
    ConfigPath,

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<FormfetchConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    /// Parses arguments, runs the command and returns the process exit status.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch(args) => {
                let mut cfg = load_config(cli.config.as_ref())?;
                run_fetch(&mut cfg, &args)
            }
            CliCommand::Urls { source, sanitize } => {
                let cfg = load_config(cli.config.as_ref())?;
                run_urls(&cfg, &source, sanitize)?;
                Ok(0)
            }
            CliCommand::ConfigPath => {
                run_config_path(cli.config.as_ref())?;
                Ok(0)
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
