//! `formfetch fetch` – download the URL list into the output directory.

use anyhow::Result;
use formfetch_core::config::FormfetchConfig;
use formfetch_core::fetcher::{BatchFetcher, BatchReport, FetchOptions};
use formfetch_core::report::Reporter;
use formfetch_core::storage;
use formfetch_core::summary;
use formfetch_core::transport::CurlTransport;

use super::resolve_urls;
use crate::cli::FetchArgs;

/// Exit status for `--strict` runs with at least one failed URL.
pub(crate) const STRICT_FAILURE_EXIT: i32 = 2;

pub fn run_fetch(cfg: &mut FormfetchConfig, args: &FetchArgs) -> Result<i32> {
    apply_overrides(cfg, args);
    let urls = resolve_urls(&args.source, cfg)?;

    if urls.is_empty() {
        tracing::warn!("no URLs to fetch");
        return Ok(0);
    }

    let cwd = std::env::current_dir()?;
    let options = FetchOptions::from_config(cfg, &cwd);
    storage::ensure_dir(&options.output_dir)?;
    let summary_path = options.output_dir.join(summary::SUMMARY_FILE_NAME);

    let transport = CurlTransport::new(&cfg.http.to_options())?;
    let mut fetcher = BatchFetcher::new(transport, options);
    let mut reporter = Reporter::stdout();
    let report = fetcher.run(&urls, &mut reporter);

    if !report.all_succeeded() {
        tracing::info!(failed = ?report.failed_urls(), "some form guides were not saved");
    }
    if cfg.write_summary {
        summary::write_summary(&summary_path, &report)?;
    }
    Ok(exit_code(&report, args.strict))
}

/// Command-line flags take precedence over the config file.
pub(crate) fn apply_overrides(cfg: &mut FormfetchConfig, args: &FetchArgs) {
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = Some(dir.clone());
    }
    if args.require_pdf {
        cfg.require_pdf = true;
    }
    if args.require_pdf_magic {
        cfg.require_pdf_magic = true;
    }
    if args.summary {
        cfg.write_summary = true;
    }
    if args.sanitize {
        cfg.sanitize_filenames = true;
    }
    if let Some(ms) = args.delay_ms {
        cfg.delay_between_ms = ms;
    }
    if let Some(secs) = args.timeout_secs {
        cfg.http.timeout_secs = secs;
    }
}

/// A finished batch exits 0; partial failure only changes that under `--strict`.
pub(crate) fn exit_code(report: &BatchReport, strict: bool) -> i32 {
    if strict && !report.all_succeeded() {
        STRICT_FAILURE_EXIT
    } else {
        0
    }
}
