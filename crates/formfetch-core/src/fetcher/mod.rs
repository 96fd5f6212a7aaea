//! Sequential best-effort batch fetcher.
//!
//! Walks the URL list in order, one blocking GET at a time. A status of exactly
//! 200 saves the body under the URL's final path segment; anything else is
//! reported and the batch moves on. Nothing is retried.

mod outcome;

pub use outcome::{BatchReport, FailureReason, UrlOutcome};

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::FormfetchConfig;
use crate::report::Reporter;
use crate::storage;
use crate::transport::Fetch;
use crate::url_model;

/// Per-run knobs for the batch fetcher.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Directory the files are written to.
    pub output_dir: PathBuf,
    /// Reject 200 responses whose `Content-Type` is not `application/pdf`.
    pub require_pdf: bool,
    /// Reject 200 responses whose body does not start with `%PDF`.
    pub require_pdf_magic: bool,
    /// Sanitize derived filenames for Linux.
    pub sanitize_filenames: bool,
    /// Pause between consecutive URLs. Never applied after the last one.
    pub delay_between: Duration,
}

impl FetchOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            require_pdf: false,
            require_pdf_magic: false,
            sanitize_filenames: false,
            delay_between: Duration::ZERO,
        }
    }

    /// Options taken from config; `output_dir` falls back to `default_dir`.
    pub fn from_config(cfg: &FormfetchConfig, default_dir: &Path) -> Self {
        Self {
            output_dir: cfg
                .output_dir
                .clone()
                .unwrap_or_else(|| default_dir.to_path_buf()),
            require_pdf: cfg.require_pdf,
            require_pdf_magic: cfg.require_pdf_magic,
            sanitize_filenames: cfg.sanitize_filenames,
            delay_between: Duration::from_millis(cfg.delay_between_ms),
        }
    }
}

/// Runs a URL list through a [`Fetch`] transport and saves the results.
pub struct BatchFetcher<T: Fetch> {
    transport: T,
    options: FetchOptions,
}

impl<T: Fetch> BatchFetcher<T> {
    pub fn new(transport: T, options: FetchOptions) -> Self {
        Self { transport, options }
    }

    /// Processes every URL exactly once, in order, reporting each on `reporter`.
    /// Per-URL failures are recorded in the report; they never end the batch.
    pub fn run<W: Write>(&mut self, urls: &[String], reporter: &mut Reporter<W>) -> BatchReport {
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(urls.len()),
        };
        let mut written: HashSet<PathBuf> = HashSet::new();

        tracing::info!(
            count = urls.len(),
            output_dir = %self.options.output_dir.display(),
            "starting batch"
        );

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.options.delay_between.is_zero() {
                std::thread::sleep(self.options.delay_between);
            }

            let outcome = self.fetch_one(url, reporter);
            if let UrlOutcome::Saved { path, .. } = &outcome {
                // Same final segment as an earlier URL: last write wins.
                if !written.insert(path.clone()) {
                    tracing::warn!(
                        url = %url,
                        path = %path.display(),
                        "overwrote file saved earlier in this batch"
                    );
                }
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            saved = report.saved_count(),
            failed = report.failed_count(),
            "batch finished"
        );
        report
    }

    fn fetch_one<W: Write>(&mut self, url: &str, reporter: &mut Reporter<W>) -> UrlOutcome {
        reporter.downloading(url);

        let Some(filename) = url_model::derive_filename(url, self.options.sanitize_filenames)
        else {
            return failed(url, None, FailureReason::NoFilename, reporter);
        };
        let target = self.options.output_dir.join(&filename);

        match self.try_fetch(url, &filename) {
            Ok(bytes) => {
                tracing::info!(url = %url, file = %filename, bytes, "saved");
                reporter.saved(&filename);
                UrlOutcome::Saved {
                    url: url.to_string(),
                    path: target,
                    bytes,
                }
            }
            Err(reason) => failed(url, Some(target), reason, reporter),
        }
    }

    fn try_fetch(&mut self, url: &str, filename: &str) -> Result<u64, FailureReason> {
        let response = self.transport.get(url)?;
        tracing::debug!(
            url = %url,
            status = response.status,
            content_type = response.content_type.as_deref().unwrap_or(""),
            len = response.body.len(),
            "response"
        );

        if response.status != 200 {
            return Err(FailureReason::Status(response.status));
        }
        if self.options.require_pdf && !response.is_pdf() {
            return Err(FailureReason::UnexpectedContentType(response.content_type));
        }
        if self.options.require_pdf_magic && !response.has_pdf_magic() {
            return Err(FailureReason::NotPdfBody);
        }

        storage::save_body(&self.options.output_dir, filename, &response.body)
            .map_err(FailureReason::Storage)?;
        Ok(response.body.len() as u64)
    }
}

fn failed<W: Write>(
    url: &str,
    target: Option<PathBuf>,
    reason: FailureReason,
    reporter: &mut Reporter<W>,
) -> UrlOutcome {
    tracing::warn!(url = %url, kind = reason.label(), "download failed: {}", reason);
    reporter.failed(url, &reason);
    UrlOutcome::Failed {
        url: url.to_string(),
        target,
        reason,
    }
}
