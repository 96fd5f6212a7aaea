//! Per-run CSV manifest: one row per URL with what happened to it.
//!
//! Columns are `url,saved_as,status,bytes`. `status` is `OK`,
//! `BAD_STATUS_<code>` for non-200 responses, or `ERROR_<KIND>` for
//! everything else. Failed rows carry 0 bytes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io;
use std::path::Path;

use crate::fetcher::{BatchReport, FailureReason, UrlOutcome};
use crate::transport::TransportErrorKind;

/// File name used when the summary goes into the output directory.
pub const SUMMARY_FILE_NAME: &str = "download_summary.csv";

const HEADER: [&str; 4] = ["url", "saved_as", "status", "bytes"];

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    url: &'a str,
    saved_as: String,
    status: String,
    bytes: u64,
}

/// Status column value for one outcome.
pub fn status_label(outcome: &UrlOutcome) -> String {
    let reason = match outcome {
        UrlOutcome::Saved { .. } => return "OK".to_string(),
        UrlOutcome::Failed { reason, .. } => reason,
    };
    let kind = match reason {
        FailureReason::Status(code) => return format!("BAD_STATUS_{}", code),
        FailureReason::Transport(e) => match e.kind {
            TransportErrorKind::Timeout => "TIMEOUT",
            TransportErrorKind::Connection => "CONNECTION",
            TransportErrorKind::InvalidUrl => "INVALID_URL",
            TransportErrorKind::Other => "TRANSPORT",
        },
        FailureReason::NoFilename => "NO_FILENAME",
        FailureReason::UnexpectedContentType(_) => "CONTENT_TYPE",
        FailureReason::NotPdfBody => "NOT_PDF",
        FailureReason::Storage(_) => "STORAGE",
    };
    format!("ERROR_{}", kind)
}

fn row(outcome: &UrlOutcome) -> SummaryRow<'_> {
    let (saved_as, bytes) = match outcome {
        UrlOutcome::Saved { path, bytes, .. } => (path.display().to_string(), *bytes),
        UrlOutcome::Failed { target, .. } => (
            target
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            0,
        ),
    };
    SummaryRow {
        url: outcome.url(),
        saved_as,
        status: status_label(outcome),
        bytes,
    }
}

/// Write the summary for `report` as CSV to `out`. The header is always written.
pub fn write_summary_to<W: io::Write>(out: W, report: &BatchReport) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(HEADER)?;
    for outcome in &report.outcomes {
        writer.serialize(row(outcome))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the summary for `report` to `path`, replacing any previous file.
pub fn write_summary(path: &Path, report: &BatchReport) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create summary {}", path.display()))?;
    write_summary_to(file, report)
        .with_context(|| format!("failed to write summary {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = report.outcomes.len(), "wrote download summary");
    Ok(())
}
