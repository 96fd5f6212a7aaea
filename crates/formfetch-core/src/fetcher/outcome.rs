//! Per-URL outcomes and the batch report.

use std::path::PathBuf;

use crate::transport::TransportError;

/// Why a URL produced no file. Every variant is handled per URL; none aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum FailureReason {
    /// The request could not be completed (DNS, refused, timeout, ...).
    #[error("{0}")]
    Transport(#[from] TransportError),
    /// A response arrived but its status was not 200.
    #[error("HTTP {0}")]
    Status(u32),
    /// The URL has nothing after its last `/` to name a file by.
    #[error("no filename in URL")]
    NoFilename,
    /// PDF required but the server sent something else.
    #[error("unexpected content type {}", .0.as_deref().unwrap_or("(none)"))]
    UnexpectedContentType(Option<String>),
    /// PDF body required but it lacks the `%PDF` signature.
    #[error("body is not a PDF")]
    NotPdfBody,
    /// The body could not be written to disk.
    #[error("storage: {0:#}")]
    Storage(anyhow::Error),
}

impl FailureReason {
    /// Short label for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::Transport(_) => "transport",
            FailureReason::Status(_) => "status",
            FailureReason::NoFilename => "no_filename",
            FailureReason::UnexpectedContentType(_) => "content_type",
            FailureReason::NotPdfBody => "not_pdf",
            FailureReason::Storage(_) => "storage",
        }
    }
}

/// Result of processing one URL.
#[derive(Debug)]
pub enum UrlOutcome {
    Saved {
        url: String,
        path: PathBuf,
        bytes: u64,
    },
    Failed {
        url: String,
        /// Where the file would have been saved; `None` without a filename.
        target: Option<PathBuf>,
        reason: FailureReason,
    },
}

impl UrlOutcome {
    pub fn url(&self) -> &str {
        match self {
            UrlOutcome::Saved { url, .. } | UrlOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, UrlOutcome::Saved { .. })
    }
}

/// Outcomes of a batch, one per input URL, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UrlOutcome>,
}

impl BatchReport {
    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.saved_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn failed_urls(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_saved())
            .map(UrlOutcome::url)
            .collect()
    }
}
