//! Console progress lines for a batch run.

use std::fmt::Display;
use std::io::{self, Write};

/// Writes one line per batch event to `out` (stdout in the CLI).
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Reporter::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn downloading(&mut self, url: &str) {
        self.line(format_args!("Downloading {}", url));
    }

    pub fn saved(&mut self, filename: &str) {
        self.line(format_args!("Saved {}", filename));
    }

    pub fn failed(&mut self, url: &str, reason: &dyn Display) {
        self.line(format_args!("Failed to download {}: {}", url, reason));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // A closed stdout must not stop the batch; the log still has every event.
    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args).and_then(|_| self.out.flush()) {
            tracing::debug!("console write failed: {}", e);
        }
    }
}
