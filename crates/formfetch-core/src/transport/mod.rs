//! HTTP transport seam.
//!
//! The batch fetcher only needs one capability, a blocking GET, so it talks to
//! the network through the [`Fetch`] trait. [`CurlTransport`] is the libcurl
//! implementation used by the CLI; tests plug in scripted transports.

mod client;
mod error;
mod parse;

pub use client::{CurlTransport, HttpOptions};
pub use error::{TransportError, TransportErrorKind};

/// A completed HTTP exchange. Any status code counts as a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code of the final response (after redirects).
    pub status: u32,
    /// `Content-Type` of the final response, if sent.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True if `Content-Type` names a PDF (`application/pdf`, parameters ignored).
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| {
                ct.trim_start()
                    .to_ascii_lowercase()
                    .starts_with("application/pdf")
            })
            .unwrap_or(false)
    }

    /// True if the body starts with the `%PDF` file signature.
    pub fn has_pdf_magic(&self) -> bool {
        self.body.starts_with(b"%PDF")
    }
}

/// Issues a single blocking GET and returns the response, or why none arrived.
pub trait Fetch {
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError>;
}
