//! libcurl-backed transport.
//!
//! One easy handle is reused across requests so keep-alive connections to the
//! same host carry over between URLs of a batch.

use anyhow::Result;
use curl::easy::{Easy, List};
use std::collections::BTreeMap;
use std::str;
use std::time::Duration;

use super::{parse, Fetch, HttpResponse, TransportError};

/// Sent with every request; PDF first, anything else accepted.
const ACCEPT_PDF: &str = "Accept: application/pdf,application/octet-stream;q=0.9,*/*;q=0.8";

/// Request settings for [`CurlTransport`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Whole-request limit, body included.
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra request headers, e.g. `Referer`.
    pub headers: BTreeMap<String, String>,
    pub max_redirects: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
            headers: BTreeMap::new(),
            max_redirects: 10,
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("formfetch/{}", env!("CARGO_PKG_VERSION"))
}

/// Blocking GET over libcurl. Follows redirects and reports the final response.
pub struct CurlTransport {
    easy: Easy,
}

impl CurlTransport {
    pub fn new(opts: &HttpOptions) -> Result<Self> {
        let mut easy = Easy::new();
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(opts.max_redirects)?;
        easy.connect_timeout(opts.connect_timeout)?;
        easy.timeout(opts.timeout)?;
        easy.useragent(&opts.user_agent)?;

        let mut list = List::new();
        list.append(ACCEPT_PDF)?;
        for (k, v) in &opts.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        Ok(Self { easy })
    }
}

impl Fetch for CurlTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        self.easy.url(url)?;
        {
            let mut transfer = self.easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = self.easy.response_code()?;
        Ok(HttpResponse {
            status,
            content_type: parse::final_content_type(&headers),
            body,
        })
    }
}
