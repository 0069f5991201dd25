//! HTTP GET of candidate assets.
//!
//! Uses the curl crate (libcurl) in blocking mode with explicit connect and
//! total timeouts, so a stalled CDN cannot hang the interactive loop.

mod classify;

pub use classify::{body_looks_like_svg, content_type_is_svg, is_svg};

use crate::config::ToolConfig;
use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

/// Outcome of one GET. Transient; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// True for a 2xx final status with the body fully read.
    pub success: bool,
    /// Final HTTP status, or 0 when no response was received.
    pub status_code: u32,
    pub is_svg: bool,
    pub bytes: Option<Vec<u8>>,
    pub content_type: Option<String>,
    /// Short human-readable description of what happened.
    pub message: String,
}

impl FetchResult {
    /// A failed attempt that produced no usable response.
    pub fn failed(status_code: u32, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            ..Self::default()
        }
    }

    /// A successful response; classification is derived from the header and body.
    pub fn succeeded(status_code: u32, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let is_svg = is_svg(content_type.as_deref(), &bytes);
        let message = format!(
            "HTTP {}, {} bytes, {}",
            status_code,
            bytes.len(),
            content_type.as_deref().unwrap_or("no content type")
        );
        Self {
            success: true,
            status_code,
            is_svg,
            bytes: Some(bytes),
            content_type,
            message,
        }
    }
}

/// Something that can GET a URL. Failures are reported in the result, not as errors.
pub trait AssetFetcher {
    fn fetch(&self, url: &str) -> FetchResult;
}

/// Blocking libcurl fetcher.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(cfg: &ToolConfig) -> Self {
        Self::new(cfg.user_agent.clone(), cfg.connect_timeout(), cfg.timeout())
    }

    /// Performs the GET; returns (status, header lines, body).
    fn get(&self, url: &str) -> Result<(u32, Vec<String>, Vec<u8>)> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
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
            transfer.perform().context("GET request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        Ok((code, headers, body))
    }
}

impl AssetFetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> FetchResult {
        let (code, headers, body) = match self.get(url) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("GET {} failed: {:#}", url, e);
                return FetchResult::failed(0, format!("{:#}", e));
            }
        };
        if !(200..300).contains(&code) {
            tracing::debug!("GET {} returned HTTP {}", url, code);
            return FetchResult::failed(code, format!("HTTP {}", code));
        }
        let content_type = classify::content_type_from_headers(&headers);
        tracing::debug!(
            "GET {} returned HTTP {} ({} bytes, content-type {:?})",
            url,
            code,
            body.len(),
            content_type
        );
        FetchResult::succeeded(code, content_type, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_classifies_from_header() {
        let r = FetchResult::succeeded(200, Some("image/svg+xml".into()), b"<x/>".to_vec());
        assert!(r.success);
        assert!(r.is_svg);
        assert_eq!(r.status_code, 200);
        assert!(r.message.contains("4 bytes"));
    }

    #[test]
    fn succeeded_classifies_from_body() {
        let r = FetchResult::succeeded(200, None, b"<svg viewBox=\"0 0 1 1\"/>".to_vec());
        assert!(r.is_svg);
        assert!(r.content_type.is_none());
    }

    #[test]
    fn failed_has_no_bytes() {
        let r = FetchResult::failed(404, "HTTP 404");
        assert!(!r.success);
        assert!(r.bytes.is_none());
        assert!(!r.is_svg);
        assert_eq!(r.message, "HTTP 404");
    }

    #[test]
    fn connection_refused_is_a_failed_result() {
        // Bind then drop to get a port nobody listens on.
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let fetcher = CurlFetcher::new("test", Duration::from_secs(2), Duration::from_secs(2));
        let r = fetcher.fetch(&format!("http://127.0.0.1:{}/x", port));
        assert!(!r.success);
        assert_eq!(r.status_code, 0);
        assert!(!r.message.is_empty());
    }
}
