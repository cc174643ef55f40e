//! Minimal HTTP transport with safe logging and basic auth.
//!
//! - One GET per call against an absolute URL; no retries, no backoff
//! - `Auth::Basic` credentials are never logged, only the auth kind
//! - The response is handed back as a [`RawResponse`] without any status
//!   interpretation: a 404 or 503 is still `Ok`
//! - Optional *raw* request/response logging via `BING_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), bing_http::HttpError> {
//! use bing_http::{Auth, HttpClient, RequestOpts};
//!
//! let client = HttpClient::new()?;
//! let resp = client
//!     .get_raw(
//!         "https://api.example.com/v1/items?Query=%27rust%27",
//!         RequestOpts {
//!             auth: Some(Auth::Basic { username: "key", password: "key" }),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! println!("{} ({} bytes)", resp.status, resp.body.len());
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, truncated body snippets, network errors, and
//! (optionally) raw request/response lines (target `http.raw`).

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, Method, StatusCode, Url};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "BING_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with credentials redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, auth_kind: &str) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    if auth_kind == "basic" {
        parts.push("-u '<redacted>:<redacted>'".to_string());
    }
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if *k == AUTHORIZATION {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

/// Transport-level failures. A non-2xx status is not one of them.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the client.
///
/// ```
/// use bing_http::Auth;
///
/// let auth = Auth::Basic { username: "k", password: "k" };
/// assert_eq!(auth.kind(), "basic");
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// HTTP Basic: `Authorization: Basic base64(username:password)`
    Basic {
        username: &'a str,
        password: &'a str,
    },
    None,
}

impl Auth<'_> {
    /// Name of the strategy, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Auth::Basic { .. } => "basic",
            Auth::None => "none",
        }
    }
}

/// Per-request knobs.
///
/// ```
/// use bing_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
/// assert!(opts.auth.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
}

// ==============================
// Response
// ==============================

/// The response exactly as the server sent it.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    /// Applied when a request does not set its own timeout. `None` means the
    /// call blocks until the transport gives up.
    pub default_timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client with no request timeout.
    ///
    /// ```no_run
    /// use bing_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new()?;
    /// assert!(client.default_timeout.is_none());
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        let inner = Client::builder()
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: None,
        })
    }

    /// Set the timeout used when a request carries none.
    ///
    /// ```no_run
    /// use bing_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new()?.with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Some(Duration::from_secs(2)));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = Some(dur);
        self
    }

    /// Issue exactly one GET against `url` and return whatever came back.
    pub async fn get_raw(&self, url: &str, opts: RequestOpts<'_>) -> Result<RawResponse, HttpError> {
        let method = Method::GET;
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;

        // ----- Build request -----
        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = opts.timeout.or(self.default_timeout);
        if let Some(t) = timeout {
            rb = rb.timeout(t);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        let auth = opts.auth.unwrap_or(Auth::None);
        if let Auth::Basic { username, password } = &auth {
            rb = rb.basic_auth(username, Some(password));
        }

        // ----- Safe request logging (pre-send) -----
        let auth_kind = auth.kind();
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            query_len=url.query().map(str::len).unwrap_or(0),
            timeout_ms=?timeout.map(|t| t.as_millis() as u64),
            auth_kind,
            "http.request.start"
        );

        if raw_enabled() {
            let empty = HeaderMap::new();
            let curl = make_curl(&method, &url, opts.headers.as_ref().unwrap_or(&empty), auth_kind);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let x_request_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            x_request_id=%x_request_id,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = body.len() > RAW_MAX_BODY;
            let text = String::from_utf8_lossy(&body[..body.len().min(RAW_MAX_BODY)]);
            tracing::info!(
                target: "http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snip_body(&body),
            "http.response.body_snippet"
        );

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn redacts_authorization_header() {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_static("Basic a2V5OmtleQ=="));
        h.insert("accept", HeaderValue::from_static("application/json"));
        let redacted = redact_headers(&h);
        assert!(redacted.contains(&("authorization".to_string(), "<redacted>".to_string())));
        assert!(redacted.contains(&("accept".to_string(), "application/json".to_string())));
    }

    #[test]
    fn curl_never_contains_credentials() {
        let url = Url::parse("https://api.example.com/Web?Query=%27x%27").unwrap();
        let curl = make_curl(&Method::GET, &url, &HeaderMap::new(), "basic");
        assert!(curl.contains("<redacted>:<redacted>"));
        assert!(curl.ends_with("'https://api.example.com/Web?Query=%27x%27'"));
    }

    #[test]
    fn snippet_is_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_MAX + 3);
    }

    #[test]
    fn raw_response_text_is_lossy() {
        let resp = RawResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"{\"d\":1}"),
        };
        assert!(resp.is_success());
        assert_eq!(resp.text(), "{\"d\":1}");
    }
}
