//! HTTP request and response values for the blocking executor.
//!
//! # Design
//! Requests are built through `HttpRequest::get` / `HttpRequest::post` so a
//! body exists exactly when the method is POST. The executor never encodes a
//! POST body: callers hand over bytes already in the wire format the server
//! expects (for example `field1=value1&field2=value2`).
//!
//! Responses carry only the status and the accumulated body. Response headers
//! are not exposed.

use std::borrow::Cow;
use std::string::FromUtf8Error;

/// Content type attached by `HttpRequest::post`.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A single GET or POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST `body` with a `content-type: application/x-www-form-urlencoded`
    /// header.
    pub fn post(url: &str, body: &str) -> Self {
        Self::post_raw(url, body).with_header("content-type", FORM_URLENCODED)
    }

    /// POST `body` without any content type; the server has to infer it.
    pub fn post_raw(url: &str, body: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: Vec::new(),
            body: Some(body.to_string()),
        }
    }

    /// Add a request header. A header with the same name (case-insensitive)
    /// is replaced.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The POST payload. Always `None` for GET.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub(crate) fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

/// A completed exchange: the status line code and the full body.
///
/// A 4xx or 5xx status is still a completed exchange; only transport
/// failures surface as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
