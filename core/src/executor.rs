//! Blocking single-shot request executor.
//!
//! # Design
//! `Executor` holds only its validated `ExecutorConfig`. Every call builds a
//! fresh ureq agent, performs exactly one exchange and drops the agent before
//! returning, so no connection outlives the call that opened it. Nothing is
//! retried; the caller owns any retry policy.
//!
//! Status codes are not treated as failures. A 404 with a body is a completed
//! exchange and comes back as `Ok`. Redirects are not followed: a 3xx is
//! returned as-is with its status and body.

use log::{debug, warn};

use crate::buffer::{pump, ChunkSink, ResponseBuffer};
use crate::config::ExecutorConfig;
use crate::error::ExecuteError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Result of one request: the full response, or why it failed. No partial
/// body is exposed on failure.
pub type Outcome = Result<HttpResponse, ExecuteError>;

#[derive(Debug, Clone)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Validate `config` and prepare the executor. This is the only step
    /// that can fail before any request is made.
    pub fn new(config: ExecutorConfig) -> Result<Self, ExecuteError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// `Executor::new` with `ExecutorConfig::from_env`.
    pub fn from_env() -> Result<Self, ExecuteError> {
        Self::new(ExecutorConfig::from_env()?)
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn get(&self, url: &str) -> Outcome {
        self.execute(&HttpRequest::get(url))
    }

    /// POST an already-encoded form body.
    pub fn post(&self, url: &str, body: &str) -> Outcome {
        self.execute(&HttpRequest::post(url, body))
    }

    /// Perform `request` and buffer the whole body in memory.
    pub fn execute(&self, request: &HttpRequest) -> Outcome {
        let mut buffer = ResponseBuffer::new();
        let status = self.execute_with(request, &mut buffer)?;
        Ok(HttpResponse {
            status,
            body: buffer.into_bytes(),
        })
    }

    /// Perform `request`, handing each body chunk to `sink` as it arrives.
    ///
    /// Returns the response status. If the sink consumes less than a full
    /// chunk the transfer stops with `ExecuteError::WriteAborted`.
    pub fn execute_with<S>(&self, request: &HttpRequest, sink: &mut S) -> Result<u16, ExecuteError>
    where
        S: ChunkSink + ?Sized,
    {
        if request.url().is_empty() {
            return Err(ExecuteError::EmptyUrl);
        }
        let method = request.method();
        debug!("{} {}", method.as_str(), request.url());

        let agent = self.agent();
        let sent = match method {
            HttpMethod::Get => self.apply_headers(agent.get(request.url()), request).call(),
            HttpMethod::Post => {
                let body = request.body().unwrap_or_default();
                self.apply_headers(agent.post(request.url()), request)
                    .send(body.as_bytes())
            }
        };
        let mut response = sent.map_err(|e| {
            warn!("{} {} failed: {e}", method.as_str(), request.url());
            ExecuteError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let reader = response.body_mut().as_reader();
        match pump(reader, self.config.chunk_size, sink) {
            Ok(total) => {
                debug!("{} {} -> {status}, {total} bytes", method.as_str(), request.url());
                Ok(status)
            }
            Err(e) => {
                warn!("{} {} aborted: {e}", method.as_str(), request.url());
                Err(e)
            }
        }
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .new_agent()
    }

    fn apply_headers<B>(
        &self,
        mut builder: ureq::RequestBuilder<B>,
        request: &HttpRequest,
    ) -> ureq::RequestBuilder<B> {
        if !request.has_header("user-agent") {
            builder = builder.header("user-agent", self.config.user_agent.as_str());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}
