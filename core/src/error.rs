//! Error types for the request executor.
//!
//! # Design
//! `InvalidConfig` is the only error raised while setting up an `Executor`;
//! the rest belong to a single request and never poison later calls. The
//! `Display` output is the human-readable description reported to callers.

use thiserror::Error;

/// Errors returned by `Executor` construction and `Executor::execute`.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The request URL was empty; no I/O was attempted.
    #[error("request url is empty")]
    EmptyUrl,

    /// The executor configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// DNS, connect, TLS or protocol failure reported by the transport.
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The connection broke while the body was being read.
    #[error("failed reading response body: {0}")]
    Read(#[from] std::io::Error),

    /// The chunk sink did not consume the whole chunk it was offered.
    #[error("failed writing received data: sink consumed {consumed} of {offered} bytes")]
    WriteAborted { consumed: usize, offered: usize },
}
