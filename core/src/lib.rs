//! Blocking one-shot HTTP GET/POST with chunked body accumulation.
//!
//! # Overview
//! `Executor` performs a single request per call over ureq, streams the
//! response body through a `ChunkSink` and reports either the complete
//! `HttpResponse` or an `ExecuteError`.
//!
//! # Design
//! - No state survives a call: each request gets its own agent and buffer.
//! - The body is delivered in bounded chunks; a sink that consumes less than
//!   it was offered aborts the transfer.
//! - POST bodies are sent verbatim; callers encode them.

pub mod buffer;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;

pub use buffer::{pump, ChunkSink, ResponseBuffer};
pub use config::ExecutorConfig;
pub use error::ExecuteError;
pub use executor::{Executor, Outcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
