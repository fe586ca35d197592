//! Chunk-by-chunk response body accumulation.
//!
//! The body is read off the connection in chunks of bounded size and each
//! chunk is offered to a `ChunkSink`. A sink reports how many bytes it took;
//! anything other than the full chunk aborts the transfer.

use std::io::{ErrorKind, Read};

use log::trace;

use crate::config::MAX_CHUNK_SIZE;
use crate::error::ExecuteError;

/// Receives response body chunks in arrival order.
pub trait ChunkSink {
    /// Consume `chunk` and return the number of bytes taken. Returning
    /// anything but `chunk.len()` aborts the request.
    fn on_chunk(&mut self, chunk: &[u8]) -> usize;
}

impl<F> ChunkSink for F
where
    F: FnMut(&[u8]) -> usize,
{
    fn on_chunk(&mut self, chunk: &[u8]) -> usize {
        self(chunk)
    }
}

/// Append-only accumulator for one response body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResponseBuffer {
    bytes: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ChunkSink for ResponseBuffer {
    fn on_chunk(&mut self, chunk: &[u8]) -> usize {
        self.bytes.extend_from_slice(chunk);
        chunk.len()
    }
}

/// Drain `reader` into `sink`, at most `chunk_size` bytes per call.
///
/// Returns the total number of bytes delivered. `chunk_size` is clamped to
/// `1..=MAX_CHUNK_SIZE`.
pub fn pump<R, S>(mut reader: R, chunk_size: usize, sink: &mut S) -> Result<u64, ExecuteError>
where
    R: Read,
    S: ChunkSink + ?Sized,
{
    let mut chunk = vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExecuteError::Read(e)),
        };
        let consumed = sink.on_chunk(&chunk[..n]);
        trace!("chunk of {n} bytes, sink consumed {consumed}");
        if consumed != n {
            return Err(ExecuteError::WriteAborted {
                consumed,
                offered: n,
            });
        }
        total += n as u64;
    }
}
