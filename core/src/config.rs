//! Executor configuration.
//!
//! Defaults match what a plain blocking client needs: 16 KiB read chunks and a
//! crate-identifying user agent. Both can be overridden from the environment
//! through `FETCH_CHUNK_SIZE` and `FETCH_USER_AGENT`.

use ureq::http::HeaderValue;

use crate::error::ExecuteError;

/// Largest chunk handed to a sink in one call unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Largest accepted `chunk_size`; the read buffer is allocated up front.
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

pub const CHUNK_SIZE_VAR: &str = "FETCH_CHUNK_SIZE";
pub const USER_AGENT_VAR: &str = "FETCH_USER_AGENT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Upper bound on the size of each chunk passed to a `ChunkSink`.
    pub chunk_size: usize,
    /// Sent as `user-agent` unless the request sets its own.
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: concat!("fetch-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ExecuteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup; unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExecuteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(CHUNK_SIZE_VAR) {
            config.chunk_size = raw.trim().parse().map_err(|e| {
                ExecuteError::InvalidConfig(format!("{CHUNK_SIZE_VAR}={raw:?}: {e}"))
            })?;
        }
        if let Some(agent) = lookup(USER_AGENT_VAR) {
            config.user_agent = agent;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExecuteError> {
        if self.chunk_size == 0 {
            return Err(ExecuteError::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ExecuteError::InvalidConfig(format!(
                "chunk size {} exceeds the maximum of {MAX_CHUNK_SIZE}",
                self.chunk_size
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ExecuteError::InvalidConfig(
                "user agent must not be empty".to_string(),
            ));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ExecuteError::InvalidConfig(format!(
                "user agent {:?} is not a valid header value",
                self.user_agent
            )));
        }
        Ok(())
    }
}
