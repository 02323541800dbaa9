//! Server configuration with sensible defaults.

use crate::error::{Error, Result};
use crate::{DEFAULT_HOST, DEFAULT_MAX_CLIENTS, DEFAULT_PORT, DEFAULT_READ_BUFFER_SIZE};
use tokio::sync::Semaphore;

/// Configuration for one server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port to listen on (0 picks a free port)
    pub port: u16,

    /// Max clients served at the same time; further clients wait for a slot
    pub max_clients: usize,

    /// Size of the buffer for one socket read, and therefore the largest
    /// request a client can send
    pub read_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_clients: DEFAULT_MAX_CLIENTS,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if self.max_clients == 0 {
            return Err(Error::Config("max_clients must be at least 1".to_string()));
        }
        if self.max_clients > Semaphore::MAX_PERMITS {
            return Err(Error::Config(format!(
                "max_clients must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::Config(
                "read_buffer_size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the host to bind to
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port to listen on
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the maximum number of clients served at once
    pub fn max_clients(mut self, count: usize) -> Self {
        self.config.max_clients = count;
        self
    }

    /// Set the per-read buffer size (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
