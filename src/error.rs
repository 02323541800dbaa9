//! Error types for tinykv.

use crate::protocol::CodecError;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the server and client APIs.
///
/// Per-connection failures are [`ConnectionError`](crate::connection::ConnectionError)s
/// and never leave the connection's task.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O errors (binding, accepting, connecting)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Response bytes could not be decoded
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
