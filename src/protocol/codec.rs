//! Plain-Text Request Codec
//!
//! Requests are whitespace-separated UTF-8 tokens. The first token is the
//! command name; the remaining tokens are its arguments:
//!
//! ```text
//! set greeting hello      ->  Command { Set, ["greeting", "hello"] }
//!   GET   greeting \n     ->  Command { Get, ["greeting"] }
//! ```
//!
//! Responses are the executor's reply string encoded as UTF-8 with no
//! delimiter appended.
//!
//! ## Framing
//!
//! There is no framing: the bytes returned by one socket read are decoded as
//! exactly one request. A request longer than the read buffer is cut at the
//! buffer boundary, and two requests arriving in the same read are decoded
//! as a single one. Clients are expected to wait for a response before
//! sending the next request.

use crate::protocol::command::{Command, CommandName};
use bytes::Bytes;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors that can occur while decoding a request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// The request bytes were not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Decodes the bytes of one read into a [`Command`].
pub fn decode(buf: &[u8]) -> Result<Command, CodecError> {
    let text = std::str::from_utf8(buf)?;
    let mut tokens = text.split_whitespace();

    let name = match tokens.next() {
        Some(token) => CommandName::parse(token),
        None => return Ok(Command::empty()),
    };

    Ok(Command::new(name, tokens.map(str::to_string).collect()))
}

/// Encodes a response string for the wire.
pub fn encode(response: &str) -> Bytes {
    Bytes::copy_from_slice(response.as_bytes())
}
