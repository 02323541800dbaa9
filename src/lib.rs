//! # tinykv - A Small Concurrent In-Memory Key-Value Server
//!
//! tinykv keeps a map of string keys to string values in memory and serves
//! `GET`, `SET` and `DELETE` to many clients at once over a plain-text TCP
//! protocol.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              tinykv                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │                  │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘                  │
//! │                            │                  │                         │
//! │                            ▼                  ▼                         │
//! │                     ┌─────────────┐    ┌─────────────────────────────┐  │
//! │                     │   Codec     │    │   Arc<Mutex<Store>>         │  │
//! │                     │ decode /    │    │   one lock, held for one    │  │
//! │                     │ encode      │    │   command                   │  │
//! │                     └─────────────┘    └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use tinykv::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> tinykv::Result<()> {
//!     let config = Config::builder().host("127.0.0.1").port(25552).build();
//!     let server = Server::bind(config).await?;
//!     server.run().await
//! }
//! ```
//!
//! ## Protocol
//!
//! A request is the bytes of one socket read: whitespace-separated tokens,
//! the first being the command name (case-insensitive).
//!
//! - `get key` → the value, or `null`
//! - `set key value` → `key:value stored successfully`
//! - `delete key` → `key deleted`, or `key does not exist`
//! - `exit` → the server closes the connection
//! - anything else → `Unrecognized Command`
//!
//! Responses are unframed UTF-8 strings.
//!
//! ## Module Overview
//!
//! - [`storage`]: The key-value map and its shared handle
//! - [`protocol`]: Request decoding and response encoding
//! - [`commands`]: Command execution and response formatting
//! - [`connection`]: Per-client connection loop
//! - [`server`]: Listener, accept loop and client limit
//! - [`client`]: Request/response client used by `tinykv-cli`

pub mod client;
pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use client::Client;
pub use commands::{CommandHandler, Reply};
pub use config::Config;
pub use connection::{handle_connection, ConnectionStats};
pub use error::{Error, Result};
pub use protocol::{decode, encode, Command, CommandName};
pub use server::Server;
pub use storage::{SharedStore, Store};

/// The default port tinykv listens on
pub const DEFAULT_PORT: u16 = 25552;

/// The default host tinykv binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default number of clients served at the same time
pub const DEFAULT_MAX_CLIENTS: usize = 1024;

/// Default size of a single socket read (and so of the largest request)
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Version of tinykv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
