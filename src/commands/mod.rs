//! Command Handler Module
//!
//! This module implements the command processing layer for tinykv.
//! It receives decoded commands, executes them against the shared store,
//! and returns the response string for the client.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │     Codec       │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Lock         │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Store       │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `GET key`
//! - `SET key value`
//! - `DELETE key`
//! - `EXIT` (closes the connection)

pub mod executor;
pub mod handler;

// Re-export the main command handler
pub use executor::{execute, Reply, NULL_RESPONSE, UNRECOGNIZED_RESPONSE};
pub use handler::CommandHandler;
