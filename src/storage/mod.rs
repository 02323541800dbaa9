//! Storage Module
//!
//! The in-memory key-value mapping shared by every client connection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐
//! │ Connection task  │  │ Connection task  │  │ Connection task  │
//! └────────┬─────────┘  └────────┬─────────┘  └────────┬─────────┘
//!          │                     │                     │
//!          └─────────────┬───────┴─────────────────────┘
//!                        ▼
//!          ┌───────────────────────────────┐
//!          │     Arc<Mutex<Store>>         │
//!          │  one lock, one command at a   │
//!          │  time                         │
//!          └───────────────────────────────┘
//! ```
//!
//! The store has no eviction, expiry or persistence.

pub mod store;

pub use store::{SharedStore, Store, StoreError};
