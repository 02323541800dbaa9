//! Command Handler
//!
//! Glues the codec, the shared store lock and the executor together. Every
//! connection owns a clone of the handler; all clones point at the same
//! [`SharedStore`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │  decode()   │───>│ lock store  │───>│  execute()  │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                         unlock store        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::commands::executor::{execute, Reply};
use crate::protocol::{decode, CodecError, Command};
use crate::storage::{SharedStore, Store};
use std::sync::{MutexGuard, PoisonError};
use tracing::{trace, warn};

/// Executes requests against a shared store.
#[derive(Clone)]
pub struct CommandHandler {
    /// The shared store
    store: SharedStore,
}

impl CommandHandler {
    /// Creates a new command handler over the given store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Decodes one request and executes it.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the request bytes cannot be decoded.
    pub fn handle(&self, request: &[u8]) -> Result<Reply, CodecError> {
        let command = decode(request)?;
        trace!(command = %command.name, args = ?command.args, "Decoded command");
        Ok(self.execute(&command))
    }

    /// Executes an already decoded command while holding the store lock.
    ///
    /// The lock is released before this returns, so the caller never holds
    /// it while writing to the socket.
    pub fn execute(&self, command: &Command) -> Reply {
        if command.is_exit() {
            return Reply::Close;
        }

        let mut store = self.lock();
        execute(&mut store, command)
    }

    /// Returns the store this handler executes against.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Every store operation is a single map call, so a panic elsewhere
        // cannot leave the map half-updated.
        self.store.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
