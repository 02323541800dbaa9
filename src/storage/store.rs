//! In-Memory Key-Value Store
//!
//! A plain `HashMap<String, String>` with the three operations the server
//! exposes. The store does no locking of its own: callers share it as a
//! [`SharedStore`] and hold the mutex for the duration of one operation.
//!
//! Absence of a key is reported as `None`, never as an error, and an empty
//! string is a perfectly valid stored value.

use std::collections::{HashMap, TryReserveError};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// A store shared between all connection handlers of one server.
pub type SharedStore = Arc<Mutex<Store>>;

/// Errors that can occur while writing to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The map could not grow to hold a new entry
    #[error("internal store fault: {0}")]
    InternalFault(#[from] TryReserveError),
}

/// The key-value mapping.
///
/// # Example
///
/// ```
/// use tinykv::storage::Store;
///
/// let mut store = Store::new();
/// store.set("name", "Ariz").unwrap();
/// assert_eq!(store.get("name"), Some("Ariz"));
/// assert!(store.delete("name"));
/// assert_eq!(store.get("name"), None);
/// ```
#[derive(Debug, Default)]
pub struct Store {
    entries: HashMap<String, String>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a new empty store for sharing across connection handlers.
    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Inserts or overwrites `key -> value`.
    ///
    /// Only fails if the map cannot allocate room for a new entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), StoreError> {
        let key = key.into();
        let value = value.into();

        if !self.entries.contains_key(&key) {
            self.entries.try_reserve(1)?;
        }

        debug!(key = %key, value = %value, "SET");
        self.entries.insert(key, value);
        Ok(())
    }

    /// Returns the current value for `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.entries.get(key).map(String::as_str);
        match value {
            Some(_) => debug!(key = %key, "GET: success"),
            None => debug!(key = %key, "GET: does not exist"),
        }
        value
    }

    /// Removes `key` and reports whether it existed beforehand.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            debug!(key = %key, "DELETE: success");
        } else {
            debug!(key = %key, "DELETE: does not exist");
        }
        existed
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
