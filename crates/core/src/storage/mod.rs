//! Local key/value storage.
//!
//! The stores never touch a concrete backend; they read and write whole
//! string values through [`Storage`]. [`MemoryStorage`] backs tests and
//! embedders, `FileStorage` (feature `fs`) keeps the values in one JSON
//! file on disk.

#[cfg(feature = "fs")]
mod file;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(feature = "fs")]
pub use file::FileStorage;

/// Storage keys for the persisted lists.
pub mod keys {
    /// Key for the cart line items.
    pub const CART: &str = "cart";

    /// Key for the wishlist items.
    pub const WISHLIST: &str = "wishlist";
}

/// Errors raised by a storage backend while writing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be encoded.
    #[error("storage encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A synchronous, string-valued key/value store.
///
/// Reads never fail: a backend that cannot produce a value reports it as
/// absent.
pub trait Storage {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to persist the value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls made so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}
