//! Integration tests for the cart and wishlist stores.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p basket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart opened through locations, edited, and reloaded from disk
//! - `wishlist_flow` - Wishlist reconciliation and removal over file storage
//! - `storage_recovery` - Corrupt and foreign stored data

use std::path::PathBuf;

use basket_core::{CartStore, FileStorage, WishlistStore};
use tempfile::TempDir;

/// A scratch directory holding one local storage file.
///
/// Each store opened from the context reads the file afresh, the way a page
/// load would.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("local_storage.json")
    }

    /// A fresh handle on the storage file.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_path())
    }

    /// Open the cart, as on a page load.
    #[must_use]
    pub fn cart(&self) -> CartStore<FileStorage> {
        CartStore::new(self.storage())
    }

    /// Open the wishlist, as on a page load.
    #[must_use]
    pub fn wishlist(&self) -> WishlistStore<FileStorage> {
        WishlistStore::new(self.storage())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a location whose query names a product.
#[must_use]
pub fn product_location(path: &str, name: &str, price: &str) -> String {
    format!("{path}?name={name}&price={price}&description=Fine+{name}&image=%2F{name}.png")
}
