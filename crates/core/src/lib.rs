//! Basket Core - Cart and wishlist list stores.
//!
//! A storefront keeps two lists in the visitor's local key/value storage:
//! - the cart, product lines with quantities
//! - the wishlist, products saved for later
//!
//! Each view opens with a location whose query may name a product to add.
//! The stores load the persisted list, merge the incoming product without
//! duplicating it, and write the whole list back after every change.
//!
//! # Architecture
//!
//! The stores only see the [`Storage`] trait, so they run the same over
//! [`MemoryStorage`] in tests and over a file (feature `fs`) in the CLI.
//! Rendering and navigation belong to the caller; [`Reconciled`] tells it
//! when to replace the location.
//!
//! # Modules
//!
//! - [`types`] - Prices, quantities, and list entries
//! - [`storage`] - The key/value storage seam and its backends
//! - [`navigation`] - Query-string parsing and location stripping
//! - [`cart`] - Cart store, totals, and summary
//! - [`wishlist`] - Wishlist store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod error;
mod list;
pub mod navigation;
pub mod storage;
pub mod types;
pub mod wishlist;

pub use cart::{CartStore, CartSummary, DEFAULT_FREE_DELIVERY_THRESHOLD, reconcile_cart, total_price};
pub use error::StoreError;
pub use navigation::{Reconciled, strip_query};
pub use storage::{MemoryStorage, Storage, StorageError};
#[cfg(feature = "fs")]
pub use storage::FileStorage;
pub use types::*;
pub use wishlist::{WishlistStore, reconcile_wishlist};
