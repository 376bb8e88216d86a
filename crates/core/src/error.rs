//! Errors surfaced by the list stores.
//!
//! Recoverable conditions (unreadable stored data, incomplete navigation
//! parameters, quantities below one) never reach this type; they are handled
//! where they occur.

use thiserror::Error;

use crate::storage::StorageError;
use crate::types::QuantityError;

/// Error type for cart and wishlist operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The index does not name an entry of the list.
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the list.
        len: usize,
    },

    /// A line total or cart total exceeds the decimal range.
    #[error("amount exceeds the representable range")]
    AmountOverflow,

    /// The requested quantity cannot be represented.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    /// The list could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage backend failed to persist the list.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
