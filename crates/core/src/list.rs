//! Whole-list persistence shared by the cart and the wishlist.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::storage::Storage;

/// Read the list stored under `key`.
///
/// An absent key or a value that is not a JSON array yields an empty list.
/// Entries that do not decode as `T` are dropped; the rest keep their order.
pub(crate) fn load<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Vec<T> {
    let Some(raw) = storage.get(key) else {
        debug!(key, "No stored list");
        return Vec::new();
    };

    let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, error = %e, "Stored list is unreadable, starting empty");
            return Vec::new();
        }
    };

    let items: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Dropping unreadable stored entry");
                None
            }
        })
        .collect();

    debug!(key, count = items.len(), "Loaded stored list");
    items
}

/// Replace the list stored under `key` with `items`.
pub(crate) fn save<T: Serialize>(storage: &mut impl Storage, key: &str, items: &[T]) -> Result<()> {
    let encoded = serde_json::to_string(items)?;
    storage.set(key, encoded)?;
    debug!(key, count = items.len(), "Stored list");
    Ok(())
}

/// A copy of `items` without the entry at `index`.
pub(crate) fn without<T: Clone>(items: &[T], index: usize) -> Result<Vec<T>> {
    if index >= items.len() {
        return Err(StoreError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }

    let mut updated = items.to_vec();
    updated.remove(index);
    Ok(updated)
}
