//! Wishlist.
//!
//! Same lifecycle as the cart, without quantities. Entries are unique by
//! name and price together, so the same product at two prices may appear
//! twice.

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::list;
use crate::navigation::Reconciled;
use crate::storage::{Storage, keys};
use crate::types::{ProductCandidate, WishlistItem};

/// Merge `candidate` into `items`.
///
/// Returns the list and whether the candidate was appended.
#[must_use]
pub fn reconcile_wishlist(
    mut items: Vec<WishlistItem>,
    candidate: ProductCandidate,
) -> (Vec<WishlistItem>, bool) {
    let duplicate = items
        .iter()
        .any(|item| item.name == candidate.name && item.price == candidate.price);

    if duplicate {
        debug!(name = %candidate.name, price = %candidate.price, "Product already in wishlist");
        return (items, false);
    }

    info!(name = %candidate.name, price = %candidate.price, "Adding product to wishlist");
    items.push(WishlistItem::from(candidate));
    (items, true)
}

/// Wishlist backed by a [`Storage`] under the `wishlist` key.
#[derive(Debug)]
pub struct WishlistStore<S> {
    storage: S,
}

impl<S: Storage> WishlistStore<S> {
    /// Create a wishlist over `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted wishlist, empty when absent or unreadable; unreadable entries are skipped.
    #[must_use]
    pub fn load(&self) -> Vec<WishlistItem> {
        list::load(&self.storage, keys::WISHLIST)
    }

    /// Load the wishlist and merge in an incoming product.
    ///
    /// Storage is only written when the product was appended. The parameters
    /// count as consumed whenever a candidate was supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written back.
    #[instrument(skip_all, fields(incoming = incoming.as_ref().map(|c| c.name.as_str())))]
    pub fn load_and_reconcile(
        &mut self,
        incoming: Option<ProductCandidate>,
    ) -> Result<Reconciled<WishlistItem>> {
        let items = self.load();

        let Some(candidate) = incoming else {
            return Ok(Reconciled {
                items,
                consumed_query: false,
            });
        };

        let (items, appended) = reconcile_wishlist(items, candidate);
        if appended {
            list::save(&mut self.storage, keys::WISHLIST, &items)?;
        }

        Ok(Reconciled {
            items,
            consumed_query: true,
        })
    }

    /// Remove the entry at `index` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` (without writing) if `index >= items.len()`,
    /// or an error if the list cannot be written back.
    pub fn remove(&mut self, items: &[WishlistItem], index: usize) -> Result<Vec<WishlistItem>> {
        let updated = list::without(items, index)?;
        list::save(&mut self.storage, keys::WISHLIST, &updated)?;
        info!(index, remaining = updated.len(), "Removed wishlist entry");
        Ok(updated)
    }

    /// The underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::StoreError;
    use crate::storage::MemoryStorage;
    use crate::types::Price;

    fn candidate(name: &str, price: &str) -> ProductCandidate {
        ProductCandidate {
            name: name.to_string(),
            price: Price::parse(price).unwrap(),
            description: "Wool".to_string(),
            image: "/hat.png".to_string(),
        }
    }

    fn seeded(items: &[WishlistItem]) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage
            .set(keys::WISHLIST, serde_json::to_string(items).unwrap())
            .unwrap();
        storage
    }

    #[test]
    fn test_append_to_empty_wishlist() {
        let mut store = WishlistStore::new(MemoryStorage::new());

        let result = store
            .load_and_reconcile(Some(candidate("Hat", "20")))
            .unwrap();

        assert!(result.consumed_query);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Hat");
        assert_eq!(store.load(), result.items);
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_duplicate_name_and_price_is_unchanged_and_not_written() {
        let existing = vec![WishlistItem::from(candidate("Hat", "20"))];
        let mut store = WishlistStore::new(seeded(&existing));

        let result = store
            .load_and_reconcile(Some(candidate("Hat", "20")))
            .unwrap();

        assert_eq!(result.items, existing);
        assert!(result.consumed_query);
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_price_compared_numerically() {
        let existing = vec![WishlistItem::from(candidate("Hat", "20"))];
        let (items, appended) = reconcile_wishlist(existing.clone(), candidate("Hat", "20.00"));
        assert!(!appended);
        assert_eq!(items, existing);
    }

    #[test]
    fn test_same_name_different_price_is_appended() {
        let existing = vec![WishlistItem::from(candidate("Hat", "20"))];
        let mut store = WishlistStore::new(seeded(&existing));

        let result = store
            .load_and_reconcile(Some(candidate("Hat", "25")))
            .unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].price, Price::parse("25").unwrap());
    }

    #[test]
    fn test_no_candidate_is_not_consumed() {
        let mut store = WishlistStore::new(MemoryStorage::new());
        let result = store.load_and_reconcile(None).unwrap();
        assert!(result.items.is_empty());
        assert!(!result.consumed_query);
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::WISHLIST, "[{\"name\":".to_string()).unwrap();
        assert!(WishlistStore::new(storage).load().is_empty());
    }

    #[test]
    fn test_remove() {
        let existing = vec![
            WishlistItem::from(candidate("A", "1")),
            WishlistItem::from(candidate("B", "2")),
            WishlistItem::from(candidate("C", "3")),
        ];
        let mut store = WishlistStore::new(seeded(&existing));

        let updated = store.remove(&existing, 0).unwrap();
        let names: Vec<_> = updated.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);
        assert_eq!(store.load(), updated);

        assert!(matches!(
            store.remove(&updated, 2),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
