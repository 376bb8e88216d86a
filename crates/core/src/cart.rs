//! Shopping cart.
//!
//! The cart is an ordered list of [`CartLineItem`]s keyed by product name.
//! It is loaded once when the view opens, mutated in memory, and written back
//! in full after every change.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::list;
use crate::navigation::Reconciled;
use crate::storage::{Storage, keys};
use crate::types::{CartLineItem, ProductCandidate, Quantity};

/// Orders at or above this subtotal ship for free.
pub const DEFAULT_FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(14_000, 0, 0, false, 0);

/// Merge `candidate` into `items`.
///
/// Appends the candidate with a quantity of one unless an entry with the same
/// name is already present, in which case `items` is returned untouched.
/// A candidate whose price would push the cart total past the decimal range
/// is dropped as well. Applying it twice gives the same list as applying it
/// once.
#[must_use]
pub fn reconcile_cart(mut items: Vec<CartLineItem>, candidate: ProductCandidate) -> Vec<CartLineItem> {
    if items.iter().any(|item| item.name == candidate.name) {
        debug!(name = %candidate.name, "Product already in cart");
        return items;
    }

    let total = total_price(&items).ok();
    if total.and_then(|t| t.checked_add(candidate.price.amount())).is_none() {
        warn!(name = %candidate.name, price = %candidate.price, "Ignoring product, cart total would overflow");
        return items;
    }

    info!(name = %candidate.name, price = %candidate.price, "Adding product to cart");
    items.push(CartLineItem::from(candidate));
    items
}

/// Sum of `price × quantity` over every line.
///
/// # Errors
///
/// Returns `AmountOverflow` if a line total or the sum exceeds the decimal
/// range.
pub fn total_price(items: &[CartLineItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.line_total()
            .and_then(|line| total.checked_add(line))
            .ok_or(StoreError::AmountOverflow)
    })
}

/// Cart backed by a [`Storage`] under the `cart` key.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: Storage> CartStore<S> {
    /// Create a cart over `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted cart, empty when absent or unreadable; unreadable lines are skipped.
    #[must_use]
    pub fn load(&self) -> Vec<CartLineItem> {
        list::load(&self.storage, keys::CART)
    }

    /// Load the cart and merge in an incoming product.
    ///
    /// When a candidate is supplied the resulting list is persisted even if
    /// the product was already present, and the result is marked as having
    /// consumed the navigation parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written back.
    #[instrument(skip_all, fields(incoming = incoming.as_ref().map(|c| c.name.as_str())))]
    pub fn load_and_reconcile(
        &mut self,
        incoming: Option<ProductCandidate>,
    ) -> Result<Reconciled<CartLineItem>> {
        let items = self.load();

        let Some(candidate) = incoming else {
            return Ok(Reconciled {
                items,
                consumed_query: false,
            });
        };

        let items = reconcile_cart(items, candidate);
        list::save(&mut self.storage, keys::CART, &items)?;

        Ok(Reconciled {
            items,
            consumed_query: true,
        })
    }

    /// Remove the line at `index` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` (without writing) if `index >= items.len()`,
    /// or an error if the list cannot be written back.
    pub fn remove(&mut self, items: &[CartLineItem], index: usize) -> Result<Vec<CartLineItem>> {
        let updated = list::without(items, index)?;
        list::save(&mut self.storage, keys::CART, &updated)?;
        info!(index, remaining = updated.len(), "Removed cart line");
        Ok(updated)
    }

    /// Set the quantity of the line at `index` and persist the result.
    ///
    /// A quantity below one leaves the list unchanged and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= items.len()`, `Quantity` if the
    /// value does not fit, `AmountOverflow` (without writing) if the new
    /// quantity takes the cart total past the decimal range, or an error if
    /// the list cannot be written back.
    pub fn set_quantity(
        &mut self,
        items: &[CartLineItem],
        index: usize,
        quantity: i64,
    ) -> Result<Vec<CartLineItem>> {
        if quantity < i64::from(Quantity::MIN) {
            debug!(index, quantity, "Ignoring quantity below minimum");
            return Ok(items.to_vec());
        }

        let quantity = Quantity::new(quantity)?;
        let mut updated = items.to_vec();
        let len = updated.len();
        let line = updated
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        line.quantity = quantity;
        total_price(&updated)?;

        list::save(&mut self.storage, keys::CART, &updated)?;
        info!(index, %quantity, "Updated cart quantity");
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

/// Totals shown alongside the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of every line's `price × quantity`.
    pub subtotal: Decimal,
    /// Total number of units across lines.
    pub item_count: u64,
    /// Amount due. Delivery is free, so this equals the subtotal.
    pub total: Decimal,
    /// Whether the subtotal reaches the free delivery threshold.
    pub qualifies_for_free_delivery: bool,
}

impl CartSummary {
    /// Summarize `items` against a free delivery threshold.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the subtotal exceeds the decimal range.
    pub fn new(items: &[CartLineItem], free_delivery_threshold: Decimal) -> Result<Self> {
        let subtotal = total_price(items)?;
        Ok(Self {
            subtotal,
            item_count: items.iter().map(|item| u64::from(item.quantity.get())).sum(),
            total: subtotal,
            qualifies_for_free_delivery: subtotal >= free_delivery_threshold,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::Price;

    fn candidate(name: &str, price: &str) -> ProductCandidate {
        ProductCandidate {
            name: name.to_string(),
            price: Price::parse(price).unwrap(),
            description: format!("{name} description"),
            image: format!("/{name}.png"),
        }
    }

    fn line(name: &str, price: &str, quantity: i64) -> CartLineItem {
        CartLineItem {
            quantity: Quantity::new(quantity).unwrap(),
            ..CartLineItem::from(candidate(name, price))
        }
    }

    fn seeded(items: &[CartLineItem]) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage
            .set(keys::CART, serde_json::to_string(items).unwrap())
            .unwrap();
        storage
    }

    #[test]
    fn test_append_to_empty_cart() {
        let mut store = CartStore::new(MemoryStorage::new());
        let shirt = ProductCandidate {
            name: "Shirt".to_string(),
            price: Price::parse("500").unwrap(),
            description: "Cotton".to_string(),
            image: "/shirt.png".to_string(),
        };

        let result = store.load_and_reconcile(Some(shirt)).unwrap();

        assert!(result.consumed_query);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Shirt");
        assert_eq!(result.items[0].price.to_string(), "500");
        assert_eq!(result.items[0].description, "Cotton");
        assert_eq!(result.items[0].image, "/shirt.png");
        assert_eq!(result.items[0].quantity, Quantity::ONE);
        assert_eq!(store.load(), result.items);
    }

    #[test]
    fn test_duplicate_name_leaves_cart_unchanged_but_still_writes() {
        let existing = vec![line("Shirt", "500", 3), line("Hat", "120", 1)];
        let mut store = CartStore::new(seeded(&existing));

        let result = store
            .load_and_reconcile(Some(candidate("Shirt", "999")))
            .unwrap();

        assert_eq!(result.items, existing);
        assert!(result.consumed_query);
        assert_eq!(store.storage().writes(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let once = reconcile_cart(Vec::new(), candidate("Shirt", "500"));
        let twice = reconcile_cart(once.clone(), candidate("Shirt", "500"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_candidate_loads_without_writing() {
        let existing = vec![line("Shirt", "500", 2)];
        let mut store = CartStore::new(seeded(&existing));

        let result = store.load_and_reconcile(None).unwrap();

        assert_eq!(result.items, existing);
        assert!(!result.consumed_query);
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::CART, "not json".to_string()).unwrap();
        let mut store = CartStore::new(storage);

        let result = store.load_and_reconcile(None).unwrap();
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_stored_zero_quantity_is_unreadable() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                r#"[{"name":"a","price":"1","description":"d","image":"i","quantity":0}]"#
                    .to_string(),
            )
            .unwrap();
        assert!(CartStore::new(storage).load().is_empty());
    }

    #[test]
    fn test_one_unreadable_line_keeps_the_rest() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                concat!(
                    r#"[{"name":"Keep","price":"100","description":"d","image":"i","quantity":3},"#,
                    r#"{"name":"Odd","price":"N/A","description":"d","image":"i","quantity":1}]"#
                )
                .to_string(),
            )
            .unwrap();
        let mut store = CartStore::new(storage);

        let result = store
            .load_and_reconcile(Some(candidate("New", "20")))
            .unwrap();

        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Keep", "New"]);
        assert_eq!(result.items[0].quantity.get(), 3);
        assert_eq!(store.load(), result.items);
    }

    #[test]
    fn test_set_quantity_persists() {
        let existing = vec![line("Shirt", "500", 1)];
        let mut store = CartStore::new(seeded(&existing));

        let updated = store.set_quantity(&existing, 0, 4).unwrap();

        assert_eq!(updated[0].quantity.get(), 4);
        assert_eq!(store.load(), updated);
    }

    #[test]
    fn test_set_quantity_below_one_is_noop() {
        let existing = vec![line("Shirt", "500", 2)];
        let mut store = CartStore::new(seeded(&existing));

        assert_eq!(store.set_quantity(&existing, 0, 0).unwrap(), existing);
        assert_eq!(store.set_quantity(&existing, 0, -3).unwrap(), existing);
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_set_quantity_out_of_range() {
        let existing = vec![line("Shirt", "500", 1)];
        let mut store = CartStore::new(seeded(&existing));

        assert!(matches!(
            store.set_quantity(&existing, 3, 2),
            Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_set_quantity_too_large() {
        let existing = vec![line("Shirt", "500", 1)];
        let mut store = CartStore::new(seeded(&existing));

        assert!(matches!(
            store.set_quantity(&existing, 0, i64::MAX),
            Err(StoreError::Quantity(_))
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let existing = vec![line("A", "1", 1), line("B", "2", 1), line("C", "3", 1)];
        let mut store = CartStore::new(seeded(&existing));

        let updated = store.remove(&existing, 1).unwrap();

        let names: Vec<_> = updated.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(store.load(), updated);
    }

    #[test]
    fn test_remove_out_of_range_writes_nothing() {
        let existing = vec![line("A", "1", 1)];
        let mut store = CartStore::new(seeded(&existing));

        assert!(matches!(
            store.remove(&existing, 1),
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(store.load(), existing);
        assert_eq!(store.storage().writes(), 1);
    }

    #[test]
    fn test_total_price() {
        let items = vec![line("A", "100", 2), line("B", "250", 1)];
        assert_eq!(total_price(&items).unwrap(), Decimal::new(450, 0));
        assert_eq!(total_price(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_price_keeps_fractions() {
        let items = vec![line("A", "19.99", 3)];
        assert_eq!(total_price(&items).unwrap(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_total_price_overflow_is_an_error() {
        let items = vec![line("Gold", "79228162514264337593543950335", 2)];
        assert!(matches!(total_price(&items), Err(StoreError::AmountOverflow)));

        let items = vec![
            line("Gold", "79228162514264337593543950335", 1),
            line("Silver", "1", 1),
        ];
        assert!(matches!(total_price(&items), Err(StoreError::AmountOverflow)));
    }

    #[test]
    fn test_set_quantity_overflowing_total_writes_nothing() {
        let mut store = CartStore::new(MemoryStorage::new());
        let incoming = ProductCandidate::from_query(
            "name=Gold&price=79228162514264337593543950335&description=Bar&image=gold.png",
        );
        let items = store.load_and_reconcile(incoming).unwrap().items;
        assert_eq!(items.len(), 1);

        assert!(matches!(
            store.set_quantity(&items, 0, 2),
            Err(StoreError::AmountOverflow)
        ));
        assert_eq!(store.load(), items);
        assert_eq!(store.storage().writes(), 1);
        assert_eq!(total_price(&store.load()).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_reconcile_skips_candidate_that_overflows_total() {
        let items = vec![line("Gold", "79228162514264337593543950335", 1)];
        let reconciled = reconcile_cart(items.clone(), candidate("Silver", "1"));
        assert_eq!(reconciled, items);
    }

    #[test]
    fn test_summary_free_delivery_threshold() {
        let below = vec![line("A", "13999", 1)];
        let summary = CartSummary::new(&below, DEFAULT_FREE_DELIVERY_THRESHOLD).unwrap();
        assert!(!summary.qualifies_for_free_delivery);

        let at = vec![line("A", "7000", 2), line("B", "0", 5)];
        let summary = CartSummary::new(&at, DEFAULT_FREE_DELIVERY_THRESHOLD).unwrap();
        assert!(summary.qualifies_for_free_delivery);
        assert_eq!(summary.item_count, 7);
        assert_eq!(summary.subtotal, Decimal::new(14_000, 0));
        assert_eq!(summary.total, summary.subtotal);
    }
}
