//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Open the cart page, adding the product named in the query
//! basket cart open "/cart?name=Shirt&price=500&description=Cotton&image=/shirt.png"
//!
//! # Change the quantity of the first line
//! basket cart quantity 0 3
//!
//! # Remove the second line
//! basket cart remove 1
//! ```

use basket_core::{CartLineItem, CartStore, ProductCandidate, StoreError, format_amount, total_price};
use tracing::instrument;

use super::{ProductArgs, open_storage, with_location};
use crate::config::CliConfig;
use crate::view::CartView;

/// Location used when `open` is given none.
pub const CART_LOCATION: &str = "/cart";

fn render(config: &CliConfig, items: &[CartLineItem]) -> Result<String, StoreError> {
    Ok(CartView::new(items, config.currency, config.free_delivery_threshold)?.to_string())
}

/// Open the cart at `location`, reconciling any product in its query.
///
/// # Errors
///
/// Returns an error if the cart cannot be written back.
#[instrument(skip(config))]
pub fn open(config: &CliConfig, location: &str) -> Result<String, StoreError> {
    let mut store = CartStore::new(open_storage(config));
    let incoming = ProductCandidate::from_location(location);
    let reconciled = store.load_and_reconcile(incoming)?;

    Ok(with_location(
        render(config, &reconciled.items)?,
        reconciled.replace_location(location),
    ))
}

/// Add a product given as arguments.
///
/// # Errors
///
/// Returns an error if the cart cannot be written back.
pub fn add(config: &CliConfig, product: ProductArgs) -> Result<String, StoreError> {
    let mut store = CartStore::new(open_storage(config));
    let reconciled = store.load_and_reconcile(Some(product.into()))?;
    render(config, &reconciled.items)
}

/// Show the cart without changing it.
///
/// # Errors
///
/// Returns an error if a stored line's total exceeds the decimal range.
pub fn show(config: &CliConfig) -> Result<String, StoreError> {
    let store = CartStore::new(open_storage(config));
    render(config, &store.load())
}

/// Set the quantity of the line at `index`.
///
/// # Errors
///
/// Returns an error if `index` is out of range, the quantity is too large,
/// or the cart cannot be written back.
#[instrument(skip(config))]
pub fn set_quantity(config: &CliConfig, index: usize, quantity: i64) -> Result<String, StoreError> {
    let mut store = CartStore::new(open_storage(config));
    let items = store.load();
    let updated = store.set_quantity(&items, index, quantity)?;
    render(config, &updated)
}

/// Remove the line at `index`.
///
/// # Errors
///
/// Returns an error if `index` is out of range or the cart cannot be written back.
#[instrument(skip(config))]
pub fn remove(config: &CliConfig, index: usize) -> Result<String, StoreError> {
    let mut store = CartStore::new(open_storage(config));
    let items = store.load();
    let updated = store.remove(&items, index)?;
    render(config, &updated)
}

/// The cart total.
///
/// # Errors
///
/// Returns an error if the total exceeds the decimal range.
pub fn total(config: &CliConfig) -> Result<String, StoreError> {
    let store = CartStore::new(open_storage(config));
    Ok(format_amount(total_price(&store.load())?, config.currency))
}
