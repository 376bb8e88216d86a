//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! # Open the wishlist page, adding the product named in the query
//! basket wishlist open "/wishlist?name=Hat&price=20&description=Wool&image=/hat.png"
//!
//! # Remove the first entry
//! basket wishlist remove 0
//! ```

use basket_core::{ProductCandidate, StoreError, WishlistItem, WishlistStore};
use tracing::instrument;

use super::{ProductArgs, open_storage, with_location};
use crate::config::CliConfig;
use crate::view::WishlistView;

/// Location used when `open` is given none.
pub const WISHLIST_LOCATION: &str = "/wishlist";

fn render(config: &CliConfig, items: &[WishlistItem]) -> String {
    WishlistView::new(items, config.currency).to_string()
}

/// Open the wishlist at `location`, reconciling any product in its query.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be written back.
#[instrument(skip(config))]
pub fn open(config: &CliConfig, location: &str) -> Result<String, StoreError> {
    let mut store = WishlistStore::new(open_storage(config));
    let incoming = ProductCandidate::from_location(location);
    let reconciled = store.load_and_reconcile(incoming)?;

    Ok(with_location(
        render(config, &reconciled.items),
        reconciled.replace_location(location),
    ))
}

/// Add a product given as arguments.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be written back.
pub fn add(config: &CliConfig, product: ProductArgs) -> Result<String, StoreError> {
    let mut store = WishlistStore::new(open_storage(config));
    let reconciled = store.load_and_reconcile(Some(product.into()))?;
    Ok(render(config, &reconciled.items))
}

/// Show the wishlist without changing it.
#[must_use]
pub fn show(config: &CliConfig) -> String {
    let store = WishlistStore::new(open_storage(config));
    render(config, &store.load())
}

/// Remove the entry at `index`.
///
/// # Errors
///
/// Returns an error if `index` is out of range or the wishlist cannot be written back.
#[instrument(skip(config))]
pub fn remove(config: &CliConfig, index: usize) -> Result<String, StoreError> {
    let mut store = WishlistStore::new(open_storage(config));
    let items = store.load();
    let updated = store.remove(&items, index)?;
    Ok(render(config, &updated))
}
