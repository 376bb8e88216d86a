//! Cart and wishlist entries.
//!
//! Field names match the persisted JSON layout:
//!
//! ```json
//! [{ "name": "Shirt", "price": "500", "description": "Cotton", "image": "/shirt.png", "quantity": 1 }]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::Price;
use super::quantity::Quantity;

/// A product arriving through navigation parameters.
///
/// Only built when every field was supplied; see
/// [`ProductCandidate::from_query`](crate::navigation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCandidate {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
}

/// One distinct product in the cart plus how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product name, unique within the cart.
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Image URL or path.
    pub image: String,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// `price × quantity` for this line, or `None` if it overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price
            .amount()
            .checked_mul(Decimal::from(self.quantity.get()))
    }
}

impl From<ProductCandidate> for CartLineItem {
    fn from(candidate: ProductCandidate) -> Self {
        Self {
            name: candidate.name,
            price: candidate.price,
            description: candidate.description,
            image: candidate.image,
            quantity: Quantity::ONE,
        }
    }
}

/// A saved-for-later product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Image URL or path.
    pub image: String,
}

impl From<ProductCandidate> for WishlistItem {
    fn from(candidate: ProductCandidate) -> Self {
        Self {
            name: candidate.name,
            price: candidate.price,
            description: candidate.description,
            image: candidate.image,
        }
    }
}
