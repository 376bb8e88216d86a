//! Core types for cart and wishlist lists.
//!
//! This module provides type-safe wrappers for the list entries and the
//! values they carry.

pub mod item;
pub mod price;
pub mod quantity;

pub use item::{CartLineItem, ProductCandidate, WishlistItem};
pub use price::{CurrencyCode, Price, PriceError, format_amount};
pub use quantity::{Quantity, QuantityError};
