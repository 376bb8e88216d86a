//! Display models for the cart and wishlist.
//!
//! Stores hand back plain items; these types turn them into the strings the
//! terminal shows, with prices formatted in the configured currency.

use core::fmt;

use basket_core::{CartLineItem, CartSummary, CurrencyCode, StoreError, WishlistItem, format_amount};
use rust_decimal::Decimal;

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub position: usize,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u64,
    pub delivery_banner: String,
}

impl CartView {
    /// Build the view for `items`.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if a line or the subtotal exceeds the decimal range.
    pub fn new(
        items: &[CartLineItem],
        currency: CurrencyCode,
        free_delivery_threshold: Decimal,
    ) -> Result<Self, StoreError> {
        let summary = CartSummary::new(items, free_delivery_threshold)?;
        let threshold = format_amount(free_delivery_threshold, currency);

        let delivery_banner = if summary.qualifies_for_free_delivery {
            format!("Free Delivery: your order qualifies (orders of {threshold} or more).")
        } else {
            format!("Free Delivery: applies to orders of {threshold} or more.")
        };

        let items = items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let line_total = item.line_total().ok_or(StoreError::AmountOverflow)?;
                Ok(CartItemView {
                    position,
                    name: item.name.clone(),
                    description: item.description.clone(),
                    image: item.image.clone(),
                    quantity: item.quantity.get(),
                    line_price: format_amount(line_total, currency),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Self {
            items,
            subtotal: format_amount(summary.subtotal, currency),
            total: format_amount(summary.total, currency),
            item_count: summary.item_count,
            delivery_banner,
        })
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.delivery_banner)?;
        writeln!(f)?;
        writeln!(f, "Your Shopping Cart")?;

        if self.items.is_empty() {
            writeln!(f, "Your cart is empty.")?;
        }

        for item in &self.items {
            writeln!(
                f,
                "[{}] {} x{}  {}",
                item.position, item.name, item.quantity, item.line_price
            )?;
            writeln!(f, "    {}", item.description)?;
            writeln!(f, "    {}", item.image)?;
        }

        writeln!(f)?;
        writeln!(f, "Summary ({} items)", self.item_count)?;
        writeln!(f, "  Subtotal  {}", self.subtotal)?;
        writeln!(f, "  Delivery  Free")?;
        write!(f, "  Total     {}", self.total)
    }
}

/// Wishlist entry display data.
#[derive(Debug, Clone)]
pub struct WishlistItemView {
    pub position: usize,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
}

/// Wishlist display data.
#[derive(Debug, Clone)]
pub struct WishlistView {
    pub items: Vec<WishlistItemView>,
}

impl WishlistView {
    /// Build the view for `items`.
    #[must_use]
    pub fn new(items: &[WishlistItem], currency: CurrencyCode) -> Self {
        Self {
            items: items
                .iter()
                .enumerate()
                .map(|(position, item)| WishlistItemView {
                    position,
                    name: item.name.clone(),
                    description: item.description.clone(),
                    image: item.image.clone(),
                    price: item.price.display(currency),
                })
                .collect(),
        }
    }
}

impl fmt::Display for WishlistView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Wishlist")?;

        if self.items.is_empty() {
            return write!(f, "Your wishlist is empty.");
        }

        for item in &self.items {
            writeln!(f, "[{}] {}  {}", item.position, item.name, item.price)?;
            writeln!(f, "    {}", item.description)?;
            writeln!(f, "    {}", item.image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use basket_core::{Price, ProductCandidate, Quantity};

    use super::*;

    fn candidate(name: &str, price: &str) -> ProductCandidate {
        ProductCandidate {
            name: name.to_string(),
            price: Price::parse(price).unwrap(),
            description: "Cotton".to_string(),
            image: "/shirt.png".to_string(),
        }
    }

    #[test]
    fn test_cart_view_line_prices_and_totals() {
        let mut shirt = CartLineItem::from(candidate("Shirt", "500"));
        shirt.quantity = Quantity::new(2).unwrap();
        let hat = CartLineItem::from(candidate("Hat", "250"));

        let view = CartView::new(&[shirt, hat], CurrencyCode::INR, Decimal::new(14_000, 0)).unwrap();

        assert_eq!(view.items[0].line_price, "₹ 1000");
        assert_eq!(view.items[1].position, 1);
        assert_eq!(view.subtotal, "₹ 1250");
        assert_eq!(view.total, "₹ 1250");
        assert_eq!(view.item_count, 3);
        assert!(view.delivery_banner.contains("applies to orders of ₹ 14000"));
    }

    #[test]
    fn test_cart_view_qualifying_banner() {
        let item = CartLineItem::from(candidate("Sofa", "20000"));
        let view = CartView::new(&[item], CurrencyCode::INR, Decimal::new(14_000, 0)).unwrap();
        assert!(view.delivery_banner.contains("qualifies"));
    }

    #[test]
    fn test_empty_cart_renders_message() {
        let view = CartView::new(&[], CurrencyCode::INR, Decimal::new(14_000, 0)).unwrap();
        let rendered = view.to_string();
        assert!(rendered.contains("Your cart is empty."));
        assert!(rendered.contains("Total     ₹ 0"));
    }

    #[test]
    fn test_cart_view_overflowing_line_is_an_error() {
        let mut gold = CartLineItem::from(candidate("Gold", "79228162514264337593543950335"));
        gold.quantity = Quantity::new(2).unwrap();

        assert!(matches!(
            CartView::new(&[gold], CurrencyCode::INR, Decimal::new(14_000, 0)),
            Err(StoreError::AmountOverflow)
        ));
    }

    #[test]
    fn test_wishlist_view() {
        let view = WishlistView::new(
            &[WishlistItem::from(candidate("Hat", "20"))],
            CurrencyCode::USD,
        );
        assert_eq!(view.items[0].price, "$ 20");
        assert!(view.to_string().contains("[0] Hat  $ 20"));

        let empty = WishlistView::new(&[], CurrencyCode::USD);
        assert!(empty.to_string().ends_with("Your wishlist is empty."));
    }
}
