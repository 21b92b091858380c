//! Display data for the cart page and the navbar badge.

use bakery_core::{CurrencyCode, Price};
use serde::Serialize;

use crate::line::CartLine;
use crate::storage::SlotStorage;
use crate::store::CartStore;

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    /// Position in the cart, used by remove and quantity controls.
    pub index: usize,
    pub kind: &'static str,
    pub id: String,
    pub title: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
        }
    }

    /// Build the view of a cart's current contents.
    #[must_use]
    pub fn new<S: SlotStorage>(cart: &CartStore<S>, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView::new(index, line, currency))
                .collect(),
            subtotal: Price::new(cart.total(), currency).display(),
            item_count: cart.count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartLineView {
    fn new(index: usize, line: &CartLine, currency: CurrencyCode) -> Self {
        Self {
            index,
            kind: line.merchandise.kind(),
            id: line.merchandise.id().to_string(),
            title: line.title().to_string(),
            size: line.merchandise.selected_size().map(String::from),
            quantity: line.quantity,
            price: Price::new(line.unit_price, currency).display(),
            line_price: Price::new(line.line_total(), currency).display(),
            image: line.image.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::line::CartLineInput;
    use crate::storage::MemoryStorage;
    use bakery_core::{ComboId, ProductId};
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_view() {
        let view = CartView::empty(CurrencyCode::CAD);
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_view_of_empty_cart_matches_empty() {
        let (cart, _) = CartStore::open(MemoryStorage::new(), "cart");
        assert_eq!(
            CartView::new(&cart, CurrencyCode::EUR),
            CartView::empty(CurrencyCode::EUR)
        );
    }

    #[test]
    fn test_view_formats_lines() {
        let (mut cart, _) = CartStore::open(MemoryStorage::new(), "cart");
        cart.add(
            CartLineInput::product(ProductId::parse("cake-1").unwrap(), Decimal::new(30, 0))
                .with_size("8in")
                .with_quantity(2)
                .with_name("Vanilla cake")
                .with_image("/img/cake-1.jpg"),
        )
        .unwrap();
        cart.add(CartLineInput::combo(
            ComboId::parse("brunch-box").unwrap(),
            Decimal::new(1250, 2),
        ))
        .unwrap();

        let view = CartView::new(&cart, CurrencyCode::CAD);

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$72.50");

        let first = view.items.first().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.kind, "product");
        assert_eq!(first.title, "Vanilla cake");
        assert_eq!(first.size.as_deref(), Some("8in"));
        assert_eq!(first.price, "$30.00");
        assert_eq!(first.line_price, "$60.00");
        assert_eq!(first.image.as_deref(), Some("/img/cake-1.jpg"));

        let second = view.items.get(1).unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.kind, "combo");
        assert_eq!(second.title, "brunch-box");
        assert_eq!(second.size, None);
        assert_eq!(second.line_price, "$12.50");
    }
}
