//! Shopping cart contents.
//!
//! The cart is pure data: persistence and any user feedback live with the
//! caller. Each product appears at most once; adding it again bumps the
//! quantity instead.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// A product in the cart together with how many units were added.
///
/// Serialized flat (product fields plus `quantity`) so a persisted cart reads
/// the same as the catalog JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was not in the cart and now has quantity 1.
    Added,
    /// The product was already present; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// Ordered list of cart lines, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines.
    ///
    /// Lines with zero quantity are dropped and repeated products are merged
    /// into the first occurrence.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.position(item.product.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(CartItem {
            product,
            quantity: 1,
        });
        AddOutcome::Added
    }

    /// Remove a product entirely. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != id);
        self.items.len() != before
    }

    /// Overwrite the quantity of a product already in the cart.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| i.product.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of every line total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, i| count.saturating_add(i.quantity))
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == id)
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn plant(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Plant {id}"),
            description: String::new(),
            price: Price::parse(price).unwrap(),
            image_url: format!("https://images.example/{id}.jpg"),
            category: Category::Indoor,
        }
    }

    #[test]
    fn test_add_new_then_increment() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(plant(1, "45.00")), AddOutcome::Added);
        assert_eq!(
            cart.add(plant(1, "45.00")),
            AddOutcome::Incremented { quantity: 2 }
        );
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = Cart::new();
        cart.add(plant(1, "45.00"));
        cart.add(plant(1, "45.00"));
        cart.add(plant(5, "12.00"));
        assert_eq!(cart.total(), Price::parse("102.00").unwrap());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(plant(1, "45.00"));
        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(plant(1, "45.00"));
        cart.set_quantity(ProductId::new(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(plant(1, "45.00"));
        assert!(!cart.set_quantity(ProductId::new(9), 4));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(plant(2, "25.00"));
        cart.set_quantity(ProductId::new(2), 4);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 4);
        assert_eq!(cart.total(), Price::parse("100").unwrap());
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut cart = Cart::new();
        cart.add(plant(1, "1.00"));
        cart.add(plant(2, "2.00"));
        cart.add(plant(3, "3.00"));
        assert!(cart.remove(ProductId::new(2)));
        assert!(!cart.remove(ProductId::new(2)));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_empty_cart_totals() {
        let mut cart = Cart::new();
        cart.add(plant(1, "45.00"));
        cart.clear();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serialized_lines_are_flat() {
        let mut cart = Cart::new();
        cart.add(plant(4, "15.00"));
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json[0]["id"], 4);
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["imageUrl"], "https://images.example/4.jpg");
    }

    #[test]
    fn test_deserialize_normalizes_lines() {
        let json = serde_json::json!([
            {"id": 1, "name": "A", "description": "", "price": "1.00", "imageUrl": "a", "category": "Indoor", "quantity": 2},
            {"id": 2, "name": "B", "description": "", "price": "2.00", "imageUrl": "b", "category": "Outdoor", "quantity": 0},
            {"id": 1, "name": "A", "description": "", "price": "1.00", "imageUrl": "a", "category": "Indoor", "quantity": 3}
        ]);
        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 5);
    }
}
