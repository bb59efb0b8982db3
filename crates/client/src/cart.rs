//! Cart persisted to local storage.
//!
//! Every mutation is written back under [`CART_STORAGE_KEY`] before it
//! returns, so a later [`CartManager::load`] sees the same cart.

use nursery_core::{AddOutcome, Cart, Price, Product, ProductId};

use crate::error::StorageError;
use crate::storage::LocalStorage;

/// Local storage key holding the cart JSON.
pub const CART_STORAGE_KEY: &str = "nursery-cart";

/// Short user-facing message describing a cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    /// The message shown after adding `product_name` to the cart.
    #[must_use]
    pub fn for_add(outcome: AddOutcome, product_name: &str) -> Self {
        match outcome {
            AddOutcome::Added => Self {
                title: "Added to Cart",
                description: format!("{product_name} added"),
            },
            AddOutcome::Incremented { .. } => Self {
                title: "Updated Cart",
                description: format!("Added another {product_name}"),
            },
        }
    }
}

/// Owns the cart and keeps its stored copy in sync.
#[derive(Debug)]
pub struct CartManager<S> {
    storage: S,
    cart: Cart,
}

impl<S: LocalStorage> CartManager<S> {
    /// Rehydrate the cart from `storage`.
    ///
    /// Unreadable or malformed data is logged and replaced by an empty cart.
    pub fn load(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Cart>(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring malformed stored cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored cart");
                Cart::new()
            }
        };

        tracing::debug!(lines = cart.items().len(), "cart loaded");
        Self { storage, cart }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved. The in-memory cart
    /// keeps the change.
    pub fn add(&mut self, product: Product) -> Result<AddOutcome, StorageError> {
        let outcome = self.cart.add(product);
        self.persist()?;
        Ok(outcome)
    }

    /// Remove a product. Returns whether it was in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn remove(&mut self, id: ProductId) -> Result<bool, StorageError> {
        let removed = self.cart.remove(id);
        self.persist()?;
        Ok(removed)
    }

    /// Set a product's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<bool, StorageError> {
        let changed = self.cart.set_quantity(id, quantity);
        self.persist()?;
        Ok(changed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.clear();
        self.persist()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.cart)?;
        self.storage.set(CART_STORAGE_KEY, &json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nursery_core::Category;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn plant(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Plant {id}"),
            description: "Leafy".to_string(),
            price: Price::parse(price).unwrap(),
            image_url: format!("https://images.example/{id}.jpg"),
            category: Category::Outdoor,
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = MemoryStorage::new();
        let mut manager = CartManager::load(storage.clone());

        manager.add(plant(1, "12.00")).unwrap();
        manager.add(plant(1, "12.00")).unwrap();
        manager.add(plant(2, "25.00")).unwrap();

        let reloaded = CartManager::load(storage.clone());
        assert_eq!(reloaded.cart(), manager.cart());
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(reloaded.total().to_string(), "$49.00");

        manager.set_quantity(ProductId::new(1), 0).unwrap();
        let reloaded = CartManager::load(storage);
        assert!(reloaded.cart().get(ProductId::new(1)).is_none());
        assert_eq!(reloaded.item_count(), 1);
    }

    #[test]
    fn test_malformed_data_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, "{not json").unwrap();

        let manager = CartManager::load(storage.clone());
        assert!(manager.cart().is_empty());
        // Left in place until the next mutation overwrites it.
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_clear_writes_empty_list() {
        let storage = MemoryStorage::new();
        let mut manager = CartManager::load(storage.clone());
        manager.add(plant(3, "15.00")).unwrap();
        manager.clear().unwrap();

        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_stored_cart_is_normalized_on_load() {
        let storage = MemoryStorage::new();
        let line = |id: i32, quantity: u32| {
            let mut value = serde_json::to_value(plant(id, "10.00")).unwrap();
            value["quantity"] = quantity.into();
            value
        };
        let stored = serde_json::Value::Array(vec![line(1, 2), line(2, 0), line(1, 1)]);
        storage.set(CART_STORAGE_KEY, &stored.to_string()).unwrap();

        let manager = CartManager::load(storage);
        assert_eq!(manager.cart().items().len(), 1);
        assert_eq!(manager.item_count(), 3);
    }

    #[test]
    fn test_file_backed_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut manager = CartManager::load(FileStorage::new(dir.path()));
        assert_eq!(manager.add(plant(4, "60.00")).unwrap(), AddOutcome::Added);
        drop(manager);

        let manager = CartManager::load(FileStorage::new(dir.path()));
        assert_eq!(manager.total().to_string(), "$60.00");
    }

    #[test]
    fn test_add_notices() {
        assert_eq!(Notice::for_add(AddOutcome::Added, "Lavender").title, "Added to Cart");
        let notice = Notice::for_add(AddOutcome::Incremented { quantity: 2 }, "Lavender");
        assert_eq!(notice.title, "Updated Cart");
        assert_eq!(notice.description, "Added another Lavender");
    }
}
