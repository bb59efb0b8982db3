//! In-memory stores.
//!
//! Same contract as the `PostgreSQL` repositories, minus durability. Ids are
//! assigned from a counter starting at 1 and never reused, like a `SERIAL`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use nursery_core::{AdminUserId, Email, NewProduct, Product, ProductId};

use super::{AdminStore, ProductStore, RepositoryError};
use crate::models::AdminUser;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> Result<i32, RepositoryError> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::DataCorruption("id sequence exhausted".to_owned()))?;
        Ok(self.last_id)
    }
}

/// Product store kept in process memory.
#[derive(Default)]
pub struct MemoryProductStore {
    table: Mutex<Table<Product>>,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products = lock(&self.table).rows.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(lock(&self.table).rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut table = lock(&self.table);
        let id = ProductId::new(table.next_id()?);
        let product = product.clone().with_id(id);
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        lock(&self.table).rows.retain(|p| p.id != id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(lock(&self.table).rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Admin store kept in process memory.
#[derive(Default)]
pub struct MemoryAdminStore {
    table: Mutex<Table<(AdminUser, String)>>,
}

impl MemoryAdminStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|(admin, _)| &admin.email == email)
            .cloned())
    }

    async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let mut table = lock(&self.table);
        if table.rows.iter().any(|(admin, _)| &admin.email == email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let admin = AdminUser {
            id: AdminUserId::new(table.next_id()?),
            email: email.clone(),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        table.rows.push((admin.clone(), password_hash.to_owned()));
        Ok(admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nursery_core::{Category, Price};

    use super::*;

    fn fern() -> NewProduct {
        NewProduct {
            name: "Boston Fern".to_string(),
            description: "Likes humidity.".to_string(),
            price: Price::parse("18.50").unwrap(),
            image_url: "https://images.example/fern.jpg".to_string(),
            category: Category::Indoor,
        }
    }

    #[tokio::test]
    async fn test_product_ids_are_not_reused() {
        let store = MemoryProductStore::new();
        let first = store.create(&fern()).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(&fern()).await.unwrap();

        assert_eq!(first.id.as_i32(), 1);
        assert_eq!(second.id.as_i32(), 2);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_ok() {
        let store = MemoryProductStore::new();
        store.create(&fern()).await.unwrap();
        store.delete(ProductId::new(99)).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_email_conflict() {
        let store = MemoryAdminStore::new();
        let email = Email::parse("admin@nursery.test").unwrap();
        store.create(&email, "Admin", "hash").await.unwrap();

        let err = store.create(&email, "Other", "hash").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_admin_password_hash_lookup() {
        let store = MemoryAdminStore::new();
        let email = Email::parse("admin@nursery.test").unwrap();
        store.create(&email, "Admin", "stored-hash").await.unwrap();

        let (admin, hash) = store.get_password_hash(&email).await.unwrap().unwrap();
        assert_eq!(admin.name, "Admin");
        assert_eq!(hash, "stored-hash");
    }
}
