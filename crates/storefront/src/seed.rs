//! Sample catalog for fresh installs.

use rust_decimal::Decimal;

use nursery_core::{Category, NewProduct, Price};

use crate::db::{ProductStore, RepositoryError};

struct SamplePlant {
    name: &'static str,
    description: &'static str,
    cents: i64,
    image_url: &'static str,
    category: Category,
}

const SAMPLE_PLANTS: [SamplePlant; 5] = [
    SamplePlant {
        name: "Monstera Deliciosa",
        description: "A popular tropical plant with large, split leaves.",
        cents: 4500,
        image_url: "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTJ8fG1vbnN0ZXJhJTIwcGxhbnR8ZW58MHx8MHx8fDA%3D",
        category: Category::Indoor,
    },
    SamplePlant {
        name: "Snake Plant",
        description: "Hardy and low-maintenance, perfect for beginners.",
        cents: 2500,
        image_url: "https://images.unsplash.com/photo-1572688484204-5936a8af9054?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8N3x8c25ha2UlMjBwbGFudHxlbnwwfHwwfHx8MA%3D%3D",
        category: Category::Indoor,
    },
    SamplePlant {
        name: "Fiddle Leaf Fig",
        description: "A stunning statement plant with large, violin-shaped leaves.",
        cents: 6000,
        image_url: "https://images.unsplash.com/photo-1613524669567-5d55b08dc227?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8NHx8ZmlkZGxlJTIwbGVhZiUyMGZpZ3xlbnwwfHwwfHx8MA%3D%3D",
        category: Category::Indoor,
    },
    SamplePlant {
        name: "Succulent Mix",
        description: "A variety of small, colorful succulents.",
        cents: 1500,
        image_url: "https://images.unsplash.com/photo-1446071103084-c257b5f70672?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8M3x8c3VjY3VsZW50c3xlbnwwfHwwfHx8MA%3D%3D",
        category: Category::Succulents,
    },
    SamplePlant {
        name: "Lavender",
        description: "Fragrant herb suitable for sunny outdoor spots.",
        cents: 1200,
        image_url: "https://images.unsplash.com/photo-1563242207-6c39e2501a4e?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8Mnx8bGF2ZW5kZXJ8ZW58MHx8MHx8fDA%3D",
        category: Category::Outdoor,
    },
];

/// The five plants a new store starts with, in insertion order.
#[must_use]
pub fn sample_catalog() -> Vec<NewProduct> {
    SAMPLE_PLANTS
        .iter()
        .map(|plant| NewProduct {
            name: plant.name.to_owned(),
            description: plant.description.to_owned(),
            price: Price::new(Decimal::new(plant.cents, Price::SCALE)),
            image_url: plant.image_url.to_owned(),
            category: plant.category,
        })
        .collect()
}

/// Insert the sample catalog if the store has no products.
///
/// Returns how many products were inserted (zero when the catalog already
/// had data).
///
/// # Errors
///
/// Returns `RepositoryError` if the store cannot be read or written.
pub async fn seed_if_empty(store: &dyn ProductStore) -> Result<usize, RepositoryError> {
    if store.count().await? > 0 {
        tracing::debug!("catalog already populated, skipping seed");
        return Ok(0);
    }

    let catalog = sample_catalog();
    for product in &catalog {
        store.create(product).await?;
    }

    tracing::info!(count = catalog.len(), "seeded sample catalog");
    Ok(catalog.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryProductStore;

    #[tokio::test]
    async fn test_seeds_empty_store_once() {
        let store = MemoryProductStore::new();
        assert_eq!(seed_if_empty(&store).await.unwrap(), 5);
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);

        let products = store.list().await.unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "Monstera Deliciosa");
        assert_eq!(products[0].price.to_string(), "$45.00");
        assert_eq!(products[4].category, Category::Outdoor);
    }

    #[tokio::test]
    async fn test_skips_non_empty_store() {
        let store = MemoryProductStore::new();
        let mut lavender = sample_catalog().pop().unwrap();
        lavender.name = "Lavender (potted)".to_string();
        store.create(&lavender).await.unwrap();

        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[test]
    fn test_sample_prices_serialize_with_cents() {
        let json = serde_json::to_value(sample_catalog()).unwrap();
        assert_eq!(json[3]["price"], "15.00");
        assert_eq!(json[3]["category"], "Succulents");
    }
}
