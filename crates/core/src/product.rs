//! Catalog products and the admin create request.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{Category, Price, ProductId};
use crate::validation::{self, FieldError, FieldOrder};

/// A plant offered for sale.
///
/// Products are created and deleted by admins but never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: Category,
}

/// A validated product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: Category,
}

impl NewProduct {
    /// Attach the id assigned by the store.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
        }
    }
}

/// Order in which create-request fields are checked and reported.
const FIELD_ORDER: FieldOrder = &[
    ("name", "name"),
    ("description", "description"),
    ("price", "price"),
    ("image_url", "imageUrl"),
    ("category", "category"),
];

/// Raw body of a create-product request.
///
/// Every field is optional at the parsing stage so a missing field becomes a
/// validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[validate(
        required(message = "Name is required"),
        custom(function = "name_present")
    )]
    pub name: Option<String>,

    #[validate(required(message = "Description is required"))]
    pub description: Option<String>,

    #[validate(
        required(message = "Price is required"),
        custom(function = "price_valid")
    )]
    pub price: Option<String>,

    #[validate(
        required(message = "Image URL is required"),
        custom(function = "image_url_present")
    )]
    pub image_url: Option<String>,

    #[validate(
        required(message = "Category is required"),
        custom(function = "category_known")
    )]
    pub category: Option<String>,
}

impl ProductDraft {
    /// Every violated field, in form order.
    #[must_use]
    pub fn violations(&self) -> Vec<FieldError> {
        self.validate()
            .err()
            .map(|errors| validation::ordered(&errors, FIELD_ORDER))
            .unwrap_or_default()
    }

    /// Validate and convert into a [`NewProduct`].
    ///
    /// # Errors
    ///
    /// Returns the first violated field (in form order).
    pub fn into_new_product(self) -> Result<NewProduct, FieldError> {
        if let Some(first) = self.violations().into_iter().next() {
            return Err(first);
        }

        let (Some(name), Some(description), Some(price), Some(image_url), Some(category)) = (
            self.name,
            self.description,
            self.price,
            self.image_url,
            self.category,
        ) else {
            return Err(FieldError::new("body", "Missing product fields"));
        };

        let price = Price::parse(&price).map_err(|e| FieldError::new("price", e.to_string()))?;
        let category = category
            .parse::<Category>()
            .map_err(|e| FieldError::new("category", e.to_string()))?;

        Ok(NewProduct {
            name: name.trim().to_owned(),
            description,
            price,
            image_url: image_url.trim().to_owned(),
            category,
        })
    }
}

impl From<NewProduct> for ProductDraft {
    fn from(product: NewProduct) -> Self {
        Self {
            name: Some(product.name),
            description: Some(product.description),
            price: Some(product.price.amount().to_string()),
            image_url: Some(product.image_url),
            category: Some(product.category.to_string()),
        }
    }
}

fn name_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation::violation("blank", "Name is required"));
    }
    Ok(())
}

fn image_url_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation::violation("blank", "Image URL is required"));
    }
    Ok(())
}

fn price_valid(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation::violation("blank", "Price is required"));
    }
    Price::parse(value)
        .map(|_| ())
        .map_err(|_| {
            validation::violation(
                "price",
                "Price must be a non-negative amount under $100,000,000 with at most 2 decimals",
            )
        })
}

fn category_known(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Category>()
        .map(|_| ())
        .map_err(|_| validation::violation("category", "Category must be Indoor, Outdoor or Succulents"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn monstera() -> ProductDraft {
        ProductDraft {
            name: Some("Monstera Deliciosa".to_string()),
            description: Some("Split leaves.".to_string()),
            price: Some("45.00".to_string()),
            image_url: Some("https://images.example/monstera.jpg".to_string()),
            category: Some("Indoor".to_string()),
        }
    }

    #[test]
    fn test_valid_draft_converts() {
        let product = monstera().into_new_product().unwrap();
        assert_eq!(product.name, "Monstera Deliciosa");
        assert_eq!(product.price, Price::parse("45").unwrap());
        assert_eq!(product.category, Category::Indoor);
    }

    #[test]
    fn test_missing_name_is_first_violation() {
        let draft = ProductDraft {
            name: None,
            price: None,
            ..monstera()
        };
        let err = draft.into_new_product().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn test_blank_name_rejected() {
        let draft = ProductDraft {
            name: Some("   ".to_string()),
            ..monstera()
        };
        assert_eq!(draft.into_new_product().unwrap_err().field, "name");
    }

    #[test]
    fn test_empty_description_allowed() {
        let draft = ProductDraft {
            description: Some(String::new()),
            ..monstera()
        };
        assert!(draft.into_new_product().is_ok());
    }

    #[test]
    fn test_violations_follow_form_order() {
        let draft = ProductDraft {
            category: Some("Cacti".to_string()),
            image_url: None,
            price: Some("abc".to_string()),
            ..monstera()
        };
        let fields: Vec<String> = draft.violations().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["price", "imageUrl", "category"]);
    }

    #[test]
    fn test_price_bounds() {
        let zero = ProductDraft {
            price: Some("0".to_string()),
            ..monstera()
        };
        assert_eq!(zero.into_new_product().unwrap().price, Price::ZERO);

        let huge = ProductDraft {
            price: Some("1000000000".to_string()),
            ..monstera()
        };
        let err = huge.into_new_product().unwrap_err();
        assert_eq!(err.field, "price");
        assert!(err.message.contains("non-negative"));
    }

    #[test]
    fn test_whole_dollar_price_serializes_with_cents() {
        let draft = ProductDraft {
            price: Some("12".to_string()),
            ..monstera()
        };
        let json = serde_json::to_value(draft.into_new_product().unwrap()).unwrap();
        assert_eq!(json["price"], "12.00");
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let product = monstera().into_new_product().unwrap().with_id(ProductId::new(3));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["imageUrl"], "https://images.example/monstera.jpg");
        assert_eq!(json["price"], "45.00");
        assert_eq!(json["category"], "Indoor");
    }

    #[test]
    fn test_draft_from_new_product_round_trips() {
        let product = monstera().into_new_product().unwrap();
        let draft = ProductDraft::from(product.clone());
        assert_eq!(draft.into_new_product().unwrap(), product);
    }
}
