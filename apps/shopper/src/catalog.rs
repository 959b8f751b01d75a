//! # Catalog
//!
//! The candidate product list the store filters. The store never fetches
//! products itself; the session loads them once from a JSON array file.

use std::path::Path;

use market_core::validation::validate_price;
use market_core::{Product, ValidationError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product '{product_id}' in catalog: {source}")]
    Invalid {
        product_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Read-only product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Reads a JSON array of products.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parses a JSON array of products.
    ///
    /// Ratings above five stars fail while parsing; negative product or
    /// delivery prices fail afterwards with [`CatalogError::Invalid`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        for product in &products {
            validate_product(product).map_err(|source| CatalogError::Invalid {
                product_id: product.id.clone(),
                source,
            })?;
        }
        Ok(Catalog::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate_product(product: &Product) -> Result<(), ValidationError> {
    validate_price(product.price)?;
    for option in &product.delivery_options {
        validate_price(option.price)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": "1",
            "title": "Premium Headphones",
            "description": "Wireless",
            "price": 29999,
            "category": "Electronics",
            "seller": { "id": "s1", "name": "Tech Store" },
            "rating": 45,
            "stock": 50,
            "createdAt": "2024-01-01T00:00:00Z"
        }
    ]"#;

    #[test]
    fn test_from_json_and_find() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("1").unwrap().title, "Premium Headphones");
        assert!(catalog.find("2").is_none());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let json = CATALOG.replace("29999", "-500");
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref product_id, .. } if product_id == "1"));
    }

    #[test]
    fn test_rating_above_five_stars_is_rejected() {
        let json = CATALOG.replace("\"rating\": 45", "\"rating\": 200");
        assert!(matches!(Catalog::from_json(&json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
