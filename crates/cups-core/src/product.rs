//! # Product Types
//!
//! Product catalog types for the HashiCups storefront.
//! Products are loaded once from `config/products.toml`, or fall back to the
//! built-in coffee menu, and are never modified afterwards.

use serde::{Deserialize, Serialize};

/// A product on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also used as the product key on the payment form
    pub name: String,

    /// Image file name under the static directory (e.g., "coffee1.png")
    pub image: String,
}

impl Product {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }

    /// Path the browser uses to fetch the image
    pub fn image_path(&self) -> String {
        format!("/static/{}", self.image)
    }
}

/// Read-only product catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog from a fixed list
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The default HashiCups menu
    pub fn hashicups() -> Self {
        Self::new(vec![
            Product::new("Consul Spiced Latte", "coffee1.png"),
            Product::new("Nomad Macchiato", "coffee2.png"),
            Product::new("Terraform Cold Brew", "coffee3.png"),
            Product::new("Vault Vanilla Roast", "coffee4.png"),
        ])
    }

    /// Find a product by name
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu() {
        let catalog = ProductCatalog::hashicups();
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get("Vault Vanilla Roast").map(|p| p.image.as_str()),
            Some("coffee4.png")
        );
        assert!(catalog.get("Boundary Bold").is_none());
    }

    #[test]
    fn test_from_toml() {
        let catalog = ProductCatalog::from_toml(
            r#"
            [[products]]
            name = "Packer Pour Over"
            image = "coffee5.png"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].image_path(), "/static/coffee5.png");
    }

    #[test]
    fn test_from_toml_rejects_missing_image() {
        let result = ProductCatalog::from_toml(
            r#"
            [[products]]
            name = "Packer Pour Over"
            "#,
        );
        assert!(result.is_err());
    }
}
