//! Static product catalog.
//!
//! A [`Catalog`] is an ordered list of categories plus the products filed
//! under them. It is validated once on construction and never mutated
//! afterwards; callers share it read-only.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Category, CurrencyCode, Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product has an empty id.
    #[error("product at position {0} has an empty id")]
    EmptyId(usize),
    /// Two products share the same id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// A category name appears twice in the category list.
    #[error("duplicate category: {0}")]
    DuplicateCategory(Category),
    /// A product references a category that is not in the category list.
    #[error("product {id} references unknown category {category}")]
    UnknownCategory {
        /// The offending product.
        id: ProductId,
        /// The category it names.
        category: Category,
    },
    /// A product's unit price is zero or negative.
    #[error("product {id} has non-positive unit price {price}")]
    NonPositivePrice {
        /// The offending product.
        id: ProductId,
        /// The price it declares.
        price: Decimal,
    },
    /// The catalog document could not be parsed.
    #[error("invalid catalog document: {0}")]
    Parse(String),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price of one unit in the catalog currency.
    pub unit_price: Decimal,
    /// One of the catalog's categories.
    pub category: Category,
    /// Opaque reference to a display image (URL).
    pub image_ref: String,
}

/// Serialized form of a catalog, as read from a JSON or YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Currency of every unit price.
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Category names in display order.
    pub categories: Vec<Category>,
    /// Product list.
    pub products: Vec<Product>,
}

/// An immutable, validated product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    currency: CurrencyCode,
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a product id is empty or duplicated, a
    /// category is listed twice, a product names an unknown category, or a
    /// unit price is not positive.
    pub fn new(
        currency: CurrencyCode,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let mut known = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !known.insert(category.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.clone()));
            }
        }

        let mut ids = HashSet::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !known.contains(product.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    id: product.id.clone(),
                    category: product.category.clone(),
                });
            }
            if product.unit_price <= Decimal::ZERO {
                return Err(CatalogError::NonPositivePrice {
                    id: product.id.clone(),
                    price: product.unit_price,
                });
            }
        }

        Ok(Self {
            currency,
            categories,
            products,
        })
    }

    /// Parse and validate a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, or any validation
    /// error from [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::try_from(document)
    }

    /// The built-in houseplant catalog.
    #[must_use]
    pub fn builtin() -> Self {
        const IMAGE_QUERY: &str = "?q=80&w=1200&auto=format&fit=crop";

        let product = |id: &str, name: &str, price: i64, category: &str, photo: &str| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            unit_price: Decimal::from(price),
            category: Category::new(category),
            image_ref: format!("https://images.unsplash.com/{photo}{IMAGE_QUERY}"),
        };

        Self {
            currency: CurrencyCode::INR,
            categories: vec![
                Category::new("Easy Care"),
                Category::new("Air Purifying"),
                Category::new("Low Light"),
                Category::new("Statement Plants"),
            ],
            products: vec![
                product(
                    "pothos",
                    "Golden Pothos",
                    299,
                    "Easy Care",
                    "photo-1623302005222-ec8a7df2aee9",
                ),
                product(
                    "snake",
                    "Snake Plant",
                    399,
                    "Air Purifying",
                    "photo-1602595688238-9fffe12d5354",
                ),
                product(
                    "zz",
                    "ZZ Plant",
                    449,
                    "Low Light",
                    "photo-1598899134739-24b1393bb5a8",
                ),
                product(
                    "monstera",
                    "Monstera Deliciosa",
                    799,
                    "Statement Plants",
                    "photo-1545243424-0ce743321e11",
                ),
                product(
                    "peace",
                    "Peace Lily",
                    499,
                    "Air Purifying",
                    "photo-1605196566824-4b8c8f784f2b",
                ),
                product(
                    "succulent",
                    "Mini Succulent",
                    199,
                    "Easy Care",
                    "photo-1501004318641-b39e6451bec6",
                ),
            ],
        }
    }

    /// Currency of every unit price in this catalog.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Category names in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Whether the catalog has a product with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// A product's unit price with the catalog currency attached.
    #[must_use]
    pub const fn price_of(&self, product: &Product) -> Price {
        Price::new(product.unit_price, self.currency)
    }

    /// Wrap an amount in the catalog currency.
    #[must_use]
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency)
    }

    /// Products grouped by category, in category order.
    ///
    /// Categories with no products are skipped. Within a group, products keep
    /// their catalog order.
    pub fn grouped(&self) -> impl Iterator<Item = (&Category, Vec<&Product>)> {
        self.categories.iter().filter_map(|category| {
            let items: Vec<&Product> = self
                .products
                .iter()
                .filter(|p| p.category == *category)
                .collect();
            (!items.is_empty()).then_some((category, items))
        })
    }

    /// Convert back into a serializable document.
    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            currency: self.currency,
            categories: self.categories.clone(),
            products: self.products.clone(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.currency, document.categories, document.products)
    }
}
