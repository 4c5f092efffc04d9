//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{CategoryId, ProductId, original_price};

// =============================================================================
// Product Types
// =============================================================================

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Selling price, after any discount.
    pub price: Decimal,
    /// Percentage discount already applied to `price` (e.g., 20 for 20% off).
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    /// Promotional placement flag.
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price before the discount, for strike-through display.
    ///
    /// `None` when the product is not discounted.
    #[must_use]
    pub fn original_price(&self) -> Option<Decimal> {
        self.discount
            .filter(|d| *d > Decimal::ZERO)
            .and_then(|d| original_price(self.price, d))
    }

    /// First image, used as the thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether at least one unit can be ordered.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            _ => Err(format!("invalid sort: {s}")),
        }
    }
}

/// Filters for `GET /api/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<ProductSort>,
}

impl ProductQuery {
    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Full-text search term. Blank terms are ignored.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then(|| term.trim().to_string());
        self
    }

    /// Only featured products.
    #[must_use]
    pub const fn featured_only(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    /// Sort order.
    #[must_use]
    pub const fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = Some(sort);
        self
    }
}

// =============================================================================
// Admin Input Types
// =============================================================================

/// Body for creating or updating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub images: Vec<String>,
    pub stock: u32,
    pub featured: bool,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            discount: product.discount,
            category: product.category.clone(),
            images: product.images.clone(),
            stock: product.stock,
            featured: product.featured,
        }
    }
}
