//! Product catalog reads.

use shopfront_core::{Page, PageQuery, ProductId};
use tracing::instrument;

use super::{ListEnvelope, Paged};
use crate::error::ApiError;
use crate::http::{ApiClient, Auth, segment};
use crate::models::{Category, Product, ProductQuery};

/// Products flagged for promotional placement, in their original order.
#[must_use]
pub fn featured(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|product| product.featured).collect()
}

impl ApiClient {
    /// List products matching `query`.
    ///
    /// Served from the catalog cache when a fresh copy is held.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: &ProductQuery,
        page: PageQuery,
    ) -> Result<Page<Product>, ApiError> {
        if let Some(cached) = self.cache().products(query, page).await {
            tracing::debug!("Product listing served from cache");
            return Ok(cached);
        }

        let products: Page<Product> = self
            .get_with_query("api/products", &Paged::new(query, page), Auth::None)
            .await?;
        self.cache().insert_products(query, page, &products).await;
        Ok(products)
    }

    /// Featured products: asks the backend for featured items and keeps only
    /// the flagged ones in case the filter is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn featured_products(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        let page = self
            .list_products(
                &ProductQuery::default().featured_only(),
                PageQuery::new(1, limit),
            )
            .await?;
        Ok(featured(&page.items).into_iter().cloned().collect())
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        if let Some(cached) = self.cache().product(id).await {
            return Ok(cached);
        }

        let product: Product = self
            .get(&format!("api/products/{}", segment(id.as_str())?), Auth::None)
            .await?;
        self.cache().insert_product(&product).await;
        Ok(product)
    }

    /// Product categories.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let categories: ListEnvelope<Category> = self.get("api/categories", Auth::None).await?;
        Ok(categories.data)
    }
}
