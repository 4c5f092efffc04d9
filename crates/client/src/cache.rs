//! In-memory cache for catalog responses.
//!
//! Product listings and product pages are read far more often than they
//! change, so they are cached for a short TTL. Any admin product mutation
//! clears the whole cache.

use std::time::Duration;

use moka::future::Cache;
use shopfront_core::{Page, PageQuery, ProductId};

use crate::models::{Product, ProductQuery};

/// Upper bound on cached entries.
const MAX_ENTRIES: u64 = 1_000;

/// Cache key for products.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products { query: ProductQuery, page: PageQuery },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Page<Product>),
}

/// TTL cache in front of the catalog endpoints. A zero TTL disables it.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Option<Cache<CacheKey, CacheValue>>,
}

impl CatalogCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl)
                .build()
        });
        Self { inner }
    }

    /// Whether caching is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Cached product page, if present.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        let cache = self.inner.as_ref()?;
        match cache.get(&CacheKey::Product(id.clone())).await? {
            CacheValue::Product(product) => Some(*product),
            CacheValue::Products(_) => None,
        }
    }

    /// Store a product page.
    pub async fn insert_product(&self, product: &Product) {
        if let Some(cache) = &self.inner {
            cache
                .insert(
                    CacheKey::Product(product.id.clone()),
                    CacheValue::Product(Box::new(product.clone())),
                )
                .await;
        }
    }

    /// Cached product listing, if present.
    pub async fn products(&self, query: &ProductQuery, page: PageQuery) -> Option<Page<Product>> {
        let cache = self.inner.as_ref()?;
        let key = CacheKey::Products {
            query: query.clone(),
            page,
        };
        match cache.get(&key).await? {
            CacheValue::Products(products) => Some(products),
            CacheValue::Product(_) => None,
        }
    }

    /// Store a product listing.
    pub async fn insert_products(&self, query: &ProductQuery, page: PageQuery, products: &Page<Product>) {
        if let Some(cache) = &self.inner {
            cache
                .insert(
                    CacheKey::Products {
                        query: query.clone(),
                        page,
                    },
                    CacheValue::Products(products.clone()),
                )
                .await;
        }
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Mug".to_string(),
            description: String::new(),
            price: Decimal::from(12),
            discount: None,
            category: None,
            images: vec![],
            stock: 1,
            featured: false,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_product_roundtrip_and_invalidate() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert!(cache.product(&ProductId::new("p1")).await.is_none());

        cache.insert_product(&product("p1")).await;
        assert_eq!(cache.product(&ProductId::new("p1")).await, Some(product("p1")));

        cache.invalidate_all();
        assert!(cache.product(&ProductId::new("p1")).await.is_none());
    }

    #[tokio::test]
    async fn test_listing_keyed_by_query_and_page() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let page = Page {
            items: vec![product("p1")],
            page: 1,
            limit: 12,
            total: 1,
            total_pages: 1,
        };
        let shirts = ProductQuery::default().category("shirts");
        cache.insert_products(&shirts, PageQuery::default(), &page).await;

        assert!(cache.products(&shirts, PageQuery::default()).await.is_some());
        assert!(cache.products(&shirts, PageQuery::new(2, 12)).await.is_none());
        assert!(
            cache
                .products(&ProductQuery::default(), PageQuery::default())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_zero_ttl_disables() {
        let cache = CatalogCache::new(Duration::ZERO);
        assert!(!cache.is_enabled());
        cache.insert_product(&product("p1")).await;
        assert!(cache.product(&ProductId::new("p1")).await.is_none());
    }
}
