//! Catalog endpoints with read caching.
//!
//! Products are read-mostly: listings and single products are cached for
//! five minutes, search results are not, and every catalog mutation
//! invalidates the cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use pomade_core::{Amount, Product, ProductId};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

use super::with_query;

/// Filters for the product listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductFilters {
    fn path(&self) -> String {
        with_query(
            "/products",
            &[
                ("category", self.category.clone()),
                ("search", self.search.clone()),
                ("page", self.page.map(|p| p.to_string())),
                ("limit", self.limit.map(|l| l.to_string())),
            ],
        )
    }
}

/// A page of catalog products.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
}

/// Payload for creating a catalog product (admin).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// Partial update for a catalog product (admin).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Page(ProductPage),
}

/// Catalog client with a short-lived read cache.
#[derive(Clone)]
pub struct ProductApi {
    inner: Arc<ProductApiInner>,
}

struct ProductApiInner {
    gateway: ApiGateway,
    cache: Cache<String, CacheValue>,
}

impl ProductApi {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();
        Self {
            inner: Arc::new(ProductApiInner { gateway, cache }),
        }
    }

    /// List products. Search queries bypass the cache.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self, filters: &ProductFilters) -> Result<ProductPage, ApiError> {
        let path = filters.path();
        let cacheable = filters.search.is_none();

        if cacheable
            && let Some(CacheValue::Page(page)) = self.inner.cache.get(&path).await
        {
            debug!("cache hit for product listing");
            return Ok(page);
        }

        let page: ProductPage = self.inner.gateway.get(&path).await?;

        if cacheable {
            self.inner
                .cache
                .insert(path, CacheValue::Page(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the product does not exist or the
    /// request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.inner.gateway.get(&format!("/products/{id}")).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let created = self.inner.gateway.post("/products", product).await?;
        self.invalidate_all().await;
        Ok(created)
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product, ApiError> {
        let updated = self
            .inner
            .gateway
            .patch(&format!("/products/{id}"), patch)
            .await?;
        self.invalidate_all().await;
        Ok(updated)
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        let _: serde_json::Value = self.inner.gateway.delete(&format!("/products/{id}")).await?;
        self.invalidate_all().await;
        Ok(())
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_paths() {
        assert_eq!(ProductFilters::default().path(), "/products");

        let filters = ProductFilters {
            category: Some("hair care".to_string()),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(filters.path(), "/products?category=hair+care&page=2");
    }
}
