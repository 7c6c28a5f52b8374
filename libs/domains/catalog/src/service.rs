//! Catalog Service - validation and orchestration over the repository

use chrono::Utc;
use database::common::retry_if;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CategoryCount, Item, ItemId, NewReview, Page, page_count};
use crate::repository::CatalogRepository;

/// Catalog operations as exposed to callers
///
/// Raw page requests are validated here so repositories only ever see a
/// bounded [`Page`].
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Create a service with default settings
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, CatalogConfig::default())
    }

    pub fn with_config(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    /// Page size used when the caller has no preference
    pub fn default_page_size(&self) -> u32 {
        self.config.page_size
    }

    fn page(&self, page_index: i64, page_size: i64) -> CatalogResult<Page> {
        Page::try_new(page_index, page_size, self.config.max_page_size)
    }

    /// Categories with item counts, "All" first
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryCount>> {
        self.repository.list_categories().await
    }

    /// Items in `category` ("All" for every item), `page_size` per page
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        category: &str,
        page_index: i64,
        page_size: i64,
    ) -> CatalogResult<Vec<Item>> {
        let page = self.page(page_index, page_size)?;
        self.repository.list_items(category, page).await
    }

    #[instrument(skip(self))]
    pub async fn count_items(&self, category: &str) -> CatalogResult<u64> {
        self.repository.count_items(category).await
    }

    /// Full-text search results, `page_size` per page
    #[instrument(skip(self))]
    pub async fn search_items(
        &self,
        query: &str,
        page_index: i64,
        page_size: i64,
    ) -> CatalogResult<Vec<Item>> {
        let query = Self::search_query(query)?;
        let page = self.page(page_index, page_size)?;
        self.repository.search_items(query, page).await
    }

    #[instrument(skip(self))]
    pub async fn count_search_results(&self, query: &str) -> CatalogResult<u64> {
        let query = Self::search_query(query)?;
        self.repository.count_search_results(query).await
    }

    /// Get an item by ID, failing with `NotFound` when absent
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> CatalogResult<Item> {
        self.repository
            .get_item(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Items to show beside an item page (currently the first few items)
    #[instrument(skip(self))]
    pub async fn get_related_items(&self) -> CatalogResult<Vec<Item>> {
        self.repository.get_related_items().await
    }

    /// Validate and append a review, retrying server-reported write conflicts
    #[instrument(skip(self, comment, name), fields(name_len = name.len()))]
    pub async fn add_review(
        &self,
        item_id: ItemId,
        comment: &str,
        name: &str,
        stars: i32,
    ) -> CatalogResult<Item> {
        let input = NewReview::new(name.trim(), comment.trim(), stars);
        input.validate()?;

        let review = input.into_review(Utc::now());
        let repository = &self.repository;

        retry_if(
            move || repository.add_review(item_id, review.clone()),
            self.config.review_retry(),
            CatalogError::is_retryable,
        )
        .await
    }

    /// Number of pages for `total` items at `page_size` per page
    pub fn page_count(&self, total: u64, page_size: u32) -> u64 {
        page_count(total, page_size)
    }

    fn search_query(query: &str) -> CatalogResult<&str> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::Validation(
                "search query must not be empty".to_string(),
            ));
        }
        Ok(query)
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config.clone(),
        }
    }
}
