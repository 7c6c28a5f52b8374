use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{CategoryCount, Item, ItemId, Page, Review};

/// Data access for the item catalog
///
/// `category` arguments accept the `"All"` sentinel to disable filtering.
/// Implementations must sort listings by title and bound every page on the
/// server side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Item counts per category, with the synthetic "All" total first
    async fn list_categories(&self) -> CatalogResult<Vec<CategoryCount>>;

    /// One page of items in a category, ascending by title
    async fn list_items(&self, category: &str, page: Page) -> CatalogResult<Vec<Item>>;

    /// Number of items in a category
    async fn count_items(&self, category: &str) -> CatalogResult<u64>;

    /// One page of full-text search results, ascending by title
    async fn search_items(&self, query: &str, page: Page) -> CatalogResult<Vec<Item>>;

    /// Number of items matching a full-text search
    async fn count_search_results(&self, query: &str) -> CatalogResult<u64>;

    /// Get an item by ID
    async fn get_item(&self, id: ItemId) -> CatalogResult<Option<Item>>;

    /// A handful of items to show next to an item page
    async fn get_related_items(&self) -> CatalogResult<Vec<Item>>;

    /// Append a review and return the item as stored after the write
    async fn add_review(&self, id: ItemId, review: Review) -> CatalogResult<Item>;
}
