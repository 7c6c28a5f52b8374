//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, to_bson},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    ALL_CATEGORIES, CategoryCount, Item, ItemId, Page, RELATED_ITEMS_LIMIT, Review,
};
use crate::repository::CatalogRepository;

/// Default collection name
pub const ITEM_COLLECTION: &str = "item";

/// MongoDB implementation of the CatalogRepository
#[derive(Clone)]
pub struct MongoCatalogRepository {
    collection: Collection<Item>,
}

impl MongoCatalogRepository {
    /// Repository over the `item` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoCatalogRepository::new(&client.database("mongomart"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, ITEM_COLLECTION)
    }

    /// Repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Item>(collection_name);
        Self { collection }
    }

    /// Create the indexes the catalog queries rely on
    ///
    /// The text index is required by `search_items` and
    /// `count_search_results`; the server rejects `$text` without it.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "title": "text", "slogan": "text", "description": "text" })
                .options(
                    IndexOptions::builder()
                        .name("idx_text_search".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1, "title": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_title".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(IndexOptions::builder().name("idx_title".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Catalog indexes created");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    /// Exact category match, or no filter for the "All" sentinel
    fn category_filter(category: &str) -> Document {
        if category == ALL_CATEGORIES {
            doc! {}
        } else {
            doc! { "category": category }
        }
    }

    fn text_filter(query: &str) -> Document {
        doc! { "$text": { "$search": query } }
    }

    /// Title-ordered window for one page
    ///
    /// `_id` breaks title ties so adjacent pages never overlap.
    fn page_options(page: Page) -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "title": 1, "_id": 1 })
            .skip(page.skip())
            .limit(page.limit())
            .build()
    }

    fn categories_pipeline() -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$category", "num": { "$sum": 1 } } },
            doc! { "$sort": { "_id": 1 } },
        ]
    }

    /// Put the synthetic "All" entry in front of the `$group` rows
    ///
    /// "All" counts every item. Items without a category keep their own
    /// `None` entry, so "All" is always the sum of the entries after it.
    fn with_all_total(groups: Vec<CategoryCount>) -> Vec<CategoryCount> {
        let total = groups.iter().map(|group| group.num).sum();

        let mut categories = Vec::with_capacity(groups.len() + 1);
        categories.push(CategoryCount::new(ALL_CATEGORIES, total));
        categories.extend(groups);
        categories
    }

    async fn find_page(&self, filter: Document, page: Page) -> CatalogResult<Vec<Item>> {
        let cursor = self
            .collection
            .find(filter)
            .with_options(Self::page_options(page))
            .await?;
        let items: Vec<Item> = cursor.try_collect().await?;
        Ok(items)
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> CatalogResult<Vec<CategoryCount>> {
        let cursor = self.collection.aggregate(Self::categories_pipeline()).await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        let groups = rows
            .into_iter()
            .map(bson::from_document::<CategoryCount>)
            .collect::<Result<Vec<_>, _>>()?;

        let categories = Self::with_all_total(groups);
        tracing::debug!(categories = categories.len(), "Listed categories");
        Ok(categories)
    }

    #[instrument(skip(self, page), fields(page_index = page.index(), page_size = page.size()))]
    async fn list_items(&self, category: &str, page: Page) -> CatalogResult<Vec<Item>> {
        self.find_page(Self::category_filter(category), page).await
    }

    #[instrument(skip(self))]
    async fn count_items(&self, category: &str) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::category_filter(category))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, page), fields(page_index = page.index(), page_size = page.size()))]
    async fn search_items(&self, query: &str, page: Page) -> CatalogResult<Vec<Item>> {
        self.find_page(Self::text_filter(query), page).await
    }

    #[instrument(skip(self))]
    async fn count_search_results(&self, query: &str) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::text_filter(query))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: ItemId) -> CatalogResult<Option<Item>> {
        let item = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_related_items(&self) -> CatalogResult<Vec<Item>> {
        // No relation is computed yet: natural order, first few documents
        let options = FindOptions::builder().limit(RELATED_ITEMS_LIMIT).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let items: Vec<Item> = cursor.try_collect().await?;
        Ok(items)
    }

    #[instrument(skip(self, review), fields(stars = review.stars))]
    async fn add_review(&self, id: ItemId, review: Review) -> CatalogResult<Item> {
        // $push appends atomically, so concurrent reviewers cannot overwrite each other
        let update = doc! { "$push": { "reviews": to_bson(&review)? } };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let item = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .with_options(options)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        tracing::info!(item_id = id, reviews = item.reviews.len(), "Review added");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed_total(categories: &[CategoryCount]) -> u64 {
        categories.iter().skip(1).map(|category| category.num).sum()
    }

    #[test]
    fn test_category_filter_all_is_empty() {
        assert!(MongoCatalogRepository::category_filter(ALL_CATEGORIES).is_empty());
    }

    #[test]
    fn test_category_filter_matches_exact_category() {
        let filter = MongoCatalogRepository::category_filter("Apparel");
        assert_eq!(filter, doc! { "category": "Apparel" });
    }

    #[test]
    fn test_category_filter_is_case_sensitive_sentinel() {
        let filter = MongoCatalogRepository::category_filter("all");
        assert_eq!(filter, doc! { "category": "all" });
    }

    #[test]
    fn test_text_filter() {
        let filter = MongoCatalogRepository::text_filter("leaf mug");
        assert_eq!(filter, doc! { "$text": { "$search": "leaf mug" } });
    }

    #[test]
    fn test_page_options_window() {
        let page = Page::try_new(2, 5, 100).unwrap();
        let options = MongoCatalogRepository::page_options(page);
        assert_eq!(options.skip, Some(10));
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.sort, Some(doc! { "title": 1, "_id": 1 }));
    }

    #[test]
    fn test_first_page_options_skip_nothing() {
        let options = MongoCatalogRepository::page_options(Page::first(5));
        assert_eq!(options.skip, Some(0));
    }

    #[test]
    fn test_with_all_total_puts_all_first() {
        let categories = MongoCatalogRepository::with_all_total(vec![
            CategoryCount::new("Apparel", 6),
            CategoryCount::new("Books", 3),
        ]);

        assert_eq!(
            categories,
            vec![
                CategoryCount::new("All", 9),
                CategoryCount::new("Apparel", 6),
                CategoryCount::new("Books", 3),
            ]
        );
        assert!(categories[0].is_all());
    }

    #[test]
    fn test_with_all_total_keeps_uncategorized_entry() {
        let categories = MongoCatalogRepository::with_all_total(vec![
            CategoryCount::uncategorized(2),
            CategoryCount::new("Kitchen", 1),
        ]);

        assert_eq!(
            categories,
            vec![
                CategoryCount::new("All", 3),
                CategoryCount::uncategorized(2),
                CategoryCount::new("Kitchen", 1),
            ]
        );
        assert_eq!(categories[0].num, listed_total(&categories));
    }

    #[test]
    fn test_with_all_total_empty_collection() {
        let categories = MongoCatalogRepository::with_all_total(Vec::new());
        assert_eq!(categories, vec![CategoryCount::new("All", 0)]);
        assert_eq!(categories[0].num, listed_total(&categories));
    }
}
