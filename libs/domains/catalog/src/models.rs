use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};

/// Identifier of a catalog item (stored as `_id`, assigned outside this crate)
pub type ItemId = i64;

/// Category sentinel that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Number of items returned by `get_related_items`
pub const RELATED_ITEMS_LIMIT: i64 = 4;

/// A user review embedded in an item, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub comment: String,
    pub stars: i32,
    /// Time of the write, stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

/// Catalog item document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    /// Display name, also the listing sort key
    #[serde(default)]
    pub title: String,
    /// Grouping label; some documents carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default, rename = "img_url", alias = "imageUrl")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,
    /// Absent on documents that were never reviewed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

/// Per-category item count, plus the synthetic "All" total
///
/// Items without a category are grouped under a `None` id, so the "All"
/// count always equals the sum of the other entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub num: u64,
}

impl CategoryCount {
    pub fn new(id: impl Into<String>, num: u64) -> Self {
        Self {
            id: Some(id.into()),
            num,
        }
    }

    /// Group of items that carry no category
    pub fn uncategorized(num: u64) -> Self {
        Self { id: None, num }
    }

    pub fn is_all(&self) -> bool {
        self.id.as_deref() == Some(ALL_CATEGORIES)
    }
}

/// Review as submitted by a shopper, before it is timestamped
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub comment: String,
    #[validate(range(min = 0, max = 5))]
    pub stars: i32,
}

impl NewReview {
    pub fn new(name: impl Into<String>, comment: impl Into<String>, stars: i32) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            stars,
        }
    }

    /// Stamp the review with its write time
    pub fn into_review(self, date: DateTime<Utc>) -> Review {
        Review {
            name: self.name,
            comment: self.comment,
            stars: self.stars,
            date,
        }
    }
}

/// A validated page request: `skip = index * size`, `limit = size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    index: u64,
    size: u32,
}

impl Page {
    /// Validate a raw page request against `max_size`
    ///
    /// A negative index is rejected rather than treated as the first page.
    pub fn try_new(index: i64, size: i64, max_size: u32) -> CatalogResult<Self> {
        let index = u64::try_from(index).map_err(|_| {
            CatalogError::Validation(format!("page index must not be negative, got {index}"))
        })?;

        let size = u32::try_from(size)
            .ok()
            .filter(|size| (1..=max_size).contains(size))
            .ok_or_else(|| {
                CatalogError::Validation(format!(
                    "page size must be between 1 and {max_size}, got {size}"
                ))
            })?;

        index.checked_mul(u64::from(size)).ok_or_else(|| {
            CatalogError::Validation(format!("page {index} is out of range"))
        })?;

        Ok(Self { index, size })
    }

    /// First page of `size` items
    pub fn first(size: u32) -> Self {
        Self {
            index: 0,
            size: size.max(1),
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of documents to skip
    pub fn skip(&self) -> u64 {
        // overflow is ruled out by `try_new`
        self.index.saturating_mul(u64::from(self.size))
    }

    /// Maximum number of documents to return
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// Number of pages needed to show `total` items, `page_size` at a time
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}
