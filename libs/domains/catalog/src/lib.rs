//! Catalog Domain
//!
//! Read access to an e-commerce item catalog stored in MongoDB, plus
//! appending reviews to items.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Validation, pagination bounds, conflict retry
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, Review, CategoryCount, Page
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, MongoCatalogRepository};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mongomart");
//!
//! let repository = MongoCatalogRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let service = CatalogService::new(repository);
//! let apparel = service.list_items("Apparel", 0, 5).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use models::{
    ALL_CATEGORIES, CategoryCount, Item, ItemId, NewReview, Page, RELATED_ITEMS_LIMIT, Review,
    page_count,
};
pub use crate::mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
