//! MongoDB connectivity shared by the catalog crates
//!
//! Provides connection management, a health check, a unified error type and
//! retry helpers with exponential backoff.
//!
//! # Features
//!
//! - `config` - load [`mongodb::MongoConfig`] through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "mongomart");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
