use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use database::common::RetryConfig;

/// Catalog behaviour settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Collection holding the item documents
    pub collection: String,
    /// Page size used when a caller does not pick one
    pub page_size: u32,
    /// Largest page a caller may request
    pub max_page_size: u32,
    /// Retries for a review append the server rejected as conflicting
    pub review_retries: u32,
}

impl CatalogConfig {
    /// Backoff policy for review appends
    pub fn review_retry(&self) -> RetryConfig {
        RetryConfig::new()
            .with_max_retries(self.review_retries)
            .with_initial_delay(25)
            .with_max_delay(500)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 || self.page_size > self.max_page_size {
            return Err(ConfigError::ParseError {
                key: "CATALOG_PAGE_SIZE".to_string(),
                details: format!(
                    "must be between 1 and CATALOG_MAX_PAGE_SIZE ({})",
                    self.max_page_size
                ),
            });
        }
        Ok(self)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collection: "item".to_string(),
            page_size: 5,
            max_page_size: 100,
            review_retries: 3,
        }
    }
}

impl FromEnv for CatalogConfig {
    /// Reads `CATALOG_COLLECTION`, `CATALOG_PAGE_SIZE`, `CATALOG_MAX_PAGE_SIZE`
    /// and `CATALOG_REVIEW_RETRIES`, each with a default.
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Self {
            collection: env_or_default("CATALOG_COLLECTION", &defaults.collection),
            page_size: env_parse("CATALOG_PAGE_SIZE", defaults.page_size)?,
            max_page_size: env_parse("CATALOG_MAX_PAGE_SIZE", defaults.max_page_size)?,
            review_retries: env_parse("CATALOG_REVIEW_RETRIES", defaults.review_retries)?,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 4] = [
        "CATALOG_COLLECTION",
        "CATALOG_PAGE_SIZE",
        "CATALOG_MAX_PAGE_SIZE",
        "CATALOG_REVIEW_RETRIES",
    ];

    #[test]
    fn test_catalog_config_defaults() {
        temp_env::with_vars_unset(KEYS, || {
            let config = CatalogConfig::from_env().unwrap();
            assert_eq!(config, CatalogConfig::default());
            assert_eq!(config.collection, "item");
            assert_eq!(config.page_size, 5);
        });
    }

    #[test]
    fn test_catalog_config_overrides() {
        temp_env::with_vars(
            [
                ("CATALOG_COLLECTION", Some("products")),
                ("CATALOG_PAGE_SIZE", Some("10")),
                ("CATALOG_MAX_PAGE_SIZE", Some("50")),
                ("CATALOG_REVIEW_RETRIES", Some("0")),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.collection, "products");
                assert_eq!(config.page_size, 10);
                assert_eq!(config.max_page_size, 50);
                assert_eq!(config.review_retry().max_retries, 0);
            },
        );
    }

    #[test]
    fn test_page_size_above_max_rejected() {
        temp_env::with_vars(
            [
                ("CATALOG_COLLECTION", None::<&str>),
                ("CATALOG_PAGE_SIZE", Some("20")),
                ("CATALOG_MAX_PAGE_SIZE", Some("10")),
                ("CATALOG_REVIEW_RETRIES", None::<&str>),
            ],
            || {
                let err = CatalogConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("CATALOG_PAGE_SIZE"));
            },
        );
    }
}
