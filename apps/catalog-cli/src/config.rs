//! Configuration for the catalog CLI

use core_config::FromEnv;
use database::mongodb::MongoConfig;
use domain_catalog::CatalogConfig;
use eyre::Result;

pub use core_config::Environment;

/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub mongodb: MongoConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(env!("CARGO_PKG_NAME"));
        }
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            environment,
            mongodb,
            catalog,
        })
    }
}
