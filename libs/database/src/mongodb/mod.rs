//! MongoDB connector and health check

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    client_from_config, connect, connect_from_config, connect_from_config_with_retry,
};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
