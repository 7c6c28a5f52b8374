//! Catalog CLI
//!
//! Browses the MongoMart item catalog from the command line. Every command
//! prints its result as JSON on stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{
    check_health_detailed, client_from_config, connect_from_config_with_retry,
};
use domain_catalog::{
    ALL_CATEGORIES, CatalogService, Item, ItemId, MongoCatalogRepository, page_count,
};
use eyre::Result;
use serde::Serialize;
use tracing::info;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and review items in the MongoMart catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories with item counts ("All" first)
    Categories,

    /// List one page of items in a category
    Items {
        /// Category name, or "All" for every item
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        /// Items per page. Defaults to CATALOG_PAGE_SIZE.
        #[arg(short = 's', long)]
        page_size: Option<i64>,
    },

    /// Count items in a category
    Count {
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// Full-text search over title, slogan and description
    Search {
        query: String,

        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        #[arg(short = 's', long)]
        page_size: Option<i64>,
    },

    /// Count full-text search matches
    SearchCount { query: String },

    /// Show one item with its reviews
    Item { id: ItemId },

    /// Show items related to an item page
    Related,

    /// Add a review to an item
    Review {
        id: ItemId,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        comment: String,

        /// Rating from 0 to 5
        #[arg(long)]
        stars: i32,
    },

    /// Ping the MongoDB deployment
    Health,

    /// Create the indexes catalog queries need (text search included)
    InitIndexes,
}

/// One page of a listing, with enough totals to render a pager
#[derive(Serialize)]
struct Listing {
    page: i64,
    page_size: i64,
    pages: u64,
    total: u64,
    items: Vec<Item>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    // Parse first so `--help` works without any database settings
    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    match cli.command {
        Commands::Health => health(&config).await,
        command => run(command, &config).await,
    }
}

/// Ping without the connect-time retry loop; an unreachable server is reported, not retried
async fn health(config: &Config) -> Result<()> {
    let client = client_from_config(&config.mongodb).await?;
    let status = check_health_detailed(&client).await;
    print_json(&status)?;

    if !status.healthy {
        eyre::bail!("MongoDB is unhealthy");
    }
    Ok(())
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB...");
    let client = connect_from_config_with_retry(&config.mongodb, None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;
    let db = client.database(config.mongodb.database());

    let repository = MongoCatalogRepository::with_collection(&db, &config.catalog.collection);
    let service = CatalogService::with_config(repository.clone(), config.catalog.clone());
    let default_page_size = i64::from(service.default_page_size());

    match command {
        Commands::Categories => print_json(&service.list_categories().await?)?,

        Commands::Items {
            category,
            page,
            page_size,
        } => {
            let page_size = page_size.unwrap_or(default_page_size);
            let items = service.list_items(&category, page, page_size).await?;
            let total = service.count_items(&category).await?;
            print_json(&Listing {
                page,
                page_size,
                pages: page_count(total, page_size as u32),
                total,
                items,
            })?;
        }

        Commands::Count { category } => print_json(&service.count_items(&category).await?)?,

        Commands::Search {
            query,
            page,
            page_size,
        } => {
            let page_size = page_size.unwrap_or(default_page_size);
            let items = service.search_items(&query, page, page_size).await?;
            let total = service.count_search_results(&query).await?;
            print_json(&Listing {
                page,
                page_size,
                pages: page_count(total, page_size as u32),
                total,
                items,
            })?;
        }

        Commands::SearchCount { query } => {
            print_json(&service.count_search_results(&query).await?)?
        }

        Commands::Item { id } => print_json(&service.get_item(id).await?)?,

        Commands::Related => print_json(&service.get_related_items().await?)?,

        Commands::Review {
            id,
            name,
            comment,
            stars,
        } => {
            let item = service.add_review(id, &comment, &name, stars).await?;
            info!(item_id = id, reviews = item.reviews.len(), "Review stored");
            print_json(&item)?;
        }

        Commands::InitIndexes => {
            repository.init_indexes().await?;
            print_json(&serde_json::json!({ "indexes": "ready" }))?;
        }

        Commands::Health => health(config).await?,
    }

    Ok(())
}
