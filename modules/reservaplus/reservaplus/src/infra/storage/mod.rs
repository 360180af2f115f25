//! Store gateway adapters.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::store::KeyValueStore;

mod attribute;
pub mod dynamodb;
pub mod entity;
pub mod memory;
pub mod migrations;
pub mod sea_orm_store;


pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;
pub use sea_orm_store::SeaOrmStore;

/// Build the process-wide store handle for the configured backend.
///
/// # Errors
/// Returns an error if the backend cannot be reached or migrated.
pub async fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::DynamoDb => {
            info!(table = %config.dynamodb.table_name, "using DynamoDB store");
            Arc::new(DynamoDbStore::from_env(&config.dynamodb).await)
        }
        StoreBackend::Sql => {
            info!("using SQL store");
            Arc::new(
                SeaOrmStore::connect(&config.sql.url)
                    .await
                    .context("failed to open SQL store")?,
            )
        }
        StoreBackend::Memory => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
