pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryAccountStore;
pub use postgres::PostgresAccountStore;
pub use store::{AccountStore, InsertOutcome};

use crate::error::StoreError;
use crate::infra::{Config, StoreBackend};
use std::sync::Arc;

/// Opens the store selected by `config.store_backend`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn AccountStore>, StoreError> {
    match config.store_backend {
        StoreBackend::Postgres => Ok(Arc::new(PostgresAccountStore::connect(config).await?)),
        StoreBackend::Memory => Ok(Arc::new(InMemoryAccountStore::new())),
    }
}
