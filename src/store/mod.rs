//! Append-only persistence for leads and chat logs

pub mod disabled;
pub mod file;
pub mod memory;
pub mod records;

pub use disabled::DisabledStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{ChatLog, Customer, Lead, Order, Pack, StoreCounts};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;

/// Write-only record store with counters
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name reported by the health check
    fn kind(&self) -> &'static str;

    async fn insert_lead(&self, lead: &Lead) -> Result<()>;

    async fn insert_chat(&self, log: &ChatLog) -> Result<()>;

    async fn insert_order(&self, order: &Order) -> Result<()>;

    /// Totals, plus leads created at or after `since`
    async fn counts(&self, since: DateTime<Utc>) -> Result<StoreCounts>;

    /// Connectivity check
    async fn ping(&self) -> Result<()>;
}

/// Build the store selected by configuration
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.path).await?),
        StorageBackend::Disabled => Arc::new(DisabledStore),
    };

    info!(backend = store.kind(), "Store initialized");
    Ok(store)
}
