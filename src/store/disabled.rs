//! Store used when persistence is turned off

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{ChatLog, Lead, Order, Store, StoreCounts};
use crate::error::Result;

/// Accepts every write and keeps nothing
pub struct DisabledStore;

#[async_trait]
impl Store for DisabledStore {
    fn kind(&self) -> &'static str {
        "disabled"
    }

    async fn insert_lead(&self, lead: &Lead) -> Result<()> {
        debug!(id = %lead.id, "Persistence disabled, lead not stored");
        Ok(())
    }

    async fn insert_chat(&self, log: &ChatLog) -> Result<()> {
        debug!(id = %log.id, "Persistence disabled, chat not stored");
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> Result<()> {
        debug!(order_number = %order.order_number, "Persistence disabled, order not stored");
        Ok(())
    }

    async fn counts(&self, _since: DateTime<Utc>) -> Result<StoreCounts> {
        Ok(StoreCounts::default())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
