//! In-process store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::{ChatLog, Lead, Order, Store, StoreCounts};
use crate::error::Result;

/// Concurrent maps keyed by record id
#[derive(Default)]
pub struct MemoryStore {
    leads: DashMap<Uuid, Lead>,
    chats: DashMap<Uuid, ChatLog>,
    orders: DashMap<Uuid, Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_lead(&self, id: &Uuid) -> Option<Lead> {
        self.leads.get(id).map(|entry| entry.value().clone())
    }

    pub fn chat_logs(&self) -> Vec<ChatLog> {
        self.chats.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn get_order(&self, id: &Uuid) -> Option<Order> {
        self.orders.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert_lead(&self, lead: &Lead) -> Result<()> {
        self.leads.insert(lead.id, lead.clone());
        Ok(())
    }

    async fn insert_chat(&self, log: &ChatLog) -> Result<()> {
        self.chats.insert(log.id, log.clone());
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> Result<()> {
        self.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn counts(&self, since: DateTime<Utc>) -> Result<StoreCounts> {
        let recent_leads = self
            .leads
            .iter()
            .filter(|entry| entry.value().created_at >= since)
            .count();

        Ok(StoreCounts {
            total_leads: self.leads.len() as u64,
            total_chats: self.chats.len() as u64,
            total_orders: self.orders.len() as u64,
            recent_leads: recent_leads as u64,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
