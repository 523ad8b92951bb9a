//! Persisted record kinds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Service tier chosen on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Pack {
    #[serde(rename = "Essentiel Local")]
    EssentielLocal,
    #[serde(rename = "Vitrine Pro")]
    VitrinePro,
    #[serde(rename = "Vitrine Conversion")]
    VitrineConversion,
}

impl Pack {
    /// Deposit owed at order time, in euros
    pub fn deposit(self) -> f64 {
        match self {
            Pack::EssentielLocal => 445.0,
            Pack::VitrinePro => 645.0,
            Pack::VitrineConversion => 895.0,
        }
    }
}

/// Contact-form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub sector: Option<String>,
    pub pack: Option<Pack>,
    pub message: Option<String>,
    pub consent: bool,
    pub source: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// One chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLog {
    pub id: Uuid,
    pub message: String,
    pub response: String,
    pub model: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatLog {
    pub fn new(
        message: impl Into<String>,
        response: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            response: response.into(),
            model: model.into(),
            provider: provider.into(),
            api_key_source: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_api_key_source(mut self, source: impl Into<String>) -> Self {
        self.api_key_source = Some(source.into());
        self
    }
}

/// Who placed an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
}

/// Pack order awaiting its deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub pack: Pack,
    pub options: Vec<String>,
    pub customer: Customer,
    /// Quoted total, excluding tax
    pub total: f64,
    pub deposit: f64,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counters backing the KPI endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub total_leads: u64,
    pub total_chats: u64,
    pub total_orders: u64,
    pub recent_leads: u64,
}
