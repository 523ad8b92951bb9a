//! API request and response models

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::{Customer, Lead, Order, Pack};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Contact form submission
///
/// Every field is optional at the JSON level so that a missing consent is
/// reported as such rather than as a generic decoding failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub pack: Option<Pack>,
    #[serde(default)]
    pub message: Option<String>,
    /// RGPD consent, must be true
    #[serde(default)]
    pub consent: bool,
    /// Origin tag, defaults to `contact_form`
    #[serde(default)]
    pub source: Option<String>,
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "Le champ '{}' doit contenir entre {} et {} caractères",
            field, min, max
        )));
    }
    Ok(())
}

fn check_optional_len(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) => check_len(field, value, 0, max),
        None => Ok(()),
    }
}

fn check_email(value: &str) -> Result<()> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(AppError::Validation("Adresse email invalide".to_string()));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ContactPayload {
    /// Validate the submission; consent is checked before anything else
    pub fn validate(&self) -> Result<()> {
        if !self.consent {
            return Err(AppError::ConsentRequired);
        }

        check_len("name", &self.name, 2, 120)?;
        check_email(&self.email)?;
        check_len("phone", &self.phone, 6, 25)?;
        check_optional_len("sector", self.sector.as_deref(), 80)?;
        check_optional_len("message", self.message.as_deref(), 2000)?;
        check_optional_len("source", self.source.as_deref(), 60)?;

        Ok(())
    }

    /// Build a fresh lead record with a new id
    pub fn into_lead(self) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            sector: non_blank(self.sector),
            pack: self.pack,
            message: non_blank(self.message),
            consent: self.consent,
            source: non_blank(self.source).unwrap_or_else(|| "contact_form".to_string()),
            status: "new".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Contact submission result
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    /// False when persistence is disabled
    pub saved: bool,
    pub id: Uuid,
    pub message: String,
}

/// Service banner
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    pub storage: String,
    pub llm_configured: bool,
    pub version: String,
}

/// Lead and chat counters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct KpiResponse {
    pub total_leads: u64,
    pub total_chats: u64,
    pub total_orders: u64,
    /// Leads of the last 7 days
    pub recent_leads: u64,
    pub timestamp: DateTime<Utc>,
}

/// Customer details on an order
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
}

/// Pack order submission
///
/// The deposit is always derived from the pack; any value sent by the
/// client is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct OrderPayload {
    #[serde(default)]
    pub pack: Option<Pack>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub customer: CustomerPayload,
    /// Quoted total excluding tax, in euros
    #[serde(default)]
    pub total: f64,
    /// Client-side reference; generated when absent
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub const MAX_ORDER_OPTIONS: usize = 20;
pub const MAX_ORDER_TOTAL: f64 = 100_000.0;

impl OrderPayload {
    pub fn validate(&self) -> Result<()> {
        if self.pack.is_none() {
            return Err(AppError::Validation("Pack invalide".to_string()));
        }

        check_len("customer.name", &self.customer.name, 2, 120)?;
        check_email(&self.customer.email)?;
        check_len("customer.phone", &self.customer.phone, 6, 25)?;
        check_optional_len("customer.company", self.customer.company.as_deref(), 120)?;

        if self.options.len() > MAX_ORDER_OPTIONS {
            return Err(AppError::Validation(format!(
                "Au plus {} options par commande",
                MAX_ORDER_OPTIONS
            )));
        }
        for option in &self.options {
            check_len("options", option, 1, 80)?;
        }

        if !self.total.is_finite() || self.total < 0.0 || self.total > MAX_ORDER_TOTAL {
            return Err(AppError::Validation("Montant total invalide".to_string()));
        }

        if let Some(number) = self.order_number.as_deref().map(str::trim) {
            let well_formed = !number.is_empty()
                && number.len() <= 40
                && number
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !well_formed {
                return Err(AppError::Validation("Numéro de commande invalide".to_string()));
            }
        }

        check_optional_len("notes", self.notes.as_deref(), 2000)?;
        Ok(())
    }

    /// Build the order record; call after `validate`
    pub fn into_order(self) -> Result<Order> {
        let pack = self
            .pack
            .ok_or_else(|| AppError::Validation("Pack invalide".to_string()))?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let order_number = non_blank(self.order_number).unwrap_or_else(|| {
            let suffix = id.simple().to_string()[..8].to_uppercase();
            format!("WB-{}-{}", created_at.format("%Y%m%d"), suffix)
        });

        Ok(Order {
            id,
            order_number,
            pack,
            options: self
                .options
                .into_iter()
                .map(|option| option.trim().to_string())
                .collect(),
            customer: Customer {
                name: self.customer.name.trim().to_string(),
                email: self.customer.email.trim().to_string(),
                phone: self.customer.phone.trim().to_string(),
                company: non_blank(self.customer.company),
            },
            total: self.total,
            deposit: pack.deposit(),
            notes: non_blank(self.notes),
            status: "pending_payment".to_string(),
            created_at,
        })
    }
}

/// Order submission result
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OrderResponse {
    pub success: bool,
    /// False when persistence is disabled
    pub saved: bool,
    pub id: Uuid,
    pub order_number: String,
    pub deposit: f64,
    pub next_step: String,
    pub message: String,
}

/// Role of a message in the plain chat endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Plain chat request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ApiChatMessage>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Content of the final message, whatever its role, if it has any text
    pub fn last_message(&self) -> Option<&str> {
        self.messages
            .last()
            .map(|m| m.content.trim())
            .filter(|content| !content.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    pub used_llm: bool,
    pub provider: String,
}

/// Chat request where the caller may bring an API key
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OpenAiChatRequest {
    pub message: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OpenAiChatResponse {
    pub reply: String,
    pub model: String,
    pub provider: String,
    pub success: bool,
}

/// Élise chat request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EliseChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EliseChatResponse {
    pub reply: String,
    pub model: String,
    pub provider: String,
    pub personality: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

/// Selectable model
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ModelListResponse {
    pub models: Vec<ModelInfo>,
    pub default: String,
}

/// API key to check against the provider
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ApiKeyConfigRequest {
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiKeyConfigResponse {
    pub success: bool,
    pub message: String,
    pub test_response: String,
}
