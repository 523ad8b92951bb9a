//! WebBoost API
//!
//! Marketing backend for WebBoost Martinique: contact leads, pack orders, KPI
//! counters and the Élise chatbot, which answers through an OpenAI-compatible
//! provider or falls back to canned French replies.

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod llm;
pub mod middleware;
pub mod store;

pub use error::{AppError, Result};

use std::sync::Arc;
use tracing::warn;

use config::Settings;
use llm::{ChatBackend, CompletionParams, OpenAiBackend};
use store::{ChatLog, Store};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<dyn Store>,
    pub llm: Arc<dyn ChatBackend>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<dyn Store>, llm: Arc<dyn ChatBackend>) -> Arc<Self> {
        Arc::new(Self {
            settings,
            store,
            llm,
        })
    }

    /// Build the store and LLM backend described by the settings
    pub async fn from_settings(settings: Settings) -> Result<Arc<Self>> {
        let store = store::create_store(&settings.storage).await?;
        let llm: Arc<dyn ChatBackend> = Arc::new(OpenAiBackend::new(&settings.llm)?);
        Ok(Self::new(settings, store, llm))
    }

    /// Sampling parameters from configuration
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams::from_config(&self.settings.llm).with_model(self.llm.default_model())
    }

    /// Persist a chat exchange; failures are logged and swallowed
    pub async fn record_chat(&self, log: ChatLog) {
        if let Err(e) = self.store.insert_chat(&log).await {
            warn!(id = %log.id, error = %e, "Failed to store chat log");
        }
    }
}
