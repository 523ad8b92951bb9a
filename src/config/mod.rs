//! Configuration module

pub mod settings;

pub use settings::{
    is_usable_api_key, CorsConfig, LlmConfig, LoggingConfig, RateLimitConfig, ServerConfig,
    Settings, StorageBackend, StorageConfig, PLACEHOLDER_API_KEY,
};
