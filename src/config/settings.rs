//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key value shipped in sample `.env` files; never a real credential.
pub const PLACEHOLDER_API_KEY: &str = "sk-votre-cle-openai-ici";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix under which every API route is nested
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_route_prefix() -> String {
    "/api".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CorsConfig {
    /// Allowed origins; empty or `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Rate limiting configuration for submission routes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_rpm")]
    pub requests_per_minute: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
    /// How often idle client buckets are dropped
    #[serde(default = "default_prune_interval")]
    pub prune_interval_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_rpm() -> u32 {
    20
}

fn default_burst() -> u32 {
    10
}

fn default_prune_interval() -> u64 {
    60
}

/// Storage backend kind
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Disabled,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Disabled => write!(f, "disabled"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory holding the JSON-lines files of the `file` backend
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "./data".to_string()
}

/// Upstream chat-completion provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Explicit key; takes precedence over `api_key_env`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_penalty")]
    pub frequency_penalty: f32,
    #[serde(default = "default_penalty")]
    pub presence_penalty: f32,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_llm_timeout() -> u64 {
    30000
}

fn default_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    0.7
}

fn default_penalty() -> f32 {
    0.1
}

impl LlmConfig {
    /// Resolve the provider key from the explicit value or the environment.
    ///
    /// Blank values and the sample placeholder count as "no key".
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| is_usable_api_key(key))
    }
}

/// Whether a key looks like something worth sending upstream
pub fn is_usable_api_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/webboost.yaml")
    }

    /// Load settings from a specific configuration file (YAML or TOML)
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "yaml" || ext == "yml") {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("server.route_prefix", default_route_prefix())?
            .set_default("server.request_timeout_secs", default_request_timeout())?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("rate_limit.enabled", true)?
            .set_default("rate_limit.requests_per_minute", default_rpm())?
            .set_default("rate_limit.burst_size", default_burst())?
            .set_default("rate_limit.prune_interval_secs", default_prune_interval())?
            .set_default("storage.backend", "memory")?
            .set_default("storage.path", default_storage_path())?
            .set_default("llm.base_url", default_llm_base_url())?
            .set_default("llm.model", default_llm_model())?
            .set_default("llm.api_key_env", default_api_key_env())?
            .set_default("llm.timeout_ms", default_llm_timeout())?
            .set_default("llm.max_tokens", default_max_tokens())?
            .set_default("llm.temperature", default_temperature() as f64)?
            .set_default("llm.frequency_penalty", default_penalty() as f64)?
            .set_default("llm.presence_penalty", default_penalty() as f64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEBBOOST")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        if !self.server.route_prefix.starts_with('/') {
            return Err(invalid(format!(
                "Route prefix '{}' must start with '/'",
                self.server.route_prefix
            )));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.requests_per_minute == 0 || self.rate_limit.burst_size == 0)
        {
            return Err(invalid("Rate limit quota and burst must be greater than 0"));
        }

        if self.rate_limit.enabled && self.rate_limit.prune_interval_secs == 0 {
            return Err(invalid("Rate limit prune interval cannot be 0"));
        }

        if self.llm.timeout_ms == 0 {
            return Err(invalid("LLM timeout cannot be 0"));
        }

        if self.storage.backend == StorageBackend::File && self.storage.path.trim().is_empty() {
            return Err(invalid("File storage requires a path"));
        }

        Ok(())
    }

    /// Route prefix without a trailing slash (`/` collapses to empty)
    pub fn route_prefix(&self) -> &str {
        self.server.route_prefix.trim_end_matches('/')
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                route_prefix: default_route_prefix(),
                request_timeout_secs: default_request_timeout(),
            },
            cors: CorsConfig::default(),
            rate_limit: RateLimitConfig {
                enabled: true,
                requests_per_minute: default_rpm(),
                burst_size: default_burst(),
                prune_interval_secs: default_prune_interval(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                path: default_storage_path(),
            },
            llm: LlmConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_ms: default_llm_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            frequency_penalty: default_penalty(),
            presence_penalty: default_penalty(),
        }
    }
}
