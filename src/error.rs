//! Error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Le consentement RGPD est requis")]
    ConsentRequired,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Aucune clé API OpenAI fournie. Veuillez fournir votre clé API OpenAI ou configurer OPENAI_API_KEY dans l'environnement.")]
    MissingApiKey,

    #[error("Clé API OpenAI invalide. Vérifiez votre clé API.")]
    InvalidApiKey,

    #[error("Quota OpenAI dépassé. Vérifiez votre compte OpenAI.")]
    QuotaExceeded,

    #[error("Trop de requêtes, réessayez dans quelques minutes.")]
    RateLimited,

    #[error("Erreur OpenAI: {0}")]
    Upstream(String),

    #[error("Service LLM non disponible")]
    LlmUnavailable,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database connection failed: {0}")]
    StoreUnavailable(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConsentRequired | AppError::BadRequest(_) | AppError::MissingApiKey => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited | AppError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::StoreUnavailable(_) | AppError::LlmUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Upstream(_)
            | AppError::Storage(_)
            | AppError::HttpClient(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConsentRequired => "consent_required",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::MissingApiKey => "missing_api_key",
            AppError::InvalidApiKey => "invalid_api_key",
            AppError::QuotaExceeded => "quota_exceeded",
            AppError::RateLimited => "rate_limited",
            AppError::Upstream(_) => "upstream_error",
            AppError::LlmUnavailable => "llm_unavailable",
            AppError::Storage(_) => "storage_error",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::HttpClient(_) => "http_client_error",
            AppError::Io(_) => "io_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.code(),
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
