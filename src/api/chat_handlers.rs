//! Chat handlers: plain, key-supplied and Élise persona variants

use crate::api::models::{
    ApiKeyConfigRequest, ApiKeyConfigResponse, ChatRequest, ChatResponse, EliseChatRequest,
    EliseChatResponse, ModelInfo, ModelListResponse, OpenAiChatRequest, OpenAiChatResponse,
};
use crate::assistant::{persona, select_reply};
use crate::config::is_usable_api_key;
use crate::error::{AppError, Result};
use crate::llm::{complete, ChatBackend, CompletionParams, OPENAI_MODELS};
use crate::store::ChatLog;
use crate::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Temperature of the plain chat endpoint when the caller sends none
pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.3;

const FALLBACK_MODEL: &str = "fallback";

/// Where a reply came from
struct Answer {
    reply: String,
    model: String,
    provider: String,
    used_llm: bool,
}

impl Answer {
    fn local(message: &str, provider: &str) -> Self {
        Self {
            reply: select_reply(message).to_string(),
            model: FALLBACK_MODEL.to_string(),
            provider: provider.to_string(),
            used_llm: false,
        }
    }
}

/// Ask the configured provider, falling back to the keyword selector
async fn answer_with_fallback(
    state: &AppState,
    system_prompt: &str,
    message: &str,
    params: &CompletionParams,
    fallback_provider: &str,
) -> Answer {
    if !state.llm.is_configured() {
        return Answer::local(message, fallback_provider);
    }

    match complete(state.llm.as_ref(), system_prompt, message, params).await {
        Ok(reply) => Answer {
            reply,
            model: params.model.clone(),
            provider: state.llm.name().to_string(),
            used_llm: true,
        },
        Err(e) => {
            warn!(error = %e, "LLM call failed, using local reply");
            Answer::local(message, fallback_provider)
        }
    }
}

fn required_message(message: &str) -> Result<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message manquant".to_string()));
    }
    Ok(message)
}

/// Transport failures are reported like any other provider failure
fn upstream(err: AppError) -> AppError {
    match err {
        AppError::HttpClient(e) => AppError::Upstream(e.to_string()),
        other => other,
    }
}

/// Plain chat with keyword fallback
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply from the LLM or the local selector", body = ChatResponse),
        (status = 400, description = "Last message is empty")
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = request
        .last_message()
        .ok_or_else(|| AppError::BadRequest("Message manquant".to_string()))?;

    let params = state
        .completion_params()
        .with_temperature(request.temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE));

    let answer =
        answer_with_fallback(&state, persona::ASSISTANT_PROMPT, message, &params, "local").await;

    info!(
        used_llm = answer.used_llm,
        provider = %answer.provider,
        "Chat answered"
    );

    state
        .record_chat(ChatLog::new(
            message,
            answer.reply.as_str(),
            answer.model.as_str(),
            answer.provider.as_str(),
        ))
        .await;

    Ok(Json(ChatResponse {
        reply: answer.reply,
        used_llm: answer.used_llm,
        provider: if answer.used_llm {
            answer.provider
        } else {
            FALLBACK_MODEL.to_string()
        },
    }))
}

/// Chat through OpenAI with a caller-supplied or environment key
#[utoipa::path(
    post,
    path = "/api/chat/openai",
    tag = "Chat",
    request_body = OpenAiChatRequest,
    responses(
        (status = 200, description = "LLM reply", body = OpenAiChatResponse),
        (status = 400, description = "No key available or empty message"),
        (status = 401, description = "Key rejected by the provider"),
        (status = 429, description = "Provider quota exceeded"),
        (status = 500, description = "Provider error")
    )
)]
pub async fn openai_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OpenAiChatRequest>,
) -> Result<Json<OpenAiChatResponse>> {
    let message = required_message(&request.message)?;

    let (backend, key_source): (Arc<dyn ChatBackend>, &str) = match request
        .api_key
        .clone()
        .filter(|key| is_usable_api_key(key))
    {
        Some(key) => (state.llm.with_api_key(key), "provided"),
        None if state.llm.is_configured() => (state.llm.clone(), "environment"),
        None => return Err(AppError::MissingApiKey),
    };

    let model = request
        .model
        .clone()
        .unwrap_or_else(|| backend.default_model().to_string());
    let params = state.completion_params().with_model(model.clone());

    let reply = complete(backend.as_ref(), persona::CONCISE_ASSISTANT_PROMPT, message, &params)
        .await
        .map_err(upstream)?;

    info!(model = %model, key_source = key_source, "OpenAI chat answered");

    state
        .record_chat(
            ChatLog::new(message, reply.as_str(), model.as_str(), backend.name())
                .with_api_key_source(key_source),
        )
        .await;

    Ok(Json(OpenAiChatResponse {
        reply,
        model,
        provider: backend.name().to_string(),
        success: true,
    }))
}

/// Chat with the Élise persona; never fails on provider errors
#[utoipa::path(
    post,
    path = "/api/chat/elise",
    tag = "Chat",
    request_body = EliseChatRequest,
    responses(
        (status = 200, description = "Élise reply", body = EliseChatResponse),
        (status = 400, description = "Empty message")
    )
)]
pub async fn elise_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EliseChatRequest>,
) -> Result<Json<EliseChatResponse>> {
    let message = required_message(&request.message)?;
    let session_id = request
        .session_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut params = state.completion_params();
    if let Some(model) = request.model.clone() {
        params = params.with_model(model);
    }

    let answer =
        answer_with_fallback(&state, persona::ELISE_PERSONA, message, &params, "elise_local").await;

    info!(
        session_id = %session_id,
        used_llm = answer.used_llm,
        provider = %answer.provider,
        "Élise answered"
    );

    state
        .record_chat(ChatLog::new(
            message,
            answer.reply.as_str(),
            answer.model.as_str(),
            answer.provider.as_str(),
        ))
        .await;

    Ok(Json(EliseChatResponse {
        reply: answer.reply,
        model: answer.model,
        provider: answer.provider,
        personality: persona::ELISE_PERSONALITY.to_string(),
        session_id,
        timestamp: Utc::now(),
        success: true,
    }))
}

/// Models selectable on the key-supplied endpoint
#[utoipa::path(
    get,
    path = "/api/models/openai",
    tag = "Models",
    responses((status = 200, description = "Model catalogue", body = ModelListResponse))
)]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelListResponse> {
    let models = OPENAI_MODELS
        .iter()
        .map(|entry| ModelInfo {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
        })
        .collect();

    Json(ModelListResponse {
        models,
        default: state.llm.default_model().to_string(),
    })
}

/// Check an OpenAI key with a one-line completion
#[utoipa::path(
    post,
    path = "/api/config/openai-key",
    tag = "Models",
    request_body = ApiKeyConfigRequest,
    responses(
        (status = 200, description = "Key accepted", body = ApiKeyConfigResponse),
        (status = 400, description = "No key in request"),
        (status = 401, description = "Key rejected"),
        (status = 500, description = "Validation failed")
    )
)]
pub async fn configure_openai_key(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiKeyConfigRequest>,
) -> Result<Json<ApiKeyConfigResponse>> {
    let key = request
        .openai_api_key
        .filter(|key| is_usable_api_key(key))
        .ok_or_else(|| AppError::BadRequest("Clé API OpenAI requise".to_string()))?;

    let backend = state.llm.with_api_key(key);
    let params = state.completion_params();

    let test_response = complete(
        backend.as_ref(),
        persona::KEY_CHECK_PROMPT,
        persona::KEY_CHECK_MESSAGE,
        &params,
    )
    .await
    .map_err(|e| match e {
        AppError::InvalidApiKey => AppError::InvalidApiKey,
        AppError::Upstream(message) => AppError::Upstream(message),
        other => AppError::Upstream(other.to_string()),
    })?;

    info!("OpenAI key validated");

    Ok(Json(ApiKeyConfigResponse {
        success: true,
        message: "Clé API OpenAI validée avec succès".to_string(),
        test_response,
    }))
}
