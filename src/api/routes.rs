//! HTTP route definitions

use crate::api::models::*;
use crate::api::{chat_handlers, handlers};
use crate::config::CorsConfig;
use crate::middleware::{rate_limit, SubmissionLimiter};
use crate::store::Pack;
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "WebBoost Martinique API",
        description = "Lead capture, pack orders, KPI counters and the Élise chatbot.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server")
    ),
    paths(
        handlers::root,
        handlers::health_check,
        handlers::submit_contact,
        handlers::submit_order,
        handlers::kpi,
        chat_handlers::chat,
        chat_handlers::openai_chat,
        chat_handlers::elise_chat,
        chat_handlers::list_models,
        chat_handlers::configure_openai_key,
    ),
    components(schemas(
        Pack,
        ContactPayload,
        ContactResponse,
        CustomerPayload,
        OrderPayload,
        OrderResponse,
        RootResponse,
        HealthResponse,
        KpiResponse,
        ChatRole,
        ApiChatMessage,
        ChatRequest,
        ChatResponse,
        OpenAiChatRequest,
        OpenAiChatResponse,
        EliseChatRequest,
        EliseChatResponse,
        ModelInfo,
        ModelListResponse,
        ApiKeyConfigRequest,
        ApiKeyConfigResponse,
    )),
    tags(
        (name = "Leads", description = "Contact, order and KPI endpoints"),
        (name = "Chat", description = "Chat endpoints"),
        (name = "Models", description = "Model catalogue and key checks"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    let settings = &state.settings;

    // Routes that write records go through the rate limiter
    let submissions = Router::new()
        .route("/contact", post(handlers::submit_contact))
        .route("/order", post(handlers::submit_order))
        .route("/chat", post(chat_handlers::chat))
        .route("/chat/openai", post(chat_handlers::openai_chat))
        .route("/chat/elise", post(chat_handlers::elise_chat));

    let submissions = match SubmissionLimiter::from_config(&settings.rate_limit) {
        Some(limiter) => {
            limiter.spawn_pruner(Duration::from_secs(settings.rate_limit.prune_interval_secs));
            submissions.layer(middleware::from_fn_with_state(limiter, rate_limit))
        }
        None => submissions,
    };

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/kpi", get(handlers::kpi))
        .route("/models/openai", get(chat_handlers::list_models))
        .route("/config/openai-key", post(chat_handlers::configure_openai_key))
        .merge(submissions);

    let router = Router::new().route("/", get(handlers::root));
    let prefix = settings.route_prefix();
    let router = if prefix.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(prefix, api_routes)
    };

    let cors = cors_layer(&settings.cors);
    let timeout = TimeoutLayer::new(Duration::from_secs(settings.server.request_timeout_secs));

    router
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state.clone())
        .layer(cors)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
}
