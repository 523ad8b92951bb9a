//! HTTP request handlers: banner, health, contact, order and KPI

use crate::api::models::{
    ContactPayload, ContactResponse, HealthResponse, KpiResponse, OrderPayload, OrderResponse,
    RootResponse,
};
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Window for the `recent_leads` counter
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "WebBoost Martinique API - Élise".to_string(),
        status: "active".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await.map_err(|e| match e {
        AppError::StoreUnavailable(message) => AppError::StoreUnavailable(message),
        other => AppError::StoreUnavailable(other.to_string()),
    })?;

    let kind = state.store.kind();
    let database = if kind == "disabled" { "disabled" } else { "connected" };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        database: database.to_string(),
        storage: kind.to_string(),
        llm_configured: state.llm.is_configured(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Record a contact-form lead
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Leads",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Lead recorded", body = ContactResponse),
        (status = 400, description = "Consent missing"),
        (status = 422, description = "Invalid field"),
        (status = 429, description = "Too many submissions")
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    payload.validate()?;

    let lead = payload.into_lead();
    state.store.insert_lead(&lead).await.map_err(|e| {
        error!(id = %lead.id, error = %e, "Failed to save contact");
        AppError::Storage(format!("Failed to save contact: {}", e))
    })?;

    info!(
        id = %lead.id,
        pack = ?lead.pack,
        source = %lead.source,
        "Contact submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            saved: state.store.kind() != "disabled",
            id: lead.id,
            message: "Merci ! Élise vous contactera sous 24h ouvrées.".to_string(),
        }),
    ))
}

/// Record a pack order awaiting payment
#[utoipa::path(
    post,
    path = "/api/order",
    tag = "Leads",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order recorded", body = OrderResponse),
        (status = 422, description = "Invalid field"),
        (status = 429, description = "Too many submissions")
    )
)]
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OrderPayload>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    payload.validate()?;

    let order = payload.into_order()?;
    state.store.insert_order(&order).await.map_err(|e| {
        error!(order_number = %order.order_number, error = %e, "Failed to save order");
        AppError::Storage(format!("Failed to save order: {}", e))
    })?;

    info!(
        id = %order.id,
        order_number = %order.order_number,
        pack = ?order.pack,
        deposit = order.deposit,
        "Order created"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            saved: state.store.kind() != "disabled",
            id: order.id,
            order_number: order.order_number,
            deposit: order.deposit,
            next_step: "payment".to_string(),
            message: "Commande créée avec succès".to_string(),
        }),
    ))
}

/// Lead, chat and order counters
#[utoipa::path(
    get,
    path = "/api/kpi",
    tag = "Leads",
    responses((status = 200, description = "Current counters", body = KpiResponse))
)]
pub async fn kpi(State(state): State<Arc<AppState>>) -> Result<Json<KpiResponse>, AppError> {
    let now = Utc::now();
    let counts = state
        .store
        .counts(now - Duration::days(RECENT_WINDOW_DAYS))
        .await
        .map_err(|e| AppError::Storage(format!("Failed to fetch KPI: {}", e)))?;

    Ok(Json(KpiResponse {
        total_leads: counts.total_leads,
        total_chats: counts.total_chats,
        total_orders: counts.total_orders,
        recent_leads: counts.recent_leads,
        timestamp: now,
    }))
}
