use crate::error::{ApiError, ErrorResponse};
use crate::models::Vendor;
use crate::routes;
use crate::state::AppState;
use crate::store;
use anyhow::Context;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{Map, Value as JsonValue};

/// POST /api/vendors handler - Add a vendor
///
/// Any JSON object is accepted. The stored record gets a generated `id` and
/// an `added` timestamp.
#[utoipa::path(
    post,
    path = routes::VENDORS,
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Vendor created", body = serde_json::Value),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, JsonValue>>,
) -> Result<(StatusCode, Json<Vendor>), ApiError> {
    let now = Utc::now();

    let created = state
        .store
        .modify(|vendors| Some(store::create(vendors, fields, now)))
        .await?
        .context("Vendor was not created")?;

    tracing::info!("Successfully created vendor with id: {:?}", created.id());
    Ok((StatusCode::OK, Json(created)))
}
