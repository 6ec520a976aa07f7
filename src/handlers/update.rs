use crate::error::{ApiError, ErrorResponse};
use crate::models::{self, Vendor};
use crate::routes;
use crate::state::AppState;
use crate::store;
use axum::{extract::Path, extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{Map, Value as JsonValue};

/// PUT /api/vendors/{id} handler - Update a vendor
///
/// Shallow-merges the body onto the first vendor whose `id` matches and sets
/// `updated`. Fields missing from the body keep their stored values.
#[utoipa::path(
    put,
    path = routes::VENDOR_ITEM,
    params(
        ("id" = String, Path, description = "Vendor identifier")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Vendor updated", body = serde_json::Value),
        (status = 404, description = "Vendor not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(fields): Json<Map<String, JsonValue>>,
) -> Result<(StatusCode, Json<Vendor>), ApiError> {
    let Some(id) = models::parse_id(&id_str) else {
        tracing::info!("Vendor not found with id: {}", id_str);
        return Err(ApiError::VendorNotFound(id_str));
    };

    let now = Utc::now();
    match state
        .store
        .modify(|vendors| store::update(vendors, id, fields, now))
        .await?
    {
        Some(updated) => {
            tracing::info!("Successfully updated vendor with id: {}", id);
            Ok((StatusCode::OK, Json(updated)))
        }
        None => {
            tracing::info!("Vendor not found with id: {}", id);
            Err(ApiError::VendorNotFound(id_str))
        }
    }
}
