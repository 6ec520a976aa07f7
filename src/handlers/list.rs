use crate::models::Vendor;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/vendors handler - List all vendors
///
/// Returns the whole collection in storage order. A file that cannot be read
/// or parsed is served as an empty list instead of an error.
#[utoipa::path(
    get,
    path = routes::VENDORS,
    responses(
        (
            status = 200,
            description = "All vendor records in storage order",
            body = Vec<serde_json::Value>
        )
    ),
    tag = "vendors"
)]
pub async fn list_handler(State(state): State<AppState>) -> (StatusCode, Json<Vec<Vendor>>) {
    let vendors = match state.store.load().await {
        Ok(vendors) => vendors,
        Err(e) => {
            tracing::warn!("Failed to read vendors, serving an empty list: {:#}", e);
            Vec::new()
        }
    };

    tracing::info!("Listed {} vendors", vendors.len());
    (StatusCode::OK, Json(vendors))
}
