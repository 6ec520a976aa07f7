use crate::error::{ApiError, ErrorResponse};
use crate::models::{self, DeleteResponse};
use crate::routes;
use crate::state::AppState;
use crate::store;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /api/vendors/{id} handler - Remove a vendor
///
/// Removes every vendor whose `id` matches. The file is only rewritten when
/// something was removed.
#[utoipa::path(
    delete,
    path = routes::VENDOR_ITEM,
    params(
        ("id" = String, Path, description = "Vendor identifier")
    ),
    responses(
        (status = 200, description = "Vendor deleted", body = DeleteResponse),
        (status = 404, description = "Vendor not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let Some(id) = models::parse_id(&id_str) else {
        tracing::info!("Vendor not found with id: {}", id_str);
        return Err(ApiError::VendorNotFound(id_str));
    };

    match state
        .store
        .modify(|vendors| store::delete(vendors, id))
        .await?
    {
        Some(removed) => {
            tracing::info!("Successfully deleted {} vendor(s) with id: {}", removed, id);
            Ok((StatusCode::OK, Json(DeleteResponse::deleted())))
        }
        None => {
            tracing::info!("Vendor not found with id: {}", id);
            Err(ApiError::VendorNotFound(id_str))
        }
    }
}
