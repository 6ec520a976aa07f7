use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the complete Axum application:
/// - /api/vendors        (list, create)
/// - /api/vendors/{id}   (update, delete)
/// - /health
/// - /swagger-ui         (OpenAPI UI and document)
/// - everything else     (static frontend, falling back to index.html)
pub fn build_app(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.config.static_dir)
        .fallback(ServeFile::new(state.config.index_file()));

    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::VENDORS,
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            routes::VENDOR_ITEM,
            put(handlers::update_handler).delete(handlers::delete_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(frontend)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
