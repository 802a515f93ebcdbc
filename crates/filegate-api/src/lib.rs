/// Filegate API - HTTP surface of the upload service
///
/// Exposes the extension catalog administration and the validated upload
/// endpoint over a JSON API.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Headroom for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the application router
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let body_limit = ctx.uploads.max_upload_size() + MULTIPART_OVERHEAD_BYTES;

    let api_router = Router::new()
        // Config endpoint
        .route("/config", get(api::config::get_config))
        // Extension catalog endpoints
        .route("/extensions/fixed", get(api::extensions::list_fixed))
        .route(
            "/extensions/fixed/{id}/status",
            put(api::extensions::update_fixed_status),
        )
        .route(
            "/extensions/custom",
            get(api::extensions::list_custom).post(api::extensions::add_custom),
        )
        .route(
            "/extensions/custom/{id}",
            delete(api::extensions::delete_custom),
        )
        // File endpoints
        .route("/files", get(api::files::list))
        .route("/files/upload", post(api::files::upload))
        .route("/files/{filename}", delete(api::files::delete));

    Router::new()
        .route("/health", get(api::health::handler))
        .nest("/api", api_router)
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&ctx),
            middleware::logging_middleware,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(ctx)
}
