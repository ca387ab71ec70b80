//! API router.
//!
//! Returns a `Router` with every route under `/api/`, wrapped in request
//! tracing and a permissive CORS layer.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::pipeline::CasePipeline;

pub fn api_router(pipeline: Arc<CasePipeline>) -> Router {
    build_router(ApiContext::new(pipeline))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/ping", get(endpoints::health::ping))
        .route("/cases", post(endpoints::cases::save))
        .route("/cases/tips", post(endpoints::cases::tips))
        .route("/cases/summary", post(endpoints::cases::summary))
        .route("/cases/summarize", post(endpoints::cases::summarize))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
