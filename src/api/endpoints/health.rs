use axum::Json;
use serde::Serialize;

use crate::config::{APP_NAME, APP_VERSION};

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
}

/// `GET /api/ping`: liveness check.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        app: APP_NAME,
        version: APP_VERSION,
    })
}
