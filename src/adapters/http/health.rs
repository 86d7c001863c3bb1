//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub response: &'static str,
}

/// GET /ping - `{"response": "pong"}`
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { response: "pong" })
}
