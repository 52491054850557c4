use axum::response::{IntoResponse, Json};

use crate::api::models::HealthResponse;

pub async fn healthz() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        service: "pingpong-api".to_string(),
    })
}
