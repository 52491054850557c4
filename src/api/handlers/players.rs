use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{ApiError, PlayerIn};
use crate::database;
use super::{AppState, PlayerParams};

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerParams>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match database::players::list_all(&mut conn, params.q.as_deref()) {
        Ok(players) => Json(players).into_response(),
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlayerIn>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    if let Some(email) = payload.email.as_deref() {
        match database::players::email_exists(&mut conn, email) {
            Ok(true) => {
                return ApiError::bad_request("A player with this email already exists.")
                    .into_response()
            }
            Ok(false) => {}
            Err(e) => return ApiError::internal(format!("Query Error: {}", e)).into_response(),
        }
    }

    // The pre-check races with concurrent inserts; the UNIQUE constraint
    // is the authority, so its violation maps to the same 400
    match database::players::insert_player(&mut conn, &payload.name, payload.email.as_deref()) {
        Ok(player) => (StatusCode::CREATED, Json(player)).into_response(),
        Err(e) if database::players::is_duplicate_email(&e) => {
            ApiError::bad_request("A player with this email already exists.").into_response()
        }
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}
