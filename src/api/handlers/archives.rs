use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{ApiError, ResetResponse};
use crate::database;
use crate::services::reset::WeeklyResetService;
use super::{authenticate, AppState};

pub async fn list_weeks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match database::archives::list_weeks(&mut conn) {
        Ok(weeks) => Json(weeks).into_response(),
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn week_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(week_start): Path<String>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match database::archives::list_week_leaderboard(&mut conn, &week_start) {
        Ok(rows) if rows.is_empty() => ApiError::not_found(format!(
            "No archived data found for week starting {}",
            week_start
        ))
        .into_response(),
        Ok(rows) => Json(rows).into_response(),
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}

/// Archive the current week and zero the live counters, on demand.
/// Requires a valid bearer token.
pub async fn manual_reset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    let player = match authenticate(&mut conn, &headers) {
        Ok(player) => player,
        Err(e) => return e.into_response(),
    };
    drop(conn);

    let service = WeeklyResetService::new(state.pool.clone());
    match service.perform_weekly_reset() {
        Ok(outcome) => Json(ResetResponse {
            success: true,
            message: format!("Weekly reset completed successfully by {}", player.name),
            archived_players: outcome.archived_players,
            reset_players: outcome.reset_players,
        })
        .into_response(),
        Err(e) => ApiError::internal(format!("Failed to perform reset: {}", e)).into_response(),
    }
}
