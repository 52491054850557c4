use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{ApiError, MatchIn};
use crate::database;
use super::AppState;

pub async fn list_matches(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match database::matches::list_all(&mut conn) {
        Ok(matches) => Json(matches).into_response(),
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MatchIn>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    if payload.home_id == payload.away_id {
        return ApiError::bad_request("home_id must differ from away_id").into_response();
    }

    if payload.games.iter().any(|g| g.home < 0 || g.away < 0) {
        return ApiError::bad_request("Game scores must be non-negative.").into_response();
    }

    let both_exist = database::players::find_by_id(&mut conn, payload.home_id)
        .and_then(|home| {
            database::players::find_by_id(&mut conn, payload.away_id)
                .map(|away| home.is_some() && away.is_some())
        });
    match both_exist {
        Ok(true) => {}
        Ok(false) => {
            return ApiError::bad_request(
                "Both home_id and away_id must refer to existing players.",
            )
            .into_response()
        }
        Err(e) => return ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }

    match database::matches::create_scored_match(
        &mut conn,
        &payload.played_at,
        payload.home_id,
        payload.away_id,
        &payload.games,
        state.config.scoring.win_points,
    ) {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(e) => ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }
}
