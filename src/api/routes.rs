use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    archives::{list_weeks, manual_reset, week_leaderboard},
    auth::{login, me, register},
    health::healthz,
    matches::{create_match, list_matches},
    players::{create_player, list_players},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/matches", get(list_matches).post(create_match))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/users/me", get(me))
        .route("/api/archives/weeks", get(list_weeks))
        .route(
            "/api/archives/weeks/:week_start/leaderboard",
            get(week_leaderboard),
        )
        .route("/api/archives/reset", post(manual_reset))
        .with_state(state)
}
