use axum::http::HeaderMap;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::api::models::ApiError;
use crate::config::settings::AppConfig;
use crate::database::{tokens, DbConn};
use crate::domain::Player;

pub mod archives;
pub mod auth;
pub mod health;
pub mod matches;
pub mod players;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct PlayerParams {
    pub q: Option<String>,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the request's bearer token to a player, or fail with 401
pub fn authenticate(conn: &mut DbConn, headers: &HeaderMap) -> Result<Player, ApiError> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    match tokens::find_player_by_token(conn, token) {
        Ok(Some(player)) => Ok(player),
        Ok(None) => Err(ApiError::unauthorized("Invalid or expired token")),
        Err(e) => Err(ApiError::internal(format!("Query Error: {}", e))),
    }
}
