use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use rand::RngCore;
use std::sync::Arc;

use crate::api::models::{ApiError, AuthIn, AuthResponse};
use crate::database::{self, DbConn};
use crate::domain::Player;
use super::{authenticate, AppState};

/// Register a new player and hand back a bearer token with the profile
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthIn>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match database::players::email_exists(&mut conn, &payload.email) {
        Ok(true) => {
            return ApiError::bad_request("A player with this email already exists.")
                .into_response()
        }
        Ok(false) => {}
        Err(e) => return ApiError::internal(format!("Query Error: {}", e)).into_response(),
    }

    let player = match database::players::insert_player(
        &mut conn,
        &payload.name,
        Some(&payload.email),
    ) {
        Ok(player) => player,
        // Backstop for inserts racing past the pre-check
        Err(e) if database::players::is_duplicate_email(&e) => {
            return ApiError::bad_request("A player with this email already exists.")
                .into_response()
        }
        Err(e) => return ApiError::internal(format!("Query Error: {}", e)).into_response(),
    };

    match issue_token(&mut conn, player, state.config.auth.token_bytes) {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Log an existing player in by email, issuing a fresh token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthIn>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    let player = match database::players::find_by_email(&mut conn, &payload.email) {
        Ok(Some(player)) => player,
        Ok(None) => {
            return ApiError::unauthorized("No player registered with this email.")
                .into_response()
        }
        Err(e) => return ApiError::internal(format!("Query Error: {}", e)).into_response(),
    };

    match issue_token(&mut conn, player, state.config.auth.token_bytes) {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return ApiError::internal("DB Connection Error").into_response(),
    };

    match authenticate(&mut conn, &headers) {
        Ok(player) => Json(player).into_response(),
        Err(e) => e.into_response(),
    }
}

fn issue_token(
    conn: &mut DbConn,
    player: Player,
    token_bytes: usize,
) -> Result<AuthResponse, ApiError> {
    let token = generate_token(token_bytes);
    let created_at = chrono::Local::now().naive_local();

    database::tokens::insert_token(conn, &token, player.id, created_at)
        .map_err(|e| ApiError::internal(format!("Query Error: {}", e)))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        player,
    })
}

fn generate_token(token_bytes: usize) -> String {
    let mut bytes = vec![0u8; token_bytes];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_hex_of_requested_length() {
        let token = generate_token(32);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }
}
