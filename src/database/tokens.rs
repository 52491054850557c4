use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::Player;

pub fn insert_token(
    conn: &mut DbConn,
    token: &str,
    player_id: i64,
    created_at: NaiveDateTime,
) -> Result<()> {
    conn.execute(
        "INSERT INTO auth_tokens (token, player_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, player_id, created_at],
    )
    .context("Failed to insert auth token")?;

    Ok(())
}

/// Resolve a bearer token to its player, or None for an unknown token
pub fn find_player_by_token(conn: &mut DbConn, token: &str) -> Result<Option<Player>> {
    let sql = "
        SELECT p.id, p.name, p.email, p.wins, p.losses, p.points
        FROM auth_tokens t
        JOIN players p ON p.id = t.player_id
        WHERE t.token = ?1
    ";

    conn.query_row(sql, params![token], |row| {
        Ok(Player {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            wins: row.get(3)?,
            losses: row.get(4)?,
            points: row.get(5)?,
        })
    })
    .optional()
    .context("Failed to resolve auth token")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{self, players, setup};

    #[test]
    fn token_resolves_to_its_player() {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();

        let player = players::insert_player(&mut conn, "Ada", None).unwrap();
        let created_at = chrono::Local::now().naive_local();
        insert_token(&mut conn, "tok-1", player.id, created_at).unwrap();

        let resolved = find_player_by_token(&mut conn, "tok-1").unwrap().unwrap();
        assert_eq!(resolved.id, player.id);

        assert!(find_player_by_token(&mut conn, "tok-2").unwrap().is_none());
    }
}
