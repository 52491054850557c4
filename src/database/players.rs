use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DbConn;
use crate::domain::Player;

const PLAYER_COLUMNS: &str = "id, name, email, wins, losses, points";

pub fn insert_player(conn: &mut DbConn, name: &str, email: Option<&str>) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, email) VALUES (?1, ?2) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(&sql, params![name, email], parse_player_row)
        .context("Failed to insert new player")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn find_by_email(conn: &mut DbConn, email: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE email = ?1");

    conn.query_row(&sql, params![email], parse_player_row)
        .optional()
        .context("Failed to query player by email")
}

pub fn email_exists(conn: &mut DbConn, email: &str) -> Result<bool> {
    Ok(find_by_email(conn, email)?.is_some())
}

/// True when an insert failed because the UNIQUE email constraint fired.
/// Concurrent inserts can slip past an `email_exists` pre-check, so
/// callers map this to the duplicate-email response instead of a 500.
pub fn is_duplicate_email(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Players ordered by lowercase name, optionally filtered by a name
/// substring. The name ordering keeps the listing deterministic.
pub fn list_all(conn: &mut DbConn, name_filter: Option<&str>) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM players
         WHERE ?1 IS NULL OR instr(lower(name), lower(?1)) > 0
         ORDER BY lower(name)"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![name_filter], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Players in archival order: points descending, wins as tie-break
pub fn list_ranked_for_archive(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM players ORDER BY points DESC, wins DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Apply one finished match to the live counters: the winner gains a win
/// and `win_points`, the loser a loss.
pub fn record_match_result(
    conn: &Connection,
    winner_id: i64,
    loser_id: i64,
    win_points: i32,
) -> Result<()> {
    conn.execute(
        "UPDATE players SET wins = wins + 1, points = points + ?2 WHERE id = ?1",
        params![winner_id, win_points],
    )
    .context("Failed to update winner stats")?;

    conn.execute(
        "UPDATE players SET losses = losses + 1 WHERE id = ?1",
        params![loser_id],
    )
    .context("Failed to update loser stats")?;

    Ok(())
}

/// Zero every player's live counters. Returns the number of players reset.
pub fn reset_all_stats(conn: &mut DbConn) -> Result<usize> {
    conn.execute("UPDATE players SET wins = 0, losses = 0, points = 0", [])
        .context("Failed to reset player stats")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        wins: row.get(3)?,
        losses: row.get(4)?,
        points: row.get(5)?,
    })
}
