use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{WeekInfo, WeeklyArchive};

/// Write one player's snapshot row for an archived week
#[allow(clippy::too_many_arguments)]
pub fn insert_archive_row(
    conn: &mut DbConn,
    week_start: &str,
    week_end: &str,
    winner_id: i64,
    player_id: i64,
    player_name: &str,
    wins: i32,
    losses: i32,
    points: i32,
    rank: i32,
) -> Result<()> {
    conn.execute(
        "INSERT INTO weekly_archives
            (week_start, week_end, winner_id, player_id, player_name, wins, losses, points, rank)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            week_start,
            week_end,
            winner_id,
            player_id,
            player_name,
            wins,
            losses,
            points,
            rank
        ],
    )
    .context("Failed to insert weekly archive row")?;

    Ok(())
}

/// Distinct archived weeks, newest first, with the winner's current name.
/// A winner that has since been deleted renders as "Unknown".
pub fn list_weeks(conn: &mut DbConn) -> Result<Vec<WeekInfo>> {
    let sql = "
        SELECT
            a.week_start,
            a.week_end,
            a.winner_id,
            COALESCE(p.name, 'Unknown') AS winner_name,
            COUNT(a.id) AS total_players
        FROM weekly_archives a
        LEFT JOIN players p ON p.id = a.winner_id
        GROUP BY a.week_start, a.week_end, a.winner_id
        ORDER BY a.week_start DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(WeekInfo {
                week_start: row.get(0)?,
                week_end: row.get(1)?,
                winner_id: row.get(2)?,
                winner_name: row.get(3)?,
                total_players: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Full leaderboard for one archived week, best rank first.
/// Empty when the week was never archived.
pub fn list_week_leaderboard(conn: &mut DbConn, week_start: &str) -> Result<Vec<WeeklyArchive>> {
    let sql = "
        SELECT id, week_start, week_end, winner_id, player_id, player_name,
               wins, losses, points, rank
        FROM weekly_archives
        WHERE week_start = ?1
        ORDER BY rank ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![week_start], parse_archive_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_archive_row(row: &rusqlite::Row) -> rusqlite::Result<WeeklyArchive> {
    Ok(WeeklyArchive {
        id: row.get(0)?,
        week_start: row.get(1)?,
        week_end: row.get(2)?,
        winner_id: row.get(3)?,
        player_id: row.get(4)?,
        player_name: row.get(5)?,
        wins: row.get(6)?,
        losses: row.get(7)?,
        points: row.get(8)?,
        rank: row.get(9)?,
    })
}
