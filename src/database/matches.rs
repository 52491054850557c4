use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::connection::DbConn;
use crate::domain::{evaluate_match, GameScore, Match, Side};

/// Store a match and its per-game scores. Games keep their input order.
pub fn insert_match(
    conn: &Connection,
    played_at: &str,
    home_id: i64,
    away_id: i64,
    games: &[GameScore],
) -> Result<Match> {
    let match_id: i64 = conn
        .query_row(
            "INSERT INTO matches (played_at, home_id, away_id) VALUES (?1, ?2, ?3) RETURNING id",
            params![played_at, home_id, away_id],
            |row| row.get(0),
        )
        .context("Failed to insert match")?;

    for game in games {
        conn.execute(
            "INSERT INTO game_scores (match_id, home, away) VALUES (?1, ?2, ?3)",
            params![match_id, game.home, game.away],
        )
        .context("Failed to insert game score")?;
    }

    Ok(Match {
        id: match_id,
        played_at: played_at.to_string(),
        home_id,
        away_id,
        games: games.to_vec(),
    })
}

/// Store a match and apply its result to the players' counters inside one
/// transaction, so a failed insert leaves no partial match behind. A
/// gameless match resolves to an away win under the complement rule.
pub fn create_scored_match(
    conn: &mut DbConn,
    played_at: &str,
    home_id: i64,
    away_id: i64,
    games: &[GameScore],
    win_points: i32,
) -> Result<Match> {
    let tx = conn.transaction().context("Failed to open transaction")?;

    let stored = insert_match(&tx, played_at, home_id, away_id, games)?;
    let (winner_id, loser_id) = match evaluate_match(games).winner() {
        Side::Home => (home_id, away_id),
        Side::Away => (away_id, home_id),
    };
    super::players::record_match_result(&tx, winner_id, loser_id, win_points)?;

    tx.commit().context("Failed to commit match")?;
    Ok(stored)
}

/// All matches, most recent first (descending id, since ids are assigned
/// sequentially). Callers slice for display.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<Match>> {
    let sql = "SELECT id, played_at, home_id, away_id FROM matches ORDER BY id DESC";

    // The statement's borrow must end before the per-match game lookups
    let headers = {
        let mut stmt = conn.prepare(sql)?;
        stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut matches = Vec::with_capacity(headers.len());
    for (id, played_at, home_id, away_id) in headers {
        matches.push(Match {
            id,
            played_at,
            home_id,
            away_id,
            games: list_games(conn, id)?,
        });
    }

    Ok(matches)
}

fn list_games(conn: &mut DbConn, match_id: i64) -> Result<Vec<GameScore>> {
    let sql = "SELECT home, away FROM game_scores WHERE match_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![match_id], |row| {
            Ok(GameScore {
                home: row.get(0)?,
                away: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{self, players, setup};

    fn test_conn() -> (database::DbPool, DbConn) {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();
        (pool, conn)
    }

    fn game(home: i32, away: i32) -> GameScore {
        GameScore { home, away }
    }

    #[test]
    fn stored_match_round_trips_with_game_order() {
        let (_pool, mut conn) = test_conn();
        let home = players::insert_player(&mut conn, "Ada", None).unwrap();
        let away = players::insert_player(&mut conn, "Bob", None).unwrap();

        let games = vec![game(11, 7), game(9, 11), game(11, 3)];
        let stored = insert_match(&conn, "2025-01-06T19:30:00", home.id, away.id, &games).unwrap();

        let listed = list_all(&mut conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, stored.id);
        assert_eq!(listed[0].games, games);
    }

    #[test]
    fn listing_is_most_recent_first() {
        let (_pool, mut conn) = test_conn();
        let home = players::insert_player(&mut conn, "Ada", None).unwrap();
        let away = players::insert_player(&mut conn, "Bob", None).unwrap();

        let first =
            insert_match(&conn, "2025-01-06T10:00:00", home.id, away.id, &[game(11, 5)]).unwrap();
        let second =
            insert_match(&conn, "2025-01-06T11:00:00", home.id, away.id, &[game(4, 11)]).unwrap();

        let ids: Vec<i64> = list_all(&mut conn).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn match_without_games_is_stored_empty() {
        let (_pool, mut conn) = test_conn();
        let home = players::insert_player(&mut conn, "Ada", None).unwrap();
        let away = players::insert_player(&mut conn, "Bob", None).unwrap();

        insert_match(&conn, "2025-01-06T10:00:00", home.id, away.id, &[]).unwrap();

        let listed = list_all(&mut conn).unwrap();
        assert!(listed[0].games.is_empty());
    }

    #[test]
    fn scored_match_updates_both_players() {
        let (_pool, mut conn) = test_conn();
        let home = players::insert_player(&mut conn, "Ada", None).unwrap();
        let away = players::insert_player(&mut conn, "Bob", None).unwrap();

        create_scored_match(
            &mut conn,
            "2025-01-06T19:30:00",
            home.id,
            away.id,
            &[game(11, 4), game(11, 9)],
            3,
        )
        .unwrap();

        let home = players::find_by_id(&mut conn, home.id).unwrap().unwrap();
        let away = players::find_by_id(&mut conn, away.id).unwrap().unwrap();
        assert_eq!((home.wins, home.points), (1, 3));
        assert_eq!((away.losses, away.points), (1, 0));
    }

    #[test]
    fn failed_game_insert_rolls_back_the_match() {
        let (_pool, mut conn) = test_conn();
        let home = players::insert_player(&mut conn, "Ada", None).unwrap();
        let away = players::insert_player(&mut conn, "Bob", None).unwrap();

        // Second game violates the non-negative score constraint
        let result = create_scored_match(
            &mut conn,
            "2025-01-06T19:30:00",
            home.id,
            away.id,
            &[game(11, 7), game(-1, 5)],
            3,
        );
        assert!(result.is_err());

        assert!(list_all(&mut conn).unwrap().is_empty());
        let home = players::find_by_id(&mut conn, home.id).unwrap().unwrap();
        assert_eq!((home.wins, home.losses, home.points), (0, 0, 0));
    }
}
