use anyhow::Result;
use chrono::Local;
use log::info;

use crate::database::{self, DbConn, DbPool};
use crate::domain::week;

/// Archives the current week's standings and zeroes the live counters.
/// Run by the scheduler every Sunday at midnight, by the reset endpoint,
/// and by the `reset` CLI command.
pub struct WeeklyResetService {
    pool: DbPool,
}

#[derive(Debug, Clone, Copy)]
pub struct ResetOutcome {
    pub archived_players: usize,
    pub reset_players: usize,
}

impl WeeklyResetService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn perform_weekly_reset(&self) -> Result<ResetOutcome> {
        let mut conn = database::get_connection(&self.pool)?;

        info!("Starting weekly reset at {}", Local::now());
        let archived_players = self.archive_current_week(&mut conn)?;
        let reset_players = self.reset_player_stats(&mut conn)?;
        info!(
            "Weekly reset completed: {} players archived, {} players reset",
            archived_players, reset_players
        );

        Ok(ResetOutcome {
            archived_players,
            reset_players,
        })
    }

    /// Snapshot every player into the archive for the current week.
    /// Skipped entirely when there is nothing to archive: no players, or
    /// a week with no recorded activity.
    fn archive_current_week(&self, conn: &mut DbConn) -> Result<usize> {
        let (week_start, week_end) = week::week_boundaries(Local::now().naive_local());
        let week_start = week::format_week_key(week_start);
        let week_end = week::format_week_key(week_end);

        let players = database::players::list_ranked_for_archive(conn)?;

        if players.is_empty() || players.iter().all(|p| p.points == 0 && p.wins == 0) {
            info!(
                "No activity this week ({} to {}), skipping archive",
                week_start, week_end
            );
            return Ok(0);
        }

        let winner_id = players[0].id;

        let mut archived = 0;
        for (idx, player) in players.iter().enumerate() {
            database::archives::insert_archive_row(
                conn,
                &week_start,
                &week_end,
                winner_id,
                player.id,
                &player.name,
                player.wins,
                player.losses,
                player.points,
                (idx + 1) as i32,
            )?;
            archived += 1;
        }

        info!(
            "Archived {} players for week {} to {}",
            archived, week_start, week_end
        );
        Ok(archived)
    }

    fn reset_player_stats(&self, conn: &mut DbConn) -> Result<usize> {
        let reset = database::players::reset_all_stats(conn)?;
        info!("Reset stats for {} players", reset);
        Ok(reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{players, setup};

    fn test_pool() -> DbPool {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();
        pool
    }

    #[test]
    fn reset_archives_ranked_snapshot_and_zeroes_stats() {
        let pool = test_pool();
        let mut conn = database::get_connection(&pool).unwrap();
        let ada = players::insert_player(&mut conn, "Ada", None).unwrap();
        let bob = players::insert_player(&mut conn, "Bob", None).unwrap();
        players::record_match_result(&conn, ada.id, bob.id, 3).unwrap();
        players::record_match_result(&conn, ada.id, bob.id, 3).unwrap();
        players::record_match_result(&conn, bob.id, ada.id, 3).unwrap();
        drop(conn);

        let outcome = WeeklyResetService::new(pool.clone())
            .perform_weekly_reset()
            .unwrap();
        assert_eq!(outcome.archived_players, 2);
        assert_eq!(outcome.reset_players, 2);

        let mut conn = database::get_connection(&pool).unwrap();
        let weeks = database::archives::list_weeks(&mut conn).unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].winner_id, ada.id);
        assert_eq!(weeks[0].total_players, 2);

        let rows =
            database::archives::list_week_leaderboard(&mut conn, &weeks[0].week_start).unwrap();
        assert_eq!(rows[0].player_name, "Ada");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].points, 6);
        assert_eq!(rows[1].player_name, "Bob");
        assert_eq!(rows[1].rank, 2);

        for player in players::list_all(&mut conn, None).unwrap() {
            assert_eq!((player.wins, player.losses, player.points), (0, 0, 0));
        }
    }

    #[test]
    fn quiet_week_is_not_archived_but_still_resets() {
        let pool = test_pool();
        let mut conn = database::get_connection(&pool).unwrap();
        players::insert_player(&mut conn, "Ada", None).unwrap();
        drop(conn);

        let outcome = WeeklyResetService::new(pool.clone())
            .perform_weekly_reset()
            .unwrap();
        assert_eq!(outcome.archived_players, 0);
        assert_eq!(outcome.reset_players, 1);

        let mut conn = database::get_connection(&pool).unwrap();
        assert!(database::archives::list_weeks(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn empty_database_resets_nothing() {
        let pool = test_pool();
        let outcome = WeeklyResetService::new(pool).perform_weekly_reset().unwrap();
        assert_eq!(outcome.archived_players, 0);
        assert_eq!(outcome.reset_players, 0);
    }
}
