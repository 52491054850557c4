use serde::{Deserialize, Serialize};

/// A registered player with live weekly counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
}

/// One game's score within a match. Both counts are non-negative;
/// a tie is representable and handled by the outcome evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub home: i32,
    pub away: i32,
}

/// A best-of-N series between two players, scored game-by-game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub played_at: String,
    pub home_id: i64,
    pub away_id: i64,
    pub games: Vec<GameScore>,
}

/// Summary of one archived week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekInfo {
    pub week_start: String,
    pub week_end: String,
    pub winner_id: i64,
    pub winner_name: String,
    pub total_players: i64,
}

impl WeekInfo {
    /// Display label for the week, e.g. "Jan 5, 2025 - Jan 11, 2025"
    pub fn date_range(&self) -> anyhow::Result<String> {
        super::week::format_date_range(&self.week_start, &self.week_end)
    }
}

/// A single player's row in an archived weekly leaderboard.
/// Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyArchive {
    pub id: i64,
    pub week_start: String,
    pub week_end: String,
    pub winner_id: i64,
    pub player_id: i64,
    pub player_name: String,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
    pub rank: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_info_renders_its_date_range() {
        let week = WeekInfo {
            week_start: "2025-01-05T00:00:00".to_string(),
            week_end: "2025-01-11T23:59:59".to_string(),
            winner_id: 1,
            winner_name: "Ada".to_string(),
            total_players: 4,
        };

        assert_eq!(week.date_range().unwrap(), "Jan 5, 2025 - Jan 11, 2025");
    }
}
