use super::models::Player;

/// A player's position on the live leaderboard
#[derive(Debug, Clone)]
pub struct RankedPlayer {
    pub rank: usize,
    pub player: Player,
    pub win_rate: String,
}

/// Order players by points descending and attach display values.
///
/// The sort is stable: players with equal points keep their input order,
/// and ranks are positional (equal points still get distinct ranks).
pub fn rank_players(mut players: Vec<Player>) -> Vec<RankedPlayer> {
    players.sort_by(|a, b| b.points.cmp(&a.points));

    players
        .into_iter()
        .enumerate()
        .map(|(idx, player)| RankedPlayer {
            rank: idx + 1,
            win_rate: win_rate(player.wins, player.losses),
            player,
        })
        .collect()
}

/// Win rate as a percentage string with exactly one fractional digit.
/// A player with no games is "0.0", not a division by zero.
pub fn win_rate(wins: i32, losses: i32) -> String {
    let total = wins + losses;
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", wins as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, wins: i32, losses: i32, points: i32) -> Player {
        Player {
            id,
            name: format!("Player {id}"),
            email: None,
            wins,
            losses,
            points,
        }
    }

    #[test]
    fn win_rate_with_no_games_is_zero() {
        assert_eq!(win_rate(0, 0), "0.0");
    }

    #[test]
    fn win_rate_always_has_one_fractional_digit() {
        assert_eq!(win_rate(1, 0), "100.0");
        assert_eq!(win_rate(1, 1), "50.0");
        assert_eq!(win_rate(1, 2), "33.3");
        assert_eq!(win_rate(2, 1), "66.7");
        assert_eq!(win_rate(0, 5), "0.0");
    }

    #[test]
    fn ranks_are_positional_and_sorted_by_points() {
        let ranked = rank_players(vec![
            player(1, 2, 1, 6),
            player(2, 4, 0, 12),
            player(3, 1, 3, 3),
        ]);

        assert_eq!(ranked.len(), 3);
        let ids: Vec<i64> = ranked.iter().map(|r| r.player.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn equal_points_keep_input_order() {
        let ranked = rank_players(vec![
            player(10, 1, 0, 3),
            player(11, 0, 1, 3),
            player(12, 2, 0, 6),
            player(13, 1, 1, 3),
        ]);

        let ids: Vec<i64> = ranked.iter().map(|r| r.player.id).collect();
        assert_eq!(ids, vec![12, 10, 11, 13]);
    }

    #[test]
    fn ranking_attaches_win_rate() {
        let ranked = rank_players(vec![player(1, 3, 1, 9)]);
        assert_eq!(ranked[0].win_rate, "75.0");
    }
}
