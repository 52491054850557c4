use super::models::GameScore;

/// Which side of a match a result is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Per-side game tallies for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub home_wins: usize,
    pub away_wins: usize,
}

impl MatchOutcome {
    /// Home wins the match only with strictly more games; an even split
    /// resolves to Away under the same complement rule as the tallies.
    pub fn winner(&self) -> Side {
        if self.home_wins > self.away_wins {
            Side::Home
        } else {
            Side::Away
        }
    }
}

/// Tally games for each side of a match.
///
/// The away tally is the complement of the home tally: a tied game counts
/// for the away side, and an empty match yields 0-0 with Away as winner.
/// This matches the historical scoring behavior and is kept intentionally;
/// callers must check that a match has games before treating the winner
/// as meaningful.
pub fn evaluate_match(games: &[GameScore]) -> MatchOutcome {
    let home_wins = games.iter().filter(|g| g.home > g.away).count();
    MatchOutcome {
        home_wins,
        away_wins: games.len() - home_wins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: i32, away: i32) -> GameScore {
        GameScore { home, away }
    }

    #[test]
    fn home_wins_best_of_three() {
        let games = vec![game(5, 3), game(2, 4), game(6, 1)];
        let outcome = evaluate_match(&games);

        assert_eq!(outcome.home_wins, 2);
        assert_eq!(outcome.away_wins, 1);
        assert_eq!(outcome.winner(), Side::Home);
    }

    #[test]
    fn away_sweep() {
        let games = vec![game(1, 5), game(0, 5)];
        let outcome = evaluate_match(&games);

        assert_eq!(outcome.home_wins, 0);
        assert_eq!(outcome.away_wins, 2);
        assert_eq!(outcome.winner(), Side::Away);
    }

    #[test]
    fn tied_game_counts_for_away() {
        let games = vec![game(5, 5)];
        let outcome = evaluate_match(&games);

        assert_eq!(outcome.home_wins, 0);
        assert_eq!(outcome.away_wins, 1);
        assert_eq!(outcome.winner(), Side::Away);
    }

    #[test]
    fn even_split_resolves_to_away() {
        let games = vec![game(5, 1), game(1, 5)];
        let outcome = evaluate_match(&games);

        assert_eq!(outcome.home_wins, 1);
        assert_eq!(outcome.away_wins, 1);
        assert_eq!(outcome.winner(), Side::Away);
    }

    #[test]
    fn empty_match_is_zero_zero_away() {
        let outcome = evaluate_match(&[]);

        assert_eq!(outcome.home_wins, 0);
        assert_eq!(outcome.away_wins, 0);
        assert_eq!(outcome.winner(), Side::Away);
    }
}
