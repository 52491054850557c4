pub mod models;
pub mod outcome;
pub mod ranking;
pub mod week;

pub use models::{GameScore, Match, Player, WeekInfo, WeeklyArchive};
pub use outcome::{evaluate_match, MatchOutcome, Side};
pub use ranking::{rank_players, win_rate, RankedPlayer};
