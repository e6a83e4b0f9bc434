//! Data structures for the fight tournament: fighters, matches, scorecards, tournament state.

mod fighter;
mod game;
mod scorecard;
mod tournament;

pub use fighter::{Fighter, FighterId};
pub use game::{Corner, Match, MatchId, MatchStatus, Phase};
pub use scorecard::{EventType, RoundScore, ScoreEvent, Scorecard, AGGREGATED_USER_ID};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentKind};
