//! Scoring and tournament business logic: round scoring, aggregation,
//! standings, pools, brackets, and phase progression.

mod aggregation;
mod bracket;
mod poules;
mod progression;
mod scoring;
mod standings;

pub use aggregation::{
    average_totals, consensus_scorecard, create_aggregated_scorecard, winner_from_scorecards,
    without_empty_scorecards,
};
pub use bracket::{
    build_bracket_view, consensus_winner_name, generate_knockout_matches,
    knockout_matches_for_phase, sorted_matches_for_phase, starting_phase, BracketLink,
    BracketNode, BracketRound, BracketView,
};
pub use poules::{assign_poules, generate_poule_matches};
pub use progression::{advance_phase, phase_complete};
pub use scoring::{calculate_rounds, scorecard_from_events, winner_from_totals};
pub use standings::{calculate_standings, fighter_leaderboard, LeaderboardEntry, Standing};
