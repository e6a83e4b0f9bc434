//! Combat sport scoring web app: library with models, scoring/tournament logic, and storage boundary.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_phase, assign_poules, build_bracket_view, calculate_rounds, calculate_standings,
    consensus_scorecard, create_aggregated_scorecard, fighter_leaderboard,
    generate_knockout_matches, generate_poule_matches, phase_complete, scorecard_from_events,
    starting_phase, winner_from_scorecards, winner_from_totals, without_empty_scorecards,
    BracketView, LeaderboardEntry, Standing,
};
pub use models::{
    Corner, EventType, Fighter, FighterId, Match, MatchId, MatchStatus, Phase, RoundScore,
    ScoreEvent, Scorecard, Tournament, TournamentError, TournamentId, TournamentKind,
    AGGREGATED_USER_ID,
};
pub use store::{DocumentStore, MemoryStore, StoreError};
