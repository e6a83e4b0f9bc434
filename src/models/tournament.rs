//! Tournament, TournamentKind, and TournamentError.

use crate::models::game::Phase;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Errors that can occur during tournament setup and administration.
/// Incomplete tournament data is never an error: aggregation, standings,
/// and progression all degrade to "no result yet" instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A fighter with this name already exists (names are unique, case-insensitive).
    DuplicateFighterName,
    /// Fighter name is empty after trimming.
    EmptyFighterName,
    /// Operation not valid for this tournament kind (e.g. pools on a knockout).
    WrongTournamentKind,
    /// Pool assignment requested without a poule size.
    MissingPouleSize,
    /// Not enough fighters to run the requested operation.
    NotEnoughFighters { required: usize, available: usize },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateFighterName => {
                write!(f, "A fighter with this name already exists")
            }
            TournamentError::EmptyFighterName => write!(f, "Fighter name must not be empty"),
            TournamentError::WrongTournamentKind => {
                write!(f, "Operation not valid for this tournament type")
            }
            TournamentError::MissingPouleSize => {
                write!(f, "Tournament has no poule size configured")
            }
            TournamentError::NotEnoughFighters {
                required,
                available,
            } => write!(f, "Need at least {} fighters (have {})", required, available),
        }
    }
}

impl std::error::Error for TournamentError {}

/// How the tournament is run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TournamentKind {
    /// All matches are pool matches; no phase progression.
    #[serde(rename = "round-robin")]
    RoundRobin,
    /// Pools first, top finishers qualify for the knockout stage.
    #[default]
    #[serde(rename = "poule-knockout")]
    PouleKnockout,
    /// Straight knockout; starting round depends on the entry count.
    #[serde(rename = "knockout")]
    Knockout,
}

/// A tournament. `current_phase` only carries meaning for the knockout
/// kinds; it advances monotonically and never moves backwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentKind,
    #[serde(default)]
    pub current_phase: Phase,
    /// Default round count for matches (3 or 5).
    pub rounds: u32,
    /// Fighters per pool (poule-knockout only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poule_size: Option<usize>,
    /// Pool membership by fighter name, set when pools are drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poules: Option<Vec<Vec<String>>>,
    pub created_at: i64,
}

impl Tournament {
    /// Create a tournament. Pool-knockout tournaments start in the pool
    /// phase; the other kinds only use `current_phase` once knockout
    /// matches exist.
    pub fn new(name: impl Into<String>, kind: TournamentKind, rounds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            current_phase: Phase::Pool,
            rounds,
            poule_size: None,
            poules: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
