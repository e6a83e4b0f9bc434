//! Fighter data structure.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fighter.
pub type FighterId = Uuid;

/// A fighter registered in a tournament. Matches reference fighters by
/// `name`, not by id, so names must be unique within a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub tournament_id: TournamentId,
}

impl Fighter {
    /// Create a new fighter with the given name.
    pub fn new(tournament_id: TournamentId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tournament_id,
        }
    }
}
