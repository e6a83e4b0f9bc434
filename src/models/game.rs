//! Match, Phase, Corner, and MatchStatus.

use crate::models::tournament::TournamentId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two competitors in a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    /// The opposing corner.
    pub fn other(self) -> Corner {
        match self {
            Corner::Red => Corner::Blue,
            Corner::Blue => Corner::Red,
        }
    }
}

/// Tournament phase a match belongs to. Wire names match the original
/// document schema (Dutch), so stored tournaments stay readable.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "poule")]
    Pool,
    #[serde(rename = "kwartfinale")]
    Quarterfinal,
    #[serde(rename = "halve_finale")]
    Semifinal,
    #[serde(rename = "finale")]
    Final,
    #[serde(rename = "bronzen_finale")]
    ThirdPlace,
}

impl Phase {
    /// Human-readable round label (bracket column headers).
    pub fn label(self) -> &'static str {
        match self {
            Phase::Pool => "Pool",
            Phase::Quarterfinal => "Quarterfinals",
            Phase::Semifinal => "Semifinals",
            Phase::Final => "Final",
            Phase::ThirdPlace => "Bronze Final",
        }
    }

    /// Short code used in placeholder labels ("Winner QF1").
    pub fn short_code(self) -> &'static str {
        match self {
            Phase::Pool => "P",
            Phase::Quarterfinal => "QF",
            Phase::Semifinal => "HF",
            Phase::Final => "F",
            Phase::ThirdPlace => "B",
        }
    }

    /// The knockout round fed by this one, if any. ThirdPlace is a side
    /// match and feeds nothing.
    pub fn next_knockout(self) -> Option<Phase> {
        match self {
            Phase::Quarterfinal => Some(Phase::Semifinal),
            Phase::Semifinal => Some(Phase::Final),
            _ => None,
        }
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

/// A single match between two fighters. Fighters are referenced by name;
/// names must be unique within a tournament for aggregation and standings
/// to line up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub red_fighter: String,
    pub blue_fighter: String,
    pub weight_class: String,
    /// Fixed at creation (3 or 5); bounds all scorecards for this match.
    pub rounds: u32,
    pub status: MatchStatus,
    /// Legacy documents without a phase are pool matches.
    #[serde(default)]
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poule_id: Option<String>,
    /// 1-based slot within the phase; drives bracket linkage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_position: Option<u32>,
    pub created_at: i64,
}

impl Match {
    /// Create a pool match.
    pub fn new(
        tournament_id: TournamentId,
        red_fighter: impl Into<String>,
        blue_fighter: impl Into<String>,
        weight_class: impl Into<String>,
        rounds: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            red_fighter: red_fighter.into(),
            blue_fighter: blue_fighter.into(),
            weight_class: weight_class.into(),
            rounds,
            status: MatchStatus::Pending,
            phase: Phase::Pool,
            poule_id: None,
            bracket_position: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Create a knockout match at a given phase and bracket slot.
    pub fn knockout(
        tournament_id: TournamentId,
        red_fighter: impl Into<String>,
        blue_fighter: impl Into<String>,
        weight_class: impl Into<String>,
        rounds: u32,
        phase: Phase,
        bracket_position: u32,
    ) -> Self {
        Self {
            phase,
            bracket_position: Some(bracket_position),
            ..Self::new(tournament_id, red_fighter, blue_fighter, weight_class, rounds)
        }
    }

    /// Whether the given fighter name is in this match.
    pub fn involves(&self, name: &str) -> bool {
        self.red_fighter == name || self.blue_fighter == name
    }

    /// Fighter name for a corner.
    pub fn fighter_name(&self, corner: Corner) -> &str {
        match corner {
            Corner::Red => &self.red_fighter,
            Corner::Blue => &self.blue_fighter,
        }
    }
}
