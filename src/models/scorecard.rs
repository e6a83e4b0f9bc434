//! Score events, per-round scores, and per-judge scorecards.

use crate::models::game::{Corner, MatchId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved `user_id` identifying a synthesized consensus scorecard.
/// Never persisted as a judge's own input.
pub const AGGREGATED_USER_ID: &str = "aggregated";

/// Whether an event awards a point or records a deduction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Point,
    Deduction,
}

/// One judge action: a point or deduction for a corner in a round.
/// Immutable and append-only per judge; the event list is the source of
/// truth, deletion removes the event and totals are recomputed in full.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEvent {
    pub id: Uuid,
    pub match_id: MatchId,
    pub user_id: String,
    /// 1-based round number.
    pub round: u32,
    pub corner: Corner,
    #[serde(rename = "type")]
    pub kind: EventType,
    /// +1 for a point, -1 for a deduction (sign is informational; scoring
    /// uses the absolute value for deductions).
    pub value: i32,
    pub timestamp: i64,
}

impl ScoreEvent {
    pub fn new(
        match_id: MatchId,
        user_id: impl Into<String>,
        round: u32,
        corner: Corner,
        kind: EventType,
        value: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            user_id: user_id.into(),
            round,
            corner,
            kind,
            value,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Derived scores for one round, recomputed from that round's events (or
/// averaged across judges for an aggregate). Values are `f64` because
/// aggregated rounds average to one decimal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    /// 1-based round number.
    pub round: u32,
    pub red_points: f64,
    pub blue_points: f64,
    pub red_deductions: f64,
    pub blue_deductions: f64,
    pub red_total: f64,
    pub blue_total: f64,
}

impl RoundScore {
    /// A zeroed round score for the given 1-based round number.
    pub fn empty(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }
}

/// One scorecard per (match, judge) pair. `user_id == "aggregated"` marks
/// the synthesized consensus scorecard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub match_id: MatchId,
    pub user_id: String,
    pub is_official: bool,
    pub rounds: Vec<RoundScore>,
    pub total_red: f64,
    pub total_blue: f64,
    /// `None` on an exact tie of the overall totals.
    pub winner: Option<Corner>,
    /// Chronological events this scorecard was derived from.
    pub events: Vec<ScoreEvent>,
}

impl Scorecard {
    /// Whether this is the synthesized consensus scorecard.
    pub fn is_aggregated(&self) -> bool {
        self.user_id == AGGREGATED_USER_ID
    }

    /// A scorecard with no scores and no events (placeholder entry).
    pub fn is_empty(&self) -> bool {
        self.total_red == 0.0 && self.total_blue == 0.0 && self.events.is_empty()
    }
}
