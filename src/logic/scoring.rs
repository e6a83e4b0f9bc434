//! Round scoring: turn one judge's chronological event list into per-round
//! scores and an overall scorecard (10-point-must system).

use crate::models::{Corner, EventType, MatchId, RoundScore, ScoreEvent, Scorecard};

/// Compute per-round scores from a judge's events.
///
/// Two passes: first accumulate points and deductions per round, then apply
/// the point-differential rule per round. Events with a round outside
/// `[1, total_rounds]` are ignored. Recomputation is O(events) and
/// deterministic; deleting an event means a full recompute from the
/// remaining list, never an incremental decrement.
pub fn calculate_rounds(events: &[ScoreEvent], total_rounds: u32) -> Vec<RoundScore> {
    let mut rounds: Vec<RoundScore> = (1..=total_rounds).map(RoundScore::empty).collect();

    for event in events {
        let Some(round) = event
            .round
            .checked_sub(1)
            .and_then(|i| rounds.get_mut(i as usize))
        else {
            continue;
        };
        match (event.kind, event.corner) {
            (EventType::Point, Corner::Red) => round.red_points += f64::from(event.value),
            (EventType::Point, Corner::Blue) => round.blue_points += f64::from(event.value),
            (EventType::Deduction, Corner::Red) => {
                round.red_deductions += f64::from(event.value.abs())
            }
            (EventType::Deduction, Corner::Blue) => {
                round.blue_deductions += f64::from(event.value.abs())
            }
        }
    }

    for round in &mut rounds {
        apply_point_differential(round);
    }

    rounds
}

/// Apply the 10-point-must rule to a round whose points and deductions are
/// filled in: the corner with more points gets 10, the other 10 minus the
/// difference, both minus their own deductions; an exact points tie gives
/// both 10 minus deductions. Totals are clamped at 0.
pub(crate) fn apply_point_differential(round: &mut RoundScore) {
    let diff = round.red_points - round.blue_points;
    if diff > 0.0 {
        round.red_total = 10.0 - round.red_deductions;
        round.blue_total = (10.0 - diff) - round.blue_deductions;
    } else if diff < 0.0 {
        round.blue_total = 10.0 - round.blue_deductions;
        round.red_total = (10.0 + diff) - round.red_deductions;
    } else {
        round.red_total = 10.0 - round.red_deductions;
        round.blue_total = 10.0 - round.blue_deductions;
    }
    round.red_total = round.red_total.max(0.0);
    round.blue_total = round.blue_total.max(0.0);
}

/// Build a judge's full scorecard from their events: per-round scores,
/// overall totals (sum of round totals), and the winner (`None` on an
/// exact tie).
pub fn scorecard_from_events(
    match_id: MatchId,
    user_id: impl Into<String>,
    is_official: bool,
    events: Vec<ScoreEvent>,
    total_rounds: u32,
) -> Scorecard {
    let rounds = calculate_rounds(&events, total_rounds);
    let total_red: f64 = rounds.iter().map(|r| r.red_total).sum();
    let total_blue: f64 = rounds.iter().map(|r| r.blue_total).sum();
    Scorecard {
        match_id,
        user_id: user_id.into(),
        is_official,
        rounds,
        total_red,
        total_blue,
        winner: winner_from_totals(total_red, total_blue),
        events,
    }
}

/// Winner strictly from the overall totals; `None` on an exact tie.
pub fn winner_from_totals(total_red: f64, total_blue: f64) -> Option<Corner> {
    if total_red > total_blue {
        Some(Corner::Red)
    } else if total_blue > total_red {
        Some(Corner::Blue)
    } else {
        None
    }
}
