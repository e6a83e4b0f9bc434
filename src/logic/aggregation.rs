//! Scorecard aggregation: combine all judges' scorecards for one match
//! into a single consensus scorecard.

use crate::logic::scoring::apply_point_differential;
use crate::models::{Corner, MatchId, RoundScore, Scorecard, AGGREGATED_USER_ID};

/// Winner by majority vote across the judges' scorecards. Scorecards with
/// no winner are excluded from the vote; an exact tie in votes is a draw,
/// even when one corner's averaged score is higher. The vote, not the
/// score, decides the winner.
pub fn winner_from_scorecards(scorecards: &[Scorecard]) -> Option<Corner> {
    let mut red_votes = 0u32;
    let mut blue_votes = 0u32;
    for scorecard in scorecards {
        match scorecard.winner {
            Some(Corner::Red) => red_votes += 1,
            Some(Corner::Blue) => blue_votes += 1,
            None => {}
        }
    }
    if red_votes > blue_votes {
        Some(Corner::Red)
    } else if blue_votes > red_votes {
        Some(Corner::Blue)
    } else {
        None
    }
}

/// Mean of the judges' overall totals, rounded to one decimal.
pub fn average_totals(scorecards: &[Scorecard]) -> (f64, f64) {
    if scorecards.is_empty() {
        return (0.0, 0.0);
    }
    let count = scorecards.len() as f64;
    let total_red: f64 = scorecards.iter().map(|s| s.total_red).sum();
    let total_blue: f64 = scorecards.iter().map(|s| s.total_blue).sum();
    (round_to_tenth(total_red / count), round_to_tenth(total_blue / count))
}

/// Build the consensus scorecard for a match, or `None` when there are no
/// scorecards to aggregate.
///
/// The winner comes from the majority vote. Per round, points and
/// deductions are averaged across all judges (one decimal) and the round
/// totals recomputed from the averaged points with the same differential
/// rule as per-judge scoring. Overall totals are the mean of the judges'
/// overall totals, which may differ from the sum of the averaged round
/// totals by rounding; that divergence is accepted. Input scorecards are
/// never mutated.
pub fn create_aggregated_scorecard(
    match_id: MatchId,
    scorecards: &[Scorecard],
) -> Option<Scorecard> {
    if scorecards.is_empty() {
        return None;
    }

    let winner = winner_from_scorecards(scorecards);
    let (total_red, total_blue) = average_totals(scorecards);

    let count = scorecards.len() as f64;
    let base = &scorecards[0];
    let rounds: Vec<RoundScore> = base
        .rounds
        .iter()
        .enumerate()
        .map(|(i, base_round)| {
            let mut sum = RoundScore::empty(base_round.round);
            for scorecard in scorecards {
                // A judge with fewer rounds simply contributes nothing here.
                if let Some(r) = scorecard.rounds.get(i) {
                    sum.red_points += r.red_points;
                    sum.blue_points += r.blue_points;
                    sum.red_deductions += r.red_deductions;
                    sum.blue_deductions += r.blue_deductions;
                }
            }
            let mut round = RoundScore {
                round: base_round.round,
                red_points: round_to_tenth(sum.red_points / count),
                blue_points: round_to_tenth(sum.blue_points / count),
                red_deductions: round_to_tenth(sum.red_deductions / count),
                blue_deductions: round_to_tenth(sum.blue_deductions / count),
                ..RoundScore::default()
            };
            apply_point_differential(&mut round);
            round.red_total = round_to_tenth(round.red_total);
            round.blue_total = round_to_tenth(round.blue_total);
            round
        })
        .collect();

    Some(Scorecard {
        match_id,
        user_id: AGGREGATED_USER_ID.to_string(),
        is_official: true,
        rounds,
        total_red,
        total_blue,
        winner,
        events: Vec::new(),
    })
}

/// Caller-side policy: drop scorecards that are entirely empty (no totals,
/// no events) so placeholder entries do not dilute the average. Applied by
/// consumers before aggregating, not by the aggregator itself.
pub fn without_empty_scorecards(scorecards: &[Scorecard]) -> Vec<Scorecard> {
    scorecards
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

/// Consensus scorecard for display and progression: empty scorecards
/// filtered out, then aggregated.
pub fn consensus_scorecard(match_id: MatchId, scorecards: &[Scorecard]) -> Option<Scorecard> {
    let scoring = without_empty_scorecards(scorecards);
    create_aggregated_scorecard(match_id, &scoring)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
