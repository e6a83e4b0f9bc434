//! Phase progression: detect phase completion and materialize the next
//! phase's fixtures from the current one's consensus results.

use crate::logic::aggregation::consensus_scorecard;
use crate::logic::bracket::{knockout_matches_for_phase, sorted_matches_for_phase};
use crate::logic::standings::calculate_standings;
use crate::models::{
    Corner, Match, MatchId, Phase, Scorecard, Tournament, TournamentKind,
};
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// A phase is complete when it has at least one match and every one of its
/// matches has a decided consensus winner. A drawn match blocks completion;
/// there is no tiebreak rule, so the phase simply never reports complete.
pub fn phase_complete(
    phase: Phase,
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> bool {
    let in_phase: Vec<&Match> = matches.iter().filter(|m| m.phase == phase).collect();
    !in_phase.is_empty()
        && in_phase
            .iter()
            .all(|m| decided_winner(m, scorecards_by_match).is_some())
}

/// Advance the tournament one phase if the current phase is complete and
/// yields the required qualifiers. Returns the newly created matches for
/// the caller to persist; an empty vec means nothing happened (round-robin
/// tournaments, incomplete phases, missing qualifiers, or a finished
/// bracket). Re-invoking after a transition creates no new matches because
/// `current_phase` has moved on.
pub fn advance_phase(
    tournament: &mut Tournament,
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Vec<Match> {
    if tournament.kind == TournamentKind::RoundRobin {
        return Vec::new();
    }
    match tournament.current_phase {
        Phase::Pool => advance_from_pool(tournament, matches, scorecards_by_match),
        Phase::Quarterfinal => advance_from_quarterfinals(tournament, matches, scorecards_by_match),
        Phase::Semifinal => advance_from_semifinals(tournament, matches, scorecards_by_match),
        Phase::Final | Phase::ThirdPlace => Vec::new(),
    }
}

/// Pool → knockout: rank each pool, take the top 2 (top 1 with a single
/// pool), shuffle the qualifiers, and draw semifinals when 4 or fewer
/// qualify, quarterfinals otherwise.
fn advance_from_pool(
    tournament: &mut Tournament,
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Vec<Match> {
    if tournament.kind != TournamentKind::PouleKnockout {
        return Vec::new();
    }
    let Some(poules) = tournament.poules.clone() else {
        return Vec::new();
    };
    if !phase_complete(Phase::Pool, matches, scorecards_by_match) {
        return Vec::new();
    }

    let pool_matches: Vec<&Match> = matches.iter().filter(|m| m.phase == Phase::Pool).collect();
    let top_per_pool = if poules.len() == 1 { 1 } else { 2 };
    let mut qualifiers: Vec<String> = Vec::new();
    for pool in &poules {
        let results: Vec<(&Match, Scorecard)> = pool_matches
            .iter()
            .filter(|m| pool.contains(&m.red_fighter) && pool.contains(&m.blue_fighter))
            .filter_map(|m| {
                scorecards_by_match
                    .get(&m.id)
                    .and_then(|cards| consensus_scorecard(m.id, cards))
                    .map(|sc| (*m, sc))
            })
            .collect();
        let borrowed: Vec<(&Match, &Scorecard)> =
            results.iter().map(|(m, sc)| (*m, sc)).collect();
        let standings = calculate_standings(pool, &borrowed);
        qualifiers.extend(standings.into_iter().take(top_per_pool).map(|s| s.name));
    }

    qualifiers.shuffle(&mut rand::thread_rng());

    let next_phase = if qualifiers.len() <= 4 {
        Phase::Semifinal
    } else {
        Phase::Quarterfinal
    };
    let weight_class = phase_weight_class(matches, Phase::Pool);
    let new_matches =
        knockout_matches_for_phase(tournament, &qualifiers, next_phase, &weight_class);
    if new_matches.is_empty() {
        // A lone qualifier cannot form a match; stay in the pool phase.
        return Vec::new();
    }
    tournament.current_phase = next_phase;
    // Poules persist alongside the transition so the draw stays visible.
    tournament.poules = Some(poules);
    new_matches
}

/// Quarterfinals → semifinals: one winner per quarterfinal, paired in
/// bracket order. Requires exactly 4 winners; fewer is a silent no-op
/// awaiting more results.
fn advance_from_quarterfinals(
    tournament: &mut Tournament,
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Vec<Match> {
    let winners: Vec<String> = sorted_matches_for_phase(matches, Phase::Quarterfinal)
        .iter()
        .filter_map(|m| winner_name(m, scorecards_by_match))
        .collect();
    if winners.len() != 4 {
        return Vec::new();
    }
    let weight_class = phase_weight_class(matches, Phase::Quarterfinal);
    let new_matches =
        knockout_matches_for_phase(tournament, &winners, Phase::Semifinal, &weight_class);
    tournament.current_phase = Phase::Semifinal;
    new_matches
}

/// Semifinals → final + third-place match: winners meet in the final,
/// losers in the bronze final, both at bracket position 1. Requires
/// exactly 2 decided semifinals.
fn advance_from_semifinals(
    tournament: &mut Tournament,
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Vec<Match> {
    let semis = sorted_matches_for_phase(matches, Phase::Semifinal);
    if semis.len() != 2 {
        return Vec::new();
    }
    let mut winners: Vec<String> = Vec::new();
    let mut losers: Vec<String> = Vec::new();
    for m in &semis {
        let Some(corner) = decided_winner(m, scorecards_by_match) else {
            return Vec::new();
        };
        winners.push(m.fighter_name(corner).to_string());
        losers.push(m.fighter_name(corner.other()).to_string());
    }

    let weight_class = phase_weight_class(matches, Phase::Semifinal);
    let final_match = Match::knockout(
        tournament.id,
        winners[0].clone(),
        winners[1].clone(),
        weight_class.clone(),
        tournament.rounds,
        Phase::Final,
        1,
    );
    let bronze_match = Match::knockout(
        tournament.id,
        losers[0].clone(),
        losers[1].clone(),
        weight_class,
        tournament.rounds,
        Phase::ThirdPlace,
        1,
    );
    tournament.current_phase = Phase::Final;
    vec![final_match, bronze_match]
}

fn decided_winner(
    m: &Match,
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Option<Corner> {
    let scorecards = scorecards_by_match.get(&m.id)?;
    consensus_scorecard(m.id, scorecards)?.winner
}

fn winner_name(
    m: &Match,
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Option<String> {
    decided_winner(m, scorecards_by_match).map(|c| m.fighter_name(c).to_string())
}

/// New-phase matches inherit the weight class of the phase they are drawn
/// from (empty when that phase had none).
fn phase_weight_class(matches: &[Match], phase: Phase) -> String {
    matches
        .iter()
        .find(|m| m.phase == phase)
        .map(|m| m.weight_class.clone())
        .unwrap_or_default()
}
