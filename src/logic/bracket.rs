//! Knockout bracket: first-round fixture generation and the speculative
//! bracket view with placeholder nodes for unplayed rounds.

use crate::logic::aggregation::consensus_scorecard;
use crate::models::{Corner, Match, MatchId, Phase, Scorecard, Tournament};
use serde::Serialize;
use std::collections::HashMap;

/// Starting knockout phase for a participant count.
pub fn starting_phase(count: usize) -> Phase {
    if count <= 2 {
        Phase::Final
    } else if count <= 4 {
        Phase::Semifinal
    } else {
        Phase::Quarterfinal
    }
}

/// Generate first-round knockout matches from an ordered participant list.
/// Pairing order is caller-supplied (e.g. shuffled pool qualifiers). Later
/// rounds are generated as earlier ones complete, not eagerly.
pub fn generate_knockout_matches(
    tournament: &Tournament,
    participants: &[String],
    weight_class: &str,
) -> Vec<Match> {
    knockout_matches_for_phase(
        tournament,
        participants,
        starting_phase(participants.len()),
        weight_class,
    )
}

/// Pair participants sequentially `(0,1), (2,3), ...` into matches of the
/// given phase with 1-based bracket positions. An odd leftover participant
/// is dropped; there is no bye.
pub fn knockout_matches_for_phase(
    tournament: &Tournament,
    participants: &[String],
    phase: Phase,
    weight_class: &str,
) -> Vec<Match> {
    participants
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            Match::knockout(
                tournament.id,
                pair[0].clone(),
                pair[1].clone(),
                weight_class,
                tournament.rounds,
                phase,
                i as u32 + 1,
            )
        })
        .collect()
}

/// A node in the bracket view: either a real match or a speculative
/// placeholder ("Winner QF1 vs Winner QF2") for a round not yet generated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketNode {
    /// Stable key: the match id, or `placeholder_<phase>_<index>`.
    pub key: String,
    pub phase: Phase,
    /// 0-based slot within the round; parent slot is `index / 2`.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<MatchId>,
    pub red_label: String,
    pub blue_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<(f64, f64)>,
    pub is_placeholder: bool,
}

/// One column of the bracket.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketRound {
    pub phase: Phase,
    pub label: String,
    pub nodes: Vec<BracketNode>,
}

/// An edge between two nodes; dashed edges feed the third-place match from
/// the semifinal losers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketLink {
    pub from: String,
    pub to: String,
    pub dashed: bool,
}

/// Rendered bracket: rounds from the starting phase to the final, the
/// third-place node if drawn, and the links between nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketView {
    pub rounds: Vec<BracketRound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bronze: Option<BracketNode>,
    pub links: Vec<BracketLink>,
}

impl BracketView {
    pub fn is_empty(&self) -> bool {
        self.rounds.iter().all(|r| r.nodes.is_empty()) && self.bronze.is_none()
    }
}

/// Matches of a phase ordered for display: bracket position, then creation
/// time, then id. Display order only; already-created matches are never
/// renamed or reordered in storage.
pub fn sorted_matches_for_phase(matches: &[Match], phase: Phase) -> Vec<&Match> {
    let mut ms: Vec<&Match> = matches.iter().filter(|m| m.phase == phase).collect();
    ms.sort_by(|a, b| {
        a.bracket_position
            .unwrap_or(0)
            .cmp(&b.bracket_position.unwrap_or(0))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    ms
}

/// Consensus winner's name for a match, if decided.
pub fn consensus_winner_name(
    m: &Match,
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Option<String> {
    let scorecards = scorecards_by_match.get(&m.id)?;
    let consensus = consensus_scorecard(m.id, scorecards)?;
    match consensus.winner? {
        Corner::Red => Some(m.red_fighter.clone()),
        Corner::Blue => Some(m.blue_fighter.clone()),
    }
}

/// Build the bracket view. The starting round is the earliest knockout
/// phase with at least one match; each later round shows real matches
/// where they exist and placeholders (`Winner QF1`, or `TBD` when the
/// feeder slot itself is absent) where they do not. Links pair slot `i`
/// into parent slot `i / 2`; the third-place node gets dashed links from
/// both semifinals.
pub fn build_bracket_view(
    matches: &[Match],
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> BracketView {
    let start = [Phase::Quarterfinal, Phase::Semifinal, Phase::Final]
        .into_iter()
        .find(|p| matches.iter().any(|m| m.phase == *p));

    let mut rounds: Vec<BracketRound> = Vec::new();
    if let Some(start) = start {
        let mut phase = start;
        loop {
            let real = sorted_matches_for_phase(matches, phase);
            let nodes = match rounds.last() {
                None => real
                    .iter()
                    .enumerate()
                    .map(|(i, m)| node_from_match(phase, i, m, scorecards_by_match))
                    .collect(),
                Some(prev) => {
                    let expected = real.len().max(prev.nodes.len().div_ceil(2));
                    (0..expected)
                        .map(|i| match real.get(i) {
                            Some(m) => node_from_match(phase, i, m, scorecards_by_match),
                            None => placeholder_node(phase, i, prev),
                        })
                        .collect()
                }
            };
            rounds.push(BracketRound {
                phase,
                label: phase.label().to_string(),
                nodes,
            });
            match phase.next_knockout() {
                Some(next) => phase = next,
                None => break,
            }
        }
    }

    let bronze = sorted_matches_for_phase(matches, Phase::ThirdPlace)
        .first()
        .map(|m| node_from_match(Phase::ThirdPlace, 0, m, scorecards_by_match));

    let mut links: Vec<BracketLink> = Vec::new();
    for pair in rounds.windows(2) {
        for node in &pair[0].nodes {
            if let Some(target) = pair[1].nodes.get(node.index / 2) {
                links.push(BracketLink {
                    from: node.key.clone(),
                    to: target.key.clone(),
                    dashed: false,
                });
            }
        }
    }
    if let Some(bronze) = &bronze {
        if let Some(semis) = rounds.iter().find(|r| r.phase == Phase::Semifinal) {
            for node in &semis.nodes {
                links.push(BracketLink {
                    from: node.key.clone(),
                    to: bronze.key.clone(),
                    dashed: true,
                });
            }
        }
    }

    BracketView {
        rounds,
        bronze,
        links,
    }
}

fn node_from_match(
    phase: Phase,
    index: usize,
    m: &Match,
    scorecards_by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> BracketNode {
    let consensus = scorecards_by_match
        .get(&m.id)
        .and_then(|cards| consensus_scorecard(m.id, cards));
    BracketNode {
        key: m.id.to_string(),
        phase,
        index,
        match_id: Some(m.id),
        red_label: m.red_fighter.clone(),
        blue_label: m.blue_fighter.clone(),
        winner_name: consensus_winner_name(m, scorecards_by_match),
        score: consensus.map(|sc| (sc.total_red, sc.total_blue)),
        is_placeholder: false,
    }
}

fn placeholder_node(phase: Phase, index: usize, prev: &BracketRound) -> BracketNode {
    let feeder_label = |slot: usize| match prev.nodes.get(slot) {
        Some(_) => format!("Winner {}{}", prev.phase.short_code(), slot + 1),
        None => "TBD".to_string(),
    };
    BracketNode {
        key: format!("placeholder_{}_{}", phase.short_code(), index),
        phase,
        index,
        match_id: None,
        red_label: feeder_label(index * 2),
        blue_label: feeder_label(index * 2 + 1),
        winner_name: None,
        score: None,
        is_placeholder: true,
    }
}
