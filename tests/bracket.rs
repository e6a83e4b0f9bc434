//! Integration tests for bracket generation and the speculative bracket view.

use fight_scoring_web::{
    build_bracket_view, generate_knockout_matches, starting_phase, winner_from_totals, Match,
    MatchId, Phase, Scorecard, Tournament, TournamentKind,
};
use std::collections::HashMap;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn judge_card(m: &Match, red: f64, blue: f64) -> Scorecard {
    Scorecard {
        match_id: m.id,
        user_id: "judge1".to_string(),
        is_official: true,
        rounds: Vec::new(),
        total_red: red,
        total_blue: blue,
        winner: winner_from_totals(red, blue),
        events: Vec::new(),
    }
}

#[test]
fn starting_phase_depends_on_entry_count() {
    assert_eq!(starting_phase(2), Phase::Final);
    assert_eq!(starting_phase(3), Phase::Semifinal);
    assert_eq!(starting_phase(4), Phase::Semifinal);
    assert_eq!(starting_phase(5), Phase::Quarterfinal);
    assert_eq!(starting_phase(8), Phase::Quarterfinal);
}

#[test]
fn eight_names_give_four_quarterfinals_in_pairing_order() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let entrants = names(&["A", "B", "C", "D", "E", "F", "G", "H"]);
    let matches = generate_knockout_matches(&t, &entrants, "-71kg");
    assert_eq!(matches.len(), 4);
    for (i, m) in matches.iter().enumerate() {
        assert_eq!(m.phase, Phase::Quarterfinal);
        assert_eq!(m.bracket_position, Some(i as u32 + 1));
        assert_eq!(m.red_fighter, entrants[i * 2]);
        assert_eq!(m.blue_fighter, entrants[i * 2 + 1]);
        assert_eq!(m.weight_class, "-71kg");
        assert_eq!(m.rounds, 3);
        assert_eq!(m.tournament_id, t.id);
    }
}

#[test]
fn odd_leftover_entrant_is_dropped() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let matches = generate_knockout_matches(&t, &names(&["A", "B", "C"]), "");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].red_fighter, "A");
    assert_eq!(matches[0].blue_fighter, "B");
    assert_eq!(matches[0].phase, Phase::Semifinal);
}

#[test]
fn two_names_go_straight_to_the_final() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let matches = generate_knockout_matches(&t, &names(&["A", "B"]), "");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].phase, Phase::Final);
    assert_eq!(matches[0].bracket_position, Some(1));
}

#[test]
fn view_shows_placeholders_for_rounds_not_yet_generated() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let entrants = names(&["A", "B", "C", "D", "E", "F", "G", "H"]);
    let matches = generate_knockout_matches(&t, &entrants, "");
    let view = build_bracket_view(&matches, &HashMap::new());

    assert_eq!(view.rounds.len(), 3);
    assert_eq!(view.rounds[0].phase, Phase::Quarterfinal);
    assert_eq!(view.rounds[0].nodes.len(), 4);
    assert!(view.rounds[0].nodes.iter().all(|n| !n.is_placeholder));

    let semis = &view.rounds[1];
    assert_eq!(semis.nodes.len(), 2);
    assert!(semis.nodes.iter().all(|n| n.is_placeholder));
    assert_eq!(semis.nodes[0].red_label, "Winner QF1");
    assert_eq!(semis.nodes[0].blue_label, "Winner QF2");
    assert_eq!(semis.nodes[1].red_label, "Winner QF3");
    assert_eq!(semis.nodes[1].blue_label, "Winner QF4");

    let finals = &view.rounds[2];
    assert_eq!(finals.nodes.len(), 1);
    assert_eq!(finals.nodes[0].red_label, "Winner HF1");
    assert_eq!(finals.nodes[0].blue_label, "Winner HF2");

    // Each node links to the parent slot at index / 2.
    assert_eq!(view.links.len(), 6);
    assert!(view.links.iter().all(|l| !l.dashed));
    assert!(view.bronze.is_none());
}

#[test]
fn view_fills_in_winners_and_scores_from_consensus() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let matches = generate_knockout_matches(&t, &names(&["A", "B", "C", "D"]), "");
    let mut by_match: HashMap<MatchId, Vec<Scorecard>> = HashMap::new();
    by_match.insert(matches[0].id, vec![judge_card(&matches[0], 30.0, 28.0)]);

    let view = build_bracket_view(&matches, &by_match);
    let decided = &view.rounds[0].nodes[0];
    assert_eq!(decided.winner_name.as_deref(), Some("A"));
    assert_eq!(decided.score, Some((30.0, 28.0)));
    let undecided = &view.rounds[0].nodes[1];
    assert_eq!(undecided.winner_name, None);
    assert_eq!(undecided.score, None);
}

#[test]
fn bronze_final_links_dashed_from_both_semifinals() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let mut matches = generate_knockout_matches(&t, &names(&["A", "B", "C", "D"]), "");
    matches.push(Match::knockout(t.id, "B", "D", "", 3, Phase::ThirdPlace, 1));

    let view = build_bracket_view(&matches, &HashMap::new());
    assert_eq!(view.rounds[0].phase, Phase::Semifinal);
    let bronze = view.bronze.as_ref().expect("bronze node");
    assert_eq!(bronze.phase, Phase::ThirdPlace);
    let dashed: Vec<_> = view.links.iter().filter(|l| l.dashed).collect();
    assert_eq!(dashed.len(), 2);
    assert!(dashed.iter().all(|l| l.to == bronze.key));
}

#[test]
fn generation_appends_and_never_reorders_existing_matches() {
    let t = Tournament::new("KO", TournamentKind::Knockout, 3);
    let first = generate_knockout_matches(&t, &names(&["A", "B", "C", "D"]), "");
    let snapshot = first.clone();
    let winners = names(&["A", "C"]);
    let more = fight_scoring_web::logic::knockout_matches_for_phase(
        &t,
        &winners,
        Phase::Final,
        "",
    );
    assert_eq!(first, snapshot);
    assert_eq!(more.len(), 1);
    assert_eq!(more[0].phase, Phase::Final);
}
