//! Integration tests for scorecard aggregation: majority vote, averaged
//! rounds, and the empty/single-judge edge cases.

use fight_scoring_web::{
    create_aggregated_scorecard, scorecard_from_events, winner_from_scorecards,
    without_empty_scorecards, Corner, EventType, RoundScore, ScoreEvent, Scorecard,
    AGGREGATED_USER_ID,
};
use uuid::Uuid;

fn judge_event(
    match_id: Uuid,
    judge: &str,
    round: u32,
    corner: Corner,
    kind: EventType,
    value: i32,
) -> ScoreEvent {
    ScoreEvent::new(match_id, judge, round, corner, kind, value)
}

/// A scorecard with fixed totals and a winner derived from them, no rounds.
fn card_with_totals(match_id: Uuid, judge: &str, red: f64, blue: f64) -> Scorecard {
    Scorecard {
        match_id,
        user_id: judge.to_string(),
        is_official: true,
        rounds: vec![RoundScore::empty(1)],
        total_red: red,
        total_blue: blue,
        winner: fight_scoring_web::winner_from_totals(red, blue),
        events: Vec::new(),
    }
}

#[test]
fn aggregating_nothing_gives_none() {
    assert_eq!(create_aggregated_scorecard(Uuid::new_v4(), &[]), None);
}

#[test]
fn single_judge_degenerates_to_that_judges_scorecard() {
    let m = Uuid::new_v4();
    let events = vec![
        judge_event(m, "judge1", 1, Corner::Red, EventType::Point, 1),
        judge_event(m, "judge1", 2, Corner::Blue, EventType::Point, 1),
        judge_event(m, "judge1", 3, Corner::Red, EventType::Point, 1),
    ];
    let judge = scorecard_from_events(m, "judge1", true, events, 3);
    let agg = create_aggregated_scorecard(m, std::slice::from_ref(&judge))
        .expect("one scorecard aggregates");

    assert_eq!(agg.user_id, AGGREGATED_USER_ID);
    assert!(agg.is_official);
    assert!(agg.events.is_empty());
    assert_eq!(agg.winner, judge.winner);
    assert_eq!(agg.total_red, judge.total_red);
    assert_eq!(agg.total_blue, judge.total_blue);
    for (a, j) in agg.rounds.iter().zip(judge.rounds.iter()) {
        assert_eq!(a.red_total, j.red_total);
        assert_eq!(a.blue_total, j.blue_total);
    }
}

#[test]
fn strict_majority_of_votes_decides_the_winner() {
    let m = Uuid::new_v4();
    let cards = vec![
        card_with_totals(m, "judge1", 30.0, 27.0),
        card_with_totals(m, "judge2", 29.0, 28.0),
        card_with_totals(m, "judge3", 27.0, 30.0),
    ];
    assert_eq!(winner_from_scorecards(&cards), Some(Corner::Red));
    let agg = create_aggregated_scorecard(m, &cards).expect("aggregate");
    assert_eq!(agg.winner, Some(Corner::Red));
}

#[test]
fn tied_votes_are_a_draw_even_when_averaged_score_leans_one_way() {
    let m = Uuid::new_v4();
    // Red judge scores a blowout, blue judge a narrow win: averaged score
    // favors red, but the vote is 1-1 and the vote decides.
    let cards = vec![
        card_with_totals(m, "judge1", 30.0, 20.0),
        card_with_totals(m, "judge2", 28.0, 29.0),
    ];
    let agg = create_aggregated_scorecard(m, &cards).expect("aggregate");
    assert!(agg.total_red > agg.total_blue);
    assert_eq!(agg.winner, None);
}

#[test]
fn drawn_scorecards_do_not_vote() {
    let m = Uuid::new_v4();
    let cards = vec![
        card_with_totals(m, "judge1", 30.0, 28.0),
        card_with_totals(m, "judge2", 29.0, 29.0),
        card_with_totals(m, "judge3", 28.0, 28.0),
    ];
    assert_eq!(winner_from_scorecards(&cards), Some(Corner::Red));
}

#[test]
fn overall_totals_are_the_mean_of_judge_totals() {
    let m = Uuid::new_v4();
    let cards = vec![
        card_with_totals(m, "judge1", 30.0, 27.0),
        card_with_totals(m, "judge2", 29.0, 28.0),
    ];
    let agg = create_aggregated_scorecard(m, &cards).expect("aggregate");
    assert_eq!(agg.total_red, 29.5);
    assert_eq!(agg.total_blue, 27.5);
}

#[test]
fn two_judge_example_averages_rounds_and_ends_in_a_draw() {
    let m = Uuid::new_v4();
    // Judge 1: two red points in round 1 -> round 1 is 10-8, overall red.
    let judge1 = scorecard_from_events(
        m,
        "judge1",
        true,
        vec![
            judge_event(m, "judge1", 1, Corner::Red, EventType::Point, 1),
            judge_event(m, "judge1", 1, Corner::Red, EventType::Point, 1),
        ],
        3,
    );
    assert_eq!(judge1.winner, Some(Corner::Red));
    // Judge 2: one blue point in round 1 -> round 1 is 9-10, overall blue.
    let judge2 = scorecard_from_events(
        m,
        "judge2",
        true,
        vec![judge_event(m, "judge2", 1, Corner::Blue, EventType::Point, 1)],
        3,
    );
    assert_eq!(judge2.winner, Some(Corner::Blue));

    let agg = create_aggregated_scorecard(m, &[judge1, judge2]).expect("aggregate");
    // Round 1 averages: red 1.0 points, blue 0.5 -> diff 0.5 -> 10 vs 9.5.
    assert_eq!(agg.rounds[0].red_points, 1.0);
    assert_eq!(agg.rounds[0].blue_points, 0.5);
    assert_eq!(agg.rounds[0].red_total, 10.0);
    assert_eq!(agg.rounds[0].blue_total, 9.5);
    // Votes split 1-1: draw, regardless of the averaged totals.
    assert_eq!(agg.winner, None);
    assert_eq!(agg.total_red, 29.5);
    assert_eq!(agg.total_blue, 29.0);
}

#[test]
fn judge_with_fewer_rounds_contributes_nothing_to_the_missing_ones() {
    let m = Uuid::new_v4();
    let three_rounds = scorecard_from_events(
        m,
        "judge1",
        true,
        vec![judge_event(m, "judge1", 3, Corner::Red, EventType::Point, 1)],
        3,
    );
    let two_rounds = scorecard_from_events(m, "judge2", true, Vec::new(), 2);
    let agg = create_aggregated_scorecard(m, &[three_rounds, two_rounds]).expect("aggregate");
    assert_eq!(agg.rounds.len(), 3);
    assert_eq!(agg.rounds[2].red_points, 0.5);
}

#[test]
fn empty_scorecards_are_filtered_by_the_caller_policy() {
    let m = Uuid::new_v4();
    let scored = card_with_totals(m, "judge1", 30.0, 28.0);
    let placeholder = Scorecard {
        match_id: m,
        user_id: "judge2".to_string(),
        is_official: true,
        rounds: Vec::new(),
        total_red: 0.0,
        total_blue: 0.0,
        winner: None,
        events: Vec::new(),
    };
    let filtered = without_empty_scorecards(&[scored.clone(), placeholder]);
    assert_eq!(filtered, vec![scored]);
}

#[test]
fn aggregation_does_not_mutate_its_inputs() {
    let m = Uuid::new_v4();
    let cards = vec![
        card_with_totals(m, "judge1", 30.0, 27.0),
        card_with_totals(m, "judge2", 27.0, 30.0),
    ];
    let before = cards.clone();
    let _ = create_aggregated_scorecard(m, &cards);
    assert_eq!(cards, before);
}
