//! Integration tests for round scoring: event accumulation, the
//! point-differential rule, and full recompute after event deletion.

use fight_scoring_web::{
    calculate_rounds, scorecard_from_events, Corner, EventType, ScoreEvent,
};
use uuid::Uuid;

fn event(match_id: Uuid, round: u32, corner: Corner, kind: EventType, value: i32) -> ScoreEvent {
    ScoreEvent::new(match_id, "judge1", round, corner, kind, value)
}

#[test]
fn empty_event_list_gives_all_even_rounds() {
    let rounds = calculate_rounds(&[], 3);
    assert_eq!(rounds.len(), 3);
    for (i, r) in rounds.iter().enumerate() {
        assert_eq!(r.round, i as u32 + 1);
        assert_eq!(r.red_total, 10.0);
        assert_eq!(r.blue_total, 10.0);
    }
}

#[test]
fn point_lead_gives_winner_ten_and_loser_ten_minus_diff() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Red, EventType::Point, 1),
    ];
    let rounds = calculate_rounds(&events, 3);
    assert_eq!(rounds[0].red_points, 2.0);
    assert_eq!(rounds[0].blue_points, 0.0);
    assert_eq!(rounds[0].red_total, 10.0);
    assert_eq!(rounds[0].blue_total, 8.0);
}

#[test]
fn deductions_come_off_each_corners_own_total() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Blue, EventType::Point, 1),
        event(m, 1, Corner::Blue, EventType::Deduction, -1),
    ];
    let rounds = calculate_rounds(&events, 3);
    // diff = 2: red 10, blue 10 - 2 - 1 deduction = 7
    assert_eq!(rounds[0].red_total, 10.0);
    assert_eq!(rounds[0].blue_total, 7.0);
    assert_eq!(rounds[0].blue_deductions, 1.0);
}

#[test]
fn tied_points_give_both_ten_minus_own_deductions() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 2, Corner::Red, EventType::Point, 1),
        event(m, 2, Corner::Blue, EventType::Point, 1),
        event(m, 2, Corner::Red, EventType::Deduction, -1),
    ];
    let rounds = calculate_rounds(&events, 3);
    assert_eq!(rounds[1].red_total, 9.0);
    assert_eq!(rounds[1].blue_total, 10.0);
}

#[test]
fn totals_are_clamped_at_zero() {
    let m = Uuid::new_v4();
    let mut events: Vec<ScoreEvent> = (0..15)
        .map(|_| event(m, 1, Corner::Red, EventType::Point, 1))
        .collect();
    events.push(event(m, 2, Corner::Blue, EventType::Deduction, -12));
    let rounds = calculate_rounds(&events, 3);
    // Round 1: diff 15, blue would be 10 - 15
    assert_eq!(rounds[0].blue_total, 0.0);
    // Round 2: tie on points but 12 deductions
    assert_eq!(rounds[1].blue_total, 0.0);
    for r in &rounds {
        assert!(r.red_total >= 0.0 && r.blue_total >= 0.0);
        assert!(r.red_total + r.blue_total <= 20.0);
    }
}

#[test]
fn events_outside_round_range_are_ignored() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 0, Corner::Red, EventType::Point, 1),
        event(m, 4, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Blue, EventType::Point, 1),
    ];
    let rounds = calculate_rounds(&events, 3);
    assert_eq!(rounds[0].red_points, 0.0);
    assert_eq!(rounds[0].blue_points, 1.0);
    assert!(rounds.iter().all(|r| r.red_points == 0.0));
}

#[test]
fn recomputation_is_deterministic() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 2, Corner::Blue, EventType::Point, 1),
        event(m, 3, Corner::Blue, EventType::Deduction, -1),
    ];
    assert_eq!(calculate_rounds(&events, 3), calculate_rounds(&events, 3));
}

#[test]
fn scorecard_sums_round_totals_and_derives_winner() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Red, EventType::Point, 1),
    ];
    let sc = scorecard_from_events(m, "judge1", true, events, 3);
    // Round 1: 10-8, rounds 2 and 3: 10-10
    assert_eq!(sc.total_red, 30.0);
    assert_eq!(sc.total_blue, 28.0);
    assert_eq!(sc.winner, Some(Corner::Red));
    assert_eq!(sc.rounds.len(), 3);
}

#[test]
fn equal_totals_give_no_winner() {
    let m = Uuid::new_v4();
    let sc = scorecard_from_events(m, "judge1", true, Vec::new(), 3);
    assert_eq!(sc.total_red, sc.total_blue);
    assert_eq!(sc.winner, None);
}

#[test]
fn deleting_an_event_recomputes_from_the_remaining_list() {
    let m = Uuid::new_v4();
    let events = vec![
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Red, EventType::Point, 1),
        event(m, 1, Corner::Blue, EventType::Point, 1),
    ];
    let full = scorecard_from_events(m, "judge1", true, events.clone(), 3);
    assert_eq!(full.rounds[0].red_points, 2.0);

    let deleted_id = events[1].id;
    let remaining: Vec<ScoreEvent> = events.into_iter().filter(|e| e.id != deleted_id).collect();
    let recomputed = scorecard_from_events(m, "judge1", true, remaining.clone(), 3);

    let fresh = scorecard_from_events(m, "judge1", true, remaining, 3);
    assert_eq!(recomputed.rounds, fresh.rounds);
    assert_eq!(recomputed.rounds[0].red_points, 1.0);
    // 1-1 on points: both corners back to 10
    assert_eq!(recomputed.rounds[0].red_total, 10.0);
    assert_eq!(recomputed.rounds[0].blue_total, 10.0);
}
