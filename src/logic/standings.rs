//! Standings and leaderboard: rank participants from completed matches
//! using their consensus scorecards.

use crate::models::{Corner, Match, Scorecard};
use serde::Serialize;
use std::collections::HashMap;

/// One row of a pool/tournament standing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub points: f64,
    pub matches_played: u32,
}

/// One row of the fighter-level leaderboard across a whole tournament.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: f64,
    pub matches_played: u32,
    pub win_percentage: f64,
}

/// Rank participants by their results. `results` pairs each match with its
/// consensus scorecard; matches whose participants are not both in
/// `participants` are skipped.
///
/// Every result counts towards matches played and points for both sides;
/// only a decided match awards a win (draws award neither). Sort order:
/// wins descending, then points descending; full ties keep the order the
/// participants were supplied in (rank is the 1-based position, ties get
/// consecutive ranks).
pub fn calculate_standings(
    participants: &[String],
    results: &[(&Match, &Scorecard)],
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = participants
        .iter()
        .map(|name| Standing {
            name: name.clone(),
            wins: 0,
            points: 0.0,
            matches_played: 0,
        })
        .collect();
    let index: HashMap<&str, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    for (m, scorecard) in results {
        let (Some(&red), Some(&blue)) = (
            index.get(m.red_fighter.as_str()),
            index.get(m.blue_fighter.as_str()),
        ) else {
            continue;
        };
        standings[red].matches_played += 1;
        standings[blue].matches_played += 1;
        standings[red].points += scorecard.total_red;
        standings[blue].points += scorecard.total_blue;
        match scorecard.winner {
            Some(Corner::Red) => standings[red].wins += 1,
            Some(Corner::Blue) => standings[blue].wins += 1,
            None => {}
        }
    }

    // Stable sort: full ties keep insertion order.
    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points.total_cmp(&a.points))
    });
    standings
}

/// Fighter leaderboard over an entire tournament: wins/losses/draws plus a
/// win-percentage third tie-break.
pub fn fighter_leaderboard(
    fighters: &[String],
    results: &[(&Match, &Scorecard)],
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = fighters
        .iter()
        .map(|name| LeaderboardEntry {
            name: name.clone(),
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0.0,
            matches_played: 0,
            win_percentage: 0.0,
        })
        .collect();
    let index: HashMap<&str, usize> = fighters
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    for (m, scorecard) in results {
        let (Some(&red), Some(&blue)) = (
            index.get(m.red_fighter.as_str()),
            index.get(m.blue_fighter.as_str()),
        ) else {
            continue;
        };
        entries[red].matches_played += 1;
        entries[blue].matches_played += 1;
        entries[red].points += scorecard.total_red;
        entries[blue].points += scorecard.total_blue;
        match scorecard.winner {
            Some(Corner::Red) => {
                entries[red].wins += 1;
                entries[blue].losses += 1;
            }
            Some(Corner::Blue) => {
                entries[blue].wins += 1;
                entries[red].losses += 1;
            }
            None => {
                entries[red].draws += 1;
                entries[blue].draws += 1;
            }
        }
    }

    for entry in &mut entries {
        if entry.matches_played > 0 {
            entry.win_percentage = f64::from(entry.wins) / f64::from(entry.matches_played) * 100.0;
        }
    }

    entries.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points.total_cmp(&a.points))
            .then_with(|| b.win_percentage.total_cmp(&a.win_percentage))
    });
    entries
}
