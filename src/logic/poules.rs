//! Pool stage: drawing pools and generating the round-robin fixtures
//! inside each pool.

use crate::models::{Match, Tournament, TournamentError, TournamentKind};

/// Split an ordered fighter-name list into pools of `poule_size` (the
/// caller shuffles beforehand if a random draw is wanted). The last pool
/// takes the remainder. Requires at least two fighters.
pub fn assign_poules(
    names: &[String],
    poule_size: usize,
) -> Result<Vec<Vec<String>>, TournamentError> {
    if names.len() < 2 {
        return Err(TournamentError::NotEnoughFighters {
            required: 2,
            available: names.len(),
        });
    }
    if poule_size < 2 {
        return Err(TournamentError::MissingPouleSize);
    }
    Ok(names.chunks(poule_size).map(|c| c.to_vec()).collect())
}

/// Generate all-pairs round-robin matches for each pool. Pool ids are
/// `poule_1`, `poule_2`, ... in draw order.
pub fn generate_poule_matches(
    tournament: &Tournament,
    poules: &[Vec<String>],
    weight_class: &str,
) -> Result<Vec<Match>, TournamentError> {
    if tournament.kind == TournamentKind::Knockout {
        return Err(TournamentError::WrongTournamentKind);
    }
    let mut matches = Vec::new();
    for (pool_index, pool) in poules.iter().enumerate() {
        let poule_id = format!("poule_{}", pool_index + 1);
        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                let mut m = Match::new(
                    tournament.id,
                    pool[i].clone(),
                    pool[j].clone(),
                    weight_class,
                    tournament.rounds,
                );
                m.poule_id = Some(poule_id.clone());
                matches.push(m);
            }
        }
    }
    Ok(matches)
}
