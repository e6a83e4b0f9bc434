//! Document-store boundary. The core never writes storage directly: it
//! returns entities for the caller to persist through this interface. A
//! remote store would be a second implementor; `MemoryStore` is the local
//! fallback and the backing for the web binary.

use crate::models::{Fighter, FighterId, Match, MatchId, Scorecard, Tournament, TournamentId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Errors from the document store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// The requested document does not exist.
    NotFound,
    /// The store could not be reached (or a lock was poisoned).
    Unavailable,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Document not found"),
            StoreError::Unavailable => write!(f, "Store unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Key-value document store for the tournament domain.
pub trait DocumentStore {
    fn get_tournament(&self, id: TournamentId) -> Result<Tournament, StoreError>;
    fn get_match(&self, id: MatchId) -> Result<Match, StoreError>;
    fn get_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, StoreError>;
    fn get_fighters(&self, tournament_id: TournamentId) -> Result<Vec<Fighter>, StoreError>;
    fn get_all_scorecards_for_match(&self, match_id: MatchId) -> Result<Vec<Scorecard>, StoreError>;

    fn save_tournament(&self, tournament: &Tournament) -> Result<(), StoreError>;
    fn save_matches(&self, matches: &[Match]) -> Result<(), StoreError>;
    fn save_fighter(&self, fighter: &Fighter) -> Result<(), StoreError>;
    fn save_scorecard(&self, scorecard: &Scorecard) -> Result<(), StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    tournaments: HashMap<TournamentId, Tournament>,
    matches: HashMap<MatchId, Match>,
    fighters: HashMap<FighterId, Fighter>,
    /// Keyed by (match, judge); each judge owns a disjoint scorecard.
    scorecards: HashMap<(MatchId, String), Scorecard>,
}

/// In-memory document store behind a RwLock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get_tournament(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        let g = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        g.tournaments.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_match(&self, id: MatchId) -> Result<Match, StoreError> {
        let g = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        g.matches.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, StoreError> {
        let g = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        let mut matches: Vec<Match> = g
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matches)
    }

    fn get_fighters(&self, tournament_id: TournamentId) -> Result<Vec<Fighter>, StoreError> {
        let g = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        let mut fighters: Vec<Fighter> = g
            .fighters
            .values()
            .filter(|f| f.tournament_id == tournament_id)
            .cloned()
            .collect();
        fighters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fighters)
    }

    fn get_all_scorecards_for_match(&self, match_id: MatchId) -> Result<Vec<Scorecard>, StoreError> {
        let g = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        let mut scorecards: Vec<Scorecard> = g
            .scorecards
            .values()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect();
        scorecards.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(scorecards)
    }

    fn save_tournament(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let mut g = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        g.tournaments.insert(tournament.id, tournament.clone());
        Ok(())
    }

    fn save_matches(&self, matches: &[Match]) -> Result<(), StoreError> {
        let mut g = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        for m in matches {
            g.matches.insert(m.id, m.clone());
        }
        Ok(())
    }

    fn save_fighter(&self, fighter: &Fighter) -> Result<(), StoreError> {
        let mut g = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        g.fighters.insert(fighter.id, fighter.clone());
        Ok(())
    }

    fn save_scorecard(&self, scorecard: &Scorecard) -> Result<(), StoreError> {
        let mut g = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        g.scorecards.insert(
            (scorecard.match_id, scorecard.user_id.clone()),
            scorecard.clone(),
        );
        Ok(())
    }
}
