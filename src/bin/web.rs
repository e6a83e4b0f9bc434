//! Single binary web server: REST API over the scoring and tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use fight_scoring_web::{
    advance_phase, assign_poules, build_bracket_view, calculate_standings, consensus_scorecard,
    fighter_leaderboard, generate_knockout_matches, generate_poule_matches, phase_complete,
    scorecard_from_events, starting_phase, Corner, DocumentStore, EventType, Fighter, Match,
    MatchId, MatchStatus, MemoryStore, ScoreEvent, Scorecard, StoreError, Tournament,
    TournamentError, TournamentId, TournamentKind,
};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

type AppState = Data<MemoryStore>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(rename = "type", default)]
    kind: TournamentKind,
    #[serde(default = "default_rounds")]
    rounds: u32,
    #[serde(rename = "pouleSize")]
    poule_size: Option<usize>,
}

fn default_rounds() -> u32 {
    3
}

#[derive(Deserialize)]
struct AddFighterBody {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMatchBody {
    red_fighter: String,
    blue_fighter: String,
    #[serde(default)]
    weight_class: String,
    rounds: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreEventBody {
    user_id: String,
    round: u32,
    corner: Corner,
    #[serde(rename = "type")]
    kind: EventType,
    value: Option<i32>,
    #[serde(default)]
    is_official: bool,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: MatchStatus,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id, judge id, event id (for event deletion).
#[derive(Deserialize)]
struct MatchEventPath {
    id: MatchId,
    user_id: String,
    event_id: Uuid,
}

fn store_error(e: StoreError) -> HttpResponse {
    match e {
        StoreError::NotFound => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        StoreError::Unavailable => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// All scorecards for a tournament's matches, keyed by match id.
fn scorecards_by_match(
    store: &MemoryStore,
    matches: &[Match],
) -> Result<HashMap<MatchId, Vec<Scorecard>>, StoreError> {
    let mut by_match = HashMap::new();
    for m in matches {
        by_match.insert(m.id, store.get_all_scorecards_for_match(m.id)?);
    }
    Ok(by_match)
}

/// Consensus results for standings/leaderboard: (match, consensus scorecard)
/// for every match that has one.
fn consensus_results(
    matches: &[Match],
    by_match: &HashMap<MatchId, Vec<Scorecard>>,
) -> Vec<(Match, Scorecard)> {
    matches
        .iter()
        .filter_map(|m| {
            by_match
                .get(&m.id)
                .and_then(|cards| consensus_scorecard(m.id, cards))
                .map(|sc| (m.clone(), sc))
        })
        .collect()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fight-scoring-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut tournament = Tournament::new(body.name.trim(), body.kind, body.rounds);
    tournament.poule_size = body.poule_size;
    match state.save_tournament(&tournament) {
        Ok(()) => HttpResponse::Ok().json(&tournament),
        Err(e) => store_error(e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get_tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => store_error(e),
    }
}

/// Register a fighter. Names must be unique within the tournament
/// (case-insensitive) because matches reference fighters by name.
#[post("/api/tournaments/{id}/fighters")]
async fn api_add_fighter(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddFighterBody>,
) -> HttpResponse {
    let tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request(TournamentError::EmptyFighterName);
    }
    let existing = match state.get_fighters(tournament.id) {
        Ok(fs) => fs,
        Err(e) => return store_error(e),
    };
    if existing.iter().any(|f| f.name.eq_ignore_ascii_case(name)) {
        return bad_request(TournamentError::DuplicateFighterName);
    }
    let fighter = Fighter::new(tournament.id, name);
    match state.save_fighter(&fighter) {
        Ok(()) => HttpResponse::Ok().json(&fighter),
        Err(e) => store_error(e),
    }
}

/// List a tournament's fighters.
#[get("/api/tournaments/{id}/fighters")]
async fn api_get_fighters(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get_fighters(path.id) {
        Ok(fighters) => HttpResponse::Ok().json(&fighters),
        Err(e) => store_error(e),
    }
}

/// Create a single (pool) match.
#[post("/api/tournaments/{id}/matches")]
async fn api_create_match(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<CreateMatchBody>,
) -> HttpResponse {
    let tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    let m = Match::new(
        tournament.id,
        body.red_fighter.trim(),
        body.blue_fighter.trim(),
        body.weight_class.clone(),
        body.rounds.unwrap_or(tournament.rounds),
    );
    match state.save_matches(std::slice::from_ref(&m)) {
        Ok(()) => HttpResponse::Ok().json(&m),
        Err(e) => store_error(e),
    }
}

/// List a tournament's matches.
#[get("/api/tournaments/{id}/matches")]
async fn api_get_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get_matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(&matches),
        Err(e) => store_error(e),
    }
}

/// Draw pools from the registered fighters (shuffled) and generate the
/// round-robin fixtures inside each pool.
#[post("/api/tournaments/{id}/poules")]
async fn api_draw_poules(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    if tournament.kind != TournamentKind::PouleKnockout
        && tournament.kind != TournamentKind::RoundRobin
    {
        return bad_request(TournamentError::WrongTournamentKind);
    }
    let fighters = match state.get_fighters(tournament.id) {
        Ok(fs) => fs,
        Err(e) => return store_error(e),
    };
    let mut names: Vec<String> = fighters.into_iter().map(|f| f.name).collect();
    names.shuffle(&mut rand::thread_rng());

    let poule_size = tournament.poule_size.unwrap_or(names.len().max(2));
    let poules = match assign_poules(&names, poule_size) {
        Ok(p) => p,
        Err(e) => return bad_request(e),
    };
    let matches = match generate_poule_matches(&tournament, &poules, "") {
        Ok(ms) => ms,
        Err(e) => return bad_request(e),
    };
    tournament.poules = Some(poules);
    if let Err(e) = state.save_matches(&matches) {
        return store_error(e);
    }
    match state.save_tournament(&tournament) {
        Ok(()) => HttpResponse::Ok().json(&matches),
        Err(e) => store_error(e),
    }
}

/// Generate the first knockout round for a knockout tournament from the
/// registered fighters (shuffled seeding).
#[post("/api/tournaments/{id}/bracket/generate")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    if tournament.kind != TournamentKind::Knockout {
        return bad_request(TournamentError::WrongTournamentKind);
    }
    let fighters = match state.get_fighters(tournament.id) {
        Ok(fs) => fs,
        Err(e) => return store_error(e),
    };
    if fighters.len() < 2 {
        return bad_request(TournamentError::NotEnoughFighters {
            required: 2,
            available: fighters.len(),
        });
    }
    let mut names: Vec<String> = fighters.into_iter().map(|f| f.name).collect();
    names.shuffle(&mut rand::thread_rng());

    let matches = generate_knockout_matches(&tournament, &names, "");
    tournament.current_phase = starting_phase(names.len());
    if let Err(e) = state.save_matches(&matches) {
        return store_error(e);
    }
    match state.save_tournament(&tournament) {
        Ok(()) => HttpResponse::Ok().json(&matches),
        Err(e) => store_error(e),
    }
}

/// Rendered knockout bracket with speculative placeholders.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let matches = match state.get_matches(path.id) {
        Ok(ms) => ms,
        Err(e) => return store_error(e),
    };
    let by_match = match scorecards_by_match(&state, &matches) {
        Ok(b) => b,
        Err(e) => return store_error(e),
    };
    HttpResponse::Ok().json(build_bracket_view(&matches, &by_match))
}

/// Standings over all fighters from consensus results.
#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let fighters = match state.get_fighters(path.id) {
        Ok(fs) => fs,
        Err(e) => return store_error(e),
    };
    let matches = match state.get_matches(path.id) {
        Ok(ms) => ms,
        Err(e) => return store_error(e),
    };
    let by_match = match scorecards_by_match(&state, &matches) {
        Ok(b) => b,
        Err(e) => return store_error(e),
    };
    let names: Vec<String> = fighters.into_iter().map(|f| f.name).collect();
    let results = consensus_results(&matches, &by_match);
    let borrowed: Vec<(&Match, &Scorecard)> = results.iter().map(|(m, sc)| (m, sc)).collect();
    HttpResponse::Ok().json(calculate_standings(&names, &borrowed))
}

/// Fighter leaderboard across the whole tournament (win-percentage tie-break).
#[get("/api/tournaments/{id}/leaderboard")]
async fn api_get_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let fighters = match state.get_fighters(path.id) {
        Ok(fs) => fs,
        Err(e) => return store_error(e),
    };
    let matches = match state.get_matches(path.id) {
        Ok(ms) => ms,
        Err(e) => return store_error(e),
    };
    let by_match = match scorecards_by_match(&state, &matches) {
        Ok(b) => b,
        Err(e) => return store_error(e),
    };
    let names: Vec<String> = fighters.into_iter().map(|f| f.name).collect();
    let results = consensus_results(&matches, &by_match);
    let borrowed: Vec<(&Match, &Scorecard)> = results.iter().map(|(m, sc)| (m, sc)).collect();
    HttpResponse::Ok().json(fighter_leaderboard(&names, &borrowed))
}

/// Advance the tournament one phase when the current phase is complete.
/// Returns the newly created matches (empty when nothing advanced, which is
/// not an error: the phase may simply be awaiting results).
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_phase(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    let matches = match state.get_matches(tournament.id) {
        Ok(ms) => ms,
        Err(e) => return store_error(e),
    };
    let by_match = match scorecards_by_match(&state, &matches) {
        Ok(b) => b,
        Err(e) => return store_error(e),
    };
    let new_matches = advance_phase(&mut tournament, &matches, &by_match);
    if !new_matches.is_empty() {
        if let Err(e) = state.save_matches(&new_matches) {
            return store_error(e);
        }
        if let Err(e) = state.save_tournament(&tournament) {
            return store_error(e);
        }
        log::info!(
            "Tournament {} advanced to {:?}: {} new match(es)",
            tournament.id,
            tournament.current_phase,
            new_matches.len()
        );
    }
    HttpResponse::Ok().json(serde_json::json!({
        "currentPhase": tournament.current_phase,
        "phaseComplete": phase_complete(tournament.current_phase, &matches, &by_match),
        "newMatches": new_matches,
    }))
}

/// Submit one score event for a judge; the judge's scorecard is recomputed
/// in full from the updated event list and returned.
#[post("/api/matches/{id}/events")]
async fn api_add_event(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreEventBody>,
) -> HttpResponse {
    let m = match find_match(&state, path.id) {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    let scorecards = match state.get_all_scorecards_for_match(m.id) {
        Ok(cards) => cards,
        Err(e) => return store_error(e),
    };
    let default_value = match body.kind {
        EventType::Point => 1,
        EventType::Deduction => -1,
    };
    let event = ScoreEvent::new(
        m.id,
        body.user_id.clone(),
        body.round,
        body.corner,
        body.kind,
        body.value.unwrap_or(default_value),
    );

    let mut events: Vec<ScoreEvent> = scorecards
        .into_iter()
        .find(|sc| sc.user_id == body.user_id)
        .map(|sc| sc.events)
        .unwrap_or_default();
    events.push(event);
    let scorecard =
        scorecard_from_events(m.id, body.user_id.as_str(), body.is_official, events, m.rounds);
    match state.save_scorecard(&scorecard) {
        Ok(()) => HttpResponse::Ok().json(&scorecard),
        Err(e) => store_error(e),
    }
}

/// Delete one event from a judge's scorecard; totals are recomputed from
/// the remaining events (the event list is the source of truth).
#[delete("/api/matches/{id}/scorecards/{user_id}/events/{event_id}")]
async fn api_delete_event(state: AppState, path: Path<MatchEventPath>) -> HttpResponse {
    let m = match find_match(&state, path.id) {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    let scorecards = match state.get_all_scorecards_for_match(m.id) {
        Ok(cards) => cards,
        Err(e) => return store_error(e),
    };
    let Some(scorecard) = scorecards.into_iter().find(|sc| sc.user_id == path.user_id) else {
        return store_error(StoreError::NotFound);
    };
    let events: Vec<ScoreEvent> = scorecard
        .events
        .into_iter()
        .filter(|e| e.id != path.event_id)
        .collect();
    let recomputed = scorecard_from_events(
        m.id,
        path.user_id.as_str(),
        scorecard.is_official,
        events,
        m.rounds,
    );
    match state.save_scorecard(&recomputed) {
        Ok(()) => HttpResponse::Ok().json(&recomputed),
        Err(e) => store_error(e),
    }
}

/// All judges' scorecards for a match.
#[get("/api/matches/{id}/scorecards")]
async fn api_get_scorecards(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match state.get_all_scorecards_for_match(path.id) {
        Ok(cards) => HttpResponse::Ok().json(&cards),
        Err(e) => store_error(e),
    }
}

/// The consensus scorecard for a match, or JSON null while there is
/// nothing to aggregate yet.
#[get("/api/matches/{id}/scorecards/aggregated")]
async fn api_get_aggregated(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let scorecards = match state.get_all_scorecards_for_match(path.id) {
        Ok(cards) => cards,
        Err(e) => return store_error(e),
    };
    HttpResponse::Ok().json(consensus_scorecard(path.id, &scorecards))
}

/// Update a match's status (pending/active/completed).
#[put("/api/matches/{id}/status")]
async fn api_set_match_status(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let mut m = match find_match(&state, path.id) {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    m.status = body.status;
    match state.save_matches(std::slice::from_ref(&m)) {
        Ok(()) => HttpResponse::Ok().json(&m),
        Err(e) => store_error(e),
    }
}

fn find_match(store: &MemoryStore, id: MatchId) -> Result<Match, HttpResponse> {
    store.get_match(id).map_err(store_error)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(MemoryStore::new());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_fighter)
            .service(api_get_fighters)
            .service(api_create_match)
            .service(api_get_matches)
            .service(api_draw_poules)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_get_standings)
            .service(api_get_leaderboard)
            .service(api_advance_phase)
            .service(api_add_event)
            .service(api_delete_event)
            .service(api_get_scorecards)
            .service(api_get_aggregated)
            .service(api_set_match_status)
    })
    .bind(bind)?
    .run()
    .await
}
