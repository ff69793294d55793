//! Single binary web server: REST API over the in-memory tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use club_tournament_engine::{
    calculate_group_standings, execute_draw, generate_bracket, get_bracket, get_groups,
    reset_draw, seed_round_robin, BracketFormat, BracketOptions, Caller, DrawError, GroupId,
    RegistrationStatus, TournamentId, TournamentStatus, TournamentStore,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory state: one store behind a lock (sessions/persistence out of scope).
type AppState = Data<RwLock<TournamentStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    organizer_id: Uuid,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: TournamentStatus,
}

#[derive(Deserialize)]
struct RegisterClubBody {
    club_id: Uuid,
}

#[derive(Deserialize)]
struct RegistrationStatusBody {
    registration_id: Uuid,
    status: RegistrationStatus,
}

#[derive(Deserialize)]
struct DrawBody {
    caller_id: Uuid,
    #[serde(default)]
    admin: bool,
    number_of_groups: usize,
}

#[derive(Deserialize)]
struct ResetDrawBody {
    caller_id: Uuid,
    #[serde(default)]
    admin: bool,
}

#[derive(Deserialize)]
struct GenerateBracketBody {
    format: BracketFormat,
    team_count: usize,
    #[serde(default)]
    options: Option<BracketOptions>,
}

#[derive(Deserialize)]
struct MatchResultBody {
    team1_score: u32,
    team2_score: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: group id (e.g. /api/groups/{group_id}/standings)
#[derive(Deserialize)]
struct GroupPath {
    group_id: GroupId,
}

/// Path segments: group id and match id within that group's fixtures.
#[derive(Deserialize)]
struct GroupMatchPath {
    group_id: GroupId,
    match_id: u32,
}

/// Map a draw error onto the HTTP status its category calls for.
fn draw_error_response(e: DrawError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        DrawError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        DrawError::NotAuthorized => HttpResponse::Forbidden().json(body),
        DrawError::AlreadyDrawn | DrawError::InvalidStatus(_) => {
            HttpResponse::Conflict().json(body)
        }
        DrawError::NotEnoughTeams { .. }
        | DrawError::TooManyGroups { .. }
        | DrawError::GroupCountUnsupported { .. } => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-tournament-engine",
    })
}

/// Create a new tournament (Draft; publish before drawing).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = g.create_tournament(body.name.trim(), body.organizer_id);
    HttpResponse::Ok().json(t)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournament(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Update a tournament's lifecycle status.
#[put("/api/tournaments/{id}/status")]
async fn api_set_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.set_tournament_status(path.id, body.status) {
        HttpResponse::Ok().json(g.tournament(path.id))
    } else {
        HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
    }
}

/// Register a club for a tournament (registration starts Pending).
#[post("/api/tournaments/{id}/registrations")]
async fn api_register_club(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterClubBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.tournament(path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    let r = g.register_club(path.id, body.club_id);
    HttpResponse::Ok().json(r)
}

/// Approve or reject a registration.
#[put("/api/tournaments/{id}/registrations/status")]
async fn api_set_registration_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegistrationStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.tournament(path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    if g.set_registration_status(body.registration_id, body.status) {
        HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
    } else {
        HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" }))
    }
}

/// Execute the draw: shuffle approved clubs into groups.
#[post("/api/tournaments/{id}/draw")]
async fn api_execute_draw(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<DrawBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let caller = Caller {
        user_id: body.caller_id,
        admin: body.admin,
    };
    match execute_draw(&mut g, path.id, &caller, body.number_of_groups) {
        Ok(groups) => {
            log::info!(
                "Draw executed for tournament {}: {} group(s)",
                path.id,
                groups.len()
            );
            HttpResponse::Ok().json(groups)
        }
        Err(e) => draw_error_response(e),
    }
}

/// Reset the draw: delete groups, clear the draw flag and seed.
#[delete("/api/tournaments/{id}/draw")]
async fn api_reset_draw(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ResetDrawBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let caller = Caller {
        user_id: body.caller_id,
        admin: body.admin,
    };
    match reset_draw(&mut g, path.id, &caller) {
        Ok(()) => {
            log::info!("Draw reset for tournament {}", path.id);
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => draw_error_response(e),
    }
}

/// Persisted groups for a tournament.
#[get("/api/tournaments/{id}/groups")]
async fn api_get_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match get_groups(&g, path.id) {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => draw_error_response(e),
    }
}

/// Bracket view: tournament, draw state, and groups.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match get_bracket(&g, path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => draw_error_response(e),
    }
}

/// Pure bracket generation (no persistence): format + team count + options.
#[post("/api/brackets/generate")]
async fn api_generate_bracket(body: Json<GenerateBracketBody>) -> HttpResponse {
    if body.team_count < 2 {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Need at least 2 teams" }));
    }
    let options = body.options.clone().unwrap_or_default();
    let bracket = generate_bracket(body.format, body.team_count, &options);
    HttpResponse::Ok().json(bracket)
}

/// Generate round-robin fixtures for a drawn group and store them.
#[post("/api/groups/{group_id}/fixtures")]
async fn api_generate_group_fixtures(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let group = match g.group(path.group_id) {
        Some(group) => group.clone(),
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No group" })),
    };
    let mut bracket = generate_bracket(
        BracketFormat::RoundRobin,
        group.team_ids.len(),
        &BracketOptions::default(),
    );
    seed_round_robin(&group.team_ids, &mut bracket);
    let matches = match bracket.structure {
        club_tournament_engine::BracketStructure::RoundRobin { matches } => matches,
        _ => unreachable!("round robin bracket"),
    };
    g.set_group_matches(group.id, matches.clone());
    HttpResponse::Ok().json(matches)
}

/// Record a final score for one group fixture.
#[put("/api/groups/{group_id}/matches/{match_id}/result")]
async fn api_record_group_result(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.group_match_mut(path.group_id, path.match_id) {
        Some(m) => {
            m.record_result(body.team1_score, body.team2_score);
            HttpResponse::Ok().json(m)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" })),
    }
}

/// Current standings for one group, computed from completed fixtures.
#[get("/api/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let group = match g.group(path.group_id) {
        Some(group) => group,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No group" })),
    };
    let standings = calculate_group_standings(&group.team_ids, g.group_matches(group.id));
    HttpResponse::Ok().json(standings)
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

    let state = Data::new(RwLock::new(TournamentStore::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_status)
            .service(api_register_club)
            .service(api_set_registration_status)
            .service(api_execute_draw)
            .service(api_reset_draw)
            .service(api_get_groups)
            .service(api_get_bracket)
            .service(api_generate_bracket)
            .service(api_generate_group_fixtures)
            .service(api_record_group_result)
            .service(api_group_standings)
    })
    .bind(bind)?
    .run()
    .await
}
