//! Club tournament engine: bracket topology, group standings, knockout
//! seeding, and draw orchestration over an in-memory store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    calculate_group_standings, draw_groups, execute_draw, generate_bracket, generate_seed_token,
    get_bracket, get_groups, reset_draw, seed_round_robin, seed_teams_into_bracket, BracketView,
};
pub use models::{
    Bracket, BracketFormat, BracketOptions, BracketStructure, Caller, DrawError, Group, GroupId,
    GroupParams, GroupStanding, Match, MatchId, MatchStatus, PlayoffRound, Registration,
    RegistrationId, RegistrationStatus, TeamId, Tournament, TournamentId, TournamentStatus,
    GROUP_LETTERS,
};
pub use store::TournamentStore;
