//! Engine logic: bracket topology, standings, seeding, draw orchestration.

pub mod builder;
mod draw;
mod seeding;
mod standings;

pub use builder::{generate_bracket, generate_seed_token};
pub use draw::{draw_groups, execute_draw, get_bracket, get_groups, reset_draw, BracketView};
pub use seeding::{seed_round_robin, seed_teams_into_bracket};
pub use standings::calculate_group_standings;
