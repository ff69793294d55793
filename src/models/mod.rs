//! Data structures for the tournament engine: brackets, standings, draw records.

mod bracket;
mod standing;
mod tournament;

pub use bracket::{
    Bracket, BracketFormat, BracketOptions, BracketStructure, GroupParams, Match, MatchId,
    MatchStatus, PlayoffRound,
};
pub use standing::GroupStanding;
pub use tournament::{
    Caller, DrawError, Group, GroupId, Registration, RegistrationId, RegistrationStatus, TeamId,
    Tournament, TournamentId, TournamentStatus, GROUP_LETTERS,
};
