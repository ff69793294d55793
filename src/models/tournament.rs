//! Tournament, registration, and group records plus draw errors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for a team (the registered club plays as the team).
pub type TeamId = Uuid;

/// Unique identifier for a registration.
pub type RegistrationId = Uuid;

/// Unique identifier for a persisted group.
pub type GroupId = Uuid;

/// Fixed group-letter sequence; groups are labeled by creation order.
pub const GROUP_LETTERS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Errors that can occur during draw operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// Referenced tournament does not exist.
    TournamentNotFound(TournamentId),
    /// Caller is neither the tournament's organizer nor an administrator.
    NotAuthorized,
    /// The draw has already been executed for this tournament.
    AlreadyDrawn,
    /// Tournament lifecycle state does not allow a draw.
    InvalidStatus(TournamentStatus),
    /// Fewer than 2 approved registrations.
    NotEnoughTeams { approved: usize },
    /// Requested group count exceeds the approved-team count.
    TooManyGroups { requested: usize, approved: usize },
    /// Requested group count is zero or exceeds the fixed letter sequence (A-H).
    GroupCountUnsupported { requested: usize },
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            DrawError::NotAuthorized => write!(f, "Only the organizer or an admin may do this"),
            DrawError::AlreadyDrawn => write!(f, "Draw has already been executed"),
            DrawError::InvalidStatus(s) => {
                write!(f, "Tournament status {:?} does not allow a draw", s)
            }
            DrawError::NotEnoughTeams { approved } => {
                write!(f, "Need at least 2 approved teams (have {})", approved)
            }
            DrawError::TooManyGroups { requested, approved } => write!(
                f,
                "Requested {} groups but only {} approved teams",
                requested, approved
            ),
            DrawError::GroupCountUnsupported { requested } => write!(
                f,
                "Requested {} groups; between 1 and {} are supported",
                requested,
                GROUP_LETTERS.len()
            ),
        }
    }
}

/// Lifecycle state of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Draft,
    Published,
    Ongoing,
    Completed,
    Cancelled,
}

/// A tournament record as the draw engine sees it. Everything else about a
/// tournament (dates, venues, payments) lives outside this subsystem.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub organizer_id: Uuid,
    pub status: TournamentStatus,
    pub draw_completed: bool,
    /// Seed token stored alongside a completed draw; the group shuffle is
    /// replayable from it.
    pub draw_seed: Option<String>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, organizer_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            organizer_id,
            status: TournamentStatus::Draft,
            draw_completed: false,
            draw_seed: None,
        }
    }
}

/// Approval state of a club's registration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A club's registration for a tournament. Only `Approved` registrations
/// enter the draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub tournament_id: TournamentId,
    pub club_id: TeamId,
    pub status: RegistrationStatus,
    /// Letter of the group the club was drawn into, once drawn.
    pub group_label: Option<char>,
}

impl Registration {
    pub fn new(tournament_id: TournamentId, club_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            club_id,
            status: RegistrationStatus::Pending,
            group_label: None,
        }
    }
}

/// A persisted group produced by the draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament_id: TournamentId,
    pub group_letter: char,
    pub team_ids: Vec<TeamId>,
    /// 0-based creation order.
    pub group_order: usize,
}

/// Identity of the user invoking an orchestrator operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Caller {
    pub user_id: Uuid,
    pub admin: bool,
}

impl Caller {
    pub fn organizer(user_id: Uuid) -> Self {
        Self { user_id, admin: false }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self { user_id, admin: true }
    }
}
