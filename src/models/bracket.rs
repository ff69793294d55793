//! Bracket structures: matches, playoff rounds, and the per-format bracket payloads.

use crate::models::tournament::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable key for a match within one bracket. Assigned sequentially during
/// construction; advancement links (`next_match`, `loser_next_match`) store
/// these keys, so there are no dangling references while a bracket is built.
pub type MatchId = u32;

/// Lifecycle of a single fixture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One fixture inside a bracket. Teams are absent until seeded; scores and
/// winner/loser are absent until a result is recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round number, increasing toward the final.
    pub round: u32,
    /// 1-based position within the round.
    pub match_number: u32,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub status: MatchStatus,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    /// Match the winner advances into (elimination formats).
    pub next_match: Option<MatchId>,
    /// Match the loser drops into (double elimination only).
    pub loser_next_match: Option<MatchId>,
}

impl Match {
    pub fn new(id: MatchId, round: u32, match_number: u32) -> Self {
        Self {
            id,
            round,
            match_number,
            team1: None,
            team2: None,
            team1_score: None,
            team2_score: None,
            status: MatchStatus::Pending,
            winner: None,
            loser: None,
            next_match: None,
            loser_next_match: None,
        }
    }

    /// Record a final score. Marks the match completed and derives
    /// winner/loser when the scores differ (a drawn score leaves both unset).
    pub fn record_result(&mut self, team1_score: u32, team2_score: u32) {
        self.team1_score = Some(team1_score);
        self.team2_score = Some(team2_score);
        self.status = MatchStatus::Completed;
        self.winner = None;
        self.loser = None;
        if let (Some(t1), Some(t2)) = (self.team1, self.team2) {
            if team1_score > team2_score {
                self.winner = Some(t1);
                self.loser = Some(t2);
            } else if team2_score > team1_score {
                self.winner = Some(t2);
                self.loser = Some(t1);
            }
        }
    }
}

/// One round of an elimination bracket, with a human-readable label.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffRound {
    pub round_number: u32,
    pub round_name: String,
    pub matches: Vec<Match>,
}

/// Group-stage shape shared by the group-containing formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    pub group_count: usize,
    pub teams_per_group: usize,
    pub advancing_per_group: usize,
}

/// Tournament format selector for bracket generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketFormat {
    GroupsOnly,
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    GroupsPlusKnockout,
}

/// Per-format bracket payload. Each variant carries only the fields that
/// format actually has, so illegal combinations cannot be constructed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketStructure {
    GroupsOnly {
        groups: GroupParams,
    },
    SingleElimination {
        rounds: Vec<PlayoffRound>,
        third_place: bool,
    },
    DoubleElimination {
        rounds: Vec<PlayoffRound>,
    },
    RoundRobin {
        matches: Vec<Match>,
    },
    GroupsPlusKnockout {
        groups: GroupParams,
        rounds: Vec<PlayoffRound>,
        third_place: bool,
    },
}

/// Top-level output of bracket generation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Reproducibility token for any randomized decisions during generation.
    pub seed: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub structure: BracketStructure,
}

impl Bracket {
    /// Playoff rounds of any elimination-bearing structure; `None` for
    /// groups-only and round robin.
    pub fn playoff_rounds(&self) -> Option<&[PlayoffRound]> {
        match &self.structure {
            BracketStructure::SingleElimination { rounds, .. }
            | BracketStructure::DoubleElimination { rounds }
            | BracketStructure::GroupsPlusKnockout { rounds, .. } => Some(rounds),
            BracketStructure::GroupsOnly { .. } | BracketStructure::RoundRobin { .. } => None,
        }
    }

    pub fn playoff_rounds_mut(&mut self) -> Option<&mut Vec<PlayoffRound>> {
        match &mut self.structure {
            BracketStructure::SingleElimination { rounds, .. }
            | BracketStructure::DoubleElimination { rounds }
            | BracketStructure::GroupsPlusKnockout { rounds, .. } => Some(rounds),
            BracketStructure::GroupsOnly { .. } | BracketStructure::RoundRobin { .. } => None,
        }
    }

    /// Group-stage parameters, for the group-containing formats.
    pub fn group_params(&self) -> Option<GroupParams> {
        match &self.structure {
            BracketStructure::GroupsOnly { groups }
            | BracketStructure::GroupsPlusKnockout { groups, .. } => Some(*groups),
            _ => None,
        }
    }
}

/// Configuration for `generate_bracket`. Unset fields fall back to the
/// defaults described on each field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BracketOptions {
    /// Explicit group count; derived as `ceil(team_count / 4)` when absent.
    pub group_count: Option<usize>,
    /// Informational override; derived from group count when absent.
    pub teams_per_group: Option<usize>,
    /// Teams advancing from each group into the knockout stage.
    pub advancing_per_group: usize,
    /// Append a third-place playoff (single/double elimination).
    pub third_place_match: bool,
    /// Reproducibility token; a fresh one is minted when absent.
    pub seed: Option<String>,
}

impl Default for BracketOptions {
    fn default() -> Self {
        Self {
            group_count: None,
            teams_per_group: None,
            advancing_per_group: 2,
            third_place_match: false,
            seed: None,
        }
    }
}
