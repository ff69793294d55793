//! Group standings: one team's ranked row within a group table.

use crate::models::tournament::TeamId;
use serde::{Deserialize, Serialize};

/// One team's position in a group table. A derived view: recomputed from the
/// roster and completed match results on every query, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team_id: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// `goals_for - goals_against`; may be negative.
    pub goal_difference: i32,
    /// `3 * won + drawn`.
    pub points: u32,
    /// 1-based rank after sorting; unique within a group.
    pub position: u32,
}

impl GroupStanding {
    /// Fresh zeroed row for a roster slot.
    pub fn new(team_id: TeamId, position: u32) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position,
        }
    }

    /// Fold one completed result (this team's goals first) into the row.
    pub fn apply_result(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        if goals_for > goals_against {
            self.won += 1;
            self.points += 3;
        } else if goals_for < goals_against {
            self.lost += 1;
        } else {
            self.drawn += 1;
            self.points += 1;
        }
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
    }
}
