//! Group standings computation from completed match results.

use crate::models::{GroupStanding, Match, MatchStatus, TeamId};
use std::collections::HashMap;

/// Compute the ranked table for one group.
///
/// 1. One zeroed row per team, positions in roster order.
/// 2. Fold every completed match with both teams set; matches referencing
///    teams outside the roster are skipped.
/// 3. Sort by points, then goal difference, then goals for (descending);
///    stable beyond that. Positions are reassigned 1-based after the sort.
pub fn calculate_group_standings(team_ids: &[TeamId], matches: &[Match]) -> Vec<GroupStanding> {
    let mut standings: Vec<GroupStanding> = team_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| GroupStanding::new(id, i as u32 + 1))
        .collect();
    let index: HashMap<TeamId, usize> = team_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    for m in matches {
        if m.status != MatchStatus::Completed {
            continue;
        }
        let (Some(t1), Some(t2)) = (m.team1, m.team2) else {
            continue;
        };
        let (Some(s1), Some(s2)) = (m.team1_score, m.team2_score) else {
            continue;
        };
        let (Some(&i1), Some(&i2)) = (index.get(&t1), index.get(&t2)) else {
            continue;
        };
        standings[i1].apply_result(s1, s2);
        standings[i2].apply_result(s2, s1);
    }

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.position = i as u32 + 1;
    }
    standings
}
