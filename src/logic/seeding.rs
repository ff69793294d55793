//! Seeding: placing qualified teams into bracket slots.

use crate::models::{Bracket, BracketStructure, GroupStanding, TeamId};

/// One qualifier pulled out of a group table.
#[derive(Clone, Copy, Debug)]
struct Qualifier {
    team_id: TeamId,
    group_letter: char,
    position: u32,
}

/// Fill the first knockout round from per-group standings.
///
/// Takes the top `advancing_per_group` rows of each group, orders the
/// combined list by position (group winners first) with group letter as the
/// tie-break between groups, and pairs top vs bottom: match `i` gets
/// qualifier `i` against qualifier `len - 1 - i`. Slots whose index runs out
/// stay unset (byes). No-op when the bracket has no playoff rounds.
pub fn seed_teams_into_bracket(
    group_standings: &[(char, Vec<GroupStanding>)],
    advancing_per_group: usize,
    bracket: &mut Bracket,
) {
    let mut qualifiers: Vec<Qualifier> = group_standings
        .iter()
        .flat_map(|(letter, standings)| {
            standings.iter().take(advancing_per_group).map(|s| Qualifier {
                team_id: s.team_id,
                group_letter: *letter,
                position: s.position,
            })
        })
        .collect();
    qualifiers.sort_by_key(|q| (q.position, q.group_letter));

    let Some(rounds) = bracket.playoff_rounds_mut() else {
        return;
    };
    let Some(first_round) = rounds.first_mut() else {
        return;
    };

    let len = qualifiers.len();
    for (i, m) in first_round.matches.iter_mut().enumerate() {
        if i < len {
            m.team1 = Some(qualifiers[i].team_id);
        }
        // Strictly below keeps a lone middle qualifier out of both slots.
        let j = len.wrapping_sub(1).wrapping_sub(i);
        if i < len && j > i {
            m.team2 = Some(qualifiers[j].team_id);
        }
    }
}

/// Assign teams to a round-robin bracket's matches: every unordered pair
/// `(i, j)` with `i < j`, in index order over `team_ids`, matching the order
/// the matches were generated in. Extra matches (or pairs) are left alone
/// when the counts disagree.
pub fn seed_round_robin(team_ids: &[TeamId], bracket: &mut Bracket) {
    let BracketStructure::RoundRobin { matches } = &mut bracket.structure else {
        return;
    };
    let mut slot = matches.iter_mut();
    for i in 0..team_ids.len() {
        for j in (i + 1)..team_ids.len() {
            let Some(m) = slot.next() else {
                return;
            };
            m.team1 = Some(team_ids[i]);
            m.team2 = Some(team_ids[j]);
        }
    }
}
