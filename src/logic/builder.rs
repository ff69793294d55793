//! Bracket topology construction for every supported format.
//!
//! Pure construction: no persistence, no network. Callers validate degenerate
//! inputs (fewer than 2 teams) before calling.

use crate::models::{
    Bracket, BracketFormat, BracketOptions, BracketStructure, GroupParams, Match, MatchId,
    PlayoffRound,
};
use chrono::Utc;
use rand::Rng;

/// Default group size used when no explicit group count is given.
const DEFAULT_GROUP_SIZE: usize = 4;

/// Mint a fresh opaque seed token (16 hex digits).
pub fn generate_seed_token() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}

/// Sequential match-id allocator for one bracket.
struct MatchIds(MatchId);

impl MatchIds {
    fn new() -> Self {
        Self(1)
    }

    fn next(&mut self) -> MatchId {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Build a bracket for the given format and team count.
pub fn generate_bracket(
    format: BracketFormat,
    team_count: usize,
    options: &BracketOptions,
) -> Bracket {
    let seed = options
        .seed
        .clone()
        .unwrap_or_else(generate_seed_token);
    let structure = match format {
        BracketFormat::GroupsOnly => BracketStructure::GroupsOnly {
            groups: group_params(team_count, options),
        },
        BracketFormat::SingleElimination => BracketStructure::SingleElimination {
            rounds: single_elimination_rounds(team_count, options.third_place_match),
            third_place: options.third_place_match,
        },
        BracketFormat::DoubleElimination => BracketStructure::DoubleElimination {
            rounds: double_elimination_rounds(team_count),
        },
        BracketFormat::RoundRobin => BracketStructure::RoundRobin {
            matches: round_robin_matches(team_count),
        },
        BracketFormat::GroupsPlusKnockout => {
            let groups = group_params(team_count, options);
            let playoff_teams = groups.group_count * groups.advancing_per_group;
            BracketStructure::GroupsPlusKnockout {
                rounds: single_elimination_rounds(playoff_teams, options.third_place_match),
                groups,
                third_place: options.third_place_match,
            }
        }
    };
    Bracket {
        seed,
        generated_at: Utc::now(),
        structure,
    }
}

/// Group partition shape: explicit group count, else one group per 4 teams.
fn group_params(team_count: usize, options: &BracketOptions) -> GroupParams {
    let group_count = options
        .group_count
        .unwrap_or_else(|| team_count.div_ceil(DEFAULT_GROUP_SIZE))
        .max(1);
    let teams_per_group = options
        .teams_per_group
        .unwrap_or_else(|| team_count.div_ceil(group_count));
    GroupParams {
        group_count,
        teams_per_group,
        advancing_per_group: options.advancing_per_group,
    }
}

/// Human label for an elimination round, by distance from the final.
fn round_name(round: u32, rounds_needed: u32) -> String {
    match rounds_needed - round {
        0 => "Final".to_string(),
        1 => "Semi-Finals".to_string(),
        2 => "Quarter-Finals".to_string(),
        3 => "Round of 16".to_string(),
        4 => "Round of 32".to_string(),
        _ => format!("Round {}", round),
    }
}

/// Number of rounds and the padded bracket size for a knockout stage.
/// Byes are not modeled separately; they show up as matches with a single
/// team once seeding fills the first round.
fn knockout_shape(team_count: usize) -> (u32, usize) {
    let bracket_size = team_count.max(1).next_power_of_two();
    (bracket_size.trailing_zeros(), bracket_size)
}

/// Standard single-elimination rounds: sizes halve down to one final match,
/// each match linked forward to the next-round match it feeds.
fn single_elimination_rounds(team_count: usize, third_place: bool) -> Vec<PlayoffRound> {
    let (rounds_needed, bracket_size) = knockout_shape(team_count);
    let mut ids = MatchIds::new();
    let mut rounds = Vec::with_capacity(rounds_needed as usize + 1);
    for round in 1..=rounds_needed {
        let count = bracket_size >> round;
        let matches = (0..count)
            .map(|i| Match::new(ids.next(), round, i as u32 + 1))
            .collect();
        rounds.push(PlayoffRound {
            round_number: round,
            round_name: round_name(round, rounds_needed),
            matches,
        });
    }

    // Two adjacent matches feed one match in the following round.
    for ri in 0..rounds.len().saturating_sub(1) {
        let next_ids: Vec<MatchId> = rounds[ri + 1].matches.iter().map(|m| m.id).collect();
        for (i, m) in rounds[ri].matches.iter_mut().enumerate() {
            m.next_match = Some(next_ids[i / 2]);
        }
    }

    if third_place && rounds_needed >= 2 {
        rounds.push(PlayoffRound {
            round_number: rounds_needed,
            round_name: "Third Place".to_string(),
            matches: vec![Match::new(ids.next(), rounds_needed, 1)],
        });
    }

    rounds
}

/// Double elimination: a winners bracket shaped like single elimination, a
/// losers bracket of `2 * rounds - 2` rounds, and a grand final. Losers-round
/// numbering continues after the winners rounds so one ascending sequence
/// covers both brackets.
///
/// Advancement edges follow standard drop-down rules: winners round 1 drops
/// into losers round 1 pairwise; winners round r (r >= 2) drops into losers
/// round 2(r-1) index-for-index; losers rounds alternate minor (odd, advance
/// index-preserving) and major (even, advance pairwise); the last losers
/// round and the winners final both feed the grand final.
fn double_elimination_rounds(team_count: usize) -> Vec<PlayoffRound> {
    let (rounds_needed, bracket_size) = knockout_shape(team_count);
    let loser_rounds = (2 * rounds_needed).saturating_sub(2);
    let mut ids = MatchIds::new();

    let mut winners = Vec::with_capacity(rounds_needed as usize);
    for round in 1..=rounds_needed {
        let count = bracket_size >> round;
        let matches = (0..count)
            .map(|i| Match::new(ids.next(), round, i as u32 + 1))
            .collect();
        winners.push(PlayoffRound {
            round_number: round,
            round_name: format!("Winners Round {}", round),
            matches,
        });
    }

    let mut losers = Vec::with_capacity(loser_rounds as usize);
    for round in 1..=loser_rounds {
        let count = bracket_size.div_ceil(1 << (round.div_ceil(2) + 1));
        let number = rounds_needed + round;
        let matches = (0..count)
            .map(|i| Match::new(ids.next(), number, i as u32 + 1))
            .collect();
        losers.push(PlayoffRound {
            round_number: number,
            round_name: format!("Losers Round {}", round),
            matches,
        });
    }

    let grand_final_number = rounds_needed + loser_rounds + 1;
    let grand_final = PlayoffRound {
        round_number: grand_final_number,
        round_name: "Grand Finals".to_string(),
        matches: vec![Match::new(ids.next(), grand_final_number, 1)],
    };
    let grand_final_id = grand_final.matches[0].id;

    // Winner advancement within the winners bracket, then into grand finals.
    for ri in 0..winners.len().saturating_sub(1) {
        let next_ids: Vec<MatchId> = winners[ri + 1].matches.iter().map(|m| m.id).collect();
        for (i, m) in winners[ri].matches.iter_mut().enumerate() {
            m.next_match = Some(next_ids[i / 2]);
        }
    }
    if let Some(last) = winners.last_mut() {
        for m in &mut last.matches {
            m.next_match = Some(grand_final_id);
        }
    }

    // Loser drop-downs from the winners bracket.
    if !losers.is_empty() {
        let first_loser_ids: Vec<MatchId> = losers[0].matches.iter().map(|m| m.id).collect();
        for (i, m) in winners[0].matches.iter_mut().enumerate() {
            m.loser_next_match = Some(first_loser_ids[i / 2]);
        }
        for wr in 2..=rounds_needed {
            let target = 2 * (wr - 1) as usize - 1;
            let target_ids: Vec<MatchId> = losers[target].matches.iter().map(|m| m.id).collect();
            for (i, m) in winners[wr as usize - 1].matches.iter_mut().enumerate() {
                m.loser_next_match = Some(target_ids[i]);
            }
        }
    }

    // Advancement within the losers bracket.
    for ri in 0..losers.len().saturating_sub(1) {
        let next_ids: Vec<MatchId> = losers[ri + 1].matches.iter().map(|m| m.id).collect();
        let minor = (ri + 1) % 2 == 1;
        for (i, m) in losers[ri].matches.iter_mut().enumerate() {
            m.next_match = Some(if minor { next_ids[i] } else { next_ids[i / 2] });
        }
    }
    if let Some(last) = losers.last_mut() {
        for m in &mut last.matches {
            m.next_match = Some(grand_final_id);
        }
    }

    let mut rounds = winners;
    rounds.extend(losers);
    rounds.push(grand_final);
    rounds
}

/// Every unordered pair once, packed into rounds of `floor(n / 2)` matches.
fn round_robin_matches(team_count: usize) -> Vec<Match> {
    let per_round = (team_count / 2).max(1);
    let mut ids = MatchIds::new();
    let mut matches = Vec::with_capacity(team_count * team_count.saturating_sub(1) / 2);
    let mut round = 1u32;
    let mut match_number = 1u32;
    for i in 0..team_count {
        for _j in (i + 1)..team_count {
            matches.push(Match::new(ids.next(), round, match_number));
            if match_number as usize == per_round {
                round += 1;
                match_number = 1;
            } else {
                match_number += 1;
            }
        }
    }
    matches
}
