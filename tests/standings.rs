//! Integration tests for group standings computation.

use club_tournament_engine::{calculate_group_standings, Match, MatchStatus, TeamId};
use uuid::Uuid;

fn completed(id: u32, team1: TeamId, team2: TeamId, score1: u32, score2: u32) -> Match {
    let mut m = Match::new(id, 1, id);
    m.team1 = Some(team1);
    m.team2 = Some(team2);
    m.record_result(score1, score2);
    m
}

fn roster(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn worked_example_points_and_goal_difference() {
    let teams = roster(4);
    let (a, b, c) = (teams[0], teams[1], teams[2]);
    let matches = vec![
        completed(1, a, b, 2, 1), // A beats B
        completed(2, a, c, 1, 1), // A draws C
        completed(3, b, c, 2, 0), // B beats C
    ];
    let table = calculate_group_standings(&teams, &matches);

    assert_eq!(table[0].team_id, a);
    assert_eq!(table[0].points, 4);
    assert_eq!(table[0].goal_difference, 1);
    assert_eq!(table[1].team_id, b);
    assert_eq!(table[1].points, 3);
    assert_eq!(table[1].goal_difference, 1);
    assert_eq!(table[2].team_id, c);
    assert_eq!(table[2].points, 1);
    assert_eq!(table[2].goal_difference, -2);
    // D never played: zero row at the bottom.
    assert_eq!(table[3].team_id, teams[3]);
    assert_eq!(table[3].played, 0);
    let positions: Vec<u32> = table.iter().map(|s| s.position).collect();
    assert_eq!(positions, [1, 2, 3, 4]);
}

#[test]
fn points_and_goal_difference_identities_hold() {
    let teams = roster(4);
    let matches = vec![
        completed(1, teams[0], teams[1], 4, 2),
        completed(2, teams[2], teams[3], 0, 0),
        completed(3, teams[0], teams[2], 1, 3),
        completed(4, teams[1], teams[3], 2, 2),
    ];
    for s in calculate_group_standings(&teams, &matches) {
        assert_eq!(s.points, 3 * s.won + s.drawn);
        assert_eq!(s.goal_difference, s.goals_for as i32 - s.goals_against as i32);
        assert_eq!(s.played, s.won + s.drawn + s.lost);
    }
}

#[test]
fn recomputation_is_idempotent() {
    let teams = roster(3);
    let matches = vec![
        completed(1, teams[0], teams[1], 2, 0),
        completed(2, teams[1], teams[2], 1, 1),
    ];
    let first = calculate_group_standings(&teams, &matches);
    let second = calculate_group_standings(&teams, &matches);
    assert_eq!(first, second);
}

#[test]
fn goal_difference_breaks_equal_points() {
    let teams = roster(4);
    let (a, b) = (teams[0], teams[1]);
    // A and B both win twice; A's margin is bigger.
    let matches = vec![
        completed(1, a, teams[2], 4, 0),
        completed(2, a, teams[3], 2, 1),
        completed(3, b, teams[2], 2, 0),
        completed(4, b, teams[3], 2, 1),
    ];
    let table = calculate_group_standings(&teams, &matches);
    assert_eq!(table[0].team_id, a);
    assert_eq!(table[1].team_id, b);
    assert_eq!(table[0].points, table[1].points);
    assert!(table[0].goal_difference > table[1].goal_difference);
}

#[test]
fn goals_for_breaks_equal_points_and_difference() {
    let teams = roster(4);
    let (a, b) = (teams[0], teams[1]);
    let matches = vec![
        completed(1, a, teams[2], 3, 1), // GD +2, GF 3
        completed(2, b, teams[3], 2, 0), // GD +2, GF 2
    ];
    let table = calculate_group_standings(&teams, &matches);
    assert_eq!(table[0].team_id, a);
    assert_eq!(table[1].team_id, b);
}

#[test]
fn pending_and_unseeded_matches_are_ignored() {
    let teams = roster(2);
    let mut pending = Match::new(1, 1, 1);
    pending.team1 = Some(teams[0]);
    pending.team2 = Some(teams[1]);
    pending.status = MatchStatus::InProgress;
    let mut unseeded = Match::new(2, 1, 2);
    unseeded.record_result(3, 0);
    let table = calculate_group_standings(&teams, &[pending, unseeded]);
    for s in &table {
        assert_eq!(s.played, 0);
        assert_eq!(s.points, 0);
    }
}

#[test]
fn matches_with_unknown_teams_are_skipped() {
    let teams = roster(2);
    let stranger = Uuid::new_v4();
    let matches = vec![
        completed(1, teams[0], stranger, 5, 0),
        completed(2, teams[0], teams[1], 1, 0),
    ];
    let table = calculate_group_standings(&teams, &matches);
    // Only the in-roster match counts.
    assert_eq!(table[0].team_id, teams[0]);
    assert_eq!(table[0].played, 1);
    assert_eq!(table[0].goals_for, 1);
}

#[test]
fn empty_roster_yields_empty_standings() {
    assert!(calculate_group_standings(&[], &[]).is_empty());
}

#[test]
fn draws_award_one_point_each() {
    let teams = roster(2);
    let matches = vec![completed(1, teams[0], teams[1], 2, 2)];
    let table = calculate_group_standings(&teams, &matches);
    for s in &table {
        assert_eq!(s.points, 1);
        assert_eq!(s.drawn, 1);
        assert_eq!(s.goal_difference, 0);
    }
}
