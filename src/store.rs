//! In-memory tournament/registration/group store.
//!
//! Stands in for the external persistence collaborator. Every orchestrator
//! write for one operation happens under a single `&mut` borrow, so a draw
//! either applies completely or not at all.

use crate::models::{
    Group, GroupId, Match, Registration, RegistrationId, RegistrationStatus, TeamId, Tournament,
    TournamentId, TournamentStatus,
};
use std::collections::HashMap;
use uuid::Uuid;

/// All tournament state the draw engine reads and writes.
#[derive(Clone, Debug, Default)]
pub struct TournamentStore {
    tournaments: HashMap<TournamentId, Tournament>,
    registrations: Vec<Registration>,
    groups: Vec<Group>,
    /// Group-stage fixtures keyed by group, recorded as results come in.
    group_matches: HashMap<GroupId, Vec<Match>>,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_tournament(&mut self, name: impl Into<String>, organizer_id: Uuid) -> Tournament {
        let t = Tournament::new(name, organizer_id);
        self.tournaments.insert(t.id, t.clone());
        t
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.get_mut(&id)
    }

    pub fn set_tournament_status(&mut self, id: TournamentId, status: TournamentStatus) -> bool {
        match self.tournaments.get_mut(&id) {
            Some(t) => {
                t.status = status;
                true
            }
            None => false,
        }
    }

    /// Register a club for a tournament (status starts `Pending`).
    pub fn register_club(&mut self, tournament_id: TournamentId, club_id: TeamId) -> Registration {
        let r = Registration::new(tournament_id, club_id);
        self.registrations.push(r.clone());
        r
    }

    pub fn set_registration_status(
        &mut self,
        registration_id: RegistrationId,
        status: RegistrationStatus,
    ) -> bool {
        match self.registrations.iter_mut().find(|r| r.id == registration_id) {
            Some(r) => {
                r.status = status;
                true
            }
            None => false,
        }
    }

    /// All registrations for a tournament, in registration order.
    pub fn registrations_for(&self, tournament_id: TournamentId) -> Vec<Registration> {
        self.registrations
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    /// Club ids with an approved registration, in registration order.
    pub fn approved_club_ids(&self, tournament_id: TournamentId) -> Vec<TeamId> {
        self.registrations
            .iter()
            .filter(|r| r.tournament_id == tournament_id && r.status == RegistrationStatus::Approved)
            .map(|r| r.club_id)
            .collect()
    }

    /// Stamp the drawn group letter onto each member club's registration.
    pub fn label_registrations(&mut self, tournament_id: TournamentId, group: &Group) {
        for r in self
            .registrations
            .iter_mut()
            .filter(|r| r.tournament_id == tournament_id && group.team_ids.contains(&r.club_id))
        {
            r.group_label = Some(group.group_letter);
        }
    }

    pub fn clear_registration_labels(&mut self, tournament_id: TournamentId) {
        for r in self
            .registrations
            .iter_mut()
            .filter(|r| r.tournament_id == tournament_id)
        {
            r.group_label = None;
        }
    }

    pub fn insert_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Groups for a tournament, ordered by creation order.
    pub fn groups_for(&self, tournament_id: TournamentId) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .groups
            .iter()
            .filter(|g| g.tournament_id == tournament_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.group_order);
        groups
    }

    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Remove all groups (and their fixtures) for a tournament.
    pub fn delete_groups(&mut self, tournament_id: TournamentId) {
        let removed: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|g| g.tournament_id == tournament_id)
            .map(|g| g.id)
            .collect();
        self.groups.retain(|g| g.tournament_id != tournament_id);
        for id in removed {
            self.group_matches.remove(&id);
        }
    }

    pub fn set_group_matches(&mut self, group_id: GroupId, matches: Vec<Match>) {
        self.group_matches.insert(group_id, matches);
    }

    pub fn group_matches(&self, group_id: GroupId) -> &[Match] {
        self.group_matches.get(&group_id).map_or(&[], Vec::as_slice)
    }

    pub fn group_match_mut(&mut self, group_id: GroupId, match_id: u32) -> Option<&mut Match> {
        self.group_matches
            .get_mut(&group_id)?
            .iter_mut()
            .find(|m| m.id == match_id)
    }
}
