//! Draw orchestration: validate, shuffle approved teams into groups, and
//! serve group/bracket read queries.

use crate::logic::builder::generate_seed_token;
use crate::models::{
    Caller, DrawError, Group, Tournament, TournamentId, TournamentStatus, GROUP_LETTERS,
};
use crate::store::TournamentStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Read view returned by `get_bracket`.
#[derive(Clone, Debug, Serialize)]
pub struct BracketView {
    pub tournament: Tournament,
    pub draw_completed: bool,
    pub groups: Vec<Group>,
}

fn authorize(tournament: &Tournament, caller: &Caller) -> Result<(), DrawError> {
    if caller.admin || caller.user_id == tournament.organizer_id {
        Ok(())
    } else {
        Err(DrawError::NotAuthorized)
    }
}

/// Execute the draw: partition approved clubs into `number_of_groups` groups.
///
/// Preconditions, each its own error: tournament exists; caller is organizer
/// or admin; not already drawn; status is Published or Ongoing; at least 2
/// approved teams; group count within 1..=8 and not above the team count.
///
/// The shuffle is driven by a PRNG seeded from the stored `draw_seed` token,
/// so a draw is replayable from its token. All writes happen after the last
/// precondition passes; on error the store is untouched.
pub fn execute_draw(
    store: &mut TournamentStore,
    tournament_id: TournamentId,
    caller: &Caller,
    number_of_groups: usize,
) -> Result<Vec<Group>, DrawError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?;
    authorize(tournament, caller)?;
    if tournament.draw_completed {
        return Err(DrawError::AlreadyDrawn);
    }
    if !matches!(
        tournament.status,
        TournamentStatus::Published | TournamentStatus::Ongoing
    ) {
        return Err(DrawError::InvalidStatus(tournament.status));
    }
    let approved = store.approved_club_ids(tournament_id);
    if approved.len() < 2 {
        return Err(DrawError::NotEnoughTeams {
            approved: approved.len(),
        });
    }
    if number_of_groups == 0 || number_of_groups > GROUP_LETTERS.len() {
        return Err(DrawError::GroupCountUnsupported {
            requested: number_of_groups,
        });
    }
    if number_of_groups > approved.len() {
        return Err(DrawError::TooManyGroups {
            requested: number_of_groups,
            approved: approved.len(),
        });
    }

    let seed_token = generate_seed_token();
    let groups = draw_groups(tournament_id, &approved, number_of_groups, &seed_token);

    store.delete_groups(tournament_id);
    for group in &groups {
        store.insert_group(group.clone());
        store.label_registrations(tournament_id, group);
    }
    let t = store
        .tournament_mut(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?;
    t.draw_completed = true;
    t.draw_seed = Some(seed_token);

    Ok(groups)
}

/// PRNG seed for a token: 16-hex-digit tokens parse directly; anything else
/// hashes its raw bytes, so distinct malformed tokens still drive distinct
/// shuffles.
fn seed_value_from_token(token: &str) -> u64 {
    u64::from_str_radix(token, 16).unwrap_or_else(|_| {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    })
}

/// Shuffle and partition: the pure core of the draw. The seed token (16 hex
/// digits) fully determines the shuffle.
pub fn draw_groups(
    tournament_id: TournamentId,
    approved: &[Uuid],
    number_of_groups: usize,
    seed_token: &str,
) -> Vec<Group> {
    let mut rng = StdRng::seed_from_u64(seed_value_from_token(seed_token));
    let mut clubs = approved.to_vec();
    clubs.shuffle(&mut rng);

    let group_size = clubs.len().div_ceil(number_of_groups);
    clubs
        .chunks(group_size)
        .enumerate()
        .map(|(i, members)| Group {
            id: Uuid::new_v4(),
            tournament_id,
            group_letter: GROUP_LETTERS[i],
            team_ids: members.to_vec(),
            group_order: i,
        })
        .collect()
}

/// Undo a draw: delete the tournament's groups and clear the draw flag and
/// seed. Registration approval state is left alone; only group labels are
/// removed.
pub fn reset_draw(
    store: &mut TournamentStore,
    tournament_id: TournamentId,
    caller: &Caller,
) -> Result<(), DrawError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?;
    authorize(tournament, caller)?;

    store.delete_groups(tournament_id);
    store.clear_registration_labels(tournament_id);
    let t = store
        .tournament_mut(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?;
    t.draw_completed = false;
    t.draw_seed = None;
    Ok(())
}

/// Persisted groups for a tournament, in creation order.
pub fn get_groups(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<Group>, DrawError> {
    store
        .tournament(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?;
    Ok(store.groups_for(tournament_id))
}

/// Tournament + draw state + groups, for bracket display.
pub fn get_bracket(
    store: &TournamentStore,
    tournament_id: TournamentId,
) -> Result<BracketView, DrawError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(DrawError::TournamentNotFound(tournament_id))?
        .clone();
    let draw_completed = tournament.draw_completed;
    Ok(BracketView {
        tournament,
        draw_completed,
        groups: store.groups_for(tournament_id),
    })
}
