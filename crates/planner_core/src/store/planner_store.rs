//! In-memory planning store.
//!
//! # Responsibility
//! - Own the volunteer, song, service and team collections.
//! - Apply CRUD mutations and notify subscribers after each commit.
//!
//! # Invariants
//! - Every committed mutation bumps `revision` exactly once per record it
//!   touches and is visible to the next read.
//! - Update and delete on an unknown id are silent no-ops.
//! - Rejected input never reaches a collection.

use crate::config::{PlannerConfig, ReferencePolicy};
use crate::model::service::{NewService, Service, ServiceId, ServicePatch};
use crate::model::song::{NewSong, Song, SongId, SongPatch};
use crate::model::team::{NewTeam, Team, TeamId, TeamPatch};
use crate::model::volunteer::{NewVolunteer, Volunteer, VolunteerId, VolunteerPatch};
use crate::model::{CollectionKind, Draft, Patch, Record};
use crate::store::collection::Collection;
use crate::store::error::StoreResult;
use crate::store::listener::{
    ChangeKind, ListenerRegistry, StoreChange, StoreListener, SubscriptionId,
};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Single source of truth for planning data.
#[derive(Debug, Default)]
pub struct PlannerStore {
    pub(crate) volunteers: Collection<Volunteer>,
    pub(crate) songs: Collection<Song>,
    pub(crate) services: Collection<Service>,
    pub(crate) teams: Collection<Team>,
    pub(crate) reference_policy: ReferencePolicy,
    listeners: ListenerRegistry,
    revision: u64,
}

impl PlannerStore {
    /// Creates an empty store.
    pub fn new(reference_policy: ReferencePolicy) -> Self {
        Self {
            reference_policy,
            ..Self::default()
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.reference_policy)
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        self.reference_policy
    }

    pub fn set_reference_policy(&mut self, policy: ReferencePolicy) {
        self.reference_policy = policy;
    }

    /// Monotonic counter of committed changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers an observer for committed changes.
    pub fn subscribe(&mut self, listener: Arc<dyn StoreListener>) -> SubscriptionId {
        let id = self.listeners.subscribe(listener);
        debug!(
            "event=store_subscribe module=store status=ok subscription={} listeners={}",
            id,
            self.listeners.len()
        );
        id
    }

    /// Removes an observer. Returns `false` for unknown subscriptions.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // -------- volunteers --------

    pub fn volunteers(&self) -> &[Volunteer] {
        self.volunteers.as_slice()
    }

    pub fn volunteer(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.volunteers.get(id)
    }

    pub fn add_volunteer(&mut self, draft: NewVolunteer) -> StoreResult<VolunteerId> {
        let id = insert_draft(&mut self.volunteers, draft)?;
        self.commit(CollectionKind::Volunteers, ChangeKind::Added, id);
        Ok(id)
    }

    pub fn update_volunteer(&mut self, id: VolunteerId, patch: VolunteerPatch) -> StoreResult<()> {
        if apply_patch(&mut self.volunteers, id, patch)? {
            self.commit(CollectionKind::Volunteers, ChangeKind::Updated, id);
        }
        Ok(())
    }

    // -------- songs --------

    pub fn songs(&self) -> &[Song] {
        self.songs.as_slice()
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.get(id)
    }

    pub fn add_song(&mut self, draft: NewSong) -> StoreResult<SongId> {
        let id = insert_draft(&mut self.songs, draft)?;
        self.commit(CollectionKind::Songs, ChangeKind::Added, id);
        Ok(id)
    }

    pub fn update_song(&mut self, id: SongId, patch: SongPatch) -> StoreResult<()> {
        if apply_patch(&mut self.songs, id, patch)? {
            self.commit(CollectionKind::Songs, ChangeKind::Updated, id);
        }
        Ok(())
    }

    // -------- services --------

    pub fn services(&self) -> &[Service] {
        self.services.as_slice()
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(id)
    }

    pub fn add_service(&mut self, draft: NewService) -> StoreResult<ServiceId> {
        let id = insert_draft(&mut self.services, draft)?;
        self.commit(CollectionKind::Services, ChangeKind::Added, id);
        Ok(id)
    }

    /// Merges `patch` into a service. A `blocks` value replaces the whole
    /// run-sheet and is renumbered by position.
    pub fn update_service(&mut self, id: ServiceId, patch: ServicePatch) -> StoreResult<()> {
        if apply_patch(&mut self.services, id, patch)? {
            self.commit(CollectionKind::Services, ChangeKind::Updated, id);
        }
        Ok(())
    }

    /// Deletes a service and every block it owns. Nothing references a
    /// service, so the reference policy does not apply.
    pub fn delete_service(&mut self, id: ServiceId) -> StoreResult<()> {
        if self.services.remove(id).is_none() {
            log_missing(CollectionKind::Services, "delete", id);
            return Ok(());
        }
        self.commit(CollectionKind::Services, ChangeKind::Deleted, id);
        Ok(())
    }

    // -------- teams --------

    pub fn teams(&self) -> &[Team] {
        self.teams.as_slice()
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn add_team(&mut self, draft: NewTeam) -> StoreResult<TeamId> {
        let id = insert_draft(&mut self.teams, draft)?;
        self.commit(CollectionKind::Teams, ChangeKind::Added, id);
        Ok(id)
    }

    pub fn update_team(&mut self, id: TeamId, patch: TeamPatch) -> StoreResult<()> {
        if apply_patch(&mut self.teams, id, patch)? {
            self.commit(CollectionKind::Teams, ChangeKind::Updated, id);
        }
        Ok(())
    }

    // -------- membership --------

    /// Adds a volunteer to a team, updating both sides of the relation.
    ///
    /// Returns `false` when either record is missing or membership already
    /// holds on both sides.
    pub fn join_team(&mut self, volunteer_id: VolunteerId, team_id: TeamId) -> bool {
        if !self.teams.contains(team_id) {
            log_missing(CollectionKind::Teams, "join", team_id);
            return false;
        }
        let Some(volunteer) = self.volunteers.get_mut(volunteer_id) else {
            log_missing(CollectionKind::Volunteers, "join", volunteer_id);
            return false;
        };

        let volunteer_changed = push_unique(&mut volunteer.team_ids, team_id);
        let team_changed = match self.teams.get_mut(team_id) {
            Some(team) => push_unique(&mut team.member_ids, volunteer_id),
            None => false,
        };

        self.commit_membership(volunteer_id, volunteer_changed, team_id, team_changed)
    }

    /// Removes a volunteer from a team on both sides of the relation.
    pub fn leave_team(&mut self, volunteer_id: VolunteerId, team_id: TeamId) -> bool {
        let volunteer_changed = match self.volunteers.get_mut(volunteer_id) {
            Some(volunteer) => remove_value(&mut volunteer.team_ids, team_id),
            None => false,
        };
        let team_changed = match self.teams.get_mut(team_id) {
            Some(team) => remove_value(&mut team.member_ids, volunteer_id),
            None => false,
        };

        self.commit_membership(volunteer_id, volunteer_changed, team_id, team_changed)
    }

    fn commit_membership(
        &mut self,
        volunteer_id: VolunteerId,
        volunteer_changed: bool,
        team_id: TeamId,
        team_changed: bool,
    ) -> bool {
        if volunteer_changed {
            self.commit(CollectionKind::Volunteers, ChangeKind::Updated, volunteer_id);
        }
        if team_changed {
            self.commit(CollectionKind::Teams, ChangeKind::Updated, team_id);
        }
        volunteer_changed || team_changed
    }

    /// Bumps the revision and notifies subscribers.
    pub(crate) fn commit(&mut self, collection: CollectionKind, kind: ChangeKind, id: Uuid) {
        self.revision += 1;
        let change = StoreChange {
            revision: self.revision,
            collection,
            kind,
            id,
        };
        info!(
            "event=record_{} module=store status=ok collection={} id={} revision={}",
            kind.as_str(),
            collection.as_str(),
            id,
            self.revision
        );
        self.listeners.notify(&change);
    }
}

fn insert_draft<D: Draft>(collection: &mut Collection<D::Output>, draft: D) -> StoreResult<Uuid> {
    collection.insert_draft(draft).map_err(|err| {
        warn!(
            "event=record_add module=store status=rejected collection={} reason=\"{}\"",
            <D::Output as Record>::COLLECTION.as_str(),
            err
        );
        err.into()
    })
}

fn apply_patch<T, P>(collection: &mut Collection<T>, id: Uuid, patch: P) -> StoreResult<bool>
where
    T: Record,
    P: Patch<T>,
{
    match collection.update(id, patch) {
        Ok(true) => Ok(true),
        Ok(false) => {
            log_missing(T::COLLECTION, "update", id);
            Ok(false)
        }
        Err(err) => {
            warn!(
                "event=record_update module=store status=rejected collection={} id={} reason=\"{}\"",
                T::COLLECTION.as_str(),
                id,
                err
            );
            Err(err.into())
        }
    }
}

pub(crate) fn log_missing(collection: CollectionKind, action: &str, id: Uuid) {
    debug!(
        "event=record_{} module=store status=skipped reason=not_found collection={} id={}",
        action,
        collection.as_str(),
        id
    );
}

fn push_unique(values: &mut Vec<Uuid>, value: Uuid) -> bool {
    if values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

pub(crate) fn remove_value(values: &mut Vec<Uuid>, value: Uuid) -> bool {
    let before = values.len();
    values.retain(|candidate| *candidate != value);
    values.len() != before
}
