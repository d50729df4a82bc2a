//! Deletes that cross collection boundaries.
//!
//! # Responsibility
//! - Find records that reference a volunteer, song or team.
//! - Apply the configured `ReferencePolicy` when one of those is deleted.
//!
//! # Invariants
//! - `Reject` fails before anything is written.
//! - `Detach` scrubs every reference and removes the record in one call;
//!   subscribers are notified only after all writes are done.

use crate::config::ReferencePolicy;
use crate::model::service::ServiceId;
use crate::model::song::SongId;
use crate::model::team::TeamId;
use crate::model::volunteer::VolunteerId;
use crate::model::CollectionKind;
use crate::store::error::{StoreError, StoreResult};
use crate::store::listener::ChangeKind;
use crate::store::planner_store::{log_missing, remove_value, PlannerStore};
use log::info;
use uuid::Uuid;

/// Records holding a reference to one target record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    /// Services whose blocks or team link point at the target.
    pub services: Vec<ServiceId>,
    /// Teams listing the target as a member.
    pub teams: Vec<TeamId>,
    /// Volunteers listing the target as one of their teams.
    pub volunteers: Vec<VolunteerId>,
}

impl ReferenceReport {
    pub fn len(&self) -> usize {
        self.services.len() + self.teams.len() + self.volunteers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlannerStore {
    /// Lists records that reference `id` in `collection`.
    ///
    /// Services are never referenced, so their report is always empty.
    pub fn references(&self, collection: CollectionKind, id: Uuid) -> ReferenceReport {
        match collection {
            CollectionKind::Volunteers => ReferenceReport {
                services: self
                    .services()
                    .iter()
                    .filter(|service| service.blocks.iter().any(|block| block.is_assigned(id)))
                    .map(|service| service.id)
                    .collect(),
                teams: self
                    .teams()
                    .iter()
                    .filter(|team| team.has_member(id))
                    .map(|team| team.id)
                    .collect(),
                volunteers: Vec::new(),
            },
            CollectionKind::Songs => ReferenceReport {
                services: self
                    .services()
                    .iter()
                    .filter(|service| {
                        service
                            .blocks
                            .iter()
                            .any(|block| block.song_id == Some(id))
                    })
                    .map(|service| service.id)
                    .collect(),
                ..ReferenceReport::default()
            },
            CollectionKind::Teams => ReferenceReport {
                services: self
                    .services()
                    .iter()
                    .filter(|service| service.team_id == Some(id))
                    .map(|service| service.id)
                    .collect(),
                teams: Vec::new(),
                volunteers: self
                    .volunteers()
                    .iter()
                    .filter(|volunteer| volunteer.team_ids.contains(&id))
                    .map(|volunteer| volunteer.id)
                    .collect(),
            },
            CollectionKind::Services => ReferenceReport::default(),
        }
    }

    /// Deletes a volunteer; block assignments and team memberships follow
    /// the reference policy.
    pub fn delete_volunteer(&mut self, id: VolunteerId) -> StoreResult<()> {
        if !self.volunteers.contains(id) {
            log_missing(CollectionKind::Volunteers, "delete", id);
            return Ok(());
        }
        let report = self.guard_delete(CollectionKind::Volunteers, id)?;

        if self.reference_policy == ReferencePolicy::Detach {
            for service in self.services.iter_mut() {
                if report.services.contains(&service.id) {
                    for block in &mut service.blocks {
                        block
                            .assignments
                            .retain(|assignment| assignment.volunteer_id != id);
                    }
                }
            }
            for team in self.teams.iter_mut() {
                remove_value(&mut team.member_ids, id);
            }
        }

        self.volunteers.remove(id);
        self.finish_delete(CollectionKind::Volunteers, id, &report);
        Ok(())
    }

    /// Deletes a song; blocks performing it follow the reference policy.
    pub fn delete_song(&mut self, id: SongId) -> StoreResult<()> {
        if !self.songs.contains(id) {
            log_missing(CollectionKind::Songs, "delete", id);
            return Ok(());
        }
        let report = self.guard_delete(CollectionKind::Songs, id)?;

        if self.reference_policy == ReferencePolicy::Detach {
            for service in self.services.iter_mut() {
                for block in &mut service.blocks {
                    if block.song_id == Some(id) {
                        block.song_id = None;
                    }
                }
            }
        }

        self.songs.remove(id);
        self.finish_delete(CollectionKind::Songs, id, &report);
        Ok(())
    }

    /// Deletes a team; service links and volunteer memberships follow the
    /// reference policy.
    pub fn delete_team(&mut self, id: TeamId) -> StoreResult<()> {
        if !self.teams.contains(id) {
            log_missing(CollectionKind::Teams, "delete", id);
            return Ok(());
        }
        let report = self.guard_delete(CollectionKind::Teams, id)?;

        if self.reference_policy == ReferencePolicy::Detach {
            for service in self.services.iter_mut() {
                if service.team_id == Some(id) {
                    service.team_id = None;
                }
            }
            for volunteer in self.volunteers.iter_mut() {
                remove_value(&mut volunteer.team_ids, id);
            }
        }

        self.teams.remove(id);
        self.finish_delete(CollectionKind::Teams, id, &report);
        Ok(())
    }

    fn guard_delete(&self, collection: CollectionKind, id: Uuid) -> StoreResult<ReferenceReport> {
        let report = self.references(collection, id);
        if self.reference_policy == ReferencePolicy::Reject && !report.is_empty() {
            info!(
                "event=record_delete module=store status=rejected collection={} id={} references={}",
                collection.as_str(),
                id,
                report.len()
            );
            return Err(StoreError::StillReferenced {
                collection,
                id,
                references: report.len(),
            });
        }
        Ok(report)
    }

    fn finish_delete(&mut self, collection: CollectionKind, id: Uuid, report: &ReferenceReport) {
        if self.reference_policy == ReferencePolicy::Detach {
            for service_id in &report.services {
                self.commit(CollectionKind::Services, ChangeKind::Updated, *service_id);
            }
            for team_id in &report.teams {
                self.commit(CollectionKind::Teams, ChangeKind::Updated, *team_id);
            }
            for volunteer_id in &report.volunteers {
                self.commit(CollectionKind::Volunteers, ChangeKind::Updated, *volunteer_id);
            }
        }
        self.commit(collection, ChangeKind::Deleted, id);
    }
}
