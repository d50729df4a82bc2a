//! Service schedule projections.
//!
//! # Invariants
//! - Results keep the source collection order; nothing is re-sorted.
//! - Projections are recomputed on every call and never cached.

use crate::model::service::{Block, Service};
use crate::model::volunteer::VolunteerId;
use chrono::NaiveDate;

/// One role a volunteer fills in one block of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAssignment<'a> {
    pub service: &'a Service,
    pub block: &'a Block,
    pub role: &'a str,
}

/// Services dated on or after `today`, first `limit` in collection order.
pub fn upcoming_services(services: &[Service], today: NaiveDate, limit: usize) -> Vec<&Service> {
    services
        .iter()
        .filter(|service| service.date >= today)
        .take(limit)
        .collect()
}

/// Services where at least one block assigns `volunteer_id`.
pub fn services_for_volunteer(services: &[Service], volunteer_id: VolunteerId) -> Vec<&Service> {
    services
        .iter()
        .filter(|service| serves_in(service, volunteer_id))
        .collect()
}

/// Flattened `(service, block, role)` list for `volunteer_id`.
///
/// A volunteer holding two roles on one block yields two entries.
pub fn volunteer_assignments(
    services: &[Service],
    volunteer_id: VolunteerId,
) -> Vec<ScheduledAssignment<'_>> {
    flatten_assignments(services.iter(), volunteer_id)
}

/// Volunteer dashboard projection: the first `limit` upcoming services the
/// volunteer serves in, flattened to assignments.
pub fn upcoming_assignments(
    services: &[Service],
    volunteer_id: VolunteerId,
    today: NaiveDate,
    limit: usize,
) -> Vec<ScheduledAssignment<'_>> {
    let upcoming = services
        .iter()
        .filter(|service| service.date >= today && serves_in(service, volunteer_id))
        .take(limit);
    flatten_assignments(upcoming, volunteer_id)
}

fn serves_in(service: &Service, volunteer_id: VolunteerId) -> bool {
    service
        .blocks
        .iter()
        .any(|block| block.is_assigned(volunteer_id))
}

fn flatten_assignments<'a>(
    services: impl Iterator<Item = &'a Service>,
    volunteer_id: VolunteerId,
) -> Vec<ScheduledAssignment<'a>> {
    services
        .flat_map(move |service| {
            service.blocks.iter().flat_map(move |block| {
                block
                    .assignments
                    .iter()
                    .filter(move |assignment| assignment.volunteer_id == volunteer_id)
                    .map(move |assignment| ScheduledAssignment {
                        service,
                        block,
                        role: assignment.role.as_str(),
                    })
            })
        })
        .collect()
}
