//! Read-only projections over the store collections.
//!
//! # Responsibility
//! - Derive dashboard and list-view data from current collections.
//!
//! # Invariants
//! - Every function is pure and recomputes from its inputs.

pub mod roster;
pub mod schedule;

use crate::store::PlannerStore;
use chrono::NaiveDate;

pub use roster::{
    available_volunteers, find_volunteer_by_email, is_available, search_songs, team_members,
};
pub use schedule::{
    services_for_volunteer, upcoming_assignments, upcoming_services, volunteer_assignments,
    ScheduledAssignment,
};

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub volunteer_count: usize,
    pub upcoming_service_count: usize,
    pub song_count: usize,
}

/// Computes admin dashboard counts; upcoming services are capped at
/// `upcoming_limit`.
pub fn dashboard_stats(
    store: &PlannerStore,
    today: NaiveDate,
    upcoming_limit: usize,
) -> DashboardStats {
    DashboardStats {
        volunteer_count: store.volunteers().len(),
        upcoming_service_count: upcoming_services(store.services(), today, upcoming_limit).len(),
        song_count: store.songs().len(),
    }
}
