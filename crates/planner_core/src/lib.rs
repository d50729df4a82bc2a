//! Core planning logic for church worship teams: volunteers, songs,
//! services and teams.
//! This crate is the single source of truth for planning invariants.

pub mod auth;
pub mod config;
pub mod db;
pub mod fixtures;
pub mod kv;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod query;
pub mod routes;
pub mod session;
pub mod store;

pub use auth::{
    AuthError, Authenticator, Credentials, MockAuthenticator, Organization, Registration,
    SessionIdentity, User, UserRole,
};
pub use config::{PlannerConfig, ReferencePolicy};
pub use kv::{KeyValueCache, KvError, MemoryCache, SqliteCache};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::service::{
    Assignment, Block, BlockId, BlockKind, BlockPatch, NewBlock, NewService, Service, ServiceId,
    ServicePatch,
};
pub use model::song::{Arrangement, MusicalKey, NewSong, Song, SongId, SongPatch};
pub use model::team::{NewTeam, Team, TeamId, TeamPatch};
pub use model::validation::ValidationError;
pub use model::volunteer::{NewVolunteer, Volunteer, VolunteerId, VolunteerPatch};
pub use model::CollectionKind;
pub use routes::Route;
pub use session::{SessionError, SessionManager, SessionResult, SessionState};
pub use store::{
    ChangeKind, PlannerStore, ReferenceReport, StoreChange, StoreError, StoreListener,
    StoreResult, SubscriptionId,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
