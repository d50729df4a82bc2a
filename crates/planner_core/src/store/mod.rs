//! In-memory entity store.
//!
//! # Responsibility
//! - Hold the four planning collections as the single source of truth.
//! - Expose add/update/delete/list per collection plus run-sheet edits.
//! - Notify subscribers after each committed mutation.
//!
//! # Invariants
//! - Ids are unique per collection and never reused.
//! - Every service run-sheet keeps `order == position + 1`.

mod blocks;
pub mod collection;
pub mod error;
pub mod listener;
mod planner_store;
pub mod references;

pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use listener::{ChangeKind, StoreChange, StoreListener, SubscriptionId};
pub use planner_store::PlannerStore;
pub use references::ReferenceReport;
