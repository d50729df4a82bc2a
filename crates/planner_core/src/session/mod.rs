//! Signed-in session lifecycle.
//!
//! # Responsibility
//! - Drive sign-in, registration and sign-out through an [`Authenticator`].
//! - Mirror the identity pair into a [`KeyValueCache`] and restore it later.
//!
//! # Invariants
//! - The cache holds either both identity blobs or neither.
//! - A failed authenticator call leaves the state and the cache untouched.
//! - `is_loading` is true from construction until `restore` finishes.
//!
//! [`Authenticator`]: crate::auth::Authenticator
//! [`KeyValueCache`]: crate::kv::KeyValueCache

mod error;
mod manager;

pub use error::{SessionError, SessionResult};
pub use manager::{SessionManager, SessionState};
