//! Authentication boundary.
//!
//! # Responsibility
//! - Model the signed-in user and organization.
//! - Define the injectable backend that produces them.
//!
//! # See also
//! - `session` for persistence of the resulting identity.

pub mod authenticator;
pub mod identity;

pub use authenticator::{
    AuthError, AuthResult, Authenticator, Credentials, MockAuthenticator, Registration,
};
pub use identity::{Organization, OrganizationId, SessionIdentity, User, UserId, UserRole};
