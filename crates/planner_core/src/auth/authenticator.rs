//! Authentication collaborator contract and the simulated backend.
//!
//! # Responsibility
//! - Turn credentials or a registration form into a session identity.
//!
//! # Invariants
//! - Callers must handle `Err`; no implementation is assumed to succeed.
//! - `MockAuthenticator` blocks for its configured delay, then succeeds.

use crate::auth::identity::{Organization, SessionIdentity, User, UserRole};
use crate::config::AuthConfig;
use crate::model::validation::{require_email, require_text, ValidationError};
use log::info;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Form input failed validation before reaching the backend.
    Validation(ValidationError),
    /// Backend refused the credentials.
    Rejected(String),
    /// Backend could not be reached or answered garbage.
    Unavailable(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Rejected(reason) => write!(f, "authentication rejected: {reason}"),
            Self::Unavailable(reason) => write!(f, "authentication unavailable: {reason}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Rejected(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_email("user", &self.email)?;
        require_text("user", "password", &self.password)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Organization sign-up form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub organization_name: String,
    pub admin_name: String,
    pub admin_email: String,
    pub denomination: Option<String>,
    pub size: Option<String>,
    pub referral_source: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("organization", "name", &self.organization_name)?;
        require_text("organization", "admin name", &self.admin_name)?;
        require_email("organization", &self.admin_email)?;
        require_text("user", "password", &self.password)?;
        if self.password != self.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl Debug for Registration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("organization_name", &self.organization_name)
            .field("admin_name", &self.admin_name)
            .field("admin_email", &self.admin_email)
            .field("denomination", &self.denomination)
            .field("size", &self.size)
            .field("referral_source", &self.referral_source)
            .finish_non_exhaustive()
    }
}

/// External authentication backend.
pub trait Authenticator {
    fn sign_in(&self, credentials: &Credentials) -> AuthResult<SessionIdentity>;
    fn register(&self, registration: &Registration) -> AuthResult<SessionIdentity>;
}

/// Stand-in backend: waits, then accepts every request.
///
/// Emails containing `admin` sign in with the admin role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAuthenticator {
    sign_in_delay: Duration,
    register_delay: Duration,
}

impl MockAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            sign_in_delay: config.sign_in_delay(),
            register_delay: config.register_delay(),
        }
    }

    /// Mock with no simulated latency.
    pub fn immediate() -> Self {
        Self::new(&AuthConfig::immediate())
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}

impl Authenticator for MockAuthenticator {
    fn sign_in(&self, credentials: &Credentials) -> AuthResult<SessionIdentity> {
        simulate_latency(self.sign_in_delay);

        let email = credentials.email.trim().to_string();
        let organization = Organization {
            id: Uuid::new_v4(),
            name: "Grace Community Church".to_string(),
            denomination: Some("Non-denominational".to_string()),
            size: Some("200-500".to_string()),
            admin_name: "John Smith".to_string(),
            admin_email: email.clone(),
            referral_source: Some("Google Search".to_string()),
        };
        let role = if email.contains("admin") {
            UserRole::Admin
        } else {
            UserRole::Volunteer
        };
        let user = User {
            id: Uuid::new_v4(),
            name: "John Smith".to_string(),
            email,
            role,
            organization_id: organization.id,
        };

        info!(
            "event=auth_sign_in module=auth status=ok backend=mock role={:?}",
            user.role
        );
        Ok(SessionIdentity { user, organization })
    }

    fn register(&self, registration: &Registration) -> AuthResult<SessionIdentity> {
        simulate_latency(self.register_delay);

        let organization = Organization {
            id: Uuid::new_v4(),
            name: registration.organization_name.trim().to_string(),
            denomination: registration.denomination.clone(),
            size: registration.size.clone(),
            admin_name: registration.admin_name.trim().to_string(),
            admin_email: registration.admin_email.trim().to_string(),
            referral_source: registration.referral_source.clone(),
        };
        let user = User {
            id: Uuid::new_v4(),
            name: organization.admin_name.clone(),
            email: organization.admin_email.clone(),
            role: UserRole::Admin,
            organization_id: organization.id,
        };

        info!("event=auth_register module=auth status=ok backend=mock");
        Ok(SessionIdentity { user, organization })
    }
}

fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::{Authenticator, Credentials, MockAuthenticator, Registration};
    use crate::auth::identity::UserRole;
    use crate::model::validation::ValidationError;

    fn registration() -> Registration {
        Registration {
            organization_name: "Grace Community Church".to_string(),
            admin_name: "John Smith".to_string(),
            admin_email: "john@grace.org".to_string(),
            denomination: None,
            size: Some("200-500".to_string()),
            referral_source: None,
            password: "hunter22".to_string(),
            password_confirmation: "hunter22".to_string(),
        }
    }

    #[test]
    fn sign_in_role_follows_email() {
        let auth = MockAuthenticator::immediate();

        let admin = auth
            .sign_in(&Credentials::new("admin@grace.org", "pw"))
            .unwrap();
        assert_eq!(admin.user.role, UserRole::Admin);
        assert_eq!(admin.user.organization_id, admin.organization.id);

        let volunteer = auth
            .sign_in(&Credentials::new("sarah@example.com", "pw"))
            .unwrap();
        assert_eq!(volunteer.user.role, UserRole::Volunteer);
    }

    #[test]
    fn register_makes_form_author_the_admin() {
        let identity = MockAuthenticator::immediate()
            .register(&registration())
            .unwrap();

        assert!(identity.user.is_admin());
        assert_eq!(identity.user.email, "john@grace.org");
        assert_eq!(identity.organization.name, "Grace Community Church");
        assert_eq!(identity.organization.size.as_deref(), Some("200-500"));
    }

    #[test]
    fn registration_rejects_password_mismatch() {
        let mut form = registration();
        form.password_confirmation = "hunter23".to_string();
        assert_eq!(form.validate().unwrap_err(), ValidationError::PasswordMismatch);
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let rendered = format!("{:?}", Credentials::new("a@b.co", "secret-pw"));
        assert!(!rendered.contains("secret-pw"));
        assert!(!format!("{:?}", registration()).contains("hunter22"));
    }
}
