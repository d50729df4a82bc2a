//! Signed-in identity: the user and the organization they administer or
//! serve in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;
pub type OrganizationId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Volunteer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub organization_id: OrganizationId,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Church or ministry account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub denomination: Option<String>,
    /// Attendance bracket such as `200-500`.
    pub size: Option<String>,
    pub admin_name: String,
    pub admin_email: String,
    /// Answer to "how did you hear about us".
    pub referral_source: Option<String>,
}

/// The (user, organization) pair restored across process restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user: User,
    pub organization: Organization,
}
