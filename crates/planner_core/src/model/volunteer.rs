//! Volunteer roster record.

use crate::model::team::TeamId;
use crate::model::validation::{require_email, require_text, ValidationError};
use crate::model::{CollectionKind, Draft, Patch, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type VolunteerId = Uuid;

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Free-text role labels such as `Vocals`.
    pub roles: Vec<String>,
    /// Teams this volunteer belongs to.
    pub team_ids: Vec<TeamId>,
    /// Dates on which the volunteer is unavailable.
    pub blockout_dates: Vec<NaiveDate>,
}

impl Volunteer {
    /// Returns whether `date` is one of the declared blockout dates.
    pub fn is_blocked_out(&self, date: NaiveDate) -> bool {
        self.blockout_dates.contains(&date)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }
}

impl Record for Volunteer {
    const COLLECTION: CollectionKind = CollectionKind::Volunteers;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("volunteer", "name", &self.name)?;
        require_email("volunteer", &self.email)
    }
}

/// Creation input for [`Volunteer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub roles: Vec<String>,
    pub team_ids: Vec<TeamId>,
    pub blockout_dates: Vec<NaiveDate>,
}

impl NewVolunteer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }
}

impl Draft for NewVolunteer {
    type Output = Volunteer;

    fn into_record(self, id: Uuid) -> Volunteer {
        Volunteer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            roles: self.roles,
            team_ids: self.team_ids,
            blockout_dates: self.blockout_dates,
        }
    }
}

/// Partial update for [`Volunteer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the phone number.
    pub phone: Option<Option<String>>,
    pub roles: Option<Vec<String>>,
    pub team_ids: Option<Vec<TeamId>>,
    pub blockout_dates: Option<Vec<NaiveDate>>,
}

impl VolunteerPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..Self::default()
        }
    }
}

impl Patch<Volunteer> for VolunteerPatch {
    fn apply_to(self, record: &mut Volunteer) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(phone) = self.phone {
            record.phone = phone;
        }
        if let Some(roles) = self.roles {
            record.roles = roles;
        }
        if let Some(team_ids) = self.team_ids {
            record.team_ids = team_ids;
        }
        if let Some(blockout_dates) = self.blockout_dates {
            record.blockout_dates = blockout_dates;
        }
    }
}
