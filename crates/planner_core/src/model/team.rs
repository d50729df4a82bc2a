//! Team record grouping volunteers with the roles the team can fill.

use crate::model::validation::{require_text, ValidationError};
use crate::model::volunteer::VolunteerId;
use crate::model::{CollectionKind, Draft, Patch, Record};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub member_ids: Vec<VolunteerId>,
    pub roles: Vec<String>,
}

impl Team {
    pub fn has_member(&self, volunteer_id: VolunteerId) -> bool {
        self.member_ids.contains(&volunteer_id)
    }
}

impl Record for Team {
    const COLLECTION: CollectionKind = CollectionKind::Teams;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("team", "name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub member_ids: Vec<VolunteerId>,
    pub roles: Vec<String>,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Draft for NewTeam {
    type Output = Team;

    fn into_record(self, id: Uuid) -> Team {
        Team {
            id,
            name: self.name,
            member_ids: self.member_ids,
            roles: self.roles,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub member_ids: Option<Vec<VolunteerId>>,
    pub roles: Option<Vec<String>>,
}

impl Patch<Team> for TeamPatch {
    fn apply_to(self, record: &mut Team) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(member_ids) = self.member_ids {
            record.member_ids = member_ids;
        }
        if let Some(roles) = self.roles {
            record.roles = roles;
        }
    }
}
